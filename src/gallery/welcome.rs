//! Welcome screen background slideshow

use super::events::GalleryEvent;
use crate::source::{ImageSource, ImageUrl};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default number of background images fetched for the slideshow
pub const DEFAULT_BACKGROUND_COUNT: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Default time each background stays on screen
pub const DEFAULT_ROTATE_INTERVAL: Duration = Duration::from_secs(8);

/// Shortest accepted rotation period; tokio intervals cannot tick at zero
const MIN_ROTATE_INTERVAL: Duration = Duration::from_millis(1);

/// Circular cursor over the fetched backgrounds
#[derive(Debug, Clone, Default)]
pub struct BackgroundRotation {
    urls: Vec<ImageUrl>,
    index: usize,
}

impl BackgroundRotation {
    pub fn new(urls: Vec<ImageUrl>) -> Self {
        Self { urls, index: 0 }
    }

    pub fn current(&self) -> Option<&ImageUrl> {
        self.urls.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Move to the next background, wrapping after the last one
    pub fn advance(&mut self) {
        if !self.urls.is_empty() {
            self.index = (self.index + 1) % self.urls.len();
        }
    }
}

/// Owns the slideshow task. Dropping it stops the timer.
#[derive(Debug)]
pub struct RotationHandle {
    task: JoinHandle<()>,
}

impl RotationHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Background rotation stopped");
    }
}

/// Fetch `count` backgrounds once, then emit a rotate tick every `period`.
///
/// A failed fetch is reported as `BackgroundsLoaded(Err(..))` and ends the task.
pub fn spawn_rotation<S: ImageSource>(
    source: Arc<S>,
    count: NonZeroUsize,
    period: Duration,
    tx: mpsc::Sender<GalleryEvent>,
) -> RotationHandle {
    let task = tokio::spawn(async move {
        let result = source.fetch_batch(count).await;
        let loaded = result.is_ok();
        if tx.send(GalleryEvent::BackgroundsLoaded(result)).await.is_err() || !loaded {
            return;
        }

        let period = period.max(MIN_ROTATE_INTERVAL);
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        loop {
            interval.tick().await;
            if tx.send(GalleryEvent::RotateBackground).await.is_err() {
                break;
            }
        }
    });

    RotationHandle { task }
}
