use funtime::gallery::{GalleryEvent, GallerySession, SessionSettings};
use funtime::source::{ImageSource, ImageUrl, NetworkError};
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

/// Scripted outcome of one batch
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Script {
    Urls(Vec<&'static str>),
    Fail(u16),
}

/// In-memory image source.
///
/// Batches are scripted per batch size, so the watch list (10) and gallery
/// pages (5) can be scripted independently even though they run concurrently.
/// Unscripted batches return generated URLs.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedSource {
    scripts: Mutex<HashMap<usize, VecDeque<Script>>>,
    generated: AtomicUsize,
    batch_calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next batch of size `n`
    pub fn script(self, n: usize, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(n)
            .or_default()
            .push_back(script);
        self
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn next_generated(&self) -> ImageUrl {
        let k = self.generated.fetch_add(1, Ordering::SeqCst);
        ImageUrl::new(format!("https://img.test/gen-{}.png", k)).unwrap()
    }
}

impl ImageSource for ScriptedSource {
    async fn fetch_one(&self) -> Result<ImageUrl, NetworkError> {
        Ok(self.next_generated())
    }

    async fn fetch_batch(&self, n: NonZeroUsize) -> Result<Vec<ImageUrl>, NetworkError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        let script = {
            let mut scripts = self.scripts.lock().unwrap();
            scripts.get_mut(&n.get()).and_then(|queue| queue.pop_front())
        };

        match script {
            Some(Script::Urls(urls)) => Ok(urls.into_iter().map(url).collect()),
            Some(Script::Fail(status)) => Err(NetworkError::from_status(status)),
            None => Ok((0..n.get()).map(|_| self.next_generated()).collect()),
        }
    }
}

/// Build an image URL for assertions
#[allow(dead_code)]
pub fn url(name: &str) -> ImageUrl {
    ImageUrl::new(format!("https://img.test/{}.png", name)).unwrap()
}

#[allow(dead_code)]
pub fn urls(names: &[&str]) -> Vec<ImageUrl> {
    names.iter().map(|n| url(n)).collect()
}

/// Create a session over `source` with its event receiver
#[allow(dead_code)]
pub fn create_session<S: ImageSource>(
    source: Arc<S>,
    settings: SessionSettings,
) -> (GallerySession<S>, mpsc::Receiver<GalleryEvent>) {
    let (tx, rx) = mpsc::channel(32);
    (GallerySession::new(source, settings, tx), rx)
}

/// Receive and apply `count` events, failing if any takes too long
#[allow(dead_code)]
pub async fn drain<S: ImageSource>(
    session: &mut GallerySession<S>,
    rx: &mut mpsc::Receiver<GalleryEvent>,
    count: usize,
) {
    for _ in 0..count {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for gallery event")
            .expect("event channel closed");
        session.apply(event);
    }
}
