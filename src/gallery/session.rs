use super::events::{BatchResult, GalleryEvent};
use super::pagination::{PaginationController, ScrollPosition, DEFAULT_END_THRESHOLD, DEFAULT_PAGE_SIZE};
use super::router::{Screen, ScreenRouter};
use super::selection::{DownloadIntent, Selection, SelectionController};
use super::state::GalleryState;
use super::welcome::{
    spawn_rotation, BackgroundRotation, RotationHandle, DEFAULT_BACKGROUND_COUNT, DEFAULT_ROTATE_INTERVAL,
};
use crate::source::{ImageSource, ImageUrl};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default number of images in the watch list
pub const DEFAULT_WATCH_LIST_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Tunables of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub page_size: NonZeroUsize,
    pub watch_list_size: NonZeroUsize,
    pub end_threshold: f64,
    pub dedupe_in_flight: bool,
    pub background_count: NonZeroUsize,
    pub rotate_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            watch_list_size: DEFAULT_WATCH_LIST_SIZE,
            end_threshold: DEFAULT_END_THRESHOLD,
            dedupe_in_flight: true,
            background_count: DEFAULT_BACKGROUND_COUNT,
            rotate_interval: DEFAULT_ROTATE_INTERVAL,
        }
    }
}

/// Root controller of the gallery screen.
///
/// Owns every piece of screen state. Fetches run as tokio tasks and report
/// back through the event channel; state only changes in [`apply`](Self::apply)
/// and the `on_*` callbacks, all called from the same event loop.
pub struct GallerySession<S: ImageSource> {
    source: Arc<S>,
    events: mpsc::Sender<GalleryEvent>,
    settings: SessionSettings,
    router: ScreenRouter,
    state: GalleryState,
    pagination: PaginationController,
    selection: SelectionController,
    background: BackgroundRotation,
    rotation: Option<RotationHandle>,
}

impl<S: ImageSource> GallerySession<S> {
    pub fn new(source: Arc<S>, settings: SessionSettings, events: mpsc::Sender<GalleryEvent>) -> Self {
        let pagination = PaginationController::new(
            settings.page_size,
            settings.end_threshold,
            settings.dedupe_in_flight,
        );

        Self {
            source,
            events,
            settings,
            router: ScreenRouter::new(),
            state: GalleryState::new(),
            pagination,
            selection: SelectionController::new(),
            background: BackgroundRotation::default(),
            rotation: None,
        }
    }

    /// Start the welcome slideshow. Does nothing once in-app or if already running.
    pub fn start(&mut self) {
        if self.router.screen() != Screen::Welcome || self.rotation.is_some() {
            return;
        }
        tracing::debug!("Starting welcome background rotation");
        self.rotation = Some(spawn_rotation(
            Arc::clone(&self.source),
            self.settings.background_count,
            self.settings.rotate_interval,
            self.events.clone(),
        ));
    }

    /// Apply a finished fetch or timer tick
    pub fn apply(&mut self, event: GalleryEvent) {
        match event {
            GalleryEvent::BackgroundsLoaded(result) => {
                if self.router.screen() != Screen::Welcome {
                    return;
                }
                match result {
                    Ok(urls) => {
                        tracing::debug!("Loaded {} welcome backgrounds", urls.len());
                        self.background = BackgroundRotation::new(urls);
                    }
                    Err(e) => tracing::warn!("Error fetching background images: {}", e),
                }
            }
            GalleryEvent::RotateBackground => {
                if self.router.screen() == Screen::Welcome {
                    self.background.advance();
                }
            }
            GalleryEvent::WatchListLoaded(result) => match result {
                Ok(urls) => {
                    tracing::debug!("Loaded {} watch list images", urls.len());
                    self.state.set_watch_list(urls);
                }
                Err(e) => tracing::warn!("Error fetching watch list images: {}", e),
            },
            GalleryEvent::GalleryPageLoaded(result) => {
                self.pagination.complete(&mut self.state, result);
            }
        }
    }

    /// Explore button: leave the welcome screen and load the in-app lists.
    ///
    /// The entry action runs exactly once per session.
    pub fn on_explore(&mut self) {
        if !self.router.explore() {
            return;
        }

        // Welcome view is gone; stop its timer
        self.rotation = None;

        self.spawn_fetch(self.settings.watch_list_size, GalleryEvent::WatchListLoaded);
        if let Some(n) = self.pagination.on_end_reached() {
            self.spawn_fetch(n, GalleryEvent::GalleryPageLoaded);
        }
    }

    /// Explicit "end of gallery reached" signal
    pub fn on_end_reached(&mut self) {
        if self.router.screen() != Screen::InApp {
            return;
        }
        if let Some(n) = self.pagination.on_end_reached() {
            self.spawn_fetch(n, GalleryEvent::GalleryPageLoaded);
        }
    }

    /// Gallery scroll position changed
    pub fn on_scroll(&mut self, position: ScrollPosition) {
        if self.router.screen() != Screen::InApp {
            return;
        }
        if let Some(n) = self.pagination.on_scroll(position) {
            self.spawn_fetch(n, GalleryEvent::GalleryPageLoaded);
        }
    }

    pub fn on_image_select(&mut self, url: ImageUrl) {
        if self.router.screen() != Screen::InApp {
            tracing::debug!("Ignoring image selection outside the in-app screen");
            return;
        }
        self.selection.select(url);
    }

    pub fn on_close(&mut self) {
        self.selection.close();
    }

    pub fn on_download(&mut self) -> Option<DownloadIntent> {
        self.selection.download().cloned()
    }

    pub fn on_favorite(&mut self) -> Option<ImageUrl> {
        self.selection.favorite(&mut self.state)
    }

    pub fn screen(&self) -> Screen {
        self.router.screen()
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn download_intents(&self) -> &[DownloadIntent] {
        self.selection.download_intents()
    }

    pub fn background(&self) -> Option<&ImageUrl> {
        self.background.current()
    }

    pub fn background_rotation(&self) -> &BackgroundRotation {
        &self.background
    }

    /// True while the welcome slideshow task is alive
    pub fn is_rotating(&self) -> bool {
        self.rotation.as_ref().is_some_and(|r| !r.is_finished())
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    fn spawn_fetch(&self, n: NonZeroUsize, wrap: fn(BatchResult) -> GalleryEvent) {
        let source = Arc::clone(&self.source);
        let tx = self.events.clone();

        tokio::spawn(async move {
            let result = source.fetch_batch(n).await;
            if tx.send(wrap(result)).await.is_err() {
                tracing::trace!("Session closed, dropping batch result");
            }
        });
    }
}
