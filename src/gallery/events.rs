use crate::source::{ImageUrl, NetworkError};

/// Result of a batch fetch
pub type BatchResult = Result<Vec<ImageUrl>, NetworkError>;

/// Completions of background work, applied to the session on the event loop
#[derive(Debug)]
pub enum GalleryEvent {
    /// Welcome slideshow images fetched (once per welcome screen)
    BackgroundsLoaded(BatchResult),
    /// Welcome slideshow timer fired
    RotateBackground,
    /// Watch list batch finished
    WatchListLoaded(BatchResult),
    /// Gallery page batch finished
    GalleryPageLoaded(BatchResult),
}
