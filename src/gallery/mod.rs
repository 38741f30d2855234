//! Screen state of the gallery: lists, pagination, detail view selection,
//! screen routing and the welcome slideshow, tied together by
//! [`GallerySession`].

pub mod events;
pub mod pagination;
pub mod router;
pub mod selection;
pub mod session;
pub mod state;
pub mod welcome;

pub use events::GalleryEvent;
pub use pagination::{PaginationController, ScrollPosition};
pub use router::{Screen, ScreenRouter};
pub use selection::{DownloadIntent, Selection, SelectionController};
pub use session::{GallerySession, SessionSettings};
pub use state::{GalleryState, WatchListEntry};
pub use welcome::{BackgroundRotation, RotationHandle};
