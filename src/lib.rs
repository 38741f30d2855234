pub mod app;
pub mod cli;
pub mod gallery;
pub mod source;
pub mod tui;
pub mod util;

pub use app::config::Config;
pub use gallery::GallerySession;
pub use source::{ImageSource, ImageUrl, NetworkError};
