pub mod app;
pub mod events;
pub mod state;
pub mod ui;

pub use app::{run_tui, TuiApp};
