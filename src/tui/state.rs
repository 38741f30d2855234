use crate::gallery::ScrollPosition;
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Number of columns in the gallery grid
pub const GALLERY_COLUMNS: usize = 2;

/// How long a status message stays in the status bar
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Pane receiving arrow keys on the in-app screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Horizontal watch list
    WatchList,
    /// Two-column infinite gallery
    #[default]
    Gallery,
}

impl FocusPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusPane::WatchList => FocusPane::Gallery,
            FocusPane::Gallery => FocusPane::WatchList,
        }
    }
}

/// View-only state of the terminal UI (cursor positions, scroll, redraw flag).
///
/// Screen content lives in the gallery session; this only tracks how it is shown.
#[derive(Debug)]
pub struct TuiState {
    pub focus: FocusPane,
    /// Highlighted watch list card
    pub watch_index: usize,
    /// Highlighted gallery image
    pub gallery_index: usize,
    /// First visible gallery row
    pub gallery_scroll_row: usize,
    /// Gallery rows that fit on screen, written by the renderer
    pub gallery_viewport_rows: Cell<usize>,
    /// Set by the renderer when the viewport height changes
    viewport_changed: Cell<bool>,
    status: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: FocusPane::default(),
            watch_index: 0,
            gallery_index: 0,
            gallery_scroll_row: 0,
            gallery_viewport_rows: Cell::new(0),
            viewport_changed: Cell::new(false),
            status: None,
            needs_redraw: true, // Initial render needed
        }
    }

    /// Visible window of the gallery, in images
    pub fn gallery_scroll_position(&self, total: usize) -> ScrollPosition {
        ScrollPosition {
            first_visible: self.gallery_scroll_row * GALLERY_COLUMNS,
            visible: self.gallery_viewport_rows.get() * GALLERY_COLUMNS,
            total,
        }
    }

    /// Move the gallery highlight by `rows` and `cols`, scrolling to keep it visible
    pub fn move_gallery(&mut self, rows: isize, cols: isize, total: usize) {
        if total == 0 {
            self.gallery_index = 0;
            return;
        }

        let delta = rows * GALLERY_COLUMNS as isize + cols;
        let target = self.gallery_index as isize + delta;
        self.gallery_index = target.clamp(0, total as isize - 1) as usize;
        self.scroll_to_highlight();
    }

    pub fn jump_gallery_to_end(&mut self, total: usize) {
        self.gallery_index = total.saturating_sub(1);
        self.scroll_to_highlight();
    }

    pub fn move_watch_list(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.watch_index = 0;
            return;
        }
        let target = self.watch_index as isize + delta;
        self.watch_index = target.clamp(0, total as isize - 1) as usize;
    }

    /// Keep cursors inside lists that were replaced
    pub fn clamp_to(&mut self, watch_total: usize, gallery_total: usize) {
        self.watch_index = self.watch_index.min(watch_total.saturating_sub(1));
        self.gallery_index = self.gallery_index.min(gallery_total.saturating_sub(1));
    }

    fn scroll_to_highlight(&mut self) {
        let row = self.gallery_index / GALLERY_COLUMNS;
        let visible_rows = self.gallery_viewport_rows.get().max(1);

        if row < self.gallery_scroll_row {
            self.gallery_scroll_row = row;
        } else if row >= self.gallery_scroll_row + visible_rows {
            self.gallery_scroll_row = row + 1 - visible_rows;
        }
    }

    /// Record the gallery viewport height measured during rendering
    pub fn set_viewport_rows(&self, rows: usize) {
        if self.gallery_viewport_rows.replace(rows) != rows {
            self.viewport_changed.set(true);
        }
    }

    /// True once after each viewport height change
    pub fn take_viewport_changed(&self) -> bool {
        self.viewport_changed.replace(false)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
        self.mark_dirty();
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(message, _)| message.as_str())
    }

    /// Drop the status message once it is old enough
    pub fn expire_status(&mut self, now: Instant) {
        if let Some((_, set_at)) = &self.status {
            if now.duration_since(*set_at) >= STATUS_TTL {
                self.status = None;
                self.mark_dirty();
            }
        }
    }

    /// Mark UI as needing redraw
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Check if UI needs redraw
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clear dirty flag after rendering
    pub fn clear_dirty(&mut self) {
        self.needs_redraw = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_rows(rows: usize) -> TuiState {
        let state = TuiState::new();
        state.set_viewport_rows(rows);
        state
    }

    #[test]
    fn test_move_gallery_clamps() {
        let mut state = state_with_rows(3);

        state.move_gallery(0, -1, 10);
        assert_eq!(state.gallery_index, 0);

        state.move_gallery(10, 0, 10);
        assert_eq!(state.gallery_index, 9);
    }

    #[test]
    fn test_move_gallery_scrolls_to_keep_highlight_visible() {
        let mut state = state_with_rows(2);

        // Row 3 (indices 6, 7) is below a 2-row viewport
        state.move_gallery(3, 0, 20);
        assert_eq!(state.gallery_index, 6);
        assert_eq!(state.gallery_scroll_row, 2);

        state.move_gallery(-3, 0, 20);
        assert_eq!(state.gallery_scroll_row, 0);
    }

    #[test]
    fn test_scroll_position_in_images() {
        let mut state = state_with_rows(4);
        state.gallery_scroll_row = 3;

        let position = state.gallery_scroll_position(15);

        assert_eq!(position, ScrollPosition { first_visible: 6, visible: 8, total: 15 });
    }

    #[test]
    fn test_viewport_change_reported_once() {
        let state = TuiState::new();

        state.set_viewport_rows(5);
        assert!(state.take_viewport_changed());
        assert!(!state.take_viewport_changed());

        state.set_viewport_rows(5);
        assert!(!state.take_viewport_changed());
    }

    #[test]
    fn test_status_expires() {
        let mut state = TuiState::new();
        state.set_status("Added to favorites");

        state.expire_status(Instant::now());
        assert_eq!(state.status(), Some("Added to favorites"));

        state.expire_status(Instant::now() + STATUS_TTL);
        assert_eq!(state.status(), None);
    }

    #[test]
    fn test_clamp_after_shorter_watch_list() {
        let mut state = TuiState::new();
        state.watch_index = 8;

        state.clamp_to(3, 0);

        assert_eq!(state.watch_index, 2);
        assert_eq!(state.gallery_index, 0);
    }
}
