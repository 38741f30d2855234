//! Infinite-scroll pagination
//!
//! Decides when the gallery needs another batch. The controller does no I/O:
//! it answers "should a batch be issued now?" and keeps the in-flight count,
//! and the session performs the fetch and reports back.

use super::state::GalleryState;
use crate::source::{ImageUrl, NetworkError};
use std::num::NonZeroUsize;

/// Default distance from the end, in viewport lengths, that counts as "end reached"
pub const DEFAULT_END_THRESHOLD: f64 = 0.5;

/// Default number of images per gallery batch
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// Visible window of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    /// Index of the first visible item
    pub first_visible: usize,
    /// Number of items that fit in the viewport
    pub visible: usize,
    /// Number of rendered items
    pub total: usize,
}

impl ScrollPosition {
    /// Items below the viewport
    pub fn remaining(&self) -> usize {
        self.total
            .saturating_sub(self.first_visible.saturating_add(self.visible))
    }

    /// True when the unrendered remainder is within `threshold` viewports of the end
    pub fn is_near_end(&self, threshold: f64) -> bool {
        if self.total == 0 {
            return true;
        }
        self.remaining() as f64 <= threshold * self.visible as f64
    }
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    page_size: NonZeroUsize,
    threshold: f64,
    /// Refuse to issue a batch while another is still running
    dedupe_in_flight: bool,
    in_flight: usize,
    /// Gallery length at which the scroll trigger last fired
    latched_at: Option<usize>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_END_THRESHOLD, true)
    }
}

impl PaginationController {
    pub fn new(page_size: NonZeroUsize, threshold: f64, dedupe_in_flight: bool) -> Self {
        Self {
            page_size,
            threshold: threshold.clamp(0.0, 1.0),
            dedupe_in_flight,
            in_flight: 0,
            latched_at: None,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Scroll signal from the view.
    ///
    /// Fires at most once per rendered gallery length, like a list view's
    /// end-reached callback. Returns the batch size to fetch, if any.
    pub fn on_scroll(&mut self, position: ScrollPosition) -> Option<NonZeroUsize> {
        if !position.is_near_end(self.threshold) {
            return None;
        }
        if self.latched_at == Some(position.total) {
            tracing::trace!("End already reached at length {}, ignoring", position.total);
            return None;
        }
        self.latched_at = Some(position.total);
        self.on_end_reached()
    }

    /// Explicit end-reached signal. Returns the batch size to fetch, if any.
    pub fn on_end_reached(&mut self) -> Option<NonZeroUsize> {
        if self.dedupe_in_flight && self.in_flight > 0 {
            tracing::debug!("Gallery batch already in flight, skipping trigger");
            return None;
        }
        self.in_flight += 1;
        tracing::debug!(
            "Requesting gallery batch of {} ({} in flight)",
            self.page_size,
            self.in_flight
        );
        Some(self.page_size)
    }

    /// Record the outcome of a batch issued by [`on_end_reached`](Self::on_end_reached).
    ///
    /// Success appends and advances the cursor. Failure is logged and dropped.
    pub fn complete(&mut self, state: &mut GalleryState, result: Result<Vec<ImageUrl>, NetworkError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(urls) => {
                tracing::debug!("Gallery batch loaded: {} images", urls.len());
                state.append_gallery(urls);
                state.advance_cursor();
            }
            Err(e) => {
                tracing::warn!("Error fetching gallery images: {}", e);
                // Let the next scroll signal at this length try again
                self.latched_at = None;
            }
        }
    }
}
