use super::state::GalleryState;
use crate::source::ImageUrl;
use chrono::{DateTime, Utc};

/// Which image the detail view shows, if any
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Viewing(ImageUrl),
}

impl Selection {
    pub fn url(&self) -> Option<&ImageUrl> {
        match self {
            Selection::Idle => None,
            Selection::Viewing(url) => Some(url),
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Selection::Viewing(_))
    }
}

/// A download the user asked for. Only recorded; no bytes are transferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadIntent {
    pub url: ImageUrl,
    pub requested_at: DateTime<Utc>,
}

/// Detail view state machine: `Idle <-> Viewing(url)`
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
    download_intents: Vec<DownloadIntent>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn download_intents(&self) -> &[DownloadIntent] {
        &self.download_intents
    }

    /// Open the detail view. Selecting while already viewing switches images.
    pub fn select(&mut self, url: ImageUrl) {
        tracing::trace!("Selected image {}", url);
        self.selection = Selection::Viewing(url);
    }

    pub fn close(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Add the viewed image to favorites and close the detail view.
    ///
    /// Returns the favorited URL, or `None` when nothing is selected.
    pub fn favorite(&mut self, state: &mut GalleryState) -> Option<ImageUrl> {
        let Selection::Viewing(url) = std::mem::take(&mut self.selection) else {
            tracing::debug!("Favorite requested with no image selected");
            return None;
        };

        state.add_favorite(url.clone());
        tracing::info!("{} added to favorites.", url);
        Some(url)
    }

    /// Record a download request for the viewed image. The view stays open.
    pub fn download(&mut self) -> Option<&DownloadIntent> {
        let Selection::Viewing(url) = &self.selection else {
            tracing::debug!("Download requested with no image selected");
            return None;
        };

        tracing::info!("Downloading image from {}", url);
        self.download_intents.push(DownloadIntent {
            url: url.clone(),
            requested_at: Utc::now(),
        });
        self.download_intents.last()
    }
}
