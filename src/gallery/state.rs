use crate::source::ImageUrl;

/// Caption shown under every watch list card
pub const WATCH_LIST_LABEL: &str = "Anime Title";

/// Image in the horizontal watch list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchListEntry {
    pub url: ImageUrl,
    pub label: String,
}

impl WatchListEntry {
    pub fn new(url: ImageUrl) -> Self {
        Self {
            url,
            label: WATCH_LIST_LABEL.to_string(),
        }
    }
}

/// In-memory lists of the in-app screen.
///
/// Nothing here deduplicates: the upstream source is random and repeats are
/// kept, as are repeated favorites. The gallery and favorites only grow.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    watch_list: Vec<WatchListEntry>,
    gallery: Vec<ImageUrl>,
    favorites: Vec<ImageUrl>,
    /// Successful gallery batch fetches so far
    cursor: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_gallery(&mut self, urls: impl IntoIterator<Item = ImageUrl>) {
        self.gallery.extend(urls);
    }

    /// Replace the whole watch list
    pub fn set_watch_list(&mut self, urls: impl IntoIterator<Item = ImageUrl>) {
        self.watch_list = urls.into_iter().map(WatchListEntry::new).collect();
    }

    pub fn add_favorite(&mut self, url: ImageUrl) {
        self.favorites.push(url);
    }

    pub fn advance_cursor(&mut self) {
        self.cursor += 1;
    }

    pub fn watch_list(&self) -> &[WatchListEntry] {
        &self.watch_list
    }

    pub fn gallery(&self) -> &[ImageUrl] {
        &self.gallery
    }

    pub fn favorites(&self) -> &[ImageUrl] {
        &self.favorites
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}
