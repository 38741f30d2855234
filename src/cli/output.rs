use crate::source::ImageUrl;

/// Format fetched URLs for display (one per line, or a JSON array)
pub fn format_urls(urls: &[ImageUrl], json: bool) -> String {
    if json {
        serde_json::to_string_pretty(urls).unwrap_or_else(|_| "[]".to_string())
    } else {
        urls.iter()
            .map(ImageUrl::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
