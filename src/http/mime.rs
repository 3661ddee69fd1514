//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

use std::collections::HashMap;
use std::path::Path;

/// Content type used when an extension is missing or not in the table
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension (with leading dot) to MIME type entries served by default
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    // Text
    (".html", "text/html"),
    (".css", "text/css"),
    (".json", "application/json"),

    // JavaScript/WASM
    (".js", "text/javascript"),
    (".wasm", "application/wasm"),

    // Images
    (".png", "image/png"),
    (".jpg", "image/jpg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),

    // Audio/Video
    (".wav", "audio/wav"),
    (".mp4", "video/mp4"),

    // Fonts
    (".woff", "application/font-woff"),
    (".ttf", "application/font-ttf"),
    (".eot", "application/vnd.ms-fontobject"),
    (".otf", "application/font-otf"),
];

/// Immutable extension to MIME type table
///
/// Built once at startup and shared read-only by every request.
///
/// # Examples
/// ```
/// use static_webserver::http::mime::ContentTypeTable;
/// use std::path::Path;
///
/// let table = ContentTypeTable::new();
/// assert_eq!(table.content_type_for(Path::new("style.CSS")), "text/css");
/// assert_eq!(table.content_type_for(Path::new("data.xyz")), "application/octet-stream");
/// ```
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    entries: HashMap<&'static str, &'static str>,
}

impl ContentTypeTable {
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_ENTRIES.iter().copied().collect(),
        }
    }

    /// Get MIME Content-Type for a path based on its final extension
    pub fn content_type_for(&self, path: &Path) -> &'static str {
        // `Path::extension` already ignores a leading dot (".htaccess" has none)
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return DEFAULT_CONTENT_TYPE;
        };
        let key = format!(".{}", ext.to_lowercase());
        self.entries
            .get(key.as_str())
            .copied()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self::new()
    }
}
