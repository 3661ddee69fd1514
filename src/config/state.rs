// Application state module
// Read-only state shared by every connection task

use std::path::PathBuf;

use super::types::Config;
use crate::http::mime::ContentTypeTable;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated after construction, so request tasks never take a lock.
pub struct AppState {
    pub config: Config,
    /// Absolute server root
    pub root: PathBuf,
    pub content_types: ContentTypeTable,
}

impl AppState {
    /// Create `AppState`, resolving the configured root against the current directory
    pub fn new(config: &Config) -> std::io::Result<Self> {
        let root = config.server_root()?;
        Ok(Self::with_root(config, root))
    }

    /// Create `AppState` serving an explicit root directory
    pub fn with_root(config: &Config, root: PathBuf) -> Self {
        Self {
            config: config.clone(),
            root,
            content_types: ContentTypeTable::new(),
        }
    }

    /// Absolute path of the not-found fallback page
    pub fn not_found_page(&self) -> PathBuf {
        self.root.join(&self.config.http.not_found_page)
    }
}
