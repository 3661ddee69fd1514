//! Request handler module
//!
//! Static file pipeline: path resolution, file reading, error fallback and the
//! dispatcher tying them together.

pub mod error_page;
pub mod reader;
pub mod resolve;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, serve_path};
