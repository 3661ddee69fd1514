//! HTTP protocol layer module
//!
//! Content type inference and response builders, decoupled from path resolution
//! and filesystem access.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use mime::ContentTypeTable;
pub use response::{
    build_404_response, build_500_response, build_file_response, build_not_found_page_response,
    build_redirect_response,
};
