//! Static file server for local development
//!
//! Maps request paths onto a single server root, infers content types from
//! file extensions, redirects directories to their slash-terminated form,
//! substitutes `index.html` for directory requests and falls back to a
//! custom `404.html` page.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
