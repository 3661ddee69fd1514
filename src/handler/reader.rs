//! File reading module
//!
//! Reads a resolved path in full and classifies failures.

use std::io::ErrorKind;
use std::path::Path;

use hyper::body::Bytes;
use thiserror::Error;
use tokio::fs;

/// Why a file could not be served
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("entry does not exist")]
    NotFound,
    #[error("read failed: {code}")]
    Io { code: String },
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound,
            kind => Self::Io {
                code: error_code(kind),
            },
        }
    }
}

/// Short diagnostic code for an I/O error kind
fn error_code(kind: ErrorKind) -> String {
    match kind {
        ErrorKind::PermissionDenied => "EACCES".to_string(),
        ErrorKind::IsADirectory => "EISDIR".to_string(),
        ErrorKind::NotADirectory => "ENOTDIR".to_string(),
        ErrorKind::InvalidInput => "EINVAL".to_string(),
        ErrorKind::Interrupted => "EINTR".to_string(),
        other => format!("{other:?}"),
    }
}

/// Result of a complete file read
pub type ReadOutcome = Result<Bytes, ReadError>;

/// Read the whole file, never a partial body
pub async fn read_file(path: &Path) -> ReadOutcome {
    let content = fs::read(path).await?;
    Ok(Bytes::from(content))
}
