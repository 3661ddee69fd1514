//! Request path resolution module
//!
//! Maps a request path onto the server root and classifies the result.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::logger;

/// How a request target maps onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Regular file or missing entry; the read decides which
    File,
    /// Directory requested without a trailing slash
    DirectoryNeedsRedirect { location: String },
    /// Directory requested with a trailing slash, path points at its index file
    DirectoryNeedsIndex,
}

/// Candidate filesystem path for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Outcome of probing whether a candidate path is a directory
///
/// `Unknown` covers stat failures other than absence (permissions, I/O).
/// It is treated exactly like `NotDirectory`: the request falls through to a
/// plain file lookup and the read reports the real failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryCheck {
    Directory,
    NotDirectory,
    Unknown,
}

impl DirectoryCheck {
    pub async fn probe(path: &Path) -> Self {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) => Self::NotDirectory,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::NotDirectory,
            Err(e) => {
                logger::log_debug(&format!(
                    "Directory check failed for '{}': {e}, treating as file",
                    path.display()
                ));
                Self::Unknown
            }
        }
    }

    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Resolve a request path (without query) under `root`
///
/// `query` is re-attached to the redirect location when a trailing slash
/// has to be added.
pub async fn resolve(
    root: &Path,
    target: &str,
    query: Option<&str>,
    index_file: &str,
) -> ResolvedTarget {
    let decoded = decode_uri(target);
    let candidate = join_under_root(root, &decoded);

    if !DirectoryCheck::probe(&candidate).await.is_directory() {
        return ResolvedTarget {
            path: candidate,
            kind: TargetKind::File,
        };
    }

    if target.ends_with('/') {
        ResolvedTarget {
            path: candidate.join(index_file),
            kind: TargetKind::DirectoryNeedsIndex,
        }
    } else {
        let location = match query {
            Some(q) => format!("{target}/?{q}"),
            None => format!("{target}/"),
        };
        ResolvedTarget {
            path: candidate,
            kind: TargetKind::DirectoryNeedsRedirect { location },
        }
    }
}

/// Join a decoded URL path onto `root`, normalising `.` and `..` lexically
///
/// `..` never climbs above `root`, so the result always stays inside it.
pub fn join_under_root(root: &Path, decoded: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut depth = 0usize;

    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if depth > 0 {
                    path.pop();
                    depth -= 1;
                }
            }
            name => {
                path.push(name);
                depth += 1;
            }
        }
    }

    // Keep the trailing separator so "file.css/" fails as a non-directory
    if decoded.ends_with('/') {
        path.push("");
    }

    path
}

/// Escapes of these bytes stay encoded, so `%2F` can never add a path segment
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Percent-decode a request path, leaving escapes of reserved characters intact
///
/// Invalid UTF-8 produced by decoding is replaced lossily.
pub fn decode_uri(target: &str) -> String {
    let bytes = target.as_bytes();
    let mut decoded = String::with_capacity(target.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let reserved = bytes[i] == b'%'
            && bytes
                .get(i + 1..i + 3)
                .and_then(hex_byte)
                .is_some_and(|b| URI_RESERVED.contains(&b));
        if reserved {
            decoded.push_str(&percent_decode_str(&target[start..i]).decode_utf8_lossy());
            decoded.push_str(&target[i..i + 3]);
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }

    decoded.push_str(&percent_decode_str(&target[start..]).decode_utf8_lossy());
    decoded
}

fn hex_byte(digits: &[u8]) -> Option<u8> {
    let hi = char::from(digits[0]).to_digit(16)?;
    let lo = char::from(digits[1]).to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}
