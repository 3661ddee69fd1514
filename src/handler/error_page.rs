//! Error response module
//!
//! Turns a failed read into the client-facing response.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::reader::{self, ReadError};
use crate::http;
use crate::logger;

/// Respond to a failed primary read
pub async fn respond(
    error: &ReadError,
    requested: &Path,
    not_found_page: &Path,
) -> Response<Full<Bytes>> {
    match error {
        ReadError::NotFound => respond_not_found(not_found_page).await,
        ReadError::Io { code } => {
            logger::log_error(&format!(
                "Failed to read file '{}': {code}",
                requested.display()
            ));
            http::build_500_response(code)
        }
    }
}

/// Serve the fallback page with 404, or the inline text if it is unreadable too
pub async fn respond_not_found(not_found_page: &Path) -> Response<Full<Bytes>> {
    match reader::read_file(not_found_page).await {
        Ok(page) => http::build_not_found_page_response(page),
        Err(e) => {
            logger::log_debug(&format!(
                "Fallback page '{}' unavailable: {e}",
                not_found_page.display()
            ));
            http::build_404_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::CONTENT_TYPE;
    use hyper::StatusCode;

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_fallback_page_served() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("404.html");
        std::fs::write(&page, "<h1>gone</h1>").unwrap();

        let resp = respond(&ReadError::NotFound, &dir.path().join("x"), &page).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(body_of(resp).await, "<h1>gone</h1>");
    }

    #[tokio::test]
    async fn test_missing_fallback_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("404.html");

        let resp = respond(&ReadError::NotFound, &dir.path().join("x"), &page).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_of(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_unreadable_fallback_page() {
        // A directory named like the fallback page fails with a non-NotFound error
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("404.html");
        std::fs::create_dir(&page).unwrap();

        let resp = respond_not_found(&page).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_io_error_is_500_with_code() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("404.html");
        std::fs::write(&page, "unused").unwrap();

        let error = ReadError::Io {
            code: "EACCES".to_string(),
        };
        let resp = respond(&error, &dir.path().join("x"), &page).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("EACCES"));
    }
}
