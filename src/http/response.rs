//! HTTP response building module
//!
//! Provides builders for the status codes the file server produces. Each response
//! carries at most one of `Content-Type` or `Location`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Body sent with 404 when the fallback page cannot be read
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Build 200 OK response with file contents
pub fn build_file_response(data: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 Moved Permanently response with empty body
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 response carrying the configured fallback page
pub fn build_not_found_page_response(page: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/html")
        .body(Full::new(page))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)))
        })
}

/// Build 404 Not Found response without a content type
pub fn build_404_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Build 500 Internal Server Error response naming the failure code
pub fn build_500_response(code: &str) -> Response<Full<Bytes>> {
    let body = format!("Sorry, check with the site admin for error: {code} ..\n");
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{CONTENT_TYPE, LOCATION};

    #[test]
    fn test_redirect_has_location_only() {
        let resp = build_redirect_response("/blog/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/blog/");
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_plain_404_has_no_content_type() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().is_empty());
    }

    #[test]
    fn test_500_has_no_headers() {
        let resp = build_500_response("EACCES");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().is_empty());
    }
}
