//! Request dispatch module
//!
//! Entry point for HTTP request processing. Every method is handled the same
//! way: resolve the path, then redirect or read, then respond.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};

use super::error_page;
use super::reader;
use super::resolve::{self, TargetKind};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let uri = req.uri();
    let response = serve_path(&state, uri.path(), uri.query()).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            req.method().to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve `path` under the server root and build the response for it
pub async fn serve_path(
    state: &AppState,
    path: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let target = resolve::resolve(&state.root, path, query, &state.config.http.index_file).await;

    if let TargetKind::DirectoryNeedsRedirect { location } = &target.kind {
        return http::build_redirect_response(location);
    }

    match reader::read_file(&target.path).await {
        Ok(content) => {
            let content_type = state.content_types.content_type_for(&target.path);
            http::build_file_response(content, content_type)
        }
        Err(e) => error_page::respond(&e, &target.path, &state.not_found_page()).await,
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// "1.1" style label, as written after `HTTP/` in a request line
fn version_label(version: Version) -> String {
    format!("{version:?}").trim_start_matches("HTTP/").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_TYPE, LOCATION};
    use hyper::{Method, StatusCode};
    use std::fs;
    use std::path::Path;

    fn state_for(root: &Path) -> AppState {
        let mut config = Config::default();
        config.logging.access_log = false;
        AppState::with_root(&config, root.to_path_buf())
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/style.css"), "body { margin: 0 }").unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/index.html"), "<h1>Blog</h1>").unwrap();
        fs::write(dir.path().join("secret file.txt"), "psst").unwrap();
        fs::write(dir.path().join("data.xyz"), "??").unwrap();
        dir
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_stylesheet() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/css/style.css", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        assert!(resp.headers().get(LOCATION).is_none());
        assert_eq!(body_of(resp).await, "body { margin: 0 }");
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/data.xyz", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/octet-stream");
    }

    #[tokio::test]
    async fn test_directory_redirect() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/blog", None).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/blog/");
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_directory_index() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/blog/", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(body_of(resp).await, "<h1>Blog</h1>");
    }

    #[tokio::test]
    async fn test_directory_without_index_falls_back_to_404() {
        let dir = site();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        let resp = serve_path(&state_for(dir.path()), "/drafts/", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_missing_page_with_custom_404() {
        let dir = site();
        fs::write(dir.path().join("404.html"), "<p>custom missing</p>").unwrap();
        let resp = serve_path(&state_for(dir.path()), "/no-such-page.html", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(body_of(resp).await, "<p>custom missing</p>");
    }

    #[tokio::test]
    async fn test_missing_page_without_custom_404() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/no-such-page.html", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_of(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_percent_encoded_name() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/secret%20file.txt", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "psst");
    }

    #[tokio::test]
    async fn test_non_directory_parent_is_500() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/css/style.css/extra", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("ENOTDIR"));
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_500() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/css/style.css/", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("ENOTDIR"));
    }

    #[tokio::test]
    async fn test_unstattable_path_is_read_as_file() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/bad%00name.html", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("EINVAL"));
    }

    #[tokio::test]
    async fn test_encoded_slash_is_not_a_separator() {
        let dir = site();
        let resp = serve_path(&state_for(dir.path()), "/css%2Fstyle.css", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_stays_in_root() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("public");
        fs::create_dir_all(&root).unwrap();
        fs::write(outer.path().join("private.txt"), "top secret").unwrap();

        let resp = serve_path(&state_for(&root), "/../private.txt", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = serve_path(&state_for(&root), "/%2e%2e/private.txt", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_is_ignored() {
        let dir = site();
        let state = Arc::new(state_for(dir.path()));
        let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();

        for method in [Method::GET, Method::POST, Method::DELETE] {
            let req = Request::builder()
                .method(method)
                .uri("/css/style.css?v=3")
                .body(())
                .unwrap();
            let resp = handle_request(req, Arc::clone(&state), addr).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_of(resp).await, "body { margin: 0 }");
        }
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2.0");
    }
}
