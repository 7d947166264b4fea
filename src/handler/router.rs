//! Request entry point
//!
//! Adapts a hyper request to the pipeline (normalize, classify, build) and
//! hands the resulting response back to the connection.

use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::builder;
use crate::config::AppState;
use crate::http::{HttpResponse, RequestMethod, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::routing::classify_request;

/// The parts of a request the pipeline looks at
#[derive(Debug, Clone, Copy)]
pub struct RawRequest<'a> {
    pub method: RequestMethod,
    /// Undecoded request path, without the query string
    pub target: &'a str,
    pub version: Version,
}

impl<'a> RawRequest<'a> {
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        Self {
            method: RequestMethod::from(req.method()),
            target: req.uri().path(),
            version: req.version(),
        }
    }
}

/// Run the pipeline for one request
///
/// Returns the response and the intent label for logging.
pub async fn process(raw: RawRequest<'_>, state: &AppState) -> (HttpResponse, &'static str) {
    let intent = classify_request(raw.target, raw.method, state.route_context());
    let label = intent.label();
    logger::log_debug(&format!("{} -> {label}", raw.target));
    (builder::build(intent, &state.game).await, label)
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let raw = RawRequest::from_request(&req);
    let (response, intent) = process(raw, &state).await;

    if state.access_log_enabled() {
        let mut entry = access_entry(&req, raw, peer_addr, &response, intent);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response.into_hyper())
}

/// Access log entry for a finished request
///
/// `body_bytes` counts what is sent, so HEAD logs 0.
fn access_entry<B>(
    req: &Request<B>,
    raw: RawRequest<'_>,
    peer_addr: SocketAddr,
    response: &HttpResponse,
    intent: &'static str,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        raw.target.to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(raw.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body_len();
    entry.content_type = response.content_type().to_string();
    entry.intent = intent;
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::loader::parse_game;
    use crate::routing::FileSnapshot;
    use http_body_util::{BodyExt, Empty};
    use hyper::body::Bytes;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use hyper::{Method, StatusCode};
    use tempfile::TempDir;

    const MAPS: &str = r#"{"maps":[{"id":"map1","name":"A"},{"id":"map2","name":"B"}]}"#;
    const INDEX: &str = "<html>maps</html>";

    fn state() -> (TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        std::fs::write(dir.path().join("img/Logo.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let mut config = Config::load_from("/nonexistent/map_server_config").unwrap();
        config.logging.access_log = false;
        config.game.www_root = dir.path().to_path_buf();

        let snapshot = FileSnapshot::capture(dir.path()).unwrap();
        let game = parse_game(MAPS).unwrap();
        (dir, Arc::new(AppState::new(config, game, snapshot)))
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, String, String, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Empty::<Bytes>::new())
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let response = handle_request(req, Arc::clone(state), peer).await.unwrap();

        let status = response.status();
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
        let length = response.headers()[CONTENT_LENGTH].to_str().unwrap().to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, length, body)
    }

    #[tokio::test]
    async fn test_list_maps_in_order() {
        let (_dir, state) = state();
        let (status, content_type, _, body) = send(&state, Method::GET, "/api/v1/maps").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(body, r#"[{"id":"map1","name":"A"},{"id":"map2","name":"B"}]"#);
    }

    #[tokio::test]
    async fn test_api_errors() {
        let (_dir, state) = state();

        let (status, _, _, body) = send(&state, Method::GET, "/api/v1/maps/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"code":"mapNotFound","message":"Map not found"}"#);

        let (status, _, _, body) = send(&state, Method::GET, "/api/v2/foo").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"code":"badRequest","message":"Bad request"}"#);
    }

    #[tokio::test]
    async fn test_static_files() {
        let (_dir, state) = state();

        let (status, content_type, length, body) = send(&state, Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html");
        assert_eq!(length, INDEX.len().to_string());
        assert_eq!(body, INDEX);

        let (status, content_type, _, body) = send(&state, Method::GET, "/img/Logo.PNG").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "image/png");
        assert_eq!(body.as_ref(), &[0x89, b'P', b'N', b'G']);

        let (status, content_type, _, body) = send(&state, Method::GET, "/missing.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "Your file not found");
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let (_dir, state) = state();
        for uri in ["/../../../etc/passwd", "/img/%2e%2e/%2e%2e/%2e%2e/etc/passwd"] {
            let (status, content_type, _, body) = send(&state, Method::GET, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(content_type, "text/plain");
            assert_eq!(body, "Your file is outside root category");
        }
    }

    #[tokio::test]
    async fn test_malformed_target() {
        let (_dir, state) = state();
        let (status, _, _, body) = send(&state, Method::GET, "/bad%zz").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Malformed request target");
    }

    #[tokio::test]
    async fn test_head_mirrors_get_headers() {
        let (_dir, state) = state();
        let (get_status, _, get_length, _) = send(&state, Method::GET, "/api/v1/maps").await;
        let (status, _, length, body) = send(&state, Method::HEAD, "/api/v1/maps").await;
        assert_eq!(status, get_status);
        assert_eq!(length, get_length);
        assert!(body.is_empty());

        let (status, _, length, body) = send(&state, Method::HEAD, "/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(length, INDEX.len().to_string());
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_get_empty_bodies() {
        let (_dir, state) = state();

        let (status, content_type, length, body) = send(&state, Method::POST, "/api/v1/maps").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(length, "0");
        assert!(body.is_empty());

        let (status, _, _, body) = send(&state, Method::DELETE, "/api/v1/maps/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_query_string_is_not_part_of_the_path() {
        let (_dir, state) = state();
        let (status, content_type, _, body) = send(&state, Method::GET, "/index.html?v=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html");
        assert_eq!(body, INDEX);

        let (status, _, _, _) = send(&state, Method::GET, "/api/v1/maps?page=1").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_access_entry_counts_sent_bytes() {
        let (_dir, state) = state();
        let peer: SocketAddr = "10.0.0.7:41000".parse().unwrap();

        for (method, sent) in [(Method::GET, INDEX.len() as u64), (Method::HEAD, 0)] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/index.html?v=2")
                .header("user-agent", "curl/8.0")
                .body(Empty::<Bytes>::new())
                .unwrap();
            let raw = RawRequest::from_request(&req);
            let (response, intent) = process(raw, &state).await;
            let entry = access_entry(&req, raw, peer, &response, intent);

            assert_eq!(entry.remote_addr, "10.0.0.7");
            assert_eq!(entry.method, method.as_str());
            assert_eq!(entry.path, "/index.html");
            assert_eq!(entry.query.as_deref(), Some("v=2"));
            assert_eq!(entry.status, 200);
            assert_eq!(entry.content_type, "text/html");
            assert_eq!(entry.intent, "static_file");
            assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
            assert_eq!(entry.body_bytes, sent, "{method}");
            assert_eq!(response.content_length(), INDEX.len() as u64);
        }
    }
}
