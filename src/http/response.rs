//! HTTP response building module
//!
//! Builders for the handful of responses the upload endpoint produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::HttpConfig;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// Build a 200 plain-text response; HEAD keeps headers and drops the body
pub fn build_text_response(
    body: impl Into<Bytes>,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = body.into();
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", TEXT_PLAIN)
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", TEXT_PLAIN)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "ezupload-test".to_string(),
            enable_cors,
            max_body_size: 1024,
        }
    }

    #[tokio::test]
    async fn test_text_response() {
        let resp = build_text_response("File created.", &http_config(false), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], TEXT_PLAIN);
        assert_eq!(resp.headers()["server"], "ezupload-test");
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "File created.");
    }

    #[tokio::test]
    async fn test_head_drops_body_keeps_length() {
        let resp = build_text_response("File created.", &http_config(true), true);
        assert_eq!(resp.headers()["content-length"], "13");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], ALLOWED_METHODS);
    }

    #[test]
    fn test_options_cors_headers() {
        assert!(build_options_response(false)
            .headers()
            .get("access-control-allow-methods")
            .is_none());
        let resp = build_options_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["access-control-allow-methods"], ALLOWED_METHODS);
    }
}
