//! Response construction.
//!
//! # Responsibilities
//! - Build the Cache-Control value for relayed responses
//! - Build error, usage and index responses
//!
//! # Design Decisions
//! - Every locally generated response is `text/plain` and `no-store`
//! - Relayed bodies are never touched here, only headers
//! - `Access-Control-Allow-Origin` is added for every response by a layer in server.rs

use axum::body::Body;
use axum::http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::Response;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const NO_STORE: &str = "no-store";

/// Usage text returned for unrecognized paths.
pub const USAGE: &str = "\
Unsupported path. Use one of the following formats:

  /gh/{account}/{repo}/{ref}/{path}
  /raw/{account}/{repo}/{ref}/{path}
  /releases/{account}/{repo}/download/{tag}/{filename}
  /https://raw.githubusercontent.com/{account}/{repo}/{ref}/{path}

A link copied from the file viewer (/gh/{account}/{repo}/blob/{ref}/{path}) works too.
";

const INDEX: &str = "\
gh-proxy

Fetches files and release assets through an authenticated upstream client.

  /gh/{account}/{repo}/{ref}/{path}
  /gh/{account}/{repo}/blob/{ref}/{path}
  /raw/{account}/{repo}/{ref}/{path}
  /releases/{account}/{repo}/download/{tag}/{filename}
  /https://raw.githubusercontent.com/{account}/{repo}/{ref}/{path}
";

/// `public, max-age=<secs>`.
pub fn cache_control(max_age_secs: u64) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={}", max_age_secs))
        .unwrap_or_else(|_| HeaderValue::from_static(NO_STORE))
}

/// Plain-text response that intermediaries must not cache.
pub fn error_response(status: StatusCode, body: impl Into<String>) -> Response {
    text_response(status, body.into(), HeaderValue::from_static(NO_STORE))
}

/// 400 listing the supported path formats.
pub fn usage_response() -> Response {
    error_response(StatusCode::BAD_REQUEST, USAGE)
}

/// Static informational page served at `/`.
pub fn index_response() -> Response {
    text_response(StatusCode::OK, INDEX.to_string(), cache_control(3600))
}

fn text_response(status: StatusCode, body: String, cache: HeaderValue) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    headers.insert(CACHE_CONTROL, cache);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_value() {
        assert_eq!(cache_control(1800), "public, max-age=1800");
        assert_eq!(cache_control(86400), "public, max-age=86400");
    }

    #[test]
    fn test_usage_lists_every_format() {
        for format in ["/gh/", "/raw/", "/releases/", "/https://"] {
            assert!(USAGE.contains(format), "missing {format}");
        }
        let response = usage_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(response.headers()[CONTENT_TYPE], TEXT_PLAIN);
    }

    #[test]
    fn test_index_is_ok() {
        assert_eq!(index_response().status(), StatusCode::OK);
    }
}
