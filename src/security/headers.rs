//! Response header policy.
//!
//! # Responsibilities
//! - Allow cross-origin reads of every response
//!
//! # Design Decisions
//! - Applied as a layer so error and usage responses carry it too
//! - Overrides whatever the upstream sent

use axum::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Access-Control-Allow-Origin: *` on every response.
pub fn allow_any_origin_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}
