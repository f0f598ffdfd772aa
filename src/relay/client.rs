//! Credential-bearing upstream client.

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use axum::response::Response;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::response::cache_control;
use crate::relay::error::{ClientError, RelayError};
use crate::routing::Dispatch;

/// Issues exactly one GET per relayed request, with the upstream token attached.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    header_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, ClientError> {
        let mut authorization =
            HeaderValue::from_str(&format!("token {}", upstream.token.expose()))
                .map_err(|_| ClientError::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder()
            .user_agent(upstream.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;

        Ok(Self {
            http,
            header_timeout: Duration::from_secs(timeouts.request_secs),
        })
    }

    /// Fetch the dispatched address and turn the answer into a client response.
    ///
    /// The body is streamed through untouched; only status, content type and
    /// cache headers are set here. Upstream must produce response headers
    /// within `timeouts.request_secs`; the streamed body is not bounded.
    pub async fn relay(
        &self,
        dispatch: &Dispatch,
        inbound_path: &str,
    ) -> Result<Response, RelayError> {
        let send = self.http.get(dispatch.upstream.as_str()).send();
        let upstream = tokio::time::timeout(self.header_timeout, send)
            .await
            .map_err(|_| RelayError::Timeout {
                path: inbound_path.to_string(),
                secs: self.header_timeout.as_secs(),
            })?
            .map_err(|source| RelayError::Transport {
                path: inbound_path.to_string(),
                source,
            })?;

        let status = upstream.status();
        if !status.is_success() {
            return Err(RelayError::Upstream { status });
        }

        let content_type = upstream
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(dispatch.policy.default_content_type));

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, content_type);
        headers.insert(CACHE_CONTROL, cache_control(dispatch.policy.max_age_secs));

        Ok(response)
    }
}
