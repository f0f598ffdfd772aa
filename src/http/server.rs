//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler
//! - Wire up middleware (tracing, request ID, CORS header)
//! - Bind server to listener
//! - Resolve inbound paths and relay the upstream response
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::http::response::{index_response, usage_response};
use crate::observability::metrics;
use crate::relay::{ClientError, UpstreamClient};
use crate::routing::{Resolution, Router as PathRouter};
use crate::security::allow_any_origin_layer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PathRouter>,
    pub client: UpstreamClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ClientError> {
        let client = UpstreamClient::new(&config.upstream, &config.timeouts)?;
        let state = AppState {
            router: Arc::new(PathRouter::new(&config.upstream, &config.cache)),
            client,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Upstream timeouts are enforced by the relay, which answers them with a
    /// regular error response.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(set_request_id_layer())
            .layer(allow_any_origin_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            raw_base_url = %self.config.upstream.raw_base_url,
            release_base_url = %self.config.upstream.release_base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the path, fetches the upstream address, and relays the answer.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id_of(&request);
    // Path only: a query string, even one trailing an embedded URL, is not forwarded.
    let path = request.uri().path().to_string();

    let dispatch = match state.router.resolve(&path) {
        Resolution::Fetch(dispatch) => dispatch,
        Resolution::Index => {
            metrics::record_request("index", 200, start_time);
            return index_response();
        }
        Resolution::NoMatch => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request("unmatched", 400, start_time);
            return usage_response();
        }
    };

    let kind = dispatch.route.kind();
    tracing::debug!(
        request_id = %request_id,
        route = kind,
        upstream = %dispatch.upstream,
        "Relaying request"
    );

    let response = match state.client.relay(&dispatch, &path).await {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(request_id = %request_id, route = kind, error = %e, "Upstream error");
            } else {
                tracing::warn!(request_id = %request_id, route = kind, error = %e, "Upstream rejected request");
            }
            e.into_response()
        }
    };

    metrics::record_request(kind, response.status().as_u16(), start_time);
    response
}
