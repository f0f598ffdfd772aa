//! Authenticated raw-content proxy library.
//!
//! Rewrites short inbound paths (`/gh/...`, `/raw/...`, `/releases/...`, or an
//! embedded `https://` URL) into a single upstream fetch carrying an access
//! token, and relays the answer with cache headers applied.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod routing;
pub mod security;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{match_path, Route};
