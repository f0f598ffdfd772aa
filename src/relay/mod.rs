//! Upstream relay subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch (upstream address + cache policy)
//!     → client.rs (one GET with Authorization and User-Agent)
//!     → 2xx: stream body, set Content-Type and Cache-Control
//!     → non-2xx: RelayError::Upstream (status passed through)
//!     → transport failure: RelayError::Transport (500)
//! ```
//!
//! # Design Decisions
//! - No retries and no caching of its own
//! - Bodies are never buffered, release assets can be large
//! - The token is attached as a sensitive default header and never logged

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::{ClientError, RelayError};
