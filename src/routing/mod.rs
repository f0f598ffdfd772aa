//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound path
//!     → matcher.rs (classify into a Route, extract coordinates)
//!     → router.rs (build the upstream address, pick the cache policy)
//!     → Return: Dispatch, Index or NoMatch
//! ```
//!
//! # Design Decisions
//! - Route shapes are a closed enum, checked in a fixed priority order
//! - No regex in hot path (prefix and segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::{match_path, Route};
pub use router::{CachePolicy, Dispatch, Resolution, Router, UpstreamAddress};
