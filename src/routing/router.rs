//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Turn a matched `Route` into the single upstream URL to fetch
//! - Attach the cache policy that applies to the route
//! - Return an explicit no-match for index and unrecognized paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Base URLs come from configuration so tests can point at local servers
//! - Deterministic: same path always yields the same address

use std::fmt;

use crate::config::{CacheConfig, UpstreamConfig};
use crate::routing::matcher::{match_path, Route};

/// Fully-qualified URL the relay fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamAddress(String);

impl UpstreamAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpstreamAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a relayed response may be cached and what it defaults to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age_secs: u64,
    pub default_content_type: &'static str,
}

/// Everything the relay needs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub route: Route,
    pub upstream: UpstreamAddress,
    pub policy: CachePolicy,
}

/// Result of resolving an inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Fetch(Dispatch),
    Index,
    NoMatch,
}

/// Resolves inbound paths to upstream addresses.
#[derive(Debug, Clone)]
pub struct Router {
    raw_base: String,
    release_base: String,
    content_policy: CachePolicy,
    release_policy: CachePolicy,
}

impl Router {
    pub fn new(upstream: &UpstreamConfig, cache: &CacheConfig) -> Self {
        Self {
            raw_base: upstream.raw_base_url.trim_end_matches('/').to_string(),
            release_base: upstream.release_base_url.trim_end_matches('/').to_string(),
            content_policy: CachePolicy {
                max_age_secs: cache.content_max_age_secs,
                default_content_type: "text/plain",
            },
            release_policy: CachePolicy {
                max_age_secs: cache.release_max_age_secs,
                default_content_type: "application/octet-stream",
            },
        }
    }

    /// Match `path` and build its upstream address.
    pub fn resolve(&self, path: &str) -> Resolution {
        let route = match_path(path);
        let (upstream, policy) = match &route {
            Route::DirectRaw { upstream_url } => (upstream_url.clone(), self.content_policy),
            Route::ReleaseDownload {
                account,
                repo,
                tag_and_filename,
            } => (
                format!(
                    "{}/{}/{}/releases/download/{}",
                    self.release_base, account, repo, tag_and_filename
                ),
                self.release_policy,
            ),
            Route::RawShort {
                account,
                repo,
                reference,
                file_path,
            }
            | Route::GhShort {
                account,
                repo,
                reference,
                file_path,
            } => (
                format!(
                    "{}/{}/{}/{}/{}",
                    self.raw_base, account, repo, reference, file_path
                ),
                self.content_policy,
            ),
            Route::Index => return Resolution::Index,
            Route::Unmatched => return Resolution::NoMatch,
        };

        Resolution::Fetch(Dispatch {
            route,
            upstream: UpstreamAddress(upstream),
            policy,
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(&UpstreamConfig::default(), &CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(path: &str) -> Dispatch {
        match Router::default().resolve(path) {
            Resolution::Fetch(d) => d,
            other => panic!("expected fetch for {path}, got {other:?}"),
        }
    }

    #[test]
    fn test_gh_readme_address() {
        let d = fetch("/gh/acme/widgets/main/README.md");
        assert_eq!(
            d.upstream.as_str(),
            "https://raw.githubusercontent.com/acme/widgets/main/README.md"
        );
        assert_eq!(d.policy.max_age_secs, 1800);
        assert_eq!(d.policy.default_content_type, "text/plain");
    }

    #[test]
    fn test_raw_and_gh_agree() {
        for (a, r, reference, p) in [
            ("acme", "widgets", "main", "a.js"),
            ("o", "repo", "0123abc", "x/y/z.txt"),
            ("o", "repo", "v2", ""),
        ] {
            let gh = fetch(&format!("/gh/{a}/{r}/{reference}/{p}"));
            let blob = fetch(&format!("/gh/{a}/{r}/blob/{reference}/{p}"));
            let raw = fetch(&format!("/raw/{a}/{r}/{reference}/{p}"));
            assert_eq!(gh.upstream, raw.upstream);
            assert_eq!(gh.upstream, blob.upstream);
            assert!(!blob.upstream.as_str().contains("/blob/"));
        }
    }

    #[test]
    fn test_release_targets_main_host() {
        let d = fetch("/releases/acme/widgets/download/v2.0/app.zip");
        assert_eq!(
            d.upstream.as_str(),
            "https://github.com/acme/widgets/releases/download/v2.0/app.zip"
        );
        assert_eq!(d.policy.max_age_secs, 86400);
        assert_eq!(d.policy.default_content_type, "application/octet-stream");
    }

    #[test]
    fn test_embedded_url_is_verbatim() {
        let d = fetch("/anything/before/https://example.com/a/b.txt");
        assert_eq!(d.upstream.as_str(), "https://example.com/a/b.txt");
        assert_eq!(d.policy.max_age_secs, 1800);
    }

    #[test]
    fn test_configured_bases() {
        let upstream = UpstreamConfig {
            raw_base_url: "http://127.0.0.1:1234/".into(),
            release_base_url: "http://127.0.0.1:5678".into(),
            ..UpstreamConfig::default()
        };
        let cache = CacheConfig {
            content_max_age_secs: 60,
            release_max_age_secs: 120,
        };
        let router = Router::new(&upstream, &cache);

        let Resolution::Fetch(d) = router.resolve("/gh/a/b/c/d") else {
            panic!("expected fetch");
        };
        assert_eq!(d.upstream.as_str(), "http://127.0.0.1:1234/a/b/c/d");
        assert_eq!(d.policy.max_age_secs, 60);

        let Resolution::Fetch(d) = router.resolve("/releases/a/b/download/t/f") else {
            panic!("expected fetch");
        };
        assert_eq!(d.upstream.as_str(), "http://127.0.0.1:5678/a/b/releases/download/t/f");
        assert_eq!(d.policy.max_age_secs, 120);
    }

    #[test]
    fn test_no_match_and_index() {
        let router = Router::default();
        assert_eq!(router.resolve("/"), Resolution::Index);
        assert_eq!(router.resolve("/nonsense"), Resolution::NoMatch);
        assert_eq!(router.resolve("/gh/acme/widgets"), Resolution::NoMatch);
    }
}
