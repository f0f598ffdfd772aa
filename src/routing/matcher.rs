//! Path classification.
//!
//! # Responsibilities
//! - Recognize the accepted address shapes in an inbound path
//! - Extract account, repo, reference and file path coordinates
//! - Report unrecognized paths as `Route::Unmatched` instead of failing
//!
//! # Design Decisions
//! - Rules are checked in a fixed order; first match wins
//! - Embedded URLs are checked first so no prefix rule can shadow them
//! - Pure function of the path string: no I/O, no allocation beyond the result
//! - No regex, segment splitting only

use serde::Serialize;

const EMBEDDED_SCHEME: &str = "/https://";
const RELEASES_PREFIX: &str = "/releases/";
const RAW_PREFIX: &str = "/raw/";
const GH_PREFIX: &str = "/gh/";
const BLOB_MARKER: &str = "blob";

/// The shape an inbound path was recognized as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// The path embeds a complete upstream URL.
    DirectRaw { upstream_url: String },

    /// `/releases/{account}/{repo}/download/{tag}/{file}`.
    ReleaseDownload {
        account: String,
        repo: String,
        tag_and_filename: String,
    },

    /// `/raw/{account}/{repo}/{ref}/{path...}`.
    RawShort {
        account: String,
        repo: String,
        reference: String,
        file_path: String,
    },

    /// `/gh/{account}/{repo}/[blob/]{ref}/{path...}`.
    GhShort {
        account: String,
        repo: String,
        reference: String,
        file_path: String,
    },

    /// `/` or the empty path.
    Index,

    /// Nothing above matched.
    Unmatched,
}

impl Route {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::DirectRaw { .. } => "direct_raw",
            Route::ReleaseDownload { .. } => "release_download",
            Route::RawShort { .. } => "raw_short",
            Route::GhShort { .. } => "gh_short",
            Route::Index => "index",
            Route::Unmatched => "unmatched",
        }
    }
}

/// Classify an inbound path.
pub fn match_path(path: &str) -> Route {
    if let Some(route) = match_embedded_url(path) {
        return route;
    }
    if let Some(route) = match_release(path) {
        return route;
    }
    if let Some(rest) = path.strip_prefix(RAW_PREFIX) {
        return match split_file_coordinates(rest, false) {
            Some((account, repo, reference, file_path)) => Route::RawShort {
                account,
                repo,
                reference,
                file_path,
            },
            None => Route::Unmatched,
        };
    }
    if let Some(rest) = path.strip_prefix(GH_PREFIX) {
        return match split_file_coordinates(rest, true) {
            Some((account, repo, reference, file_path)) => Route::GhShort {
                account,
                repo,
                reference,
                file_path,
            },
            None => Route::Unmatched,
        };
    }
    if path.is_empty() || path == "/" {
        return Route::Index;
    }
    Route::Unmatched
}

fn match_embedded_url(path: &str) -> Option<Route> {
    let idx = path.find(EMBEDDED_SCHEME)?;
    Some(Route::DirectRaw {
        upstream_url: path[idx + 1..].to_string(),
    })
}

fn match_release(path: &str) -> Option<Route> {
    let rest = path.strip_prefix(RELEASES_PREFIX)?;
    let mut parts = rest.splitn(4, '/');
    let account = non_empty(parts.next())?;
    let repo = non_empty(parts.next())?;
    if parts.next()? != "download" {
        return None;
    }
    let tag_and_filename = non_empty(parts.next())?;

    Some(Route::ReleaseDownload {
        account: account.to_string(),
        repo: repo.to_string(),
        tag_and_filename: tag_and_filename.to_string(),
    })
}

/// Split `{account}/{repo}/{ref}/{path...}`, optionally skipping a `blob` marker
/// in the reference position.
fn split_file_coordinates(
    rest: &str,
    allow_blob: bool,
) -> Option<(String, String, String, String)> {
    let mut parts = rest.splitn(3, '/');
    let account = non_empty(parts.next())?;
    let repo = non_empty(parts.next())?;
    let mut tail = parts.next()?;

    let (mut reference, mut file_path) = split_first(tail);
    if allow_blob && reference == BLOB_MARKER {
        tail = file_path?;
        (reference, file_path) = split_first(tail);
    }
    if reference.is_empty() {
        return None;
    }

    Some((
        account.to_string(),
        repo.to_string(),
        reference.to_string(),
        file_path.unwrap_or("").to_string(),
    ))
}

fn split_first(s: &str) -> (&str, Option<&str>) {
    match s.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

fn non_empty(part: Option<&str>) -> Option<&str> {
    part.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gh(account: &str, repo: &str, reference: &str, file_path: &str) -> Route {
        Route::GhShort {
            account: account.into(),
            repo: repo.into(),
            reference: reference.into(),
            file_path: file_path.into(),
        }
    }

    #[test]
    fn test_gh_short_form() {
        assert_eq!(
            match_path("/gh/acme/widgets/main/src/a.js"),
            gh("acme", "widgets", "main", "src/a.js")
        );
    }

    #[test]
    fn test_gh_blob_marker_is_dropped() {
        assert_eq!(
            match_path("/gh/acme/widgets/blob/main/a.js"),
            gh("acme", "widgets", "main", "a.js")
        );
        assert_eq!(
            match_path("/gh/acme/widgets/blob/v1.2/deep/dir/a.js"),
            match_path("/gh/acme/widgets/v1.2/deep/dir/a.js"),
        );
    }

    #[test]
    fn test_gh_blob_without_reference_is_unmatched() {
        assert_eq!(match_path("/gh/acme/widgets/blob"), Route::Unmatched);
        assert_eq!(match_path("/gh/acme/widgets/blob/"), Route::Unmatched);
    }

    #[test]
    fn test_raw_does_not_strip_blob() {
        assert_eq!(
            match_path("/raw/acme/widgets/blob/a.js"),
            Route::RawShort {
                account: "acme".into(),
                repo: "widgets".into(),
                reference: "blob".into(),
                file_path: "a.js".into(),
            }
        );
    }

    #[test]
    fn test_raw_short_form() {
        assert_eq!(
            match_path("/raw/acme/widgets/main/a.js"),
            Route::RawShort {
                account: "acme".into(),
                repo: "widgets".into(),
                reference: "main".into(),
                file_path: "a.js".into(),
            }
        );
    }

    #[test]
    fn test_three_segments_match_with_empty_file_path() {
        assert_eq!(match_path("/gh/acme/widgets/main"), gh("acme", "widgets", "main", ""));
    }

    #[test]
    fn test_too_few_segments_unmatched() {
        for path in [
            "/gh/", "/gh/acme", "/gh/acme/widgets", "/gh/acme/widgets/",
            "/raw/", "/raw/acme", "/raw/acme/widgets", "/gh//widgets/main/a.js",
        ] {
            assert_eq!(match_path(path), Route::Unmatched, "path {path}");
        }
    }

    #[test]
    fn test_release_download() {
        assert_eq!(
            match_path("/releases/acme/widgets/download/v1.0/app.zip"),
            Route::ReleaseDownload {
                account: "acme".into(),
                repo: "widgets".into(),
                tag_and_filename: "v1.0/app.zip".into(),
            }
        );
    }

    #[test]
    fn test_malformed_release_unmatched() {
        assert_eq!(match_path("/releases/acme/widgets/tag/v1.0/app.zip"), Route::Unmatched);
        assert_eq!(match_path("/releases/acme/widgets/download/"), Route::Unmatched);
        assert_eq!(match_path("/releases/acme"), Route::Unmatched);
    }

    #[test]
    fn test_embedded_url_anywhere() {
        let expected = Route::DirectRaw {
            upstream_url: "https://raw.githubusercontent.com/acme/widgets/main/a.js".into(),
        };
        assert_eq!(
            match_path("/https://raw.githubusercontent.com/acme/widgets/main/a.js"),
            expected
        );
        assert_eq!(
            match_path("/gh/x/https://raw.githubusercontent.com/acme/widgets/main/a.js"),
            expected
        );
    }

    #[test]
    fn test_embedded_url_beats_prefix_rules() {
        assert!(matches!(
            match_path("/releases/a/b/download/https://example.com/x"),
            Route::DirectRaw { .. }
        ));
    }

    #[test]
    fn test_index_and_unmatched() {
        assert_eq!(match_path(""), Route::Index);
        assert_eq!(match_path("/"), Route::Index);
        assert_eq!(match_path("/nonsense"), Route::Unmatched);
        assert_eq!(match_path("/http://example.com/a"), Route::Unmatched);
    }

    #[test]
    fn test_matching_is_idempotent() {
        for path in ["/gh/a/b/c/d", "/nonsense", "/https://h/x", "/releases/a/b/download/t/f"] {
            assert_eq!(match_path(path), match_path(path));
        }
    }
}
