//! Request path extraction.
//!
//! # Responsibilities
//! - Accept an absolute URL or an origin-form target (`/a/b?x=1#f`)
//! - Strip scheme, host, query and fragment
//! - Expose the path in the shape the router expects
//!
//! # Design Decisions
//! - Parsing goes through the `url` crate; paths stay percent-encoded
//! - `path()` keeps a single leading `/` and drops any trailing `/`

use thiserror::Error;
use url::Url;

use crate::routing::{normalize_path, CurrentPath, Params};

const BASE: &str = "http://localhost/";

/// Errors raised while reading a request target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid request target `{raw}`: {source}")]
    InvalidTarget {
        raw: String,
        #[source]
        source: url::ParseError,
    },
}

/// The path (and query) of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    path: String,
    query: Option<String>,
}

impl RequestPath {
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let invalid = |source| RequestError::InvalidTarget {
            raw: raw.to_string(),
            source,
        };

        let url = match Url::parse(raw) {
            Ok(url) if url.has_host() => url,
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin_form = format!("{BASE}{}", raw.trim_start_matches('/'));
                Url::parse(&origin_form).map_err(invalid)?
            }
            Err(e) => return Err(invalid(e)),
        };

        let trimmed = url.path().trim_end_matches('/');
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };

        Ok(Self {
            path,
            query: url.query().map(str::to_string),
        })
    }

    /// The path with a leading `/` and no trailing `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path with leading and trailing `/` removed.
    pub fn normalized(&self) -> &str {
        normalize_path(&self.path)
    }

    /// The raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decoded query pairs. Later keys overwrite earlier ones.
    pub fn query_params(&self) -> Params {
        let Some(query) = &self.query else {
            return Params::new();
        };
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }
}

impl CurrentPath for RequestPath {
    fn current_path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_form() {
        let req = RequestPath::parse("/articles/7/hello/?x=1#top").unwrap();
        assert_eq!(req.path(), "/articles/7/hello");
        assert_eq!(req.normalized(), "articles/7/hello");
        assert_eq!(req.query(), Some("x=1"));
    }

    #[test]
    fn test_absolute_url() {
        let req = RequestPath::parse("https://example.com/pages/about/").unwrap();
        assert_eq!(req.path(), "/pages/about");
        assert_eq!(req.query(), None);
    }

    #[test]
    fn test_root() {
        assert_eq!(RequestPath::parse("/").unwrap().path(), "/");
        assert_eq!(RequestPath::parse("").unwrap().path(), "/");
        assert_eq!(RequestPath::parse("/?page=2").unwrap().path(), "/");
        assert_eq!(RequestPath::parse("/").unwrap().normalized(), "");
    }

    #[test]
    fn test_relative_target_is_rooted() {
        let req = RequestPath::parse("some/path").unwrap();
        assert_eq!(req.path(), "/some/path");
    }

    #[test]
    fn test_leading_double_slash_is_a_path() {
        let req = RequestPath::parse("//some/path").unwrap();
        assert_eq!(req.path(), "/some/path");
    }

    #[test]
    fn test_path_stays_percent_encoded() {
        let req = RequestPath::parse("/tags/café").unwrap();
        assert_eq!(req.path(), "/tags/caf%C3%A9");
    }

    #[test]
    fn test_query_params() {
        let req = RequestPath::parse("/search?q=rust+router&page=2").unwrap();
        let params = req.query_params();
        assert_eq!(params.get("q").map(String::as_str), Some("rust router"));
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
        assert!(RequestPath::parse("/").unwrap().query_params().is_empty());
    }

    #[test]
    fn test_invalid_target() {
        let err = RequestPath::parse("http://[::1/").unwrap_err();
        assert!(matches!(err, RequestError::InvalidTarget { .. }));
    }

    #[test]
    fn test_current_path() {
        let req = RequestPath::parse("/foo/bar/").unwrap();
        assert_eq!(req.current_path(), "/foo/bar");
    }
}
