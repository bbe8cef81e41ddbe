//! Route matching logic.
//!
//! # Responsibilities
//! - Normalize paths (trim leading/trailing `/`)
//! - Match static parts exactly (case-sensitive), variables match anything
//! - Allow a shorter path only when every missing trailing part is an
//!   optional variable
//! - Recover parameter values by position
//!
//! # Design Decisions
//! - A missing *required* trailing variable never matches
//! - `matches_url` is purely structural; `match_url` also enforces
//!   requirements on the values it extracts

use crate::routing::route::{DefaultValue, Route, Segment};
use crate::routing::Params;

/// Trim leading and trailing `/` from a path or pattern.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Split a normalized path into its parts. The root yields no parts.
pub fn path_parts(path: &str) -> Vec<&str> {
    let normalized = normalize_path(path);
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split('/').collect()
    }
}

/// A route that matched a path, with the parameters recovered from it.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    /// The matched route.
    pub route: &'r Route,
    /// Values taken from the path, plus substitute defaults for omitted
    /// trailing variables. Absent-marker defaults are left out.
    ///
    /// Path values are not percent-decoded: `/tags/caf%C3%A9` yields
    /// `caf%C3%A9`, and requirements see that same text.
    pub params: Params,
}

impl RouteMatch<'_> {
    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl Route {
    /// True if `path` fits this route's structure.
    pub fn matches_url(&self, path: &str) -> bool {
        self.matches_parts(&path_parts(path))
    }

    /// Match `path` and extract its parameters.
    ///
    /// Returns `None` if the structure does not fit or an extracted value
    /// fails its requirement.
    pub fn match_url(&self, path: &str) -> Option<RouteMatch<'_>> {
        let parts = path_parts(path);
        if !self.matches_parts(&parts) {
            return None;
        }

        let mut params = Params::new();
        for (position, name) in self.variable_params() {
            match parts.get(*position) {
                Some(value) => {
                    if let Some(requirement) = self.requirements().get(name) {
                        if !requirement.is_satisfied_by(value) {
                            return None;
                        }
                    }
                    params.insert(name.clone(), (*value).to_string());
                }
                None => {
                    if let Some(DefaultValue::Value(value)) = self.defaults().get(name) {
                        params.insert(name.clone(), value.clone());
                    }
                }
            }
        }

        Some(RouteMatch {
            route: self,
            params,
        })
    }

    fn matches_parts(&self, parts: &[&str]) -> bool {
        let segments = self.segments();
        if parts.len() > segments.len() {
            return false;
        }

        let statics_match = parts
            .iter()
            .zip(segments)
            .all(|(part, segment)| match segment {
                Segment::Static(text) => text == part,
                Segment::Variable { .. } => true,
            });

        statics_match
            && segments[parts.len()..].iter().all(|segment| match segment {
                Segment::Variable { name, .. } => self.is_optional(name),
                Segment::Static(_) => false,
            })
    }
}
