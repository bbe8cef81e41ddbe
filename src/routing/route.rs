//! A single named URL pattern.
//!
//! # Responsibilities
//! - Split a pattern like `/some/path/:param1/:param2` into segments
//! - Classify variables as required or optional (optional = has a default)
//! - Build a canonical URL from a parameter set (the inverse of matching)
//!
//! # Design Decisions
//! - Segments are derived once at construction and never recomputed
//! - Validation happens before any output is produced: a URL either fully
//!   builds or fails
//! - Requirement patterns are plain `regex` searches, not anchored matches

use std::collections::{BTreeMap, HashSet};

use regex::Regex;

use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::handler::RouteHandler;
use crate::routing::matcher::path_parts;
use crate::routing::Params;

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, compared case-sensitively.
    Static(String),
    /// Named placeholder (`:name` in the pattern) at a fixed position.
    Variable { name: String, position: usize },
}

impl Segment {
    fn parse(part: &str, position: usize) -> Self {
        match part.strip_prefix(':') {
            Some(name) => Segment::Variable {
                name: name.to_string(),
                position,
            },
            None => Segment::Static(part.to_string()),
        }
    }
}

/// Default for a variable that is omitted when building a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Substitute this text.
    Value(String),
    /// Optional with no substitute: the segment is left out entirely.
    Absent,
}

impl DefaultValue {
    /// The substitute text, if there is one.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            DefaultValue::Value(value) => Some(value),
            DefaultValue::Absent => None,
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Value(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Value(value)
    }
}

/// A compiled parameter requirement.
#[derive(Debug, Clone)]
pub struct Requirement {
    regex: Regex,
}

impl Requirement {
    /// Compile a requirement for `param`.
    pub fn new(param: &str, pattern: &str) -> RoutingResult<Self> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|e| RoutingError::InvalidRequirement {
                param: param.to_string(),
                reason: e.to_string(),
            })
    }

    /// Source pattern as written in the route definition.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True if the pattern is found anywhere in `value`.
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// A named route: pattern, handler, defaults and requirements.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    uri: String,
    handler: RouteHandler,
    segments: Vec<Segment>,
    defaults: BTreeMap<String, DefaultValue>,
    requirements: BTreeMap<String, Requirement>,
    required_params: Vec<String>,
    optional_params: Vec<String>,
    variable_params: BTreeMap<usize, String>,
}

impl Route {
    /// Create a route.
    ///
    /// Fails if a requirement does not compile or a variable name is used
    /// twice in the pattern.
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        handler: RouteHandler,
        defaults: BTreeMap<String, DefaultValue>,
        requirements: BTreeMap<String, String>,
    ) -> RoutingResult<Self> {
        let uri = uri.into();

        let segments: Vec<Segment> = path_parts(&uri)
            .into_iter()
            .enumerate()
            .map(|(position, part)| Segment::parse(part, position))
            .collect();

        let mut seen = HashSet::new();
        let mut required_params = Vec::new();
        let mut optional_params = Vec::new();
        let mut variable_params = BTreeMap::new();

        for segment in &segments {
            if let Segment::Variable { name, position } = segment {
                if !seen.insert(name.as_str()) {
                    return Err(RoutingError::DuplicateParameter {
                        param: name.clone(),
                        pattern: uri.clone(),
                    });
                }
                variable_params.insert(*position, name.clone());
                if defaults.contains_key(name) {
                    optional_params.push(name.clone());
                } else {
                    required_params.push(name.clone());
                }
            }
        }

        let requirements = requirements
            .iter()
            .map(|(param, pattern)| Ok((param.clone(), Requirement::new(param, pattern)?)))
            .collect::<RoutingResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            name: name.into(),
            uri,
            handler,
            segments,
            defaults,
            requirements,
            required_params,
            optional_params,
            variable_params,
        })
    }

    /// Start building a route with no defaults or requirements.
    pub fn builder(
        name: impl Into<String>,
        uri: impl Into<String>,
        handler: RouteHandler,
    ) -> RouteBuilder {
        RouteBuilder {
            name: name.into(),
            uri: uri.into(),
            handler,
            defaults: BTreeMap::new(),
            requirements: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw pattern as registered.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn defaults(&self) -> &BTreeMap<String, DefaultValue> {
        &self.defaults
    }

    pub fn requirements(&self) -> &BTreeMap<String, Requirement> {
        &self.requirements
    }

    /// Variables without a default, in pattern order.
    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    /// Variables with a default, in pattern order.
    pub fn optional_params(&self) -> &[String] {
        &self.optional_params
    }

    /// Segment position → variable name.
    pub fn variable_params(&self) -> &BTreeMap<usize, String> {
        &self.variable_params
    }

    pub(crate) fn is_optional(&self, param: &str) -> bool {
        self.defaults.contains_key(param)
    }

    /// Build the URL for this route from `params`.
    ///
    /// Variables take their value from `params`, then from a non-absent
    /// default. Trailing variables with neither are left out. An empty
    /// result is `/`.
    pub fn parsed_uri(&self, params: &Params) -> RoutingResult<String> {
        self.validate_params(params)?;

        let mut uri = String::new();
        for segment in &self.segments {
            let part = match segment {
                Segment::Static(text) => text.as_str(),
                Segment::Variable { name, .. } => match self.value_for(name, params) {
                    Some(value) => value,
                    None => break,
                },
            };
            uri.push('/');
            uri.push_str(part);
        }

        if uri.is_empty() {
            uri.push('/');
        }

        Ok(uri)
    }

    fn value_for<'a>(&'a self, param: &str, params: &'a Params) -> Option<&'a str> {
        params
            .get(param)
            .map(String::as_str)
            .or_else(|| self.defaults.get(param).and_then(DefaultValue::as_value))
    }

    fn validate_params(&self, params: &Params) -> RoutingResult<()> {
        self.validate_required_params(params)?;
        self.validate_optional_params(params)?;
        self.validate_param_values(params)?;
        self.validate_param_requirements(params)
    }

    fn validate_required_params(&self, params: &Params) -> RoutingResult<()> {
        match self.required_params.iter().find(|p| !params.contains_key(*p)) {
            Some(missing) => Err(RoutingError::MissingRequiredParameter(missing.clone())),
            None => Ok(()),
        }
    }

    // Rejects holes such as `/param1//param3`.
    fn validate_optional_params(&self, params: &Params) -> RoutingResult<()> {
        let mut missing: Option<&str> = None;

        for segment in &self.segments {
            let (present, name) = match segment {
                Segment::Static(_) => (true, None),
                Segment::Variable { name, .. } => {
                    (self.value_for(name, params).is_some(), Some(name.as_str()))
                }
            };

            match (present, missing) {
                (true, Some(gap)) => {
                    return Err(RoutingError::MissingOptionalParameter(gap.to_string()))
                }
                (false, None) => missing = name,
                _ => {}
            }
        }

        Ok(())
    }

    // Every inserted value must come back as exactly one path part.
    fn validate_param_values(&self, params: &Params) -> RoutingResult<()> {
        for name in self.variable_params.values() {
            if let Some(value) = self.value_for(name, params) {
                if value.is_empty() || value.contains('/') {
                    return Err(RoutingError::InvalidParameterValue(name.clone()));
                }
            }
        }
        Ok(())
    }

    fn validate_param_requirements(&self, params: &Params) -> RoutingResult<()> {
        for (param, requirement) in &self.requirements {
            if let Some(value) = params.get(param) {
                if !requirement.is_satisfied_by(value) {
                    return Err(RoutingError::ParamRequirementNotMet(param.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Fluent construction of a [`Route`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    name: String,
    uri: String,
    handler: RouteHandler,
    defaults: BTreeMap<String, DefaultValue>,
    requirements: BTreeMap<String, String>,
}

impl RouteBuilder {
    /// Give `param` a default value.
    pub fn default(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults
            .insert(param.into(), DefaultValue::Value(value.into()));
        self
    }

    /// Mark `param` optional with no substitute value.
    pub fn optional(mut self, param: impl Into<String>) -> Self {
        self.defaults.insert(param.into(), DefaultValue::Absent);
        self
    }

    /// Constrain `param` with a regular expression.
    pub fn requirement(mut self, param: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.requirements.insert(param.into(), pattern.into());
        self
    }

    pub fn build(self) -> RoutingResult<Route> {
        Route::new(
            self.name,
            self.uri,
            self.handler,
            self.defaults,
            self.requirements,
        )
    }
}
