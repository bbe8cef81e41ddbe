//! Routing error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building routes, matching paths or generating URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Handler string is not of the form `controller/action`.
    #[error("Invalid route handler `{0}`")]
    InvalidHandlerFormat(String),

    /// URL generation requested for a route name that is not registered.
    #[error("Unknown route: `{0}`")]
    UnknownRoute(String),

    /// No registered route matches the inbound path.
    #[error("No route matches url: `{0}`")]
    NoRouteMatches(String),

    /// A required parameter was not supplied to URL generation.
    #[error("Missing required parameter (`{0}`) in route")]
    MissingRequiredParameter(String),

    /// An absent optional parameter is followed by a present segment.
    #[error("Missing optional parameter (`{0}`) in route")]
    MissingOptionalParameter(String),

    /// A supplied value fails the parameter's requirement pattern.
    #[error("Parameter `{0}` doesn't match the required pattern")]
    ParamRequirementNotMet(String),

    /// A value that cannot stand as one path segment (empty or containing `/`).
    #[error("Parameter `{0}` must be a non-empty value without `/`")]
    InvalidParameterValue(String),

    /// A default-value setting that is neither a value nor the absent marker.
    #[error("Invalid default for parameter `{0}`")]
    InvalidDefault(String),

    /// A requirement pattern failed to compile.
    #[error("Invalid requirement for parameter `{param}`: {reason}")]
    InvalidRequirement { param: String, reason: String },

    /// The same variable name appears twice in one pattern.
    #[error("Parameter `{param}` appears more than once in `{pattern}`")]
    DuplicateParameter { param: String, pattern: String },

    /// A route with this name is already registered.
    #[error("Route `{0}` is already registered")]
    DuplicateRoute(String),

    /// The controller path does not exist.
    #[error("Invalid controller path specified: `{}`", .0.display())]
    InvalidControllerPath(PathBuf),
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
