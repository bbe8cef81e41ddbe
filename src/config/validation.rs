//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check handler strings, requirement patterns and default settings
//! - Check defaults/requirements refer to variables of their pattern
//! - Detect duplicate route names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RoutekitConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RouteDefinition, RoutekitConfig};
use crate::routing::{path_parts, Requirement, RouteHandler, RoutingError};

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one route must be defined")]
    NoRoutes,

    #[error("route `{0}` is defined more than once")]
    DuplicateRoute(String),

    #[error("route `{route}`: {source}")]
    Route {
        route: String,
        #[source]
        source: RoutingError,
    },

    #[error("route `{route}`: {kind} for unknown parameter `{param}`")]
    UnknownParameter {
        route: String,
        param: String,
        kind: &'static str,
    },

    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RoutekitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut names = HashSet::new();
    for route in &config.routes {
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
        validate_route(route, &mut errors);
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteDefinition, errors: &mut Vec<ValidationError>) {
    let mut fail = |source: RoutingError| {
        errors.push(ValidationError::Route {
            route: route.name.clone(),
            source,
        })
    };

    if let Err(e) = RouteHandler::new(&route.handler) {
        fail(e);
    }

    let mut variables = HashSet::new();
    for part in path_parts(&route.pattern) {
        if let Some(name) = part.strip_prefix(':') {
            if !variables.insert(name) {
                fail(RoutingError::DuplicateParameter {
                    param: name.to_string(),
                    pattern: route.pattern.clone(),
                });
            }
        }
    }

    for (param, setting) in &route.defaults {
        if setting.to_default().is_none() {
            fail(RoutingError::InvalidDefault(param.clone()));
        }
    }

    for (param, pattern) in &route.requirements {
        if let Err(e) = Requirement::new(param, pattern) {
            fail(e);
        }
    }

    let unknown = |kind: &'static str, param: &String| {
        (!variables.contains(param.as_str())).then(|| ValidationError::UnknownParameter {
            route: route.name.clone(),
            param: param.clone(),
            kind,
        })
    };
    let unknown_errors: Vec<_> = route
        .defaults
        .keys()
        .filter_map(|p| unknown("default", p))
        .chain(route.requirements.keys().filter_map(|p| unknown("requirement", p)))
        .collect();
    errors.extend(unknown_errors);
}
