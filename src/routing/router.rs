//! Route lookup and URL generation.
//!
//! # Responsibilities
//! - Store routes by unique name, in registration order
//! - Look up the first route matching an inbound path
//! - Build outbound URLs from a route name and parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Built through `RouterBuilder`; duplicate names rejected at registration
//! - O(n) scan in registration order (first match wins)
//! - Explicit NoRouteMatches rather than silent default

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::config::schema::{RouteDefinition, RoutekitConfig};
use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::handler::RouteHandler;
use crate::routing::matcher::RouteMatch;
use crate::routing::route::{DefaultValue, Route};
use crate::routing::Params;

/// Source of the current request's path.
pub trait CurrentPath {
    /// The current path, e.g. `/articles/7`.
    fn current_path(&self) -> &str;
}

impl CurrentPath for str {
    fn current_path(&self) -> &str {
        self
    }
}

impl CurrentPath for String {
    fn current_path(&self) -> &str {
        self
    }
}

/// Collects routes before freezing them into a [`Router`].
#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    controller_path: Option<PathBuf>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Fails if the name is already taken.
    pub fn add_route(&mut self, route: Route) -> RoutingResult<&mut Self> {
        if self.by_name.contains_key(route.name()) {
            return Err(RoutingError::DuplicateRoute(route.name().to_string()));
        }
        self.by_name.insert(route.name().to_string(), self.routes.len());
        self.routes.push(route);
        Ok(self)
    }

    /// By-value form of [`add_route`](Self::add_route) for chaining.
    pub fn route(mut self, route: Route) -> RoutingResult<Self> {
        self.add_route(route)?;
        Ok(self)
    }

    /// Record where the dispatcher's controllers live. The directory must exist.
    pub fn controller_path(&mut self, path: impl AsRef<Path>) -> RoutingResult<&mut Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(RoutingError::InvalidControllerPath(path.to_path_buf()));
        }
        self.controller_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
            by_name: self.by_name,
            controller_path: self.controller_path,
        }
    }
}

/// The application's route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    controller_path: Option<PathBuf>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Build a router from a loaded route table.
    pub fn from_config(config: &RoutekitConfig) -> RoutingResult<Self> {
        let mut builder = RouterBuilder::new();
        for definition in &config.routes {
            builder.add_route(route_from_definition(definition)?)?;
        }
        if let Some(path) = &config.server.controller_path {
            builder.controller_path(path)?;
        }
        Ok(builder.build())
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.routes[i])
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn controller_path(&self) -> Option<&Path> {
        self.controller_path.as_deref()
    }

    /// Build the URL of the named route.
    pub fn url(&self, name: &str, params: &Params) -> RoutingResult<String> {
        self.route(name)
            .ok_or_else(|| RoutingError::UnknownRoute(name.to_string()))?
            .parsed_uri(params)
    }

    /// Build the URL of the named route, or return the current path when
    /// `name` is `None`.
    pub fn uri<R>(&self, name: Option<&str>, params: &Params, request: &R) -> RoutingResult<String>
    where
        R: CurrentPath + ?Sized,
    {
        match name {
            Some(name) => self.url(name, params),
            None => Ok(Self::current_uri(request)),
        }
    }

    /// The current path without its trailing `/` (`/` for the root).
    pub fn current_uri<R>(request: &R) -> String
    where
        R: CurrentPath + ?Sized,
    {
        let path = request.current_path().trim_end_matches('/');
        if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }

    /// First route, in registration order, whose structure fits `path`.
    pub fn route_by_url(&self, path: &str) -> RoutingResult<&Route> {
        self.routes
            .iter()
            .find(|route| route.matches_url(path))
            .ok_or_else(|| RoutingError::NoRouteMatches(path.to_string()))
    }

    /// First route, in registration order, that matches `path` with all
    /// requirements met, together with the extracted parameters.
    pub fn resolve(&self, path: &str) -> RoutingResult<RouteMatch<'_>> {
        self.routes
            .iter()
            .find_map(|route| route.match_url(path))
            .ok_or_else(|| RoutingError::NoRouteMatches(path.to_string()))
    }
}

fn route_from_definition(definition: &RouteDefinition) -> RoutingResult<Route> {
    let handler = RouteHandler::new(&definition.handler)?;

    let defaults: BTreeMap<String, DefaultValue> = definition
        .defaults
        .iter()
        .map(|(param, setting)| {
            setting
                .to_default()
                .map(|value| (param.clone(), value))
                .ok_or_else(|| RoutingError::InvalidDefault(param.clone()))
        })
        .collect::<RoutingResult<_>>()?;

    Route::new(
        definition.name.clone(),
        definition.pattern.clone(),
        handler,
        defaults,
        definition.requirements.clone(),
    )
}
