//! Request dispatch.
//!
//! # Responsibilities
//! - Resolve a request path to a route and its parameters
//! - Locate the action registered for the route's handler
//! - Run the action with an explicit context
//!
//! # Design Decisions
//! - No matching route is `NotFound` (404 at the HTTP layer)
//! - A route whose handler has no registered action is a server error
//! - Router and registry are shared via Arc; a reload swaps the router only

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::dispatch::registry::ActionRegistry;
use crate::dispatch::response::ActionResponse;
use crate::http::request::RequestPath;
use crate::routing::{Params, Route, Router, RoutingError, RoutingResult};

/// Errors raised while dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No route matches the request path.
    #[error("No route matches url: `{0}`")]
    NotFound(String),

    /// The matched route points at a controller/action with no code.
    #[error("Unknown action specified: `{controller}/{action}`")]
    UnknownAction { controller: String, action: String },

    /// An action is already registered under this key.
    #[error("Action `{0}` is already registered")]
    DuplicateAction(String),

    /// A routing error raised while registering or running an action.
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Everything an action may look at. Built per request.
pub struct ActionContext<'a> {
    /// The matched route.
    pub route: &'a Route,
    /// Parameters extracted from the path (with defaults filled in).
    pub params: &'a Params,
    /// The request being served.
    pub request: &'a RequestPath,
    router: &'a Router,
}

impl<'a> ActionContext<'a> {
    /// Get a path parameter by name. The value is still percent-encoded.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).map(String::as_str)
    }

    /// Build a link to a named route, or the current path for `None`.
    pub fn uri(&self, name: Option<&str>, params: &Params) -> RoutingResult<String> {
        self.router.uri(name, params, self.request)
    }

    /// The router serving this request.
    pub fn router(&self) -> &'a Router {
        self.router
    }

    pub fn controller_path(&self) -> Option<&'a Path> {
        self.router.controller_path()
    }
}

/// A successfully dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Name of the route that served the request.
    pub route: String,
    pub response: ActionResponse,
}

/// Routes requests to registered actions.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    actions: Arc<ActionRegistry>,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>, actions: ActionRegistry) -> Self {
        Self {
            router,
            actions: Arc::new(actions),
        }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// A dispatcher serving `router` with the same registered actions.
    pub fn with_router(&self, router: Arc<Router>) -> Self {
        Self {
            router,
            actions: Arc::clone(&self.actions),
        }
    }

    /// Routes whose handler has no registered action, in registration order.
    pub fn unregistered_routes(&self) -> Vec<&Route> {
        self.router
            .routes()
            .filter(|route| !self.actions.contains(route.handler()))
            .collect()
    }

    /// Resolve `request` and run the matching action.
    pub fn dispatch(&self, request: &RequestPath) -> Result<Dispatched, DispatchError> {
        let matched = self
            .router
            .resolve(request.path())
            .map_err(|e| match e {
                RoutingError::NoRouteMatches(path) => DispatchError::NotFound(path),
                other => DispatchError::Routing(other),
            })?;

        let handler = matched.route.handler();
        let action = self
            .actions
            .get(handler)
            .ok_or_else(|| DispatchError::UnknownAction {
                controller: handler.controller().to_string(),
                action: handler.action().to_string(),
            })?;

        let ctx = ActionContext {
            route: matched.route,
            params: &matched.params,
            request,
            router: &self.router,
        };
        let response = action.call(&ctx)?;

        Ok(Dispatched {
            route: matched.route.name().to_string(),
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::registry::ActionResult;
    use crate::routing::RouteHandler;

    fn router() -> Arc<Router> {
        let handler = |raw: &str| RouteHandler::new(raw).unwrap();
        let router = Router::builder()
            .route(Route::builder("index", "/", handler("index/index")).build().unwrap())
            .unwrap()
            .route(
                Route::builder("article", "/articles/:id/:slug", handler("articles/show"))
                    .optional("slug")
                    .requirement("id", r"^\d+$")
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .route(Route::builder("orphan", "/orphan", handler("orphan/index")).build().unwrap())
            .unwrap()
            .build();
        Arc::new(router)
    }

    fn show_article(ctx: &ActionContext<'_>) -> ActionResult {
        let id = ctx.param("id").unwrap_or_default();
        let params: Params = [("id".to_string(), id.to_string())].into();
        let canonical = ctx.uri(Some("article"), &params)?;
        let current = ctx.uri(None, &Params::new())?;
        Ok(ActionResponse::text(format!("{canonical} {current}")))
    }

    fn dispatcher() -> Dispatcher {
        let mut actions = ActionRegistry::new();
        actions
            .register("index/index", |_ctx: &ActionContext<'_>| {
                Ok(ActionResponse::text("home"))
            })
            .unwrap()
            .register("articles/show", show_article)
            .unwrap();
        Dispatcher::new(router(), actions)
    }

    fn path(raw: &str) -> RequestPath {
        RequestPath::parse(raw).unwrap()
    }

    #[test]
    fn test_dispatches_to_registered_action() {
        let d = dispatcher().dispatch(&path("/")).unwrap();
        assert_eq!(d.route, "index");
        assert_eq!(d.response.body, "home");
    }

    #[test]
    fn test_action_sees_params_and_builds_links() {
        let d = dispatcher().dispatch(&path("/articles/7/hello/?x=1")).unwrap();
        assert_eq!(d.route, "article");
        assert_eq!(d.response.body, "/articles/7 /articles/7/hello");
    }

    #[test]
    fn test_not_found() {
        let err = dispatcher().dispatch(&path("/articles/abc")).unwrap_err();
        assert_eq!(err, DispatchError::NotFound("/articles/abc".into()));
    }

    #[test]
    fn test_unknown_action() {
        let err = dispatcher().dispatch(&path("/orphan")).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownAction {
                controller: "orphan".into(),
                action: "index".into(),
            }
        );
        let d = dispatcher();
        let names: Vec<_> = d
            .unregistered_routes()
            .into_iter()
            .map(Route::name)
            .collect();
        assert_eq!(names, ["orphan"]);
    }

    #[test]
    fn test_action_errors_propagate() {
        let mut actions = ActionRegistry::new();
        actions
            .register("index/index", |ctx: &ActionContext<'_>| {
                ctx.uri(Some("nope"), &Params::new()).map(ActionResponse::text)
            })
            .unwrap();
        let d = Dispatcher::new(router(), actions);

        assert_eq!(
            d.dispatch(&path("/")).unwrap_err(),
            DispatchError::Routing(RoutingError::UnknownRoute("nope".into()))
        );
    }

    #[test]
    fn test_with_router_keeps_actions() {
        let d = dispatcher();
        let replacement = Router::builder()
            .route(
                Route::builder("home", "/home", RouteHandler::new("index/index").unwrap())
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .build();
        let reloaded = d.with_router(Arc::new(replacement));

        assert_eq!(reloaded.actions().len(), 2);
        assert_eq!(reloaded.dispatch(&path("/home")).unwrap().route, "home");
        assert!(matches!(
            reloaded.dispatch(&path("/")),
            Err(DispatchError::NotFound(_))
        ));
    }
}
