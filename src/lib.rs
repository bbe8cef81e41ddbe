//! URL routing for small web applications.
//!
//! Named routes map URL patterns such as `/articles/:id/:slug` to a
//! `controller/action` handler. The [`Router`] resolves inbound paths to a
//! route and its parameters and builds outbound URLs by route name; the
//! [`Dispatcher`] runs the action registered for the resolved handler.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::RoutekitConfig;
pub use dispatch::{ActionContext, ActionRegistry, ActionResponse, DispatchError, Dispatcher};
pub use http::{HttpServer, RequestPath};
pub use routing::{Params, Route, RouteHandler, Router, RoutingError};
