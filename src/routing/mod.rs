//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table (at startup):
//!     RouteDefinition[]
//!     → handler.rs (parse "controller/action")
//!     → route.rs (split pattern into static/variable segments)
//!     → router.rs (RouterBuilder, registration order kept)
//!     → Freeze as immutable Router
//!
//! Incoming path:
//!     → matcher.rs (structural match, parameter extraction)
//!     → Return: matched Route or NoRouteMatches
//!
//! Outgoing link:
//!     route name + params
//!     → route.rs (validate, rebuild canonical path)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First match wins (registration order, not specificity)
//! - Requirements compiled once, matched as unanchored searches
//! - No logging in the core; errors propagate to the caller

pub mod error;
pub mod handler;
pub mod matcher;
pub mod route;
pub mod router;

use std::collections::HashMap;

pub use error::{RoutingError, RoutingResult};
pub use handler::{HandlerTarget, RouteHandler};
pub use matcher::{normalize_path, path_parts, RouteMatch};
pub use route::{DefaultValue, Requirement, Route, RouteBuilder, Segment};
pub use router::{CurrentPath, Router, RouterBuilder};

/// Parameter values keyed by variable name.
pub type Params = HashMap<String, String>;
