//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RequestPath
//!     → Router::resolve (route + extracted params)
//!     → registry.rs (controller/action → registered action)
//!     → action(&ActionContext)
//!     → ActionResponse
//! ```
//!
//! # Design Decisions
//! - Actions are registered statically by `controller/action` key; nothing
//!   is looked up by type name at runtime
//! - Actions receive an explicit context instead of ambient request state
//! - The registry is shared across router reloads

pub mod dispatcher;
pub mod registry;
pub mod response;

pub use dispatcher::{ActionContext, DispatchError, Dispatched, Dispatcher};
pub use registry::{Action, ActionRegistry, ActionResult};
pub use response::ActionResponse;
