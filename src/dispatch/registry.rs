//! Statically registered actions keyed by `controller/action`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::dispatcher::{ActionContext, DispatchError};
use crate::dispatch::response::ActionResponse;
use crate::routing::{HandlerTarget, RouteHandler, RoutingError};

/// Result of running an action. Link-building failures propagate as
/// routing errors.
pub type ActionResult = Result<ActionResponse, RoutingError>;

/// Executable code behind a controller/action pair.
pub trait Action: Send + Sync {
    fn call(&self, ctx: &ActionContext<'_>) -> ActionResult;
}

impl<F> Action for F
where
    F: Fn(&ActionContext<'_>) -> ActionResult + Send + Sync,
{
    fn call(&self, ctx: &ActionContext<'_>) -> ActionResult {
        self(ctx)
    }
}

/// Table of registered actions.
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under a `controller/action` handler string.
    ///
    /// Fails on a malformed handler string or a key that is already taken.
    pub fn register<F>(&mut self, handler: &str, action: F) -> Result<&mut Self, DispatchError>
    where
        F: Fn(&ActionContext<'_>) -> ActionResult + Send + Sync + 'static,
    {
        let key = RouteHandler::new(handler)?.to_string();
        if self.actions.contains_key(&key) {
            return Err(DispatchError::DuplicateAction(key));
        }
        self.actions.insert(key, Arc::new(action));
        Ok(self)
    }

    /// Look up the action for a handler.
    pub fn get(&self, handler: &impl HandlerTarget) -> Option<&Arc<dyn Action>> {
        self.actions.get(&handler.key())
    }

    pub fn contains(&self, handler: &impl HandlerTarget) -> bool {
        self.get(handler).is_some()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.actions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.keys())
            .finish()
    }
}
