//! Route handlers: the controller/action pair a route resolves to.

use std::fmt;
use std::str::FromStr;

use crate::routing::error::{RoutingError, RoutingResult};

/// Capability the dispatcher needs from whatever a route resolves to.
pub trait HandlerTarget {
    /// Name of the controller.
    fn controller(&self) -> &str;

    /// Name of the action within the controller.
    fn action(&self) -> &str;

    /// Lookup key used by the action registry (`controller/action`).
    fn key(&self) -> String {
        format!("{}/{}", self.controller(), self.action())
    }
}

/// A parsed `controller/action` handler string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteHandler {
    controller: String,
    action: String,
}

impl RouteHandler {
    /// Parse a handler string.
    ///
    /// The string must contain exactly one `/` with a non-empty controller
    /// before it and a non-empty action after it. Whitespace is rejected.
    pub fn new(raw: &str) -> RoutingResult<Self> {
        let invalid = || RoutingError::InvalidHandlerFormat(raw.to_string());

        if raw.matches('/').count() != 1 || raw.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (controller, action) = raw.split_once('/').ok_or_else(invalid)?;
        if controller.is_empty() || action.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            controller: controller.to_string(),
            action: action.to_string(),
        })
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl HandlerTarget for RouteHandler {
    fn controller(&self) -> &str {
        &self.controller
    }

    fn action(&self) -> &str {
        &self.action
    }
}

impl FromStr for RouteHandler {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.controller, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_controller_and_action() {
        let handler = RouteHandler::new("thecontroller/theaction").unwrap();
        assert_eq!(handler.controller(), "thecontroller");
        assert_eq!(handler.action(), "theaction");
        assert_eq!(handler.to_string(), "thecontroller/theaction");
        assert_eq!(HandlerTarget::key(&handler), "thecontroller/theaction");
    }

    #[test]
    fn test_rejects_too_many_slashes() {
        let err = RouteHandler::new("thecontroller/the/action").unwrap_err();
        assert_eq!(
            err,
            RoutingError::InvalidHandlerFormat("thecontroller/the/action".into())
        );
    }

    #[test]
    fn test_rejects_missing_slash() {
        assert!(RouteHandler::new("thecontrollertheaction").is_err());
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(RouteHandler::new("thecontroller theaction").is_err());
        assert!(RouteHandler::new("the controller/theaction").is_err());
    }

    #[test]
    fn test_rejects_empty_halves() {
        assert!(RouteHandler::new("/theaction").is_err());
        assert!(RouteHandler::new("thecontroller/").is_err());
        assert!(RouteHandler::new("/").is_err());
    }

    #[test]
    fn test_from_str() {
        let handler: RouteHandler = "index/index".parse().unwrap();
        assert_eq!(handler.controller(), "index");
    }
}
