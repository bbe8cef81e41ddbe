//! Action responses.

use serde::Serialize;

/// What an action hands back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// Redirect target, sent as `Location`.
    pub location: Option<String>,
}

impl ActionResponse {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
            location: None,
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self {
            content_type: "text/html; charset=utf-8",
            ..Self::text(body)
        }
    }

    pub fn json<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Self {
            content_type: "application/json",
            ..Self::text(serde_json::to_string(value)?)
        })
    }

    /// `302 Found` to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            location: Some(location.into()),
            ..Self::text(String::new())
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}
