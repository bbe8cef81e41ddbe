//! Response conversion.
//!
//! # Responsibilities
//! - Turn an `ActionResponse` into an axum response
//! - Map dispatch failures to HTTP status codes
//!
//! # Design Decisions
//! - No matching route is 404; a route without code behind it is 500
//! - An out-of-range action status becomes 500 rather than a panic

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::dispatch::{ActionResponse, DispatchError};

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type))],
            self.body,
        )
            .into_response();

        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(_) => {
                    tracing::warn!(location = %location, "Dropping invalid Location header");
                }
            }
        }
        response
    }
}

/// Status code for a failed dispatch.
pub fn error_status(error: &DispatchError) -> StatusCode {
    match error {
        DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
        DispatchError::UnknownAction { .. }
        | DispatchError::DuplicateAction(_)
        | DispatchError::Routing(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = error_status(&self);
        let body = match status {
            StatusCode::NOT_FOUND => self.to_string(),
            _ => "Internal Server Error".to_string(),
        };
        (status, body).into_response()
    }
}
