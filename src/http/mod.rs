//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, trace + timeout layers)
//!     → request.rs (request target → RequestPath)
//!     → Dispatcher (route, action)
//!     → response.rs (ActionResponse / DispatchError → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestError, RequestPath};
pub use response::error_status;
pub use server::{apply_reload, shutdown_signal, spawn_reloader, AppState, HttpServer};
