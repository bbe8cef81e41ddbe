//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with a single dispatching fallback
//! - Wire up middleware (tracing, timeout)
//! - Bind server to listener with graceful shutdown
//! - Publish reloaded route tables without interrupting requests
//! - Record request metrics

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{RoutekitConfig, ServerConfig};
use crate::dispatch::Dispatcher;
use crate::http::request::RequestPath;
use crate::http::response::error_status;
use crate::observability::metrics;
use crate::routing::{Router as RouteTable, RoutingResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ArcSwap<Dispatcher>>,
}

/// HTTP front end feeding every request through the dispatcher.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    dispatcher: Arc<ArcSwap<Dispatcher>>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        let dispatcher = Arc::new(ArcSwap::from_pointee(dispatcher));
        let state = AppState {
            dispatcher: Arc::clone(&dispatcher),
        };
        let router = Self::build_router(&config, state);

        Self {
            router,
            config,
            dispatcher,
        }
    }

    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The axum app, for serving or driving directly in tests.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Handle used to publish a new dispatcher.
    pub fn dispatcher_handle(&self) -> Arc<ArcSwap<Dispatcher>> {
        Arc::clone(&self.dispatcher)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        {
            let current = self.dispatcher.load();
            tracing::info!(
                address = %addr,
                routes = current.router().len(),
                actions = current.actions().len(),
                "HTTP server starting"
            );
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build a router from `config` and publish it with the current actions.
pub fn apply_reload(handle: &ArcSwap<Dispatcher>, config: &RoutekitConfig) -> RoutingResult<()> {
    let table = RouteTable::from_config(config)?;
    let next = handle.load().with_router(Arc::new(table));

    for route in next.unregistered_routes() {
        tracing::warn!(
            route = %route.name(),
            handler = %route.handler(),
            "Route has no registered action"
        );
    }
    tracing::info!(routes = next.router().len(), "Route table published");

    handle.store(Arc::new(next));
    Ok(())
}

/// Apply every table received on `updates` until the sender goes away.
pub fn spawn_reloader(
    handle: Arc<ArcSwap<Dispatcher>>,
    mut updates: mpsc::UnboundedReceiver<RoutekitConfig>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(config) = updates.recv().await {
            if let Err(e) = apply_reload(&handle, &config) {
                tracing::error!(error = %e, "Rejected reloaded route table, keeping current routes");
            }
        }
        tracing::debug!("Reload channel closed");
    })
}

/// Resolves the request path and runs the matching action.
async fn dispatch_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start_time = Instant::now();
    let target = uri.path_and_query().map_or("/", |pq| pq.as_str());

    let request = match RequestPath::parse(target) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(target = %target, error = %e, "Rejected request target");
            metrics::record_request("none", StatusCode::BAD_REQUEST.as_u16(), start_time);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let dispatcher = state.dispatcher.load();
    match dispatcher.dispatch(&request) {
        Ok(dispatched) => {
            tracing::debug!(
                path = %request.path(),
                route = %dispatched.route,
                status = dispatched.response.status,
                "Dispatched request"
            );
            metrics::record_request(&dispatched.route, dispatched.response.status, start_time);
            dispatched.response.into_response()
        }
        Err(e) => {
            let status = error_status(&e);
            if status.is_server_error() {
                tracing::error!(path = %request.path(), error = %e, "Dispatch failed");
            } else {
                tracing::debug!(path = %request.path(), "No route matched");
            }
            metrics::record_request("none", status.as_u16(), start_time);
            e.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
