//! Route table watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RoutekitConfig;

/// Watches a route table file and emits each successfully validated reload.
///
/// A file that fails to load or validate is logged and skipped; the
/// receiver only ever sees complete tables.
pub struct RouteTableWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RoutekitConfig>,
}

impl RouteTableWatcher {
    /// Returns the watcher and a receiver for reloaded tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutekitConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Route table change detected, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            tracing::info!(routes = config.routes.len(), "Route table reloaded");
                            if tx.send(config).is_err() {
                                tracing::debug!("Reload receiver dropped");
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload route table, keeping current routes");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Route table watcher started");
        Ok(watcher)
    }
}
