//! Configuration schema definitions.
//!
//! A route table is an ordered list of `[[routes]]` entries plus optional
//! server and observability sections. All types derive Serde traits for
//! deserialization from TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::DefaultValue;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutekitConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in matching order.
    pub routes: Vec<RouteDefinition>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Directory handed to actions as their controller path. Must exist.
    pub controller_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
            controller_path: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// One named route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDefinition {
    /// Unique route name, used for URL generation.
    pub name: String,

    /// URL pattern, `:name` marks a variable segment.
    pub pattern: String,

    /// Target as `controller/action`.
    pub handler: String,

    /// Default values per variable; `false` makes a variable optional
    /// without a substitute.
    #[serde(default)]
    pub defaults: BTreeMap<String, DefaultSetting>,

    /// Regular expression per variable.
    #[serde(default)]
    pub requirements: BTreeMap<String, String>,
}

/// A default as written in the route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultSetting {
    /// `false` is the absent marker; `true` is rejected by validation.
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl DefaultSetting {
    /// Convert to a route default. `None` for `true`.
    pub fn to_default(&self) -> Option<DefaultValue> {
        match self {
            DefaultSetting::Flag(false) => Some(DefaultValue::Absent),
            DefaultSetting::Flag(true) => None,
            DefaultSetting::Integer(n) => Some(DefaultValue::Value(n.to_string())),
            DefaultSetting::Text(s) => Some(DefaultValue::Value(s.clone())),
        }
    }
}
