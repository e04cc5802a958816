//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::path::RouteSuffix;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route discovery settings.
    pub routes: RoutesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7776").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7776".to_string(),
        }
    }
}

/// Route discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Directory holding the route files.
    pub path: PathBuf,

    /// Log a warning for routes that differ only by a trailing slash.
    pub warn_ambiguous_routes: bool,

    /// Marker in the route file suffix (`index.<marker>.<extension>`).
    pub marker: String,

    /// Extension in the route file suffix.
    pub extension: String,

    /// Name of the export each route module must provide.
    pub export: String,

    /// Rebuild the route table when the routes directory changes.
    pub watch: bool,
}

impl RoutesConfig {
    /// The suffix identifying route files.
    pub fn suffix(&self) -> RouteSuffix {
        RouteSuffix::new(&self.marker, &self.extension)
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("routes/"),
            warn_ambiguous_routes: true,
            marker: "route".to_string(),
            extension: "rs".to_string(),
            export: "route".to_string(),
            watch: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Prometheus metrics address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "file_router=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
