//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the initial route table from validated configuration
//! - Start the reload sources (directory watcher, SIGHUP)
//!
//! # Design Decisions
//! - Fail fast: any route table error aborts startup
//! - Reload sources share one update channel with the server

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use crate::config::RoutesConfig;
use crate::route::RouteRegistry;
use crate::routing::{RouteError, RouteTable, RouteTableBuilder, RoutesWatcher};

/// Everything needed to serve and later rebuild routes.
pub struct PreparedRoutes {
    pub builder: RouteTableBuilder,
    pub table: RouteTable,
}

/// Build the first route table.
pub fn prepare_routes(
    options: RoutesConfig,
    registry: RouteRegistry,
) -> Result<PreparedRoutes, RouteError> {
    let builder = RouteTableBuilder::new(options, registry);
    let table = builder.build()?;

    for entry in table.iter() {
        tracing::info!(
            pattern = %entry.pattern(),
            file = %entry.source(),
            methods = ?entry.definition().methods().collect::<Vec<_>>(),
            "Route registered"
        );
    }

    Ok(PreparedRoutes { builder, table })
}

/// Start the configured reload sources, feeding rebuilt tables into `tx`.
///
/// Returns the directory watcher handle when watching is enabled; it must be
/// kept alive for the lifetime of the server.
pub fn start_reloaders(
    builder: &RouteTableBuilder,
    tx: mpsc::UnboundedSender<RouteTable>,
) -> Result<Option<RecommendedWatcher>, notify::Error> {
    #[cfg(unix)]
    {
        let hangup = crate::lifecycle::signals::spawn_reload_on_hangup(builder.clone(), tx.clone());
        if let Err(e) = hangup {
            tracing::warn!(error = %e, "SIGHUP reload unavailable");
        }
    }

    if !builder.options().watch {
        return Ok(None);
    }

    RoutesWatcher::with_sender(builder.clone(), tx).run().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_fails_fast_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let options = RoutesConfig {
            path: dir.path().join("routes"),
            ..RoutesConfig::default()
        };

        assert!(matches!(
            prepare_routes(options, RouteRegistry::new()),
            Err(RouteError::Configuration { .. })
        ));
    }

    #[test]
    fn test_prepare_fails_fast_on_unregistered_route() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.route.rs"), "").unwrap();
        let options = RoutesConfig {
            path: dir.path().to_path_buf(),
            ..RoutesConfig::default()
        };

        assert!(matches!(
            prepare_routes(options, RouteRegistry::new()),
            Err(RouteError::MissingRouteExport { .. })
        ));
    }
}
