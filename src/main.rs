//! File-system router server.
//!
//! ```text
//!  routes/                       route table                 request
//!  ├── index.route.rs      ──▶   /            GET      ◀──   GET /thing/42
//!  ├── health.route.rs     ──▶   /health      GET HEAD        │
//!  ├── thing/:id.route.rs  ──▶   /thing/:id   GET DELETE ─────┘ first match
//!  └── todo/index.route.rs ──▶   /todo/       GET POST
//! ```
//!
//! Route files are compiled into this binary and registered under their path
//! relative to the routes directory; the directory walk decides which of them
//! are served and in what order.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use file_router::config::{load_with_overrides, ConfigOverrides};
use file_router::http::HttpServer;
use file_router::lifecycle::signals::spawn_shutdown_on_signal;
use file_router::lifecycle::startup::{prepare_routes, start_reloaders};
use file_router::lifecycle::Shutdown;
use file_router::observability::{logging, metrics};
use file_router::RouteRegistry;

#[path = "../routes/health.route.rs"]
mod health_route;
#[path = "../routes/index.route.rs"]
mod index_route;
#[path = "../routes/thing/:id.route.rs"]
mod thing_id_route;
#[path = "../routes/todo/index.route.rs"]
mod todo_index_route;

#[derive(Parser)]
#[command(name = "file-router")]
#[command(about = "Serve the route files of a directory", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (optional).
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Override the routes directory.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Rebuild routes when the directory changes.
    #[arg(short, long)]
    watch: bool,
}

fn registry(export: &str) -> RouteRegistry {
    RouteRegistry::new()
        .route("health.route.rs", export, health_route::route())
        .route("index.route.rs", export, index_route::route())
        .route("thing/:id.route.rs", export, thing_id_route::route())
        .route("todo/index.route.rs", export, todo_index_route::route())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        routes_path: cli.routes,
        watch: cli.watch,
    };
    let config = load_with_overrides(&cli.config, &overrides)?;

    logging::init_logging(&config.observability.log_filter)?;
    tracing::info!("file-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes_path = %config.routes.path.display(),
        warn_ambiguous_routes = config.routes.warn_ambiguous_routes,
        watch = config.routes.watch,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let registry = registry(&config.routes.export);
    let prepared = prepare_routes(config.routes.clone(), registry)?;

    let (table_tx, table_rx) = mpsc::unbounded_channel();
    let _watcher = start_reloaders(&prepared.builder, table_tx)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_shutdown_on_signal(shutdown);

    HttpServer::new(prepared.table)
        .run(listener, table_rx, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
