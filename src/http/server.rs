//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Dispatch every request against the live route table
//! - Apply rebuilt route tables as they arrive

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::observability::metrics;
use crate::routing::{dispatch, RouteTable, SharedRouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: SharedRouteTable,
}

/// HTTP transport for the router.
pub struct HttpServer {
    router: Router,
    routes: SharedRouteTable,
}

impl HttpServer {
    /// Create a new HTTP server serving the given table.
    pub fn new(table: RouteTable) -> Self {
        Self::with_shared(SharedRouteTable::new(table))
    }

    /// Create a server around an existing shared table.
    pub fn with_shared(routes: SharedRouteTable) -> Self {
        let state = AppState {
            routes: routes.clone(),
        };
        Self {
            router: Self::build_router(state),
            routes,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(route_request)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Handle to the live table.
    pub fn routes(&self) -> SharedRouteTable {
        self.routes.clone()
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// Tables received on `table_updates` replace the live table; requests in
    /// flight finish against the table they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut table_updates: mpsc::UnboundedReceiver<RouteTable>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route_count = self.routes.current().len(),
            "HTTP server starting"
        );

        let routes = self.routes.clone();
        let updates = tokio::spawn(async move {
            while let Some(table) = table_updates.recv().await {
                routes.replace(table);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        updates.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request goes through the route table.
async fn route_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let table: Arc<RouteTable> = state.routes.current();
    let response = dispatch(request, &table).await;

    let status = response.status().as_u16();
    tracing::debug!(method = %method, path = %path, status, "Request dispatched");
    metrics::record_request(&method, status, start_time);

    response
}
