//! File-system based HTTP router library.
//!
//! Route files under a directory become URL patterns
//! (`thing/:id.route.rs` → `/thing/:id`); requests are dispatched to the
//! handler bound for their method on the first matching route.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod route;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use route::{Method, RouteDefinition, RouteModule, RouteRegistry};
pub use routing::{dispatch, MatchResult, RouteError, RouteTable, RouteTableBuilder, SharedRouteTable};
