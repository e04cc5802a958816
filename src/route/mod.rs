//! Route module subsystem.
//!
//! # Data Flow
//! ```text
//! route file (routes/thing/:id.route.rs)
//!     → compiled into the host binary
//!     → registry.rs (RouteModule registered under "thing/:id.route.rs")
//!     → table builder reads the designated export
//!     → definition.rs (RouteDefinition: one optional handler per verb)
//! ```
//!
//! # Design Decisions
//! - Explicit registration instead of runtime module loading
//! - Closed verb enum; absent handlers are `None`, not missing keys
//! - Definitions are immutable once built

pub mod definition;
pub mod registry;

pub use definition::{Method, Request, Response, RouteDefinition, RouteHandler};
pub use registry::{Export, RouteModule, RouteRegistry};
