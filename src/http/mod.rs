//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace)
//!     → routing::dispatch against the live table
//!     → response.rs (status-only and JSON bodies)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
