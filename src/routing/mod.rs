//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup or reload):
//!     routes directory walk (table.rs)
//!     → path.rs (file path → pathname template)
//!     → registry lookup of the designated export
//!     → pattern.rs (compile template)
//!     → detect.rs (duplicate = error, trailing-slash pair = warning)
//!     → Freeze as immutable RouteTable
//!     → shared.rs (atomic swap on reload)
//!
//! Incoming Request (method, path)
//!     → dispatch.rs (first matching entry)
//!     → handler response, or 404 / 405
//! ```
//!
//! # Design Decisions
//! - Tables are immutable; reload builds and swaps a whole new one
//! - Deterministic: same directory always yields the same table
//! - First match wins (ordered by directory walk)

pub mod detect;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod pattern;
pub mod shared;
pub mod table;
pub mod watcher;

pub use detect::AmbiguousRoute;
pub use dispatch::{dispatch, resolve, Resolution};
pub use error::RouteError;
pub use path::{parse_path, RouteSuffix};
pub use pattern::{MatchResult, PatternError, RoutePattern};
pub use shared::SharedRouteTable;
pub use table::{RouteTable, RouteTableBuilder, RouteTableEntry};
pub use watcher::RoutesWatcher;
