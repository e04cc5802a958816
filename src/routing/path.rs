//! File path to URL pathname conversion.
//!
//! # Rules
//! - `index.route.rs`         → `/`
//! - `todo/index.route.rs`    → `/todo/`
//! - `thing/:id.route.rs`     → `/thing/:id`
//! - anything without the suffix is not a route file

use std::fmt;

const INDEX: &str = "index";

/// The reserved suffix identifying route files: `.{marker}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSuffix {
    suffix: String,
}

impl RouteSuffix {
    pub fn new(marker: &str, extension: &str) -> Self {
        Self {
            suffix: format!(".{marker}.{extension}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.suffix
    }
}

impl Default for RouteSuffix {
    fn default() -> Self {
        Self::new("route", "rs")
    }
}

impl fmt::Display for RouteSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix)
    }
}

/// Convert a `/`-separated path, relative to the routes directory, into a
/// pathname template.
///
/// Returns `None` when the file is not a route file: it lacks the suffix or
/// has nothing in front of it.
pub fn parse_path(relative: &str, suffix: &RouteSuffix) -> Option<String> {
    let stem = relative.strip_prefix('/').unwrap_or(relative);
    let stem = stem.strip_suffix(suffix.as_str())?;

    let (parent, basename) = match stem.rsplit_once('/') {
        Some((parent, basename)) => (Some(parent), basename),
        None => (None, stem),
    };

    if basename.is_empty() {
        return None;
    }

    let pathname = match (parent, basename == INDEX) {
        (None, true) => "/".to_string(),
        (Some(parent), true) => format!("/{parent}/"),
        (_, false) => format!("/{stem}"),
    };

    Some(pathname)
}
