//! Route table construction errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::routing::pattern::PatternError;

/// Errors that abort building a route table.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The routes directory is missing or is not a directory.
    #[error("routes directory `{}` does not exist or is not a directory", path.display())]
    Configuration { path: PathBuf },

    /// The directory walk failed part-way.
    #[error("failed to walk routes directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The route file provides no designated export.
    #[error("{file} does not provide a `{export}` export")]
    MissingRouteExport { file: String, export: String },

    /// The designated export exists but is not a usable route.
    #[error("{file} does not provide a valid `{export}` export: {reason}")]
    InvalidRouteExport {
        file: String,
        export: String,
        reason: String,
    },

    /// The pathname derived from the file is not a valid template.
    #[error("{file} maps to invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        file: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// Two files resolve to the same route.
    #[error(
        "duplicate route: `{first}` ({first_file}) and `{last}` ({last_file}) resolve to the same path"
    )]
    DuplicateRoute {
        first: String,
        first_file: String,
        last: String,
        last_file: String,
    },
}
