//! Route table construction.
//!
//! # Responsibilities
//! - Walk the routes directory in a deterministic order
//! - Resolve each route file's designated export through the registry
//! - Compile file paths into patterns
//! - Run the duplicate and ambiguity checks before handing the table out
//!
//! # Design Decisions
//! - Entries keep directory-walk order; that order is dispatch precedence
//! - Any bad file fails the whole build (no partial tables)
//! - The builder owns its configuration; rebuilding reuses the same builder

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::config::RoutesConfig;
use crate::route::{Export, RouteDefinition, RouteRegistry};
use crate::routing::detect::{check_duplicates, find_ambiguous, AmbiguousRoute};
use crate::routing::error::RouteError;
use crate::routing::path::parse_path;
use crate::routing::pattern::{MatchResult, RoutePattern};

/// One compiled route.
#[derive(Debug, Clone)]
pub struct RouteTableEntry {
    pattern: RoutePattern,
    definition: RouteDefinition,
    source: String,
}

impl RouteTableEntry {
    pub fn new(pattern: RoutePattern, definition: RouteDefinition, source: impl Into<String>) -> Self {
        Self {
            pattern,
            definition,
            source: source.into(),
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn definition(&self) -> &RouteDefinition {
        &self.definition
    }

    /// Route file the entry was built from, relative to the routes directory.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Ordered, immutable routing table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteTableEntry>,
    ambiguous: Vec<AmbiguousRoute>,
}

impl RouteTable {
    /// A table with no routes; every request resolves to 404.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RouteTableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteTableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Trailing-slash near-duplicates found while building.
    pub fn ambiguous_routes(&self) -> &[AmbiguousRoute] {
        &self.ambiguous
    }

    /// The first entry, in table order, whose pattern matches `pathname`.
    pub fn find(&self, pathname: &str) -> Option<(&RouteTableEntry, MatchResult)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.match_path(pathname).map(|m| (entry, m)))
    }
}

/// Builds route tables from a routes directory and a module registry.
#[derive(Debug, Clone)]
pub struct RouteTableBuilder {
    options: RoutesConfig,
    registry: Arc<RouteRegistry>,
}

impl RouteTableBuilder {
    pub fn new(options: RoutesConfig, registry: RouteRegistry) -> Self {
        Self {
            options,
            registry: Arc::new(registry),
        }
    }

    pub fn options(&self) -> &RoutesConfig {
        &self.options
    }

    /// The routes directory this builder walks.
    pub fn root(&self) -> &Path {
        &self.options.path
    }

    /// Walk the routes directory and build a table.
    pub fn build(&self) -> Result<RouteTable, RouteError> {
        let files = self.discover()?;
        self.build_from_files(files)
    }

    /// Build a table from already-enumerated relative paths.
    ///
    /// Paths are `/`-separated and relative to the routes directory. Files
    /// without the route suffix are skipped.
    pub fn build_from_files<I, S>(&self, files: I) -> Result<RouteTable, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffix = self.options.suffix();
        let mut entries = Vec::new();

        for file in files {
            let file = file.as_ref();
            let Some(pathname) = parse_path(file, &suffix) else {
                tracing::trace!(file = %file, "Skipping non-route file");
                continue;
            };

            let definition = self.resolve_export(file)?;
            let pattern =
                RoutePattern::compile(pathname.as_str()).map_err(|source| RouteError::InvalidPattern {
                    file: file.to_string(),
                    pattern: pathname.clone(),
                    source,
                })?;

            tracing::debug!(
                pattern = %pattern,
                file = %file,
                methods = ?definition.methods().collect::<Vec<_>>(),
                "Route loaded"
            );
            entries.push(RouteTableEntry::new(pattern, definition, file));
        }

        check_duplicates(&entries)?;

        let ambiguous = if self.options.warn_ambiguous_routes {
            find_ambiguous(&entries)
        } else {
            Vec::new()
        };
        for pair in &ambiguous {
            tracing::warn!(first = %pair.first, second = %pair.second, "Ambiguous routes: {}", pair);
        }

        tracing::info!(route_count = entries.len(), "Route table built");
        Ok(RouteTable { entries, ambiguous })
    }

    fn discover(&self) -> Result<Vec<String>, RouteError> {
        let root = self.root();
        if !root.is_dir() {
            return Err(RouteError::Configuration {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            files.push(relative_path(root, entry.path()));
        }
        Ok(files)
    }

    fn resolve_export(&self, file: &str) -> Result<RouteDefinition, RouteError> {
        let export = &self.options.export;

        match self.registry.lookup(file, export) {
            None => Err(RouteError::MissingRouteExport {
                file: file.to_string(),
                export: export.clone(),
            }),
            Some(Export::Route(definition)) if definition.has_handlers() => Ok(definition.clone()),
            Some(Export::Route(_)) => Err(RouteError::InvalidRouteExport {
                file: file.to_string(),
                export: export.clone(),
                reason: "route defines no method handlers".to_string(),
            }),
            Some(other) => Err(RouteError::InvalidRouteExport {
                file: file.to_string(),
                export: export.clone(),
                reason: format!("expected a route definition, found {}", other.kind()),
            }),
        }
    }
}

/// `path` relative to `root`, joined with `/` regardless of platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
