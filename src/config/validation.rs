//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the routes directory exists
//! - Check the route file suffix parts are usable
//! - Check addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from the directory check

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::schema::RouterConfig;

/// A single semantic configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `routes.path` is missing or not a directory.
    MissingRoutesDirectory(PathBuf),
    /// A required string field is empty.
    Empty(&'static str),
    /// A suffix part contains `.` or `/`.
    InvalidSuffixPart { field: &'static str, value: String },
    /// An address failed to parse.
    InvalidAddress { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingRoutesDirectory(path) => {
                write!(f, "routes directory `{}` does not exist", path.display())
            }
            ValidationError::Empty(field) => write!(f, "`{}` must not be empty", field),
            ValidationError::InvalidSuffixPart { field, value } => {
                write!(f, "`{}` must not contain '.' or '/': {:?}", field, value)
            }
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "`{}` is not a valid socket address: {:?}", field, value)
            }
        }
    }
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.routes.path.is_dir() {
        errors.push(ValidationError::MissingRoutesDirectory(config.routes.path.clone()));
    }

    for (field, value) in [
        ("routes.marker", &config.routes.marker),
        ("routes.extension", &config.routes.extension),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::Empty(field));
        } else if value.contains(['.', '/']) {
            errors.push(ValidationError::InvalidSuffixPart {
                field,
                value: value.clone(),
            });
        }
    }

    if config.routes.export.is_empty() {
        errors.push(ValidationError::Empty("routes.export"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = RouterConfig::default();
        config.routes.path = dir.path().to_path_buf();

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let dir = TempDir::new().unwrap();
        let mut config = RouterConfig::default();
        config.routes.path = dir.path().join("nope");
        config.routes.marker = "ro.ute".to_string();
        config.routes.extension = String::new();
        config.routes.export = String::new();
        config.listener.bind_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::MissingRoutesDirectory(dir.path().join("nope"))));
        assert!(errors.contains(&ValidationError::Empty("routes.extension")));
        assert!(errors.contains(&ValidationError::Empty("routes.export")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let dir = TempDir::new().unwrap();
        let mut config = RouterConfig::default();
        config.routes.path = dir.path().to_path_buf();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(validate_config(&config).unwrap_err().len(), 1);
    }
}
