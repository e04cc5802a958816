//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse a configuration without validating it.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub routes_path: Option<PathBuf>,
    pub watch: bool,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut RouterConfig) {
        if let Some(path) = &self.routes_path {
            config.routes.path = path.clone();
        }
        config.routes.watch |= self.watch;
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file if it exists, otherwise validate and use the defaults.
pub fn load_or_default(path: &Path) -> Result<RouterConfig, ConfigError> {
    load_with_overrides(path, &ConfigOverrides::default())
}

/// Read the file (or the defaults), apply `overrides`, then validate the
/// merged result once.
pub fn load_with_overrides(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<RouterConfig, ConfigError> {
    let mut config = if path.exists() {
        parse_config(&fs::read_to_string(path).map_err(ConfigError::Io)?)?
    } else {
        tracing::info!(path = %path.display(), "No config file found, using defaults");
        RouterConfig::default()
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let routes = dir.path().join("customRoutesDir");
        fs::create_dir(&routes).unwrap();

        let file = dir.path().join("router.toml");
        fs::write(
            &file,
            format!(
                "[routes]\npath = {:?}\nwarn_ambiguous_routes = false\n",
                routes.display().to_string()
            ),
        )
        .unwrap();

        let config = load_config(&file).unwrap();
        assert_eq!(config.routes.path, routes);
        assert!(!config.routes.warn_ambiguous_routes);
    }

    #[test]
    fn test_missing_routes_directory_fails_validation() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("router.toml");
        fs::write(&file, "[routes]\npath = \"/definitely/not/here\"\n").unwrap();

        match load_config(&file) {
            Err(ConfigError::Validation(errors)) => {
                assert!(matches!(errors[0], ValidationError::MissingRoutesDirectory(_)));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(
            parse_config("[routes\npath ="),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config("[routes]\nwarn_ambiguous_routes = \"yes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_config(&dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_override_replaces_missing_routes_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("router.toml");
        fs::write(&file, "[routes]\npath = \"/definitely/not/here\"\n").unwrap();
        let routes = dir.path().join("routes");
        fs::create_dir(&routes).unwrap();

        let overrides = ConfigOverrides {
            routes_path: Some(routes.clone()),
            watch: true,
        };
        let config = load_with_overrides(&file, &overrides).unwrap();
        assert_eq!(config.routes.path, routes);
        assert!(config.routes.watch);
    }

    #[test]
    fn test_bad_override_fails_validation() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent-routes");
        let overrides = ConfigOverrides {
            routes_path: Some(missing.clone()),
            watch: false,
        };

        match load_with_overrides(&dir.path().join("absent.toml"), &overrides) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::MissingRoutesDirectory(missing)]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
