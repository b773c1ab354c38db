//! Pantry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PANTRY_CATALOG_PATH` - Path to the catalog JSON asset
//!
//! ## Optional
//! - `PANTRY_COOKIE_JAR` - Path to the cookie jar file (default: `.pantry/cookies.json`)
//!
//! The selection cookie's name, lifetime and path are fixed constants in
//! [`crate::selection`] and are not configurable.

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_COOKIE_JAR: &str = ".pantry/cookies.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Pantry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryConfig {
    /// Catalog JSON asset
    pub catalog_path: PathBuf,
    /// File holding the persisted cookie jar
    pub cookie_jar: PathBuf,
}

/// Values given on the command line, taking precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog_path: Option<PathBuf>,
    pub cookie_jar: Option<PathBuf>,
}

impl PantryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or empty.
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from `overrides`, falling back to `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required value is missing or empty.
    pub fn from_source(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let catalog_path = match overrides.catalog_path {
            Some(path) => path,
            None => get_required_path(&lookup, "PANTRY_CATALOG_PATH")?,
        };
        let cookie_jar = match overrides.cookie_jar {
            Some(path) => path,
            None => get_path_or_default(&lookup, "PANTRY_COOKIE_JAR", DEFAULT_COOKIE_JAR)?,
        };

        Ok(Self {
            catalog_path,
            cookie_jar,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required path-valued variable.
fn get_required_path(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<PathBuf, ConfigError> {
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    non_empty_path(key, value)
}

/// Get a path-valued variable with a default value.
fn get_path_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    lookup(key).map_or_else(|| Ok(PathBuf::from(default)), |value| non_empty_path(key, value))
}

fn non_empty_path(key: &str, value: String) -> Result<PathBuf, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_source_env_only() {
        let config = PantryConfig::from_source(
            Overrides::default(),
            env(&[("PANTRY_CATALOG_PATH", "assets/foods.json")]),
        )
        .unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("assets/foods.json"));
        assert_eq!(config.cookie_jar, PathBuf::from(DEFAULT_COOKIE_JAR));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            catalog_path: Some(PathBuf::from("cli.json")),
            cookie_jar: Some(PathBuf::from("jar.json")),
        };
        let config = PantryConfig::from_source(
            overrides,
            env(&[
                ("PANTRY_CATALOG_PATH", "env.json"),
                ("PANTRY_COOKIE_JAR", "env-jar.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("cli.json"));
        assert_eq!(config.cookie_jar, PathBuf::from("jar.json"));
    }

    #[test]
    fn test_missing_catalog() {
        let err = PantryConfig::from_source(Overrides::default(), env(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("PANTRY_CATALOG_PATH".to_string())
        );
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = PantryConfig::from_source(
            Overrides::default(),
            env(&[("PANTRY_CATALOG_PATH", "foods.json"), ("PANTRY_COOKIE_JAR", "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PANTRY_COOKIE_JAR"));
    }
}
