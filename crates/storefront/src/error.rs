//! Unified error type for Pantry front ends.
//!
//! Library operations that can fail return their own error enums. `AppError`
//! gathers them so binaries can use `?` across modules.

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::cookies::JarError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be resolved.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog asset could not be loaded.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The cookie jar could not be read or written.
    #[error("Cookie jar error: {0}")]
    Jar(#[from] JarError),

    /// Output could not be produced.
    #[error("Output error: {0}")]
    Output(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err.to_string())
    }
}
