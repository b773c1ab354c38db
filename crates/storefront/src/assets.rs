//! Loading of bundled static assets.
//!
//! The catalog ships as a JSON array of product records. It is read once at
//! startup and handed to [`Catalog`] as an immutable data source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use pantry_core::{Catalog, CatalogError};

/// Errors that can occur while loading an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The asset was read but is not a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read the catalog asset at `path`.
///
/// # Errors
///
/// Returns [`AssetError::Io`] if the file cannot be read and
/// [`AssetError::Catalog`] if it is not a JSON array of catalog records.
#[instrument]
pub fn load_catalog(path: &Path) -> Result<Catalog, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json_str(&text)?;
    info!(records = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
