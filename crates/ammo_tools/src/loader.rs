//! File loading and saving.
//!
//! The database snapshot is JSON in this tool's own schema (the
//! serialized `Database`), not the host's raw table layout. The mod
//! configuration is RON.

use std::path::Path;

use ammo_core::config::ModConfig;
use ammo_core::error::AmmoError;
use ammo_core::database::{Database, Handbook};
use thiserror::Error;

/// Errors that can occur while reading or writing data files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read or write a file.
    #[error("Failed to access file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or produce JSON.
    #[error("Failed to process JSON file '{path}': {source}")]
    JsonError {
        /// Path to the file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse the mod configuration.
    #[error("Invalid configuration '{path}': {source}")]
    ConfigError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: AmmoError,
    },
}

/// Result type for file operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn read(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoadError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

fn write(path: &Path, contents: &str) -> LoadResult<()> {
    std::fs::write(path, contents).map_err(|e| LoadError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load a database snapshot from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_database(path: &Path) -> LoadResult<Database> {
    let contents = read(path)?;
    let db: Database = serde_json::from_str(&contents).map_err(|e| LoadError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        "Loaded database '{}' with {} items, {} handbook entries, {} locales, {} traders",
        path.display(),
        db.items.len(),
        db.handbook.items.len(),
        db.locales.len(),
        db.traders.len()
    );
    Ok(db)
}

/// Write a database snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the database cannot be serialized or written.
pub fn save_database(path: &Path, db: &Database) -> LoadResult<()> {
    let json = serde_json::to_string_pretty(db).map_err(|e| LoadError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;
    write(path, &json)?;
    tracing::info!("Wrote database to '{}'", path.display());
    Ok(())
}

/// Load the mod configuration from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> LoadResult<ModConfig> {
    let contents = read(path)?;
    let config = ModConfig::from_ron_str(&contents).map_err(|e| LoadError::ConfigError {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        "Loaded config '{}' with {} templates",
        path.display(),
        config.templates.len()
    );
    Ok(config)
}

/// Write every handbook id, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_handbook_dump(path: &Path, handbook: &Handbook) -> LoadResult<()> {
    let mut data = String::new();
    for entry in &handbook.items {
        data.push_str(&entry.id);
        data.push('\n');
    }
    write(path, &data)
}
