//! The apply pipeline: load, install, save.

use std::path::PathBuf;

use ammo_core::installer::{AmmoInstaller, InstallSummary};

use crate::loader::{self, LoadResult};

/// Inputs and outputs of one apply run.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Database snapshot to read.
    pub database: PathBuf,
    /// Mod configuration to read.
    pub config: PathBuf,
    /// Where to write the mutated database.
    pub output: PathBuf,
    /// Optional file receiving every handbook id after installation.
    pub handbook_dump: Option<PathBuf>,
}

/// Install every configured template into the database and save it.
///
/// Template-level failures do not fail the run; they are reported in the
/// returned summary.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or an output cannot be
/// written.
pub fn run_apply(options: &ApplyOptions) -> LoadResult<InstallSummary> {
    let mut db = loader::load_database(&options.database)?;
    let config = loader::load_config(&options.config)?;

    for problem in config.validate() {
        tracing::warn!("Config: {problem}");
    }

    let installer = AmmoInstaller::from_config(&config);
    let summary = installer.install_all(&mut db, &config.templates);

    for report in &summary.installed {
        for error in &report.propagation.errors {
            tracing::warn!(id = %report.template_id, "Propagation: {error}");
        }
    }

    loader::save_database(&options.output, &db)?;
    if let Some(path) = &options.handbook_dump {
        loader::write_handbook_dump(path, &db.handbook)?;
    }

    tracing::info!(
        "Installed {} of {} templates",
        summary.installed.len(),
        config.templates.len()
    );
    Ok(summary)
}
