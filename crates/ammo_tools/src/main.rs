//! Lockpick Ammo - Development Tools

use std::path::{Path, PathBuf};

use ammo_tools::apply::{run_apply, ApplyOptions};
use ammo_tools::{loader, validate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ammo-tools")]
#[command(about = "Development tools for Lockpick Ammo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the configured ammunition into a database snapshot
    Apply {
        /// Database snapshot (JSON)
        #[arg(long)]
        database: PathBuf,
        /// Mod configuration (RON)
        #[arg(long, default_value = "assets/lockpick_ammo.ron")]
        config: PathBuf,
        /// Output database snapshot (JSON)
        #[arg(long)]
        output: PathBuf,
        /// Write every handbook id to this file
        #[arg(long)]
        handbook_dump: Option<PathBuf>,
    },
    /// Validate a database snapshot and, optionally, a mod configuration
    Validate {
        /// Database snapshot (JSON)
        #[arg(long)]
        database: PathBuf,
        /// Mod configuration (RON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List every slot accepting an ammunition id
    Acceptors {
        /// Database snapshot (JSON)
        #[arg(long)]
        database: PathBuf,
        /// Ammunition id
        ammo_id: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Apply {
            database,
            config,
            output,
            handbook_dump,
        } => apply(&ApplyOptions {
            database,
            config,
            output,
            handbook_dump,
        }),
        Commands::Validate { database, config } => run_validate(&database, config.as_deref()),
        Commands::Acceptors { database, ammo_id } => acceptors(&database, &ammo_id),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn apply(options: &ApplyOptions) -> bool {
    match run_apply(options) {
        Ok(summary) => {
            for (id, e) in &summary.skipped {
                tracing::warn!("Skipped '{id}': {e}");
            }
            true
        }
        Err(e) => {
            tracing::error!("Apply failed: {e}");
            false
        }
    }
}

fn run_validate(database: &Path, config: Option<&Path>) -> bool {
    let db = match loader::load_database(database) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("{e}");
            return false;
        }
    };

    let mut errors = validate::validate_database(&db);
    if let Some(path) = config {
        match loader::load_config(path) {
            Ok(config) => errors.extend(validate::validate_config(&db, &config)),
            Err(e) => {
                tracing::error!("{e}");
                return false;
            }
        }
    }

    for error in &errors {
        tracing::error!("{error}");
    }
    if errors.is_empty() {
        tracing::info!("Validation passed");
        true
    } else {
        tracing::error!("Validation failed with {} errors", errors.len());
        false
    }
}

fn acceptors(database: &Path, ammo_id: &str) -> bool {
    match loader::load_database(database) {
        Ok(db) => {
            for path in ammo_core::filter::acceptors(&db.items, ammo_id) {
                println!("{path}");
            }
            true
        }
        Err(e) => {
            tracing::error!("{e}");
            false
        }
    }
}
