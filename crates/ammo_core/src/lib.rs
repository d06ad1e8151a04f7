//! # Ammo Core
//!
//! Item model and ammunition compatibility propagation for the Lockpick Ammo
//! server add-in.
//!
//! This crate contains **only** data and in-memory mutation:
//! - No file IO (loading and saving live in `ammo_tools`)
//! - No global state (the catalog is always passed in explicitly)
//! - Deterministic iteration (catalog order follows the host data order)
//!
//! ## Crate Structure
//!
//! - [`item`] - Item definitions and slots
//! - [`catalog`] - The id-keyed item catalog
//! - [`filter`] - Primitive acceptance-list operations
//! - [`propagation`] - Reachability and caliber propagation strategies
//! - [`database`] - Host tables edited when installing new ammunition
//! - [`installer`] - Creates a new ammunition item from a template
//! - [`config`] - Mod configuration loaded from RON

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod installer;
pub mod item;
pub mod propagation;
pub mod template;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::ItemCatalog;
    pub use crate::config::ModConfig;
    pub use crate::database::{Database, Handbook, HandbookEntry, Trader, TraderAssort};
    pub use crate::error::{AmmoError, PropagationError, Result};
    pub use crate::installer::{AmmoInstaller, InstallReport, InstallSummary};
    pub use crate::item::{AmmoStats, ItemDefinition, Slot, SlotKind, SlotPath};
    pub use crate::propagation::{
        CaliberPropagator, PropagationReport, PropagationStrategy, ReachabilityPropagator,
        StrategyKind,
    };
    pub use crate::template::{AmmoOptions, AmmoTemplate, Price, TraderOptions};
}
