//! Ammunition compatibility propagation.
//!
//! When a new ammunition item is cloned from an existing one, every slot
//! that accepted the original must also accept the clone. Two independent
//! strategies find those slots:
//!
//! - [`ReachabilityPropagator`] walks weapon slots down into magazines and
//!   extends every acceptance list that already holds the original id.
//! - [`CaliberPropagator`] scans chambered items by caliber tag and extends
//!   their magazines' cartridge slots (or their chambers when they have no
//!   magazine slot).
//!
//! Neither strategy aborts on bad data. Per-branch failures are collected
//! in a [`PropagationReport`] and the rest of the catalog is still processed.
//! Callers choose which strategies to run, and in what order, through
//! [`StrategyKind`].

mod caliber;
mod reachability;

pub use caliber::{CaliberPropagator, DEFAULT_MAGAZINE_SLOT};
pub use reachability::ReachabilityPropagator;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::error::PropagationError;
use crate::item::SlotPath;

/// A way of extending acceptance lists from an original ammunition id to a
/// new one.
pub trait PropagationStrategy {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Run one pass over `catalog`, mutating it in place.
    fn propagate(
        &self,
        catalog: &mut ItemCatalog,
        original_ammo_id: &str,
        new_ammo_id: &str,
    ) -> PropagationReport;
}

/// Outcome of one or more propagation passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Slots that gained the new id, in mutation order.
    pub extended: Vec<SlotPath>,
    /// Branches that could not be processed.
    pub errors: Vec<PropagationError>,
    /// Number of distinct items inspected, summed over merged passes.
    pub visited: usize,
}

impl PropagationReport {
    /// True if no branch failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: PropagationReport) {
        self.extended.extend(other.extended);
        self.errors.extend(other.errors);
        self.visited += other.visited;
    }
}

/// Serializable selector for a propagation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Graph walk from weapons into magazines.
    Reachability,
    /// Caliber-keyed scan of chambered items.
    Caliber,
}

impl StrategyKind {
    /// Run the selected strategy.
    ///
    /// `magazine_slot` is only used by [`StrategyKind::Caliber`].
    pub fn propagate(
        self,
        catalog: &mut ItemCatalog,
        original_ammo_id: &str,
        new_ammo_id: &str,
        magazine_slot: &str,
    ) -> PropagationReport {
        match self {
            Self::Reachability => {
                ReachabilityPropagator.propagate(catalog, original_ammo_id, new_ammo_id)
            }
            Self::Caliber => CaliberPropagator::new(magazine_slot).propagate(
                catalog,
                original_ammo_id,
                new_ammo_id,
            ),
        }
    }
}
