//! Mod configuration.
//!
//! Parsed from RON. Every field has a default, so an empty `()` document is a
//! valid configuration that installs nothing.
//!
//! # Example RON
//!
//! ```ron
//! ModConfig(
//!     templates: [
//!         AmmoTemplate(id: "lockpick_slug", original_ammo_id: "5d6e68a8a4b9360b6c0d54e2"),
//!     ],
//!     strategies: [Reachability, Caliber],
//! )
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AmmoError, Result};
use crate::propagation::{StrategyKind, DEFAULT_MAGAZINE_SLOT};
use crate::template::AmmoTemplate;

/// Stock secure container ids: Alpha, Beta, Epsilon, Gamma, Kappa.
pub const SECURE_CONTAINERS: [&str; 5] = [
    "544a11ac4bdc2d470e8b456a",
    "5857a8b324597729ab0a0e7d",
    "59db794186f77448bc595262",
    "5857a8bc2459772bad15db29",
    "5c093ca986f7740a1867ab12",
];

/// Top-level mod configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModConfig {
    /// New ammunition to install, in order.
    pub templates: Vec<AmmoTemplate>,

    /// Propagation strategies to run for each template, in order.
    pub strategies: Vec<StrategyKind>,

    /// Containers whose first grid should accept the new ammunition.
    pub secure_containers: Vec<String>,

    /// Slot name the caliber strategy treats as the magazine well.
    pub magazine_slot: String,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            strategies: vec![StrategyKind::Reachability, StrategyKind::Caliber],
            secure_containers: SECURE_CONTAINERS.iter().map(|s| (*s).to_string()).collect(),
            magazine_slot: DEFAULT_MAGAZINE_SLOT.to_string(),
        }
    }
}

impl ModConfig {
    /// Parse a configuration from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`AmmoError::ConfigParse`] if the text is not a valid configuration.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| AmmoError::ConfigParse(e.to_string()))
    }

    /// Check the configuration for problems.
    ///
    /// Returns a list of human-readable errors; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for template in &self.templates {
            errors.extend(template.validate());
            if !seen.insert(template.id.as_str()) {
                errors.push(format!("Duplicate template id '{}'", template.id));
            }
        }

        if self.magazine_slot.trim().is_empty() {
            errors.push("Magazine slot name is empty".to_string());
        }

        errors
    }
}
