//! Caliber-keyed propagation for chambered weapons.

use std::collections::HashSet;

use super::{PropagationReport, PropagationStrategy};
use crate::catalog::ItemCatalog;
use crate::error::PropagationError;
use crate::filter::extend;
use crate::item::{SlotKind, SlotPath};

/// Slot name weapons use to attach a magazine.
pub const DEFAULT_MAGAZINE_SLOT: &str = "mod_magazine";

/// Extends every chambered item of the original ammunition's caliber.
///
/// Items are matched by caliber tag, not by what their slots currently
/// accept, which reaches weapons the reachability walk cannot (integral
/// magazines, revolvers whose chambers list a different round). For each
/// match:
/// - with a magazine slot, every listed magazine's cartridge slots gain the
///   new id;
/// - without one, the item's chambers gain the new id.
#[derive(Debug, Clone)]
pub struct CaliberPropagator {
    magazine_slot: String,
}

impl Default for CaliberPropagator {
    fn default() -> Self {
        Self::new(DEFAULT_MAGAZINE_SLOT)
    }
}

impl CaliberPropagator {
    /// Create a propagator that looks for magazines in `magazine_slot`.
    pub fn new(magazine_slot: impl Into<String>) -> Self {
        Self {
            magazine_slot: magazine_slot.into(),
        }
    }

    /// Name of the magazine attachment slot.
    #[must_use]
    pub fn magazine_slot(&self) -> &str {
        &self.magazine_slot
    }

    fn extend_all(
        catalog: &mut ItemCatalog,
        id: &str,
        kind: SlotKind,
        new_ammo_id: &str,
        report: &mut PropagationReport,
    ) {
        let Some(slots) = catalog.get_mut(id).and_then(|item| item.slots_of_mut(kind)) else {
            return;
        };
        for (index, slot) in slots.iter_mut().enumerate() {
            if extend(slot, new_ammo_id) {
                let path = SlotPath::new(id, kind, index, slot);
                tracing::debug!(slot = %path, ammo = new_ammo_id, "Extended slot by caliber");
                report.extended.push(path);
            }
        }
    }
}

impl PropagationStrategy for CaliberPropagator {
    fn name(&self) -> &'static str {
        "caliber"
    }

    fn propagate(
        &self,
        catalog: &mut ItemCatalog,
        original_ammo_id: &str,
        new_ammo_id: &str,
    ) -> PropagationReport {
        let mut report = PropagationReport::default();

        let caliber = match catalog.get(original_ammo_id) {
            None => {
                tracing::warn!(ammo = original_ammo_id, "Base ammunition not in catalog");
                report
                    .errors
                    .push(PropagationError::MissingBaseItem(original_ammo_id.to_string()));
                return report;
            }
            Some(item) => match item.caliber.clone() {
                Some(caliber) => caliber,
                None => {
                    tracing::warn!(ammo = original_ammo_id, "Base ammunition has no caliber");
                    report
                        .errors
                        .push(PropagationError::MissingCaliber(original_ammo_id.to_string()));
                    return report;
                }
            },
        };

        let weapons: Vec<(String, Option<Vec<String>>)> = catalog
            .iter()
            .filter(|item| item.has_chambers() && item.has_caliber(&caliber))
            .map(|item| {
                let magazines = item
                    .find_slot(&self.magazine_slot)
                    .map(|slot| slot.filter.clone());
                (item.id.clone(), magazines)
            })
            .collect();

        let mut inspected = HashSet::new();
        for (weapon_id, magazines) in weapons {
            inspected.insert(weapon_id.clone());
            let Some(magazines) = magazines else {
                Self::extend_all(catalog, &weapon_id, SlotKind::Chamber, new_ammo_id, &mut report);
                continue;
            };

            for magazine_id in magazines {
                if !catalog.contains(&magazine_id) {
                    tracing::warn!(
                        weapon = %weapon_id,
                        magazine = %magazine_id,
                        "Magazine not in catalog, skipping"
                    );
                    report.errors.push(PropagationError::MissingReference {
                        parent: weapon_id.clone(),
                        slot: self.magazine_slot.clone(),
                        missing: magazine_id,
                    });
                    continue;
                }
                inspected.insert(magazine_id.clone());
                Self::extend_all(
                    catalog,
                    &magazine_id,
                    SlotKind::Cartridge,
                    new_ammo_id,
                    &mut report,
                );
            }
        }

        report.visited = inspected.len();
        tracing::debug!(
            strategy = self.name(),
            caliber = %caliber,
            new = new_ammo_id,
            extended = report.extended.len(),
            errors = report.errors.len(),
            "Caliber propagation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, Slot};

    fn ammo(id: &str, caliber: &str) -> ItemDefinition {
        ItemDefinition {
            caliber: Some(caliber.to_string()),
            ..ItemDefinition::new(id)
        }
    }

    fn create_test_catalog() -> ItemCatalog {
        [
            ammo("slug", "Caliber12g"),
            ammo("ps", "Caliber762x39"),
            // Pump shotgun with a magazine that does not list the slug yet.
            ItemDefinition {
                caliber: Some("Caliber12g".to_string()),
                slots: Some(vec![Slot::new(DEFAULT_MAGAZINE_SLOT, ["tube_4"])]),
                chambers: Some(vec![Slot::new("patron_in_weapon", ["buck"])]),
                ..ItemDefinition::new("pump")
            },
            ItemDefinition {
                cartridges: Some(vec![Slot::new("cartridges", ["buck"])]),
                ..ItemDefinition::new("tube_4")
            },
            // Break-action shotgun with chambers only.
            ItemDefinition {
                caliber: Some("Caliber12g".to_string()),
                chambers: Some(vec![
                    Slot::new("patron_in_weapon_000", ["buck"]),
                    Slot::new("patron_in_weapon_001", ["buck"]),
                ]),
                ..ItemDefinition::new("double")
            },
            // Other caliber, must stay untouched.
            ItemDefinition {
                caliber: Some("Caliber762x39".to_string()),
                chambers: Some(vec![Slot::new("patron_in_weapon", ["ps"])]),
                ..ItemDefinition::new("akm")
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_magazine_cartridges_extended() {
        let mut catalog = create_test_catalog();
        let report = CaliberPropagator::default().propagate(&mut catalog, "slug", "lockpick");

        let tube = catalog.get("tube_4").unwrap();
        assert_eq!(tube.cartridges.as_ref().unwrap()[0].filter, vec!["buck", "lockpick"]);

        // Weapons with a magazine slot keep their chambers as they were.
        let pump = catalog.get("pump").unwrap();
        assert_eq!(pump.chambers.as_ref().unwrap()[0].filter, vec!["buck"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_chambers_extended_without_magazine_slot() {
        let mut catalog = create_test_catalog();
        CaliberPropagator::default().propagate(&mut catalog, "slug", "lockpick");

        let double = catalog.get("double").unwrap();
        for chamber in double.chambers.as_ref().unwrap() {
            assert_eq!(chamber.filter, vec!["buck", "lockpick"]);
        }
    }

    #[test]
    fn test_other_calibers_untouched() {
        let mut catalog = create_test_catalog();
        let before = catalog.get("akm").cloned();
        CaliberPropagator::default().propagate(&mut catalog, "slug", "lockpick");
        assert_eq!(catalog.get("akm").cloned(), before);
    }

    #[test]
    fn test_missing_base_ammo() {
        let mut catalog = create_test_catalog();
        let report = CaliberPropagator::default().propagate(&mut catalog, "nope", "lockpick");
        assert_eq!(
            report.errors,
            vec![PropagationError::MissingBaseItem("nope".to_string())]
        );
        assert!(report.extended.is_empty());
    }

    #[test]
    fn test_missing_caliber() {
        let mut catalog = create_test_catalog();
        catalog.insert(ItemDefinition::new("untagged"));
        let report = CaliberPropagator::default().propagate(&mut catalog, "untagged", "lockpick");
        assert_eq!(
            report.errors,
            vec![PropagationError::MissingCaliber("untagged".to_string())]
        );
    }

    #[test]
    fn test_missing_magazine_reported() {
        let mut catalog = create_test_catalog();
        catalog.remove("tube_4");
        let report = CaliberPropagator::default().propagate(&mut catalog, "slug", "lockpick");

        assert_eq!(report.errors.len(), 1);
        // The double-barrel is still handled.
        let double = catalog.get("double").unwrap();
        assert!(double.chambers.as_ref().unwrap()[0]
            .filter
            .contains(&"lockpick".to_string()));
    }

    #[test]
    fn test_shared_magazine_counted_once() {
        let mut catalog = create_test_catalog();
        catalog.insert(ItemDefinition {
            caliber: Some("Caliber12g".to_string()),
            slots: Some(vec![Slot::new(DEFAULT_MAGAZINE_SLOT, ["tube_4"])]),
            chambers: Some(vec![Slot::new("patron_in_weapon", ["buck"])]),
            ..ItemDefinition::new("pump_short")
        });

        let report = CaliberPropagator::default().propagate(&mut catalog, "slug", "lockpick");

        // pump, pump_short, double and the shared tube.
        assert_eq!(report.visited, 4);
        let tube = catalog.get("tube_4").unwrap();
        assert_eq!(tube.cartridges.as_ref().unwrap()[0].filter, vec!["buck", "lockpick"]);
    }

    #[test]
    fn test_custom_magazine_slot() {
        let mut catalog = create_test_catalog();
        let propagator = CaliberPropagator::new("mod_tube");
        assert_eq!(propagator.magazine_slot(), "mod_tube");

        propagator.propagate(&mut catalog, "slug", "lockpick");

        // "pump" now has no recognised magazine slot, so its chamber is used.
        let pump = catalog.get("pump").unwrap();
        assert_eq!(pump.chambers.as_ref().unwrap()[0].filter, vec!["buck", "lockpick"]);
    }
}
