//! Reachability-based propagation: weapon slots, then magazines.

use std::collections::HashSet;

use super::{PropagationReport, PropagationStrategy};
use crate::catalog::ItemCatalog;
use crate::error::PropagationError;
use crate::filter::{extend, is_direct_acceptance_slot};
use crate::item::{SlotKind, SlotPath};

/// Walks every item and the sub-items its slots reference.
///
/// For each item:
/// 1. Every sub-component slot that accepts the original ammunition gains
///    the new id. Any other sub-component slot is treated as a container
///    and each item it lists is visited in turn.
/// 2. Every chamber accepting the original gains the new id.
/// 3. Every cartridge slot accepting the original gains the new id.
///
/// Chambers and cartridges are terminal: their entries are never looked
/// up. Each item is visited at most once per pass, so reference cycles
/// terminate. The walk keeps its own work stack, so chain depth is bounded
/// only by catalog size. An unknown id in a container slot is reported and
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReachabilityPropagator;

impl PropagationStrategy for ReachabilityPropagator {
    fn name(&self) -> &'static str {
        "reachability"
    }

    fn propagate(
        &self,
        catalog: &mut ItemCatalog,
        original_ammo_id: &str,
        new_ammo_id: &str,
    ) -> PropagationReport {
        let mut pass = Pass {
            original: original_ammo_id,
            new: new_ammo_id,
            visited: HashSet::new(),
            report: PropagationReport::default(),
        };

        let roots: Vec<String> = catalog.ids().map(str::to_string).collect();
        for id in &roots {
            pass.visit(catalog, id);
        }

        pass.report.visited = pass.visited.len();
        tracing::debug!(
            strategy = self.name(),
            original = original_ammo_id,
            new = new_ammo_id,
            visited = pass.report.visited,
            extended = pass.report.extended.len(),
            errors = pass.report.errors.len(),
            "Reachability propagation finished"
        );
        pass.report
    }
}

/// State of one propagation pass.
struct Pass<'a> {
    original: &'a str,
    new: &'a str,
    visited: HashSet<String>,
    report: PropagationReport,
}

/// Pending work of the depth-first walk.
///
/// Steps are popped in the order the walk would perform them, so the
/// catalog is mutated in the same order as a recursive descent.
enum Step {
    /// Visit an item unless already visited.
    Enter(String),
    /// Process one sub-component slot of an item.
    Slot { id: String, index: usize },
    /// Resolve one id listed by a container slot.
    Child {
        parent: String,
        slot: String,
        child: String,
    },
    /// Extend the chambers and cartridges of an item.
    Finish(String),
}

impl Pass<'_> {
    fn visit(&mut self, catalog: &mut ItemCatalog, root: &str) {
        let mut stack = vec![Step::Enter(root.to_string())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    if self.visited.contains(&id) {
                        continue;
                    }
                    let Some(item) = catalog.get(&id) else {
                        continue;
                    };
                    let slot_count = item.slots.as_ref().map_or(0, Vec::len);
                    self.visited.insert(id.clone());

                    stack.push(Step::Finish(id.clone()));
                    for index in (0..slot_count).rev() {
                        stack.push(Step::Slot {
                            id: id.clone(),
                            index,
                        });
                    }
                }
                Step::Slot { id, index } => {
                    let Some((slot, children)) = self.process_slot(catalog, &id, index) else {
                        continue;
                    };
                    for child in children.into_iter().rev() {
                        stack.push(Step::Child {
                            parent: id.clone(),
                            slot: slot.clone(),
                            child,
                        });
                    }
                }
                Step::Child {
                    parent,
                    slot,
                    child,
                } => {
                    if catalog.contains(&child) {
                        stack.push(Step::Enter(child));
                        continue;
                    }
                    tracing::warn!(
                        parent = %parent,
                        slot = %slot,
                        missing = %child,
                        "Slot references unknown item, skipping branch"
                    );
                    self.report.errors.push(PropagationError::MissingReference {
                        parent,
                        slot,
                        missing: child,
                    });
                }
                Step::Finish(id) => {
                    self.extend_terminal(catalog, &id, SlotKind::Chamber);
                    self.extend_terminal(catalog, &id, SlotKind::Cartridge);
                }
            }
        }
    }

    /// Extend a direct acceptance slot, or hand back a container slot's
    /// name and members for the caller to descend into.
    fn process_slot(
        &mut self,
        catalog: &mut ItemCatalog,
        id: &str,
        index: usize,
    ) -> Option<(String, Vec<String>)> {
        let slot = catalog.get_mut(id)?.slots.as_mut()?.get_mut(index)?;

        if is_direct_acceptance_slot(slot, self.original) {
            if extend(slot, self.new) {
                let path = SlotPath::new(id, SlotKind::Slot, index, slot);
                tracing::debug!(slot = %path, ammo = self.new, "Extended slot");
                self.report.extended.push(path);
            }
            return None;
        }

        Some((slot.name.clone(), slot.filter.clone()))
    }

    fn extend_terminal(&mut self, catalog: &mut ItemCatalog, id: &str, kind: SlotKind) {
        let Some(slots) = catalog.get_mut(id).and_then(|item| item.slots_of_mut(kind)) else {
            return;
        };

        for (index, slot) in slots.iter_mut().enumerate() {
            if is_direct_acceptance_slot(slot, self.original) && extend(slot, self.new) {
                let path = SlotPath::new(id, kind, index, slot);
                tracing::debug!(slot = %path, ammo = self.new, "Extended slot");
                self.report.extended.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, Slot};

    fn weapon(id: &str, slot_entries: &[&str]) -> ItemDefinition {
        ItemDefinition {
            slots: Some(vec![Slot::new("mod_magazine", slot_entries.iter().copied())]),
            ..ItemDefinition::new(id)
        }
    }

    fn magazine(id: &str, rounds: &[&str]) -> ItemDefinition {
        ItemDefinition {
            cartridges: Some(vec![Slot::new("cartridges", rounds.iter().copied())]),
            ..ItemDefinition::new(id)
        }
    }

    fn filter_of(catalog: &ItemCatalog, id: &str, kind: SlotKind) -> Vec<String> {
        catalog.get(id).unwrap().slots_of(kind).unwrap()[0]
            .filter
            .clone()
    }

    #[test]
    fn test_direct_slot_extended() {
        let mut catalog: ItemCatalog = [weapon("w", &["orig"]), ItemDefinition::new("orig")]
            .into_iter()
            .collect();

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(filter_of(&catalog, "w", SlotKind::Slot), vec!["orig", "new"]);
        assert_eq!(report.extended.len(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_magazine_cartridges_extended_weapon_untouched() {
        let mut catalog: ItemCatalog = [weapon("w", &["mag1"]), magazine("mag1", &["orig"])]
            .into_iter()
            .collect();

        ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(filter_of(&catalog, "mag1", SlotKind::Cartridge), vec!["orig", "new"]);
        assert_eq!(filter_of(&catalog, "w", SlotKind::Slot), vec!["mag1"]);
    }

    #[test]
    fn test_chambers_are_terminal() {
        let mut catalog: ItemCatalog = [
            ItemDefinition {
                chambers: Some(vec![Slot::new("patron_in_weapon", ["orig", "mag1"])]),
                ..ItemDefinition::new("revolver")
            },
            magazine("mag1", &["orig"]),
        ]
        .into_iter()
        .collect();

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        // mag1 is still extended as a catalog root, but only once.
        assert_eq!(report.extended.len(), 2);
        assert_eq!(
            filter_of(&catalog, "revolver", SlotKind::Chamber),
            vec!["orig", "mag1", "new"]
        );
    }

    #[test]
    fn test_cycle_terminates_unchanged() {
        let mut catalog: ItemCatalog = [weapon("a", &["b"]), weapon("b", &["a"])]
            .into_iter()
            .collect();
        let before = catalog.clone();

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(catalog, before);
        assert_eq!(report.visited, 2);
        assert!(report.extended.is_empty());
    }

    #[test]
    fn test_missing_reference_reported_siblings_continue() {
        let mut catalog: ItemCatalog = [
            ItemDefinition {
                slots: Some(vec![
                    Slot::new("mod_magazine", ["mag_unknown"]),
                    Slot::new("mod_barrel", ["orig"]),
                ]),
                ..ItemDefinition::new("w")
            },
        ]
        .into_iter()
        .collect();

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(
            report.errors,
            vec![PropagationError::MissingReference {
                parent: "w".to_string(),
                slot: "mod_magazine".to_string(),
                missing: "mag_unknown".to_string(),
            }]
        );
        let barrel = &catalog.get("w").unwrap().slots.as_ref().unwrap()[1];
        assert_eq!(barrel.filter, vec!["orig", "new"]);
    }

    #[test]
    fn test_deep_container_chain() {
        const DEPTH: usize = 20_000;
        let mut catalog: ItemCatalog = (0..DEPTH)
            .map(|i| weapon(&format!("i{i}"), &[format!("i{}", i + 1).as_str()]))
            .collect();
        catalog.insert(magazine(&format!("i{DEPTH}"), &["orig"]));

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(report.visited, DEPTH + 1);
        assert_eq!(report.extended.len(), 1);
        assert_eq!(
            filter_of(&catalog, &format!("i{DEPTH}"), SlotKind::Cartridge),
            vec!["orig", "new"]
        );
    }

    #[test]
    fn test_nested_mutation_order_is_depth_first() {
        // w -> [m1, m2]; m1 -> [m3]. m3 must be extended before m2.
        let mut catalog: ItemCatalog = [
            weapon("w", &["m1", "m2"]),
            ItemDefinition {
                slots: Some(vec![Slot::new("mod_mount", ["m3"])]),
                cartridges: Some(vec![Slot::new("cartridges", ["orig"])]),
                ..ItemDefinition::new("m1")
            },
            magazine("m2", &["orig"]),
            magazine("m3", &["orig"]),
        ]
        .into_iter()
        .collect();

        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        let order: Vec<&str> = report.extended.iter().map(|p| p.item.as_str()).collect();
        assert_eq!(order, vec!["m3", "m1", "m2"]);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut catalog: ItemCatalog = [weapon("w", &["mag1"]), magazine("mag1", &["orig"])]
            .into_iter()
            .collect();

        ReachabilityPropagator.propagate(&mut catalog, "orig", "new");
        let once = catalog.clone();
        let report = ReachabilityPropagator.propagate(&mut catalog, "orig", "new");

        assert_eq!(catalog, once);
        assert!(report.extended.is_empty());
    }
}
