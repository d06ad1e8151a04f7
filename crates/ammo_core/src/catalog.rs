//! The item catalog: every item definition keyed by id.
//!
//! The catalog is owned by the caller and mutated in place. It keeps the
//! insertion order of the host data, so iterating it (and therefore the
//! order in which propagation mutates it) is deterministic.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::item::{ItemDefinition, SlotKind};

/// Id-keyed collection of item definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: IndexMap<String, ItemDefinition>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Insert an item under its own id, returning the definition it replaced.
    pub fn insert(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(item.id.clone(), item)
    }

    /// Remove an item, keeping the order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Option<ItemDefinition> {
        self.items.shift_remove(id)
    }

    /// Look up an item.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Look up an item mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ItemDefinition> {
        self.items.get_mut(id)
    }

    /// Check if an id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// All ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// All items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check references in sub-component slots.
    ///
    /// Returns one message per slot entry naming an id that is not in the
    /// catalog. Chambers, cartridges and grids are not checked: they list
    /// ammunition and loot that may legitimately live outside the catalog.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for item in self.iter() {
            let Some(slots) = item.slots_of(SlotKind::Slot) else {
                continue;
            };
            for slot in slots {
                for id in &slot.filter {
                    if !self.contains(id) {
                        errors.push(format!(
                            "Item '{}' slot '{}' references unknown item '{}'",
                            item.id, slot.name, id
                        ));
                    }
                }
            }
        }

        errors
    }

    /// Find every cycle formed through sub-component slots.
    ///
    /// Each cycle is returned as the id path that closes it, with the first
    /// id repeated at the end (`[a, b, a]`).
    #[must_use]
    pub fn container_cycles(&self) -> Vec<Vec<String>> {
        let mut visited = HashSet::new();
        let mut cycles = Vec::new();

        for id in self.ids() {
            if !visited.contains(id) {
                self.find_cycles_from(id, &mut visited, &mut cycles);
            }
        }

        cycles
    }

    /// Sub-component children of `id` that exist in the catalog.
    fn container_children(&self, id: &str) -> Vec<&str> {
        self.get(id)
            .and_then(|item| item.slots_of(SlotKind::Slot))
            .into_iter()
            .flatten()
            .flat_map(|slot| slot.filter.iter())
            .map(String::as_str)
            .filter(|child| self.contains(child))
            .collect()
    }

    fn find_cycles_from<'a>(
        &'a self,
        root: &'a str,
        visited: &mut HashSet<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        // Each frame is an item on the current path and its next child.
        let mut frames: Vec<(&'a str, Vec<&'a str>, usize)> = Vec::new();
        let mut on_stack = HashSet::new();

        visited.insert(root);
        on_stack.insert(root);
        frames.push((root, self.container_children(root), 0));

        while let Some((id, children, next)) = frames.last_mut() {
            let Some(&child) = children.get(*next) else {
                on_stack.remove(*id);
                frames.pop();
                continue;
            };
            *next += 1;

            if on_stack.contains(child) {
                let start = frames.iter().position(|f| f.0 == child).unwrap_or(0);
                let mut cycle: Vec<String> =
                    frames[start..].iter().map(|f| f.0.to_string()).collect();
                cycle.push(child.to_string());
                cycles.push(cycle);
            } else if visited.insert(child) {
                on_stack.insert(child);
                frames.push((child, self.container_children(child), 0));
            }
        }
    }
}

impl FromIterator<ItemDefinition> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = ItemDefinition>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

impl Extend<ItemDefinition> for ItemCatalog {
    fn extend<T: IntoIterator<Item = ItemDefinition>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Slot;

    fn container(id: &str, children: &[&str]) -> ItemDefinition {
        ItemDefinition {
            slots: Some(vec![Slot::new("mod_any", children.iter().copied())]),
            ..ItemDefinition::new(id)
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut catalog = ItemCatalog::new();
        assert!(catalog.insert(ItemDefinition::new("a")).is_none());
        assert!(catalog.insert(ItemDefinition::new("a")).is_some());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut catalog: ItemCatalog = ["a", "b", "c"]
            .into_iter()
            .map(ItemDefinition::new)
            .collect();
        catalog.remove("b");
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_validate_reports_dangling_reference() {
        let catalog: ItemCatalog = [container("w", &["mag", "ghost"]), ItemDefinition::new("mag")]
            .into_iter()
            .collect();
        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("ghost"), "Errors: {:?}", errors);
    }

    #[test]
    fn test_container_cycles() {
        let catalog: ItemCatalog = [
            container("a", &["b"]),
            container("b", &["a"]),
            container("c", &["d"]),
            ItemDefinition::new("d"),
        ]
        .into_iter()
        .collect();

        let cycles = catalog.container_cycles();
        assert_eq!(cycles, vec![vec!["a".to_string(), "b".to_string(), "a".to_string()]]);
    }

    #[test]
    fn test_self_cycle() {
        let catalog: ItemCatalog = [container("a", &["a"])].into_iter().collect();
        assert_eq!(
            catalog.container_cycles(),
            vec![vec!["a".to_string(), "a".to_string()]]
        );
    }

    #[test]
    fn test_deep_chain_cycle() {
        const DEPTH: usize = 20_000;
        let mut catalog: ItemCatalog = (0..DEPTH)
            .map(|i| container(&format!("i{i}"), &[format!("i{}", i + 1).as_str()]))
            .collect();
        catalog.insert(container(&format!("i{DEPTH}"), &["i0"]));

        let cycles = catalog.container_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), DEPTH + 2);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let catalog: ItemCatalog = [ItemDefinition::new("a")].into_iter().collect();
        let ron = ron::to_string(&catalog).unwrap();
        assert!(ron.starts_with('{'), "{ron}");
    }
}
