//! Primitive operations on a slot's acceptance list.

use crate::catalog::ItemCatalog;
use crate::item::{Slot, SlotKind, SlotPath};

/// Check if `id` is accepted by `slot`.
#[must_use]
pub fn contains(slot: &Slot, id: &str) -> bool {
    slot.filter.iter().any(|f| f == id)
}

/// Append `id` to `slot` unless it is already accepted.
///
/// Returns `true` if the slot changed.
pub fn extend(slot: &mut Slot, id: &str) -> bool {
    if contains(slot, id) {
        return false;
    }
    slot.filter.push(id.to_string());
    true
}

/// Remove every occurrence of `id` from `slot`.
///
/// Returns `true` if the slot changed.
pub fn remove(slot: &mut Slot, id: &str) -> bool {
    let before = slot.filter.len();
    slot.filter.retain(|f| f != id);
    slot.filter.len() != before
}

/// Decide whether a sub-component slot holds ammunition directly.
///
/// A slot that already accepts the original ammunition is a direct
/// acceptance point. Any other slot is assumed to list sub-items (usually
/// magazines) whose own slots must be inspected instead.
#[must_use]
pub fn is_direct_acceptance_slot(slot: &Slot, original_ammo_id: &str) -> bool {
    contains(slot, original_ammo_id)
}

/// List every slot in the catalog that accepts `id`.
#[must_use]
pub fn acceptors(catalog: &ItemCatalog, id: &str) -> Vec<SlotPath> {
    const KINDS: [SlotKind; 4] = [
        SlotKind::Slot,
        SlotKind::Chamber,
        SlotKind::Cartridge,
        SlotKind::Grid,
    ];

    let mut found = Vec::new();
    for item in catalog.iter() {
        for kind in KINDS {
            let Some(slots) = item.slots_of(kind) else {
                continue;
            };
            for (index, slot) in slots.iter().enumerate() {
                if contains(slot, id) {
                    found.push(SlotPath::new(&item.id, kind, index, slot));
                }
            }
        }
    }
    found
}
