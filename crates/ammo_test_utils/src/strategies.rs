//! Proptest strategies for propagation testing.
//!
//! Generated catalogs are deliberately hostile: container slots may point
//! at any item (including themselves, forming cycles) or at ids that do
//! not exist, and acceptance lists mix the original ammunition with
//! unrelated rounds.

use ammo_core::catalog::ItemCatalog;
use ammo_core::item::{ItemDefinition, Slot};
use proptest::prelude::*;

/// Original ammunition id appearing in generated catalogs.
pub const ORIGINAL: &str = "orig";

/// Unrelated round appearing in generated catalogs.
pub const OTHER: &str = "other";

/// One entry of a generated acceptance list, before ids are resolved.
#[derive(Debug, Clone, Copy)]
enum Entry {
    Original,
    Other,
    Item(usize),
    Ghost(usize),
}

fn arb_entry(max_items: usize) -> impl Strategy<Value = Entry> {
    prop_oneof![
        2 => Just(Entry::Original),
        1 => Just(Entry::Other),
        4 => (0..max_items).prop_map(Entry::Item),
        1 => (0..3usize).prop_map(Entry::Ghost),
    ]
}

fn resolve(entry: Entry) -> String {
    match entry {
        Entry::Original => ORIGINAL.to_string(),
        Entry::Other => OTHER.to_string(),
        Entry::Item(i) => format!("item_{i}"),
        Entry::Ghost(i) => format!("ghost_{i}"),
    }
}

fn arb_slot_list(max_items: usize) -> impl Strategy<Value = Option<Vec<Vec<Entry>>>> {
    proptest::option::of(proptest::collection::vec(
        proptest::collection::vec(arb_entry(max_items), 0..4),
        0..3,
    ))
}

fn to_slots(prefix: &str, lists: Option<Vec<Vec<Entry>>>) -> Option<Vec<Slot>> {
    lists.map(|lists| {
        lists
            .into_iter()
            .enumerate()
            .map(|(i, entries)| Slot {
                name: format!("{prefix}_{i}"),
                filter: entries.into_iter().map(resolve).collect(),
            })
            .collect()
    })
}

/// Generate a catalog of up to `max_items` items named `item_N`.
///
/// Chambers and cartridges may also list item ids; a correct propagator
/// never follows them.
pub fn arb_catalog(max_items: usize) -> impl Strategy<Value = ItemCatalog> {
    let max_items = max_items.max(1);
    proptest::collection::vec(
        (
            arb_slot_list(max_items),
            arb_slot_list(max_items),
            arb_slot_list(max_items),
            proptest::option::of(prop_oneof![Just("Caliber12g"), Just("Caliber9x19")]),
        ),
        1..=max_items,
    )
    .prop_map(|items| {
        let mut catalog: ItemCatalog = items
            .into_iter()
            .enumerate()
            .map(|(i, (slots, chambers, cartridges, caliber))| ItemDefinition {
                caliber: caliber.map(str::to_string),
                slots: to_slots("mod", slots),
                chambers: to_slots("patron_in_weapon", chambers),
                cartridges: to_slots("cartridges", cartridges),
                ..ItemDefinition::new(format!("item_{i}"))
            })
            .collect();
        catalog.insert(ItemDefinition {
            caliber: Some("Caliber12g".to_string()),
            ..ItemDefinition::new(ORIGINAL)
        });
        catalog
    })
}
