//! Test fixtures and helpers.
//!
//! Pre-built catalogs for the scenarios every propagation strategy must
//! handle, plus small builders for writing new ones.

use ammo_core::catalog::ItemCatalog;
use ammo_core::database::{Database, Handbook, HandbookEntry, Trader};
use ammo_core::item::{AmmoStats, ItemDefinition, Slot, SlotKind, SlotPath};
use indexmap::IndexMap;

/// Original ammunition id used by the scenario fixtures.
pub const ORIGINAL: &str = "AmmoOriginal";

/// New ammunition id used by the scenario fixtures.
pub const NEW: &str = "AmmoNew";

/// An ammunition item with a caliber and default stats.
#[must_use]
pub fn ammo(id: &str, caliber: &str) -> ItemDefinition {
    ItemDefinition {
        caliber: Some(caliber.to_string()),
        parent: "ammo".to_string(),
        ammo: Some(AmmoStats {
            damage: 50.0,
            penetration_power: 20.0,
            ..AmmoStats::default()
        }),
        ..ItemDefinition::new(id)
    }
}

/// An item with the given named sub-component slots.
#[must_use]
pub fn with_slots(id: &str, slots: &[(&str, &[&str])]) -> ItemDefinition {
    ItemDefinition {
        slots: Some(
            slots
                .iter()
                .map(|(name, accepted)| Slot::new(*name, accepted.iter().copied()))
                .collect(),
        ),
        ..ItemDefinition::new(id)
    }
}

/// A magazine with one cartridge slot.
#[must_use]
pub fn magazine(id: &str, rounds: &[&str]) -> ItemDefinition {
    ItemDefinition {
        parent: "magazine".to_string(),
        cartridges: Some(vec![Slot::new("cartridges", rounds.iter().copied())]),
        ..ItemDefinition::new(id)
    }
}

/// Weapon W whose only slot accepts the original ammunition directly.
#[must_use]
pub fn direct_slot_catalog() -> ItemCatalog {
    [
        with_slots("W", &[("mod_barrel", &[ORIGINAL])]),
        ammo(ORIGINAL, "Caliber12g"),
    ]
    .into_iter()
    .collect()
}

/// Weapon W holding magazine Mag1, whose cartridges accept the original.
#[must_use]
pub fn magazine_catalog() -> ItemCatalog {
    [
        with_slots("W", &[("mod_magazine", &["Mag1"])]),
        magazine("Mag1", &[ORIGINAL]),
        ammo(ORIGINAL, "Caliber12g"),
    ]
    .into_iter()
    .collect()
}

/// Items A and B listing each other, neither accepting the original.
#[must_use]
pub fn cycle_catalog() -> ItemCatalog {
    [
        with_slots("A", &[("mod_mount", &["B"])]),
        with_slots("B", &[("mod_mount", &["A"])]),
        ammo(ORIGINAL, "Caliber12g"),
    ]
    .into_iter()
    .collect()
}

/// Weapon W with an unknown magazine and a sibling slot accepting the
/// original directly.
#[must_use]
pub fn missing_reference_catalog() -> ItemCatalog {
    [
        with_slots(
            "W",
            &[("mod_magazine", &["Mag_Unknown"]), ("mod_barrel", &[ORIGINAL])],
        ),
        ammo(ORIGINAL, "Caliber12g"),
    ]
    .into_iter()
    .collect()
}

/// A small but realistic armory across two calibers.
///
/// - `mp153`: tube magazine `mag_mp153_4`, chamber accepts buckshot only
/// - `toz106`: integral magazine (no `mod_magazine`), chambers accept slug
/// - `akm` + `mag_akm_30`: unrelated caliber
/// - `mount_rail` / `scope`: a mount chain with no ammunition at all
#[must_use]
pub fn armory_catalog() -> ItemCatalog {
    let mut catalog: ItemCatalog = [
        ammo("slug", "Caliber12g"),
        ammo("buck", "Caliber12g"),
        ammo("ps", "Caliber762x39"),
        magazine("mag_mp153_4", &["slug", "buck"]),
        magazine("mag_akm_30", &["ps"]),
        with_slots("scope", &[]),
        with_slots("mount_rail", &[("mod_scope", &["scope"])]),
    ]
    .into_iter()
    .collect();

    catalog.insert(ItemDefinition {
        caliber: Some("Caliber12g".to_string()),
        chambers: Some(vec![Slot::new("patron_in_weapon", ["buck"])]),
        ..with_slots(
            "mp153",
            &[("mod_magazine", &["mag_mp153_4"]), ("mod_mount", &["mount_rail"])],
        )
    });
    catalog.insert(ItemDefinition {
        caliber: Some("Caliber12g".to_string()),
        chambers: Some(vec![
            Slot::new("patron_in_weapon_000", ["slug"]),
            Slot::new("patron_in_weapon_001", ["slug"]),
        ]),
        ..with_slots("toz106", &[("mod_stock", &[])])
    });
    catalog.insert(ItemDefinition {
        caliber: Some("Caliber762x39".to_string()),
        chambers: Some(vec![Slot::new("patron_in_weapon", ["ps"])]),
        ..with_slots("akm", &[("mod_magazine", &["mag_akm_30"])])
    });

    catalog
}

/// A database around [`armory_catalog`] with a handbook, two locales, one
/// trader and an Alpha container.
#[must_use]
pub fn armory_database() -> Database {
    let mut items = armory_catalog();
    items.insert(ItemDefinition {
        grids: Some(vec![Slot::new("main", ["slug"])]),
        ..ItemDefinition::new("544a11ac4bdc2d470e8b456a")
    });

    let mut locales = IndexMap::new();
    locales.insert("en".to_string(), IndexMap::new());
    locales.insert("ru".to_string(), IndexMap::new());

    let mut traders = IndexMap::new();
    traders.insert("mechanic".to_string(), Trader::default());

    Database {
        items,
        handbook: Handbook {
            items: vec![
                HandbookEntry {
                    id: "slug".to_string(),
                    parent_id: "ammo_12g".to_string(),
                    price: 300,
                },
                HandbookEntry {
                    id: "buck".to_string(),
                    parent_id: "ammo_12g".to_string(),
                    price: 80,
                },
            ],
        },
        locales,
        traders,
    }
}

/// Every acceptance list in the catalog, keyed by slot path.
#[must_use]
pub fn acceptance_snapshot(catalog: &ItemCatalog) -> IndexMap<SlotPath, Vec<String>> {
    const KINDS: [SlotKind; 4] = [
        SlotKind::Slot,
        SlotKind::Chamber,
        SlotKind::Cartridge,
        SlotKind::Grid,
    ];

    let mut snapshot = IndexMap::new();
    for item in catalog.iter() {
        for kind in KINDS {
            for (index, slot) in item.slots_of(kind).into_iter().flatten().enumerate() {
                snapshot.insert(SlotPath::new(&item.id, kind, index, slot), slot.filter.clone());
            }
        }
    }
    snapshot
}

/// Acceptance list of the first slot of `kind` on `id`.
///
/// # Panics
///
/// Panics if the item or slot does not exist.
#[must_use]
pub fn first_filter(catalog: &ItemCatalog, id: &str, kind: SlotKind) -> Vec<String> {
    catalog
        .get(id)
        .and_then(|item| item.slots_of(kind))
        .and_then(|slots| slots.first())
        .map(|slot| slot.filter.clone())
        .unwrap_or_else(|| panic!("{id} has no {} slot", kind.label()))
}
