//! Integration tests for compatibility propagation.
//!
//! Covers the fixed scenarios every strategy must handle and the
//! properties that must hold on arbitrary (including cyclic and dangling)
//! catalogs.

use ammo_core::error::PropagationError;
use ammo_core::filter;
use ammo_core::item::SlotKind;
use ammo_core::propagation::{
    CaliberPropagator, PropagationStrategy, ReachabilityPropagator, StrategyKind,
};
use ammo_test_utils::fixtures::{
    acceptance_snapshot, armory_catalog, cycle_catalog, direct_slot_catalog, first_filter,
    magazine_catalog, missing_reference_catalog, NEW, ORIGINAL,
};
use ammo_test_utils::strategies::{self, arb_catalog};
use proptest::prelude::*;

// ==========================================================================
// Scenarios
// ==========================================================================

#[test]
fn test_direct_slot_gains_new_ammo() {
    let mut catalog = direct_slot_catalog();

    let report = ReachabilityPropagator.propagate(&mut catalog, ORIGINAL, NEW);

    assert_eq!(first_filter(&catalog, "W", SlotKind::Slot), vec![ORIGINAL, NEW]);
    assert!(report.is_clean());
}

#[test]
fn test_magazine_extended_weapon_slot_unchanged() {
    let mut catalog = magazine_catalog();

    ReachabilityPropagator.propagate(&mut catalog, ORIGINAL, NEW);

    assert_eq!(
        first_filter(&catalog, "Mag1", SlotKind::Cartridge),
        vec![ORIGINAL, NEW]
    );
    assert_eq!(first_filter(&catalog, "W", SlotKind::Slot), vec!["Mag1"]);
}

#[test]
fn test_cycle_terminates_and_leaves_items_unchanged() {
    let mut catalog = cycle_catalog();
    let before = catalog.clone();

    let report = ReachabilityPropagator.propagate(&mut catalog, ORIGINAL, NEW);

    assert_eq!(catalog, before);
    assert!(report.extended.is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_missing_reference_reported_and_siblings_complete() {
    let mut catalog = missing_reference_catalog();

    let report = ReachabilityPropagator.propagate(&mut catalog, ORIGINAL, NEW);

    assert_eq!(
        report.errors,
        vec![PropagationError::MissingReference {
            parent: "W".to_string(),
            slot: "mod_magazine".to_string(),
            missing: "Mag_Unknown".to_string(),
        }]
    );
    let barrel = &catalog.get("W").unwrap().slots.as_ref().unwrap()[1];
    assert_eq!(barrel.filter, vec![ORIGINAL, NEW]);
}

#[test]
fn test_armory_reachability() {
    let mut catalog = armory_catalog();

    let report = ReachabilityPropagator.propagate(&mut catalog, "slug", "lockpick");

    // Tube magazine and both toz106 chambers.
    assert_eq!(report.extended.len(), 3, "{:#?}", report.extended);
    assert!(report.is_clean());
    assert_eq!(
        first_filter(&catalog, "mag_mp153_4", SlotKind::Cartridge),
        vec!["slug", "buck", "lockpick"]
    );
    // The mp153 chamber never listed the slug.
    assert_eq!(first_filter(&catalog, "mp153", SlotKind::Chamber), vec!["buck"]);
}

#[test]
fn test_armory_caliber_reaches_unlisted_chambers() {
    let mut catalog = armory_catalog();

    let report = CaliberPropagator::default().propagate(&mut catalog, "buck", "lockpick");

    assert!(report.is_clean());
    assert_eq!(
        first_filter(&catalog, "mag_mp153_4", SlotKind::Cartridge),
        vec!["slug", "buck", "lockpick"]
    );
    // toz106 has no magazine slot and chambers only listing slugs: caliber
    // matching still reaches it.
    assert_eq!(
        first_filter(&catalog, "toz106", SlotKind::Chamber),
        vec!["slug", "lockpick"]
    );
    assert_eq!(first_filter(&catalog, "mag_akm_30", SlotKind::Cartridge), vec!["ps"]);
}

#[test]
fn test_strategies_compose_without_duplicates() {
    let mut catalog = armory_catalog();

    for kind in [StrategyKind::Reachability, StrategyKind::Caliber] {
        kind.propagate(&mut catalog, "slug", "lockpick", "mod_magazine");
    }

    for (path, accepted) in acceptance_snapshot(&catalog) {
        let count = accepted.iter().filter(|id| *id == "lockpick").count();
        assert!(count <= 1, "{path} lists the new ammo {count} times");
    }
}

#[test]
fn test_acceptors_after_propagation() {
    let mut catalog = magazine_catalog();
    ReachabilityPropagator.propagate(&mut catalog, ORIGINAL, NEW);

    let found = filter::acceptors(&catalog, NEW);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].item, "Mag1");
}

// ==========================================================================
// Properties
// ==========================================================================

proptest! {
    /// Running the reachability pass twice equals running it once.
    #[test]
    fn prop_reachability_is_idempotent(catalog in arb_catalog(12)) {
        let mut once = catalog.clone();
        ReachabilityPropagator.propagate(&mut once, strategies::ORIGINAL, "new");

        let mut twice = once.clone();
        let second = ReachabilityPropagator.propagate(&mut twice, strategies::ORIGINAL, "new");

        prop_assert_eq!(&once, &twice);
        prop_assert!(second.extended.is_empty());
    }

    /// Every acceptance list that held the original now holds the new id,
    /// and every other list is unchanged. Terminates on cyclic catalogs.
    #[test]
    fn prop_reachability_complete_and_non_interfering(catalog in arb_catalog(12)) {
        let before = acceptance_snapshot(&catalog);
        let mut after = catalog.clone();
        let report = ReachabilityPropagator.propagate(&mut after, strategies::ORIGINAL, "new");
        let after_snapshot = acceptance_snapshot(&after);

        prop_assert_eq!(before.len(), after_snapshot.len());
        for (path, old) in &before {
            let new = &after_snapshot[path];
            if old.iter().any(|id| id == strategies::ORIGINAL) {
                prop_assert!(new.iter().any(|id| id == "new"), "{} was not extended", path);
                prop_assert_eq!(&new[..old.len()], &old[..]);
            } else {
                prop_assert_eq!(new, old);
            }
        }
        prop_assert_eq!(report.visited, catalog.len());
    }

    /// Missing references are reported only for ids that are really absent,
    /// and never for chambers or cartridges.
    #[test]
    fn prop_reported_references_are_missing(catalog in arb_catalog(12)) {
        let mut after = catalog.clone();
        let report = ReachabilityPropagator.propagate(&mut after, strategies::ORIGINAL, "new");

        for error in &report.errors {
            match error {
                PropagationError::MissingReference { parent, slot, missing } => {
                    prop_assert!(!catalog.contains(missing));
                    prop_assert!(slot.starts_with("mod_"), "{} {} {}", parent, slot, missing);
                }
                other => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }

    /// The caliber pass only ever touches chambers and cartridges.
    #[test]
    fn prop_caliber_only_touches_terminal_slots(catalog in arb_catalog(12)) {
        let before = acceptance_snapshot(&catalog);
        let mut after = catalog.clone();
        CaliberPropagator::default().propagate(&mut after, strategies::ORIGINAL, "new");

        for (path, accepted) in acceptance_snapshot(&after) {
            if !path.kind.is_terminal() {
                prop_assert_eq!(&accepted, &before[&path]);
            }
        }
    }

    /// Both strategies produce identical results on identical input.
    #[test]
    fn prop_propagation_is_deterministic(catalog in arb_catalog(12)) {
        let mut a = catalog.clone();
        let mut b = catalog;
        for kind in [StrategyKind::Reachability, StrategyKind::Caliber] {
            let report_a = kind.propagate(&mut a, strategies::ORIGINAL, "new", "mod_0");
            let report_b = kind.propagate(&mut b, strategies::ORIGINAL, "new", "mod_0");
            prop_assert_eq!(report_a, report_b);
        }
        prop_assert_eq!(a, b);
    }
}
