//! Item definitions and their acceptance slots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One acceptance point on an item.
///
/// `filter` lists the item ids allowed to occupy the slot. It is treated
/// as a set by [`crate::filter`], but order is preserved because the host
/// data is order-sensitive when written back.
///
/// # Example RON
///
/// ```ron
/// Slot(
///     name: "mod_magazine",
///     filter: ["mag_akm_30", "mag_akm_drum"],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    /// Slot name (e.g. `"mod_magazine"`, `"patron_in_weapon"`, `"cartridges"`).
    pub name: String,

    /// Ids accepted in this slot.
    #[serde(default)]
    pub filter: Vec<String>,
}

impl Slot {
    /// Create a slot accepting the given ids.
    pub fn new<I, S>(name: impl Into<String>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            filter: accepted.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which slot collection of an item a [`Slot`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Sub-component slots (magazines, barrels, mounts).
    Slot,
    /// Chambers holding a round directly.
    Chamber,
    /// Magazine cartridge slots.
    Cartridge,
    /// Container grids.
    Grid,
}

impl SlotKind {
    /// Lowercase label used in logs and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slot => "slots",
            Self::Chamber => "chambers",
            Self::Cartridge => "cartridges",
            Self::Grid => "grids",
        }
    }

    /// Whether slots of this kind can hold sub-items worth descending into.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Slot)
    }
}

/// Address of a single slot inside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPath {
    /// Owning item id.
    pub item: String,
    /// Slot collection.
    pub kind: SlotKind,
    /// Position within the collection.
    pub index: usize,
    /// Slot name.
    pub name: String,
}

impl SlotPath {
    /// Build a path to `slot` at `index` of `kind` on `item`.
    pub fn new(item: &str, kind: SlotKind, index: usize, slot: &Slot) -> Self {
        Self {
            item: item.to_string(),
            kind,
            index,
            name: slot.name.clone(),
        }
    }
}

impl fmt::Display for SlotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}[{}] ({})",
            self.item,
            self.kind.label(),
            self.index,
            self.name
        )
    }
}

/// Ballistic properties of an ammunition item.
///
/// Only the properties a template can override are modelled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmmoStats {
    /// Flesh damage.
    pub damage: f64,
    /// Damage dealt to armor.
    pub armor_damage: f64,
    /// Penetration power.
    pub penetration_power: f64,
    /// Penetration chance.
    pub penetration_chance: f64,
    /// Random spread of penetration power.
    pub penetration_power_deviation: f64,
    /// Misfire chance.
    pub misfire_chance: f64,
    /// Misfire chance when the weapon is malfunctioning.
    pub malfunction_misfire_chance: f64,
    /// Feed failure chance when the weapon is malfunctioning.
    pub malfunction_feed_chance: f64,
    /// Weapon durability burn multiplier.
    pub durability_burn_modifier: f64,
    /// Inventory background color name.
    #[serde(default)]
    pub background_color: String,
}

/// One entry of the item catalog: ammunition, weapon, magazine or container.
///
/// # Example RON
///
/// ```ron
/// ItemDefinition(
///     id: "mag_akm_30",
///     name: "AKM 30-round magazine",
///     parent: "magazine",
///     cartridges: Some([Slot(name: "cartridges", filter: ["762x39_ps"])]),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique item id.
    pub id: String,

    /// Internal name.
    #[serde(default)]
    pub name: String,

    /// Parent node id in the host item hierarchy.
    #[serde(default)]
    pub parent: String,

    /// Caliber tag for ammunition, weapons and magazines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caliber: Option<String>,

    /// Sub-component slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Slot>>,

    /// Chambers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chambers: Option<Vec<Slot>>,

    /// Magazine cartridge slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cartridges: Option<Vec<Slot>>,

    /// Container grids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<Vec<Slot>>,

    /// Ammunition properties, present on ammunition items only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<AmmoStats>,
}

impl ItemDefinition {
    /// Create an item with no slots.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Borrow one slot collection.
    #[must_use]
    pub fn slots_of(&self, kind: SlotKind) -> Option<&Vec<Slot>> {
        match kind {
            SlotKind::Slot => self.slots.as_ref(),
            SlotKind::Chamber => self.chambers.as_ref(),
            SlotKind::Cartridge => self.cartridges.as_ref(),
            SlotKind::Grid => self.grids.as_ref(),
        }
    }

    /// Mutably borrow one slot collection.
    pub fn slots_of_mut(&mut self, kind: SlotKind) -> Option<&mut Vec<Slot>> {
        match kind {
            SlotKind::Slot => self.slots.as_mut(),
            SlotKind::Chamber => self.chambers.as_mut(),
            SlotKind::Cartridge => self.cartridges.as_mut(),
            SlotKind::Grid => self.grids.as_mut(),
        }
    }

    /// Find a sub-component slot by name.
    #[must_use]
    pub fn find_slot(&self, name: &str) -> Option<&Slot> {
        self.slots.as_ref()?.iter().find(|s| s.name == name)
    }

    /// Whether the item has at least one chamber.
    #[must_use]
    pub fn has_chambers(&self) -> bool {
        self.chambers.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Whether the item carries the given caliber tag.
    #[must_use]
    pub fn has_caliber(&self, caliber: &str) -> bool {
        self.caliber.as_deref() == Some(caliber)
    }
}
