//! Host database tables touched when installing new ammunition.
//!
//! Only the parts the installer reads or writes are modelled: the item
//! catalog, the handbook, the locale tables and trader assortments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;

/// Parent id and slot id every trader assortment root item uses.
pub const ASSORT_ROOT: &str = "hideout";

/// One handbook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandbookEntry {
    /// Item id.
    pub id: String,
    /// Handbook category id.
    pub parent_id: String,
    /// Reference price in roubles.
    pub price: u32,
}

/// The handbook: reference prices and categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Handbook {
    /// All entries.
    #[serde(default)]
    pub items: Vec<HandbookEntry>,
}

impl Handbook {
    /// Find the entry for an item.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HandbookEntry> {
        self.items.iter().find(|e| e.id == id)
    }

    /// Remove every entry for an item, returning how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.id != id);
        before - self.items.len()
    }
}

/// Stack properties of an assortment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackInfo {
    /// Whether the stock never runs out.
    pub unlimited_count: bool,
    /// Number of units in stock.
    pub stack_objects_count: u32,
}

/// One item offered by a trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssortItem {
    /// Offer id.
    pub id: String,
    /// Item template id.
    pub tpl: String,
    /// Parent offer id.
    pub parent_id: String,
    /// Slot in the parent.
    pub slot_id: String,
    /// Stock information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<StackInfo>,
}

/// One component of a barter price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarterComponent {
    /// Amount of the item required.
    pub count: u32,
    /// Item template id (a currency for plain purchases).
    pub tpl: String,
}

/// Everything a trader sells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraderAssort {
    /// Offered items.
    #[serde(default)]
    pub items: Vec<AssortItem>,
    /// Price options per offer id; each inner list is one way to pay.
    #[serde(default)]
    pub barter_scheme: IndexMap<String, Vec<Vec<BarterComponent>>>,
    /// Required loyalty level per offer id.
    #[serde(default)]
    pub loyal_level_items: IndexMap<String, u32>,
}

impl TraderAssort {
    /// Remove an offer and its price and loyalty entries.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_offer(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed_items = before != self.items.len();
        let removed_barter = self.barter_scheme.shift_remove(id).is_some();
        let removed_loyalty = self.loyal_level_items.shift_remove(id).is_some();
        removed_items || removed_barter || removed_loyalty
    }
}

/// A trader.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trader {
    /// The trader's assortment.
    #[serde(default)]
    pub assort: TraderAssort,
}

/// Locale tables: language code to key to text.
pub type Locales = IndexMap<String, IndexMap<String, String>>;

/// The host tables the installer operates on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    /// Item catalog.
    #[serde(default)]
    pub items: ItemCatalog,
    /// Handbook.
    #[serde(default)]
    pub handbook: Handbook,
    /// Global locale tables.
    #[serde(default)]
    pub locales: Locales,
    /// Traders by id.
    #[serde(default)]
    pub traders: IndexMap<String, Trader>,
}
