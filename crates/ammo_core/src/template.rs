//! Ammunition templates: the new rounds a mod configuration introduces.

use serde::{Deserialize, Serialize};

use crate::item::AmmoStats;

/// Item id of the rouble currency.
pub const ROUBLES_ID: &str = "5449016a4bdc2d6f028b456f";

/// Ballistic overrides applied on top of the cloned base ammunition.
///
/// Unset fields keep the base item's value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoOptions {
    /// Flesh damage.
    pub damage: Option<f64>,
    /// Damage dealt to armor.
    pub armor_damage: Option<f64>,
    /// Penetration power.
    pub penetration_power: Option<f64>,
    /// Penetration chance.
    pub penetration_chance: Option<f64>,
    /// Random spread of penetration power.
    pub penetration_power_deviation: Option<f64>,
    /// Misfire chance.
    pub misfire_chance: Option<f64>,
    /// Misfire chance when malfunctioning.
    pub malfunction_misfire_chance: Option<f64>,
    /// Feed failure chance when malfunctioning.
    pub malfunction_feed_chance: Option<f64>,
    /// Weapon durability burn multiplier.
    pub durability_burn_modifier: Option<f64>,
    /// Inventory background color name.
    pub background_color: Option<String>,
}

impl AmmoOptions {
    /// Overwrite `stats` with every option that is set.
    pub fn apply_to(&self, stats: &mut AmmoStats) {
        let pairs = [
            (self.damage, &mut stats.damage),
            (self.armor_damage, &mut stats.armor_damage),
            (self.penetration_power, &mut stats.penetration_power),
            (self.penetration_chance, &mut stats.penetration_chance),
            (
                self.penetration_power_deviation,
                &mut stats.penetration_power_deviation,
            ),
            (self.misfire_chance, &mut stats.misfire_chance),
            (
                self.malfunction_misfire_chance,
                &mut stats.malfunction_misfire_chance,
            ),
            (
                self.malfunction_feed_chance,
                &mut stats.malfunction_feed_chance,
            ),
            (
                self.durability_burn_modifier,
                &mut stats.durability_burn_modifier,
            ),
        ];
        for (value, target) in pairs {
            if let Some(value) = value {
                *target = value;
            }
        }
        if let Some(color) = &self.background_color {
            stats.background_color.clone_from(color);
        }
    }
}

/// Trader price of one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount of currency.
    pub value: u32,
    /// Currency item id.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    ROUBLES_ID.to_string()
}

/// How a trader sells the new ammunition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderOptions {
    /// Trader id.
    pub trader: String,
    /// Stock count.
    pub count: u32,
    /// Loyalty level required to buy.
    #[serde(default = "default_loyalty_level")]
    pub loyalty_level: u32,
    /// Price per unit.
    pub price: Price,
}

const fn default_loyalty_level() -> u32 {
    1
}

/// Definition of one new ammunition item.
///
/// # Example RON
///
/// ```ron
/// AmmoTemplate(
///     id: "lockpick_12g_slug",
///     original_ammo_id: "5d6e68a8a4b9360b6c0d54e2",
///     name: "12/70 Lockpick slug",
///     short_name: "Lockpick",
///     description: "Opens doors. Mostly.",
///     price_in_handbook: 1200,
///     ammo_options: (damage: Some(20.0)),
///     traders_options: [
///         TraderOptions(trader: "mechanic", count: 200, price: Price(value: 1500)),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoTemplate {
    /// Id of the new item.
    pub id: String,

    /// Id of the ammunition it is cloned from.
    pub original_ammo_id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Short display name.
    #[serde(default)]
    pub short_name: String,

    /// Description text.
    #[serde(default)]
    pub description: String,

    /// Handbook price in roubles.
    #[serde(default)]
    pub price_in_handbook: u32,

    /// Ballistic overrides.
    #[serde(default)]
    pub ammo_options: AmmoOptions,

    /// Traders selling the item.
    #[serde(default)]
    pub traders_options: Vec<TraderOptions>,
}

impl AmmoTemplate {
    /// Create a template with no overrides and no traders.
    pub fn new(id: impl Into<String>, original_ammo_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_ammo_id: original_ammo_id.into(),
            name: String::new(),
            short_name: String::new(),
            description: String::new(),
            price_in_handbook: 0,
            ammo_options: AmmoOptions::default(),
            traders_options: Vec::new(),
        }
    }

    /// Locale entries for this item, as `(key, text)` pairs.
    #[must_use]
    pub fn locale_entries(&self) -> [(String, &str); 3] {
        [
            (format!("{} Name", self.id), self.name.as_str()),
            (format!("{} ShortName", self.id), self.short_name.as_str()),
            (format!("{} Description", self.id), self.description.as_str()),
        ]
    }

    /// Check the template for problems that make it unusable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push("Template id is empty".to_string());
        }
        if self.original_ammo_id.trim().is_empty() {
            errors.push(format!("Template '{}' has no original ammo id", self.id));
        }
        if self.id == self.original_ammo_id {
            errors.push(format!("Template '{}' is cloned from itself", self.id));
        }
        for options in &self.traders_options {
            if options.trader.trim().is_empty() {
                errors.push(format!("Template '{}' has a trader with no id", self.id));
            }
        }
        errors
    }
}
