//! Data validation utilities.

use ammo_core::config::ModConfig;
use ammo_core::database::Database;

/// Validate the item catalog of a database.
///
/// Reports sub-component slots listing unknown items and reference cycles
/// between container items.
#[must_use]
pub fn validate_database(db: &Database) -> Vec<String> {
    let mut errors = db.items.validate();

    for cycle in db.items.container_cycles() {
        errors.push(format!("Container cycle: {}", cycle.join(" -> ")));
    }

    errors
}

/// Validate a mod configuration against a database.
///
/// Reports structural problems in the configuration, templates whose base
/// ammunition is missing, and traders that do not exist.
#[must_use]
pub fn validate_config(db: &Database, config: &ModConfig) -> Vec<String> {
    let mut errors = config.validate();

    for template in &config.templates {
        match db.items.get(&template.original_ammo_id) {
            None => errors.push(format!(
                "Template '{}' is based on unknown item '{}'",
                template.id, template.original_ammo_id
            )),
            Some(base) if base.ammo.is_none() => errors.push(format!(
                "Template '{}' is based on '{}', which is not ammunition",
                template.id, template.original_ammo_id
            )),
            Some(_) => {}
        }

        for options in &template.traders_options {
            if !db.traders.contains_key(&options.trader) {
                errors.push(format!(
                    "Template '{}' is sold by unknown trader '{}'",
                    template.id, options.trader
                ));
            }
        }
    }

    for container in &config.secure_containers {
        if !db.items.contains(container) {
            errors.push(format!("Secure container '{container}' not found"));
        }
    }

    errors
}
