//! Installs new ammunition into the host database.
//!
//! Installing a template clones its base ammunition, applies the
//! template's overrides, registers the clone in every table a player can
//! reach it through (locales, handbook, traders, secure containers) and
//! finally propagates compatibility so every weapon that fires the base
//! round also fires the new one.
//!
//! Installation is repeatable: any state left by a previous run for the
//! same id is removed before it is written again.

use crate::config::ModConfig;
use crate::database::{AssortItem, BarterComponent, Database, HandbookEntry, StackInfo, ASSORT_ROOT};
use crate::error::{AmmoError, Result};
use crate::filter;
use crate::item::AmmoStats;
use crate::propagation::{PropagationReport, StrategyKind};
use crate::template::AmmoTemplate;

/// Outcome of installing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Id of the installed item.
    pub template_id: String,
    /// Whether an item with this id already existed and was replaced.
    pub replaced_existing: bool,
    /// Combined report of all propagation strategies.
    pub propagation: PropagationReport,
    /// Non-fatal problems (missing traders, containers, handbook entries).
    pub warnings: Vec<String>,
}

/// Outcome of installing a list of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Templates that were installed.
    pub installed: Vec<InstallReport>,
    /// Templates that were skipped, with the reason.
    pub skipped: Vec<(String, AmmoError)>,
}

impl InstallSummary {
    /// True if every template was installed without warnings or branch errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self
                .installed
                .iter()
                .all(|r| r.warnings.is_empty() && r.propagation.is_clean())
    }
}

/// Installs ammunition templates according to a [`ModConfig`].
#[derive(Debug, Clone)]
pub struct AmmoInstaller {
    strategies: Vec<StrategyKind>,
    secure_containers: Vec<String>,
    magazine_slot: String,
}

impl Default for AmmoInstaller {
    fn default() -> Self {
        Self::from_config(&ModConfig::default())
    }
}

impl AmmoInstaller {
    /// Create an installer using the strategies and containers of `config`.
    #[must_use]
    pub fn from_config(config: &ModConfig) -> Self {
        Self {
            strategies: config.strategies.clone(),
            secure_containers: config.secure_containers.clone(),
            magazine_slot: config.magazine_slot.clone(),
        }
    }

    /// Install every template in order.
    ///
    /// A template that fails is logged and skipped; later templates are
    /// still installed.
    pub fn install_all(&self, db: &mut Database, templates: &[AmmoTemplate]) -> InstallSummary {
        let mut summary = InstallSummary::default();

        for template in templates {
            tracing::info!(
                id = %template.id,
                base = %template.original_ammo_id,
                "Installing ammunition"
            );
            match self.install(db, template) {
                Ok(report) => summary.installed.push(report),
                Err(e) => {
                    tracing::warn!(id = %template.id, "Skipping template: {e}");
                    summary.skipped.push((template.id.clone(), e));
                }
            }
        }

        summary
    }

    /// Install one template.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving `db` untouched, if the template is invalid
    /// or its base ammunition is not in the catalog.
    pub fn install(&self, db: &mut Database, template: &AmmoTemplate) -> Result<InstallReport> {
        let problems = template.validate();
        if !problems.is_empty() {
            return Err(AmmoError::InvalidTemplate {
                id: template.id.clone(),
                reason: problems.join("; "),
            });
        }

        let Some(base) = db.items.get(&template.original_ammo_id).cloned() else {
            return Err(AmmoError::MissingBaseItem(template.original_ammo_id.clone()));
        };

        let mut report = InstallReport {
            template_id: template.id.clone(),
            replaced_existing: false,
            propagation: PropagationReport::default(),
            warnings: Vec::new(),
        };

        report.replaced_existing = db.items.remove(&template.id).is_some();
        if report.replaced_existing {
            tracing::warn!(id = %template.id, "Item already exists, replacing it");
        }

        let mut item = base;
        item.id.clone_from(&template.id);
        template
            .ammo_options
            .apply_to(item.ammo.get_or_insert_with(AmmoStats::default));
        db.items.insert(item);

        Self::install_locales(db, template);
        Self::install_handbook(db, template, &mut report.warnings);
        Self::install_traders(db, template, &mut report.warnings);
        self.install_secure_containers(db, &template.id, &mut report.warnings);

        for kind in &self.strategies {
            let pass = kind.propagate(
                &mut db.items,
                &template.original_ammo_id,
                &template.id,
                &self.magazine_slot,
            );
            report.propagation.merge(pass);
        }

        tracing::info!(
            id = %template.id,
            extended = report.propagation.extended.len(),
            errors = report.propagation.errors.len(),
            warnings = report.warnings.len(),
            "Installed ammunition"
        );
        Ok(report)
    }

    fn install_locales(db: &mut Database, template: &AmmoTemplate) {
        for locale in db.locales.values_mut() {
            for (key, text) in template.locale_entries() {
                locale.shift_remove(&key);
                locale.insert(key, text.to_string());
            }
        }
    }

    fn install_handbook(db: &mut Database, template: &AmmoTemplate, warnings: &mut Vec<String>) {
        if db.handbook.remove(&template.id) > 0 {
            tracing::warn!(id = %template.id, "Item already exists in handbook");
        }

        let Some(parent_id) = db
            .handbook
            .get(&template.original_ammo_id)
            .map(|e| e.parent_id.clone())
        else {
            let message = format!(
                "Base item '{}' has no handbook entry, '{}' not added to handbook",
                template.original_ammo_id, template.id
            );
            tracing::warn!("{message}");
            warnings.push(message);
            return;
        };

        db.handbook.items.push(HandbookEntry {
            id: template.id.clone(),
            parent_id,
            price: template.price_in_handbook,
        });
    }

    fn install_traders(db: &mut Database, template: &AmmoTemplate, warnings: &mut Vec<String>) {
        for options in &template.traders_options {
            let Some(trader) = db.traders.get_mut(&options.trader) else {
                let message = format!(
                    "Trader '{}' not found, '{}' not sold",
                    options.trader, template.id
                );
                tracing::warn!("{message}");
                warnings.push(message);
                continue;
            };

            let assort = &mut trader.assort;
            assort.remove_offer(&template.id);
            assort.items.push(AssortItem {
                id: template.id.clone(),
                tpl: template.id.clone(),
                parent_id: ASSORT_ROOT.to_string(),
                slot_id: ASSORT_ROOT.to_string(),
                upd: Some(StackInfo {
                    unlimited_count: false,
                    stack_objects_count: options.count,
                }),
            });
            assort.barter_scheme.insert(
                template.id.clone(),
                vec![vec![BarterComponent {
                    count: options.price.value,
                    tpl: options.price.currency.clone(),
                }]],
            );
            assort
                .loyal_level_items
                .insert(template.id.clone(), options.loyalty_level);
        }
    }

    fn install_secure_containers(&self, db: &mut Database, id: &str, warnings: &mut Vec<String>) {
        for container_id in &self.secure_containers {
            let Some(container) = db.items.get_mut(container_id) else {
                let message = format!("Secure container '{container_id}' not found, skipped");
                tracing::warn!("{message}");
                warnings.push(message);
                continue;
            };
            let Some(grid) = container.grids.as_mut().and_then(|grids| grids.first_mut()) else {
                let message = format!("Secure container '{container_id}' has no grid, skipped");
                tracing::warn!("{message}");
                warnings.push(message);
                continue;
            };

            filter::remove(grid, id);
            filter::extend(grid, id);
        }
    }
}
