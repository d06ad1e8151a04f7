//! Error types for item catalog operations.

use thiserror::Error;

/// Result type alias using [`AmmoError`].
pub type Result<T> = std::result::Result<T, AmmoError>;

/// Top-level error type for ammunition installation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmoError {
    /// The item a template is cloned from does not exist.
    #[error("Base item not found: {0}")]
    MissingBaseItem(String),

    /// Failed to parse mod configuration.
    #[error("Failed to parse mod configuration: {0}")]
    ConfigParse(String),

    /// Template is structurally unusable.
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate {
        /// Template id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// A failure confined to one branch of a propagation pass.
///
/// These never abort a pass. They are collected into a
/// [`PropagationReport`](crate::propagation::PropagationReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    /// A container slot lists an item id that is not in the catalog.
    #[error("Item '{parent}' slot '{slot}' references unknown item '{missing}'")]
    MissingReference {
        /// Item owning the slot.
        parent: String,
        /// Name of the slot.
        slot: String,
        /// Id that failed to resolve.
        missing: String,
    },

    /// The ammunition being propagated from is not in the catalog.
    #[error("Base ammunition not found: {0}")]
    MissingBaseItem(String),

    /// The ammunition being propagated from has no caliber tag.
    #[error("Base ammunition '{0}' has no caliber")]
    MissingCaliber(String),
}
