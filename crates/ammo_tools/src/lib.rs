//! # Ammo Tools
//!
//! Command-line tools for mod development:
//! - Applying ammunition templates to a database snapshot
//! - Data validators
//! - Acceptor lookup for an ammunition id

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod apply;
pub mod loader;
pub mod validate;
