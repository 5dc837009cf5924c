//! # Presence Rules
//!
//! The rule book crate - every type the engine reads but never computes:
//! ordered tiers, the resolution context, the generic content tree, and the
//! engine/domain rules with their loader. This crate contains no resolution
//! or layout logic.

pub mod content;
pub mod context;
pub mod error;
pub mod rules;
pub mod tiers;

pub use content::*;
pub use context::*;
pub use error::RulesError;
pub use rules::*;
pub use tiers::*;
