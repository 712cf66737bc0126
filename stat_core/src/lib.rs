//! stat_core - Stat and modifier evaluation engine for game entities
//!
//! This library provides:
//! - Modifier: Flat, percentage and override adjustments with identity
//! - Stat: A clamped value recalculated from a base and a modifier stack
//! - StatRegistry: The named stats of one entity, with change notifications
//! - Presets and base-value persistence
//!
//! Everything here is single-threaded: mutation, recalculation and
//! notification all happen in-line on the calling thread.

pub mod config;
pub mod error;
pub mod event;
pub mod modifier;
pub mod prelude;
pub mod registry;
pub mod stat;

// Re-export core types for convenience
pub use config::{default_preset, ConfigError, StatDefinition, StatPreset};
pub use error::{PersistError, StatError};
pub use event::{StatChange, SubscriptionId, ValueChange};
pub use modifier::{Modifier, ModifierId, ModifierSource, ModifierType};
pub use registry::StatRegistry;
pub use stat::{approximately, Stat, StatBreakdown};
