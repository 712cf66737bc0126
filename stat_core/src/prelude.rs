//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::modifier::{Modifier, ModifierSource, ModifierType};
pub use crate::registry::StatRegistry;
pub use crate::stat::{Stat, StatBreakdown};

// Notifications
pub use crate::event::{StatChange, SubscriptionId, ValueChange};

// Config
pub use crate::config::{default_preset, StatDefinition, StatPreset};
