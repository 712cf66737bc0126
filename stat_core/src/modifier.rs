//! Modifier - Typed adjustments applied on top of a stat's base value

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MODIFIER_ID: AtomicU64 = AtomicU64::new(1);

/// How a modifier's value is interpreted during recalculation
///
/// Passes always run in this order, regardless of where a modifier sits in
/// the stack: percentage multipliers, then flat additions, then overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    /// `value += modifier`
    FlatAddition,
    /// `value *= 1 + modifier` (as decimal, e.g. 0.5 = +50%)
    PercentageMultiplier,
    /// `value = modifier`, first override in stack order wins
    Override,
}

impl ModifierType {
    pub fn all() -> &'static [ModifierType] {
        &[
            ModifierType::PercentageMultiplier,
            ModifierType::FlatAddition,
            ModifierType::Override,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModifierType::FlatAddition => "Flat",
            ModifierType::PercentageMultiplier => "Percent",
            ModifierType::Override => "Override",
        }
    }
}

/// Unique identity of a modifier, assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierId(u64);

impl ModifierId {
    fn next() -> Self {
        ModifierId(NEXT_MODIFIER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mod#{}", self.0)
    }
}

/// Identifier for whatever applied a modifier (an item, a buff, a tool)
///
/// Only ever compared, never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierSource(pub String);

impl ModifierSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModifierSource {
    fn from(s: &str) -> Self {
        ModifierSource(s.to_string())
    }
}

impl From<String> for ModifierSource {
    fn from(s: String) -> Self {
        ModifierSource(s)
    }
}

impl fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable adjustment to a stat
///
/// Two modifiers built from identical arguments are still different
/// modifiers: equality compares the [`ModifierId`] only. Cloning keeps the id,
/// so a clone acts as a handle that can later remove the original.
#[derive(Debug, Clone)]
pub struct Modifier {
    id: ModifierId,
    value: f64,
    kind: ModifierType,
    order: i32,
    source: Option<ModifierSource>,
}

impl Modifier {
    /// Create a modifier with order 0 and no source
    pub fn new(value: f64, kind: ModifierType) -> Self {
        Modifier {
            id: ModifierId::next(),
            value,
            kind,
            order: 0,
            source: None,
        }
    }

    pub fn flat(value: f64) -> Self {
        Self::new(value, ModifierType::FlatAddition)
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, ModifierType::PercentageMultiplier)
    }

    pub fn override_with(value: f64) -> Self {
        Self::new(value, ModifierType::Override)
    }

    /// Set the application order within this modifier's pass (ascending)
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Tag the modifier with whatever applied it
    pub fn with_source(mut self, source: impl Into<ModifierSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn id(&self) -> ModifierId {
        self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn kind(&self) -> ModifierType {
        self.kind
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn source(&self) -> Option<&ModifierSource> {
        self.source.as_ref()
    }

    /// Check whether this modifier was applied by `source`
    pub fn is_from(&self, source: &ModifierSource) -> bool {
        self.source.as_ref() == Some(source)
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Modifier {}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ModifierType::FlatAddition => write!(f, "{:+}", self.value)?,
            ModifierType::PercentageMultiplier => write!(f, "{:+}%", self.value * 100.0)?,
            ModifierType::Override => write!(f, "={}", self.value)?,
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_fields_are_distinct() {
        let a = Modifier::flat(10.0);
        let b = Modifier::flat(10.0);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clone_is_same_modifier() {
        let a = Modifier::percent(0.5).with_source("ring");
        let handle = a.clone();
        assert_eq!(a, handle);
    }

    #[test]
    fn test_builder_fields() {
        let m = Modifier::override_with(5.0).with_order(3).with_source("god_mode");
        assert_eq!(m.kind(), ModifierType::Override);
        assert_eq!(m.order(), 3);
        assert!((m.value() - 5.0).abs() < f64::EPSILON);
        assert!(m.is_from(&ModifierSource::from("god_mode")));
        assert!(!m.is_from(&ModifierSource::from("other")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Modifier::flat(10.0).to_string(), "+10");
        assert_eq!(Modifier::percent(0.5).with_source("buff").to_string(), "+50% (buff)");
        assert_eq!(Modifier::override_with(5.0).to_string(), "=5");
    }
}
