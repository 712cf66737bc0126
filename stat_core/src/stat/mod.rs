//! Stat - A named value derived from a base and a modifier stack

mod breakdown;

pub use breakdown::StatBreakdown;

use crate::error::StatError;
use crate::event::{Listeners, SubscriptionId, ValueChange};
use crate::modifier::{Modifier, ModifierType};
use std::fmt;
use tracing::{trace, warn};

/// Compare two values the way a single-precision "approximately equal" does:
/// equal to roughly six significant digits.
pub fn approximately(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let tolerance = (1e-6 * a.abs().max(b.abs())).max(f64::MIN_POSITIVE * 8.0);
    (b - a).abs() < tolerance
}

/// A named numeric attribute
///
/// `current_value` is always `clamp(recalculated, min, max)` and is recomputed
/// synchronously by every mutation. Subscribers see `(old, new)` once per
/// mutating call, and only when the value changed beyond [`approximately`].
pub struct Stat {
    name: String,
    base_value: f64,
    min_value: f64,
    max_value: f64,
    /// Stably sorted by `order`, ascending
    modifiers: Vec<Modifier>,
    current_value: f64,
    listeners: Listeners<ValueChange>,
}

/// Bounds must be finite so the base value is always finite (and persistable)
fn validate_range(min: f64, max: f64) -> Result<(), StatError> {
    if !min.is_finite() {
        return Err(StatError::NotFinite { what: "min_value" });
    }
    if !max.is_finite() {
        return Err(StatError::NotFinite { what: "max_value" });
    }
    if min > max {
        return Err(StatError::InvalidRange { min, max });
    }
    Ok(())
}

impl Stat {
    /// Create a stat spanning the full `f64` range
    pub fn new(name: impl Into<String>, base_value: f64) -> Result<Self, StatError> {
        Self::with_range(name, base_value, f64::MIN, f64::MAX)
    }

    /// Create a stat clamped to `[min_value, max_value]`
    pub fn with_range(
        name: impl Into<String>,
        base_value: f64,
        min_value: f64,
        max_value: f64,
    ) -> Result<Self, StatError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StatError::EmptyName);
        }
        validate_range(min_value, max_value)?;
        if base_value.is_nan() {
            return Err(StatError::NotANumber { what: "base_value" });
        }

        let base_value = base_value.clamp(min_value, max_value);
        Ok(Stat {
            name,
            base_value,
            min_value,
            max_value,
            modifiers: Vec::new(),
            current_value: base_value,
            listeners: Listeners::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// The modifier stack in application order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Modifiers of one type, in the order their pass applies them
    pub fn modifiers_of(&self, kind: ModifierType) -> impl Iterator<Item = &Modifier> + '_ {
        self.modifiers.iter().filter(move |m| m.kind() == kind)
    }

    pub fn has_modifier(&self, modifier: &Modifier) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Intermediate values of the current recalculation
    pub fn breakdown(&self) -> StatBreakdown {
        StatBreakdown::compute(self.base_value, &self.modifiers, self.min_value, self.max_value)
    }

    /// Subscribe to `(old, new)` change notifications
    pub fn subscribe(&mut self, handler: impl FnMut(&ValueChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Mutation ===

    /// Set the base value (clamped to the stat's range)
    pub fn set_base_value(&mut self, value: f64) -> Option<ValueChange> {
        if value.is_nan() {
            warn!(stat = %self.name, "ignoring NaN base value");
            return None;
        }
        self.base_value = value.clamp(self.min_value, self.max_value);
        self.recalculate()
    }

    /// Change the range, re-clamping the base value
    pub fn set_range(&mut self, min_value: f64, max_value: f64) -> Result<Option<ValueChange>, StatError> {
        validate_range(min_value, max_value)?;
        self.min_value = min_value;
        self.max_value = max_value;
        self.base_value = self.base_value.clamp(min_value, max_value);
        Ok(self.recalculate())
    }

    /// Push a modifier onto the stack and re-sort it stably by `order`
    ///
    /// Modifiers with a NaN value are rejected.
    pub fn add_modifier(&mut self, modifier: Modifier) -> Option<ValueChange> {
        if modifier.value().is_nan() {
            warn!(stat = %self.name, modifier = %modifier.id(), "ignoring NaN modifier");
            return None;
        }
        self.modifiers.push(modifier);
        self.modifiers.sort_by_key(Modifier::order);
        self.recalculate()
    }

    /// Remove the first occurrence of `modifier`, returning whether one was found
    pub fn remove_modifier(&mut self, modifier: &Modifier) -> bool {
        let Some(index) = self.modifiers.iter().position(|m| m == modifier) else {
            return false;
        };
        self.modifiers.remove(index);
        self.recalculate();
        true
    }

    /// Remove every modifier matching `predicate`, returning how many were removed
    ///
    /// Recalculates (and notifies) at most once.
    pub fn remove_modifiers_where(&mut self, mut predicate: impl FnMut(&Modifier) -> bool) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| !predicate(m));
        let removed = before - self.modifiers.len();
        if removed > 0 {
            self.recalculate();
        }
        removed
    }

    /// Clear the whole modifier stack
    pub fn remove_all_modifiers(&mut self) -> Option<ValueChange> {
        self.modifiers.clear();
        self.recalculate()
    }

    fn recalculate(&mut self) -> Option<ValueChange> {
        let old_value = self.current_value;
        let new_value = self.breakdown().current;
        self.current_value = new_value;
        trace!(stat = %self.name, old_value, new_value, "recalculated");

        if approximately(old_value, new_value) {
            return None;
        }
        let change = ValueChange { old_value, new_value };
        self.listeners.emit(&change);
        Some(change)
    }
}

impl fmt::Debug for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stat")
            .field("name", &self.name)
            .field("base_value", &self.base_value)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("current_value", &self.current_value)
            .field("modifiers", &self.modifiers)
            .field("listeners", &self.listeners)
            .finish()
    }
}
