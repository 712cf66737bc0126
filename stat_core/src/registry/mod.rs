//! StatRegistry - The named stats of one entity

mod persist;

use crate::config::{StatDefinition, StatPreset};
use crate::error::StatError;
use crate::event::{Listeners, StatChange, SubscriptionId, ValueChange};
use crate::modifier::{Modifier, ModifierSource, ModifierType};
use crate::stat::{approximately, Stat};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Owns every [`Stat`] of one entity, keyed by name
///
/// All mutation goes through the registry so that each effective change is
/// re-published on the registry's own channel as `(name, old, new)`.
/// Enumeration follows insertion order.
///
/// Single-threaded: handlers are not `Send`, so neither is the registry.
pub struct StatRegistry {
    /// Entity this registry belongs to (used for log context)
    owner: String,
    stats: IndexMap<String, Stat>,
    listeners: Listeners<StatChange>,
}

/// Run a mutation on `stat` and publish the effective change, if any
fn relay<R>(
    listeners: &mut Listeners<StatChange>,
    stat: &mut Stat,
    mutate: impl FnOnce(&mut Stat) -> R,
) -> R {
    let old_value = stat.current_value();
    let result = mutate(stat);
    let new_value = stat.current_value();

    if !approximately(old_value, new_value) {
        let change = StatChange::new(stat.name(), ValueChange { old_value, new_value });
        trace!(stat = %change.name, old_value, new_value, "publishing stat change");
        listeners.emit(&change);
    }
    result
}

impl StatRegistry {
    /// Create an empty registry
    pub fn new(owner: impl Into<String>) -> Self {
        StatRegistry {
            owner: owner.into(),
            stats: IndexMap::new(),
            listeners: Listeners::new(),
        }
    }

    /// Create a registry seeded from definitions
    pub fn with_definitions(owner: impl Into<String>, definitions: &[StatDefinition]) -> Self {
        let mut registry = Self::new(owner);
        registry.initialize(definitions);
        registry
    }

    /// Add a stat for each definition
    ///
    /// Entries with an empty name are skipped silently; invalid ranges are
    /// skipped with a warning.
    pub fn initialize(&mut self, definitions: &[StatDefinition]) {
        for def in definitions {
            if def.name.is_empty() {
                continue;
            }
            if let Err(err) = self.add_stat(&def.name, def.value, def.min_value, def.max_value) {
                warn!(owner = %self.owner, stat = %def.name, %err, "skipping stat definition");
            }
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    // === Query ===

    pub fn has_stat(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    pub fn get_stat(&self, name: &str) -> Option<&Stat> {
        self.stats.get(name)
    }

    /// Current value of a stat, or 0 if it does not exist
    pub fn get_value(&self, name: &str) -> f64 {
        self.stats.get(name).map(Stat::current_value).unwrap_or(0.0)
    }

    /// Stat names in registry order
    ///
    /// Lazy; call again to restart.
    pub fn all_stat_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stats.keys().map(String::as_str)
    }

    /// Snapshot of every current value
    pub fn all_values(&self) -> IndexMap<String, f64> {
        self.stats
            .iter()
            .map(|(name, stat)| (name.clone(), stat.current_value()))
            .collect()
    }

    /// All stats in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stat)> + '_ {
        self.stats.iter().map(|(name, stat)| (name.as_str(), stat))
    }

    // === Notification ===

    /// Subscribe to `(name, old, new)` notifications for every stat
    pub fn subscribe(&mut self, handler: impl FnMut(&StatChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Stat lifecycle ===

    /// Register a new stat, or return the existing one untouched
    pub fn add_stat(
        &mut self,
        name: &str,
        base_value: f64,
        min_value: f64,
        max_value: f64,
    ) -> Result<&Stat, StatError> {
        if self.stats.contains_key(name) {
            warn!(owner = %self.owner, stat = name, "stat already exists, keeping existing");
            return Ok(&self.stats[name]);
        }

        let stat = Stat::with_range(name, base_value, min_value, max_value)?;
        debug!(owner = %self.owner, stat = name, base_value, min_value, max_value, "added stat");
        let (index, _) = self.stats.insert_full(name.to_string(), stat);
        Ok(&self.stats[index])
    }

    /// Remove a stat and its modifiers
    pub fn remove_stat(&mut self, name: &str) -> bool {
        let removed = self.stats.shift_remove(name).is_some();
        if removed {
            debug!(owner = %self.owner, stat = name, "removed stat");
        }
        removed
    }

    // === Mutation ===

    fn update<R>(&mut self, name: &str, mutate: impl FnOnce(&mut Stat) -> R) -> Option<R> {
        let stat = self.stats.get_mut(name)?;
        Some(relay(&mut self.listeners, stat, mutate))
    }

    /// Set a stat's base value; false if the stat does not exist
    pub fn set_base_value(&mut self, name: &str, value: f64) -> bool {
        self.update(name, |stat| stat.set_base_value(value)).is_some()
    }

    /// Attach an existing modifier; false if the stat is missing or the modifier was rejected
    pub fn add_modifier(&mut self, name: &str, modifier: Modifier) -> bool {
        let id = modifier.id();
        let added = self
            .update(name, |stat| {
                stat.add_modifier(modifier);
                stat.modifiers().iter().any(|m| m.id() == id)
            })
            .unwrap_or(false);
        if added {
            debug!(owner = %self.owner, stat = name, modifier = %id, "added modifier");
        }
        added
    }

    /// Build and attach a modifier, returning a handle for later removal
    pub fn add_new_modifier(
        &mut self,
        name: &str,
        value: f64,
        kind: ModifierType,
        order: i32,
        source: Option<ModifierSource>,
    ) -> Option<Modifier> {
        let mut modifier = Modifier::new(value, kind).with_order(order);
        if let Some(source) = source {
            modifier = modifier.with_source(source);
        }
        let handle = modifier.clone();
        self.add_modifier(name, modifier).then_some(handle)
    }

    /// Detach a modifier by identity
    pub fn remove_modifier(&mut self, name: &str, modifier: &Modifier) -> bool {
        let removed = self
            .update(name, |stat| stat.remove_modifier(modifier))
            .unwrap_or(false);
        if removed {
            debug!(owner = %self.owner, stat = name, modifier = %modifier.id(), "removed modifier");
        }
        removed
    }

    /// Clear a stat's modifier stack; false if the stat does not exist
    pub fn remove_all_modifiers(&mut self, name: &str) -> bool {
        self.update(name, |stat| stat.remove_all_modifiers()).is_some()
    }

    /// Remove every modifier applied by `source`, across all stats
    ///
    /// Returns how many modifiers were removed.
    pub fn remove_all_modifiers_from_source(&mut self, source: &ModifierSource) -> usize {
        let mut removed = 0;
        for stat in self.stats.values_mut() {
            removed += relay(&mut self.listeners, stat, |stat| {
                stat.remove_modifiers_where(|m| m.is_from(source))
            });
        }
        debug!(owner = %self.owner, %source, removed, "removed modifiers from source");
        removed
    }

    /// Add missing stats and overwrite base values of existing ones
    ///
    /// Modifiers are left in place.
    pub fn apply_preset(&mut self, preset: &StatPreset) {
        for def in &preset.stats {
            if def.name.is_empty() {
                continue;
            }
            if self.has_stat(&def.name) {
                self.set_base_value(&def.name, def.value);
            } else if let Err(err) = self.add_stat(&def.name, def.value, def.min_value, def.max_value) {
                warn!(owner = %self.owner, preset = %preset.name, stat = %def.name, %err, "skipping preset entry");
            }
        }
        debug!(owner = %self.owner, preset = %preset.name, "applied preset");
    }
}

impl fmt::Debug for StatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatRegistry")
            .field("owner", &self.owner)
            .field("stats", &self.stats)
            .field("listeners", &self.listeners)
            .finish()
    }
}
