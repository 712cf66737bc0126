//! Tuner - Drives stats toward desired values through modifiers
//!
//! The tuner never touches base values. For each stat it owns at most one
//! flat "tuning" modifier holding `desired - base`, replaced on every change,
//! plus an optional pinned override.

use stat_core::{Modifier, ModifierSource, ModifierType, StatRegistry};
use std::collections::HashMap;
use tracing::debug;

/// Source tag on every modifier the tuner adds
pub const TUNER_SOURCE: &str = "tuner";

/// Tuning modifiers apply after other flats of order 0
const TUNING_ORDER: i32 = 100;

#[derive(Debug, Default)]
pub struct Tuner {
    tuning: HashMap<String, Modifier>,
    pins: HashMap<String, Modifier>,
}

impl Tuner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source() -> ModifierSource {
        ModifierSource::from(TUNER_SOURCE)
    }

    /// The value the tuner is aiming for: base plus the tuning delta
    pub fn desired(&self, registry: &StatRegistry, name: &str) -> Option<f64> {
        let stat = registry.get_stat(name)?;
        let delta = self.tuning.get(name).map(Modifier::value).unwrap_or(0.0);
        Some(stat.base_value() + delta)
    }

    pub fn is_pinned(&self, name: &str) -> bool {
        self.pins.contains_key(name)
    }

    /// Replace the tuning modifier so that `base + delta == desired`
    pub fn set_desired(&mut self, registry: &mut StatRegistry, name: &str, desired: f64) -> bool {
        let Some(base) = registry.get_stat(name).map(|s| s.base_value()) else {
            return false;
        };

        if let Some(previous) = self.tuning.remove(name) {
            registry.remove_modifier(name, &previous);
        }

        let delta = desired - base;
        if delta == 0.0 {
            return true;
        }
        match registry.add_new_modifier(
            name,
            delta,
            ModifierType::FlatAddition,
            TUNING_ORDER,
            Some(Self::source()),
        ) {
            Some(handle) => {
                debug!(stat = name, desired, delta, "tuned stat");
                self.tuning.insert(name.to_string(), handle);
                true
            }
            None => false,
        }
    }

    /// Move the desired value by `step`
    pub fn nudge(&mut self, registry: &mut StatRegistry, name: &str, step: f64) -> bool {
        let Some(current) = self.desired(registry, name) else {
            return false;
        };
        self.set_desired(registry, name, current + step)
    }

    /// Pin the stat at its current value with an override, or release the pin
    ///
    /// Returns whether the stat is pinned afterwards.
    pub fn toggle_pin(&mut self, registry: &mut StatRegistry, name: &str) -> bool {
        if let Some(pin) = self.pins.remove(name) {
            registry.remove_modifier(name, &pin);
            return false;
        }

        let current = registry.get_value(name);
        match registry.add_new_modifier(name, current, ModifierType::Override, 0, Some(Self::source())) {
            Some(handle) => {
                self.pins.insert(name.to_string(), handle);
                true
            }
            None => false,
        }
    }

    /// Drop handles whose modifiers are no longer attached
    pub fn sync(&mut self, registry: &StatRegistry) {
        let attached = |name: &String, m: &mut Modifier| {
            registry.get_stat(name).is_some_and(|s| s.has_modifier(m))
        };
        self.tuning.retain(attached);
        self.pins.retain(attached);
    }

    /// Remove every tuner modifier from every stat
    pub fn reset(&mut self, registry: &mut StatRegistry) -> usize {
        self.tuning.clear();
        self.pins.clear();
        registry.remove_all_modifiers_from_source(&Self::source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::StatDefinition;

    fn registry() -> StatRegistry {
        StatRegistry::with_definitions(
            "test",
            &[
                StatDefinition::new("aggression", 0.5).with_range(0.0, 1.0),
                StatDefinition::new("speed", 4.0).with_range(0.0, 10.0),
            ],
        )
    }

    #[test]
    fn test_set_desired_uses_flat_delta() {
        let mut registry = registry();
        let mut tuner = Tuner::new();

        assert!(tuner.set_desired(&mut registry, "speed", 6.0));
        let stat = registry.get_stat("speed").unwrap();
        assert!((stat.base_value() - 4.0).abs() < f64::EPSILON);
        assert!((stat.current_value() - 6.0).abs() < f64::EPSILON);
        assert_eq!(stat.modifiers().len(), 1);
        assert_eq!(stat.modifiers()[0].kind(), ModifierType::FlatAddition);
    }

    #[test]
    fn test_set_desired_replaces_previous() {
        let mut registry = registry();
        let mut tuner = Tuner::new();

        tuner.set_desired(&mut registry, "speed", 6.0);
        tuner.set_desired(&mut registry, "speed", 3.0);
        let stat = registry.get_stat("speed").unwrap();
        assert_eq!(stat.modifiers().len(), 1);
        assert!((stat.current_value() - 3.0).abs() < f64::EPSILON);

        // Back to base leaves no modifier behind
        tuner.set_desired(&mut registry, "speed", 4.0);
        assert!(registry.get_stat("speed").unwrap().modifiers().is_empty());
    }

    #[test]
    fn test_nudge_and_clamp() {
        let mut registry = registry();
        let mut tuner = Tuner::new();

        for _ in 0..10 {
            tuner.nudge(&mut registry, "aggression", 0.1);
        }
        assert!((tuner.desired(&registry, "aggression").unwrap() - 1.5).abs() < 1e-9);
        assert!((registry.get_value("aggression") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_stat() {
        let mut registry = registry();
        let mut tuner = Tuner::new();
        assert!(!tuner.set_desired(&mut registry, "missing", 1.0));
        assert!(!tuner.nudge(&mut registry, "missing", 1.0));
        assert!(tuner.desired(&registry, "missing").is_none());
    }

    #[test]
    fn test_toggle_pin() {
        let mut registry = registry();
        let mut tuner = Tuner::new();

        assert!(tuner.toggle_pin(&mut registry, "speed"));
        assert!(tuner.is_pinned("speed"));
        tuner.set_desired(&mut registry, "speed", 9.0);
        assert!((registry.get_value("speed") - 4.0).abs() < f64::EPSILON);

        assert!(!tuner.toggle_pin(&mut registry, "speed"));
        assert!((registry.get_value("speed") - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sync_after_external_clear() {
        let mut registry = registry();
        let mut tuner = Tuner::new();
        tuner.set_desired(&mut registry, "speed", 6.0);
        tuner.toggle_pin(&mut registry, "aggression");

        registry.remove_all_modifiers("speed");
        tuner.sync(&registry);

        assert!((tuner.desired(&registry, "speed").unwrap() - 4.0).abs() < f64::EPSILON);
        assert!(tuner.is_pinned("aggression"));
    }

    #[test]
    fn test_reset_only_removes_tuner_modifiers() {
        let mut registry = registry();
        let mut tuner = Tuner::new();
        tuner.set_desired(&mut registry, "speed", 6.0);
        tuner.toggle_pin(&mut registry, "aggression");
        registry.add_modifier("speed", Modifier::flat(1.0).with_source("boots"));

        assert_eq!(tuner.reset(&mut registry), 2);
        assert!((registry.get_value("speed") - 5.0).abs() < f64::EPSILON);
        assert!(!tuner.is_pinned("aggression"));
    }
}
