//! Base-value persistence for StatRegistry
//!
//! Only `{ name: base_value }` is saved. Modifiers are runtime effects and are
//! never written out; restoring a base leaves attached modifiers in place.

use super::StatRegistry;
use crate::error::PersistError;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

impl StatRegistry {
    /// Snapshot of every base value
    pub fn base_values(&self) -> IndexMap<String, f64> {
        self.stats
            .iter()
            .map(|(name, stat)| (name.clone(), stat.base_value()))
            .collect()
    }

    /// Export base values as a flat JSON object
    pub fn serialize_base_values(&self) -> Result<String, PersistError> {
        let blob = serde_json::to_string(&self.base_values())?;
        Ok(blob)
    }

    /// Restore base values from a blob produced by [`Self::serialize_base_values`]
    ///
    /// Each value goes through `set_base_value`, so it is clamped and still
    /// has the stat's modifiers applied on top. Unknown names are skipped.
    /// On an invalid entry, values restored before it are kept.
    ///
    /// Returns the number of stats restored.
    pub fn deserialize_base_values(&mut self, blob: &str) -> Result<usize, PersistError> {
        let Value::Object(entries) = serde_json::from_str::<Value>(blob)? else {
            return Err(PersistError::NotAnObject);
        };

        let mut restored = 0;
        for (name, value) in entries {
            let Some(base_value) = value.as_f64() else {
                return Err(PersistError::InvalidValue { name });
            };
            if !self.set_base_value(&name, base_value) {
                warn!(owner = %self.owner, stat = %name, "no such stat, skipping saved value");
                continue;
            }
            restored += 1;
        }

        debug!(owner = %self.owner, restored, "restored base values");
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StatDefinition;
    use crate::error::PersistError;
    use crate::modifier::Modifier;
    use crate::registry::StatRegistry;
    use crate::stat::approximately;

    fn registry() -> StatRegistry {
        StatRegistry::with_definitions(
            "hero",
            &[
                StatDefinition::new("health", 100.0).with_range(0.0, 200.0),
                StatDefinition::new("damage", 10.0),
                StatDefinition::new("armour", 4.0),
            ],
        )
    }

    #[test]
    fn test_serialize_is_flat_object_in_order() {
        let registry = registry();
        let blob = registry.serialize_base_values().unwrap();
        assert_eq!(blob, r#"{"health":100.0,"damage":10.0,"armour":4.0}"#);
    }

    #[test]
    fn test_round_trip_restores_bases() {
        let source = registry();
        let blob = source.serialize_base_values().unwrap();

        let mut target = registry();
        target.set_base_value("health", 1.0);
        target.set_base_value("damage", 2.0);

        assert_eq!(target.deserialize_base_values(&blob).unwrap(), 3);
        assert_eq!(target.base_values(), source.base_values());
    }

    #[test]
    fn test_modifiers_apply_on_top_of_restored_base() {
        let mut registry = registry();
        registry.add_modifier("damage", Modifier::flat(5.0));
        let blob = registry.serialize_base_values().unwrap();

        registry.set_base_value("damage", 50.0);
        registry.deserialize_base_values(&blob).unwrap();

        let damage = registry.get_stat("damage").unwrap();
        assert!((damage.base_value() - 10.0).abs() < f64::EPSILON);
        assert!((damage.current_value() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_names_skipped() {
        let mut registry = registry();
        let restored = registry
            .deserialize_base_values(r#"{"health":50.0,"ghost":1.0}"#)
            .unwrap();
        assert_eq!(restored, 1);
        assert!(!registry.has_stat("ghost"));
    }

    #[test]
    fn test_restored_values_are_clamped() {
        let mut registry = registry();
        registry.deserialize_base_values(r#"{"health":999.0}"#).unwrap();
        assert!((registry.get_value("health") - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip_at_range_extremes() {
        let mut source = StatRegistry::new("hero");
        source.add_stat("high", f64::INFINITY, f64::MIN, f64::MAX).unwrap();
        source.add_stat("low", f64::NEG_INFINITY, f64::MIN, f64::MAX).unwrap();
        let blob = source.serialize_base_values().unwrap();
        assert!(!blob.contains("null"));

        let mut target = StatRegistry::new("hero");
        target.add_stat("high", 0.0, f64::MIN, f64::MAX).unwrap();
        target.add_stat("low", 0.0, f64::MIN, f64::MAX).unwrap();
        assert_eq!(target.deserialize_base_values(&blob).unwrap(), 2);
        assert!(approximately(target.get_value("high"), f64::MAX));
        assert!(approximately(target.get_value("low"), f64::MIN));
    }

    #[test]
    fn test_malformed_blob() {
        let mut registry = registry();
        assert!(matches!(
            registry.deserialize_base_values("{not json"),
            Err(PersistError::Json(_))
        ));
        assert!(matches!(
            registry.deserialize_base_values("[1, 2]"),
            Err(PersistError::NotAnObject)
        ));
    }

    #[test]
    fn test_partial_application_before_invalid_entry() {
        let mut registry = registry();
        let result = registry.deserialize_base_values(r#"{"health":150.0,"damage":"lots","armour":9.0}"#);

        match result {
            Err(PersistError::InvalidValue { name }) => assert_eq!(name, "damage"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
        assert!((registry.get_value("health") - 150.0).abs() < f64::EPSILON);
        assert!((registry.get_value("damage") - 10.0).abs() < f64::EPSILON);
        assert!((registry.get_value("armour") - 4.0).abs() < f64::EPSILON);
    }
}
