//! Stat presets: bundles of (name, value, min, max) used to seed a registry

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// One stat entry of a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinition {
    pub name: String,
    /// Base value
    pub value: f64,
    #[serde(default = "default_min_value")]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
}

fn default_min_value() -> f64 {
    f64::MIN
}
fn default_max_value() -> f64 {
    f64::MAX
}

impl StatDefinition {
    /// Unbounded definition
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        StatDefinition {
            name: name.into(),
            value,
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }

    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }
}

/// A named, immutable collection of stat definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatPreset {
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatDefinition>,
}

impl StatPreset {
    pub fn new(name: impl Into<String>, stats: Vec<StatDefinition>) -> Self {
        StatPreset {
            name: name.into(),
            stats,
        }
    }

    /// Reject duplicate names and inverted or non-finite ranges
    ///
    /// Entries with an empty name are left in; registries skip them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for def in self.stats.iter().filter(|def| !def.name.is_empty()) {
            if !seen.insert(def.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "preset '{}' defines '{}' twice",
                    self.name, def.name
                )));
            }
            if !def.min_value.is_finite() || !def.max_value.is_finite() || def.min_value > def.max_value {
                return Err(ConfigError::ValidationError(format!(
                    "stat '{}' has invalid range [{}, {}]",
                    def.name, def.min_value, def.max_value
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate a preset from a TOML file
pub fn load_preset(path: &Path) -> Result<StatPreset, ConfigError> {
    let preset: StatPreset = super::load_toml(path)?;
    preset.validate()?;
    Ok(preset)
}

/// Load and validate a preset from a TOML string
pub fn parse_preset(content: &str) -> Result<StatPreset, ConfigError> {
    let preset: StatPreset = super::parse_toml(content)?;
    preset.validate()?;
    Ok(preset)
}

/// Load a preset file, falling back to the built-in preset on any error
pub fn load_preset_or_default(path: &Path) -> StatPreset {
    load_preset(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "using default preset");
        default_preset()
    })
}

/// Get the built-in preset
pub fn default_preset() -> StatPreset {
    let toml = include_str!("../../config/default_stats.toml");
    parse_preset(toml).unwrap_or_else(|_| {
        StatPreset::new(
            "default",
            vec![
                StatDefinition::new("health", 100.0).with_range(0.0, 1000.0),
                StatDefinition::new("mana", 50.0).with_range(0.0, 500.0),
            ],
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        let toml = r#"
name = "goblin"

[[stats]]
name = "health"
value = 30.0
min_value = 0.0
max_value = 60.0

[[stats]]
name = "armour"
value = 5.0
"#;

        let preset = parse_preset(toml).unwrap();
        assert_eq!(preset.name, "goblin");
        assert_eq!(preset.stats.len(), 2);

        let health = &preset.stats[0];
        assert!((health.max_value - 60.0).abs() < f64::EPSILON);

        let armour = &preset.stats[1];
        assert_eq!(armour.min_value, f64::MIN);
        assert_eq!(armour.max_value, f64::MAX);
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let toml = r#"
name = "broken"

[[stats]]
name = "health"
value = 1.0
min_value = 10.0
max_value = 0.0
"#;
        assert!(matches!(parse_preset(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let toml = r#"
name = "broken"

[[stats]]
name = "health"
value = 1.0

[[stats]]
name = "health"
value = 2.0
"#;
        assert!(matches!(parse_preset(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_rejects_infinite_range() {
        let toml = r#"
name = "broken"

[[stats]]
name = "health"
value = 1.0
max_value = inf
"#;
        assert!(matches!(parse_preset(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_empty_names_kept_for_registry_to_skip() {
        let toml = r#"
name = "p"

[[stats]]
name = ""
value = 1.0

[[stats]]
name = ""
value = 2.0

[[stats]]
name = "hp"
value = 30.0
"#;
        let preset = parse_preset(toml).unwrap();
        assert_eq!(preset.stats.len(), 3);

        let registry = crate::registry::StatRegistry::with_definitions("p", &preset.stats);
        assert_eq!(registry.all_stat_names().collect::<Vec<_>>(), vec!["hp"]);
    }

    #[test]
    fn test_file_with_empty_name_is_not_replaced_by_default() {
        let path = std::env::temp_dir().join(format!("stat_core_preset_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "name = \"p\"\n\n[[stats]]\nname = \"\"\nvalue = 1.0\n\n[[stats]]\nname = \"hp\"\nvalue = 30.0\n",
        )
        .unwrap();

        let preset = load_preset_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(preset.name, "p");
        assert!(preset.stats.iter().any(|s| s.name == "hp"));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(parse_preset("name = "), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let preset = load_preset_or_default(Path::new("no/such/preset.toml"));
        assert_eq!(preset, default_preset());
    }

    #[test]
    fn test_default_preset_loads_all() {
        let preset = default_preset();
        assert_eq!(preset.name, "default");
        assert_eq!(preset.stats.len(), 9, "Expected 9 stats from config");

        for name in ["health", "mana", "strength", "move_speed", "aggression"] {
            assert!(preset.stats.iter().any(|s| s.name == name), "Missing stat: {}", name);
        }
    }
}
