//! StatBreakdown - The three-pass recalculation (Percent → Flat → Override → Clamp)

use crate::modifier::{Modifier, ModifierType};
use serde::Serialize;

/// Every intermediate value of a stat's recalculation
///
/// ```text
/// after_percentage = base × Π(1 + percent)   (stack order)
/// after_flat       = after_percentage + Σ flat
/// unclamped        = first override, else after_flat
/// current          = clamp(unclamped, min, max)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatBreakdown {
    pub base: f64,
    pub after_percentage: f64,
    pub after_flat: f64,
    /// The winning override, if any
    pub override_value: Option<f64>,
    pub unclamped: f64,
    pub current: f64,
}

impl StatBreakdown {
    /// Run the recalculation over an already sorted modifier stack
    ///
    /// `base` must already be clamped to `[min, max]`.
    pub fn compute(base: f64, modifiers: &[Modifier], min: f64, max: f64) -> Self {
        let of_kind = |kind: ModifierType| modifiers.iter().filter(move |m| m.kind() == kind);

        let after_percentage = of_kind(ModifierType::PercentageMultiplier)
            .fold(base, |value, m| value * (1.0 + m.value()));

        let after_flat = of_kind(ModifierType::FlatAddition)
            .fold(after_percentage, |value, m| value + m.value());

        let override_value = of_kind(ModifierType::Override).next().map(Modifier::value);

        let unclamped = override_value.unwrap_or(after_flat);

        // Overflow can produce inf × 0; fall back to the base to keep the range.
        let current = if unclamped.is_nan() {
            base
        } else {
            unclamped.clamp(min, max)
        };

        StatBreakdown {
            base,
            after_percentage,
            after_flat,
            override_value,
            unclamped,
            current,
        }
    }

    /// Total multiplier applied by the percentage pass
    pub fn percentage_multiplier(&self) -> f64 {
        if self.base == 0.0 {
            return 1.0;
        }
        self.after_percentage / self.base
    }

    /// Sum of the flat pass
    pub fn flat_total(&self) -> f64 {
        self.after_flat - self.after_percentage
    }

    /// Whether the clamp changed the value
    pub fn is_clamped(&self) -> bool {
        self.unclamped != self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(base: f64, modifiers: &[Modifier]) -> StatBreakdown {
        StatBreakdown::compute(base, modifiers, f64::MIN, f64::MAX)
    }

    #[test]
    fn test_no_modifiers() {
        let b = compute(100.0, &[]);
        assert!((b.current - 100.0).abs() < f64::EPSILON);
        assert_eq!(b.override_value, None);
        assert!(!b.is_clamped());
    }

    #[test]
    fn test_percentage_before_flat() {
        // (100 × 1.5) + 10, even though the flat comes first in the stack
        let b = compute(100.0, &[Modifier::flat(10.0), Modifier::percent(0.5)]);
        assert!((b.after_percentage - 150.0).abs() < f64::EPSILON);
        assert!((b.after_flat - 160.0).abs() < f64::EPSILON);
        assert!((b.current - 160.0).abs() < f64::EPSILON);
        assert!((b.flat_total() - 10.0).abs() < f64::EPSILON);
        assert!((b.percentage_multiplier() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentages_compound() {
        let b = compute(100.0, &[Modifier::percent(0.5), Modifier::percent(0.5)]);
        // 100 × 1.5 × 1.5 = 225, not 100 × 2.0
        assert!((b.current - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_override_wins() {
        let b = compute(
            100.0,
            &[
                Modifier::flat(10.0),
                Modifier::override_with(5.0),
                Modifier::override_with(99.0),
            ],
        );
        assert_eq!(b.override_value, Some(5.0));
        assert!((b.current - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp() {
        let b = StatBreakdown::compute(80.0, &[Modifier::flat(50.0)], 0.0, 100.0);
        assert!((b.unclamped - 130.0).abs() < f64::EPSILON);
        assert!((b.current - 100.0).abs() < f64::EPSILON);
        assert!(b.is_clamped());
    }

    #[test]
    fn test_nan_falls_back_to_base() {
        // MAX × 2 overflows to inf, then × 0 is NaN
        let b = compute(f64::MAX, &[Modifier::percent(1.0), Modifier::percent(-1.0)]);
        assert!(b.unclamped.is_nan());
        assert_eq!(b.current, f64::MAX);
    }
}
