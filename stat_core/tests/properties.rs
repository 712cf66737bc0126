//! Property tests for the recalculation invariants

use proptest::prelude::*;
use stat_core::{Modifier, ModifierType, Stat};

#[derive(Debug, Clone)]
enum Op {
    SetBase(f64),
    Add(f64, ModifierType, i32),
    RemoveAt(usize),
    RemoveAll,
}

fn kind() -> impl Strategy<Value = ModifierType> {
    prop_oneof![
        Just(ModifierType::FlatAddition),
        Just(ModifierType::PercentageMultiplier),
        Just(ModifierType::Override),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1000.0..1000.0f64).prop_map(Op::SetBase),
        (-5.0..5.0f64, kind(), -3..3i32).prop_map(|(v, k, o)| Op::Add(v, k, o)),
        (0..8usize).prop_map(Op::RemoveAt),
        Just(Op::RemoveAll),
    ]
}

proptest! {
    #[test]
    fn current_value_stays_in_range(
        base in -1000.0..1000.0f64,
        min in -500.0..0.0f64,
        span in 0.0..1000.0f64,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let max = min + span;
        let mut stat = Stat::with_range("value", base, min, max).unwrap();

        for op in ops {
            match op {
                Op::SetBase(v) => {
                    stat.set_base_value(v);
                }
                Op::Add(v, k, o) => {
                    stat.add_modifier(Modifier::new(v, k).with_order(o));
                }
                Op::RemoveAt(i) => {
                    if let Some(m) = stat.modifiers().get(i).cloned() {
                        prop_assert!(stat.remove_modifier(&m));
                    }
                }
                Op::RemoveAll => {
                    stat.remove_all_modifiers();
                }
            }
            prop_assert!(stat.current_value() >= stat.min_value());
            prop_assert!(stat.current_value() <= stat.max_value());
            prop_assert!(stat.base_value() >= min && stat.base_value() <= max);
        }
    }

    #[test]
    fn percentage_applies_before_flat_in_any_insertion_order(
        base in -100.0..100.0f64,
        percent in -1.0..2.0f64,
        flat in -50.0..50.0f64,
        percent_first in any::<bool>(),
    ) {
        let mut stat = Stat::new("value", base).unwrap();
        let p = Modifier::percent(percent);
        let f = Modifier::flat(flat);
        if percent_first {
            stat.add_modifier(p);
            stat.add_modifier(f);
        } else {
            stat.add_modifier(f);
            stat.add_modifier(p);
        }

        let expected = base * (1.0 + percent) + flat;
        prop_assert!((stat.current_value() - expected).abs() < 1e-9);
    }

    #[test]
    fn first_override_in_order_wins(
        values in prop::collection::vec((-100.0..100.0f64, -3..3i32), 1..6),
        flat in -10.0..10.0f64,
    ) {
        let mut stat = Stat::new("value", 42.0).unwrap();
        stat.add_modifier(Modifier::flat(flat));
        for (v, o) in &values {
            stat.add_modifier(Modifier::override_with(*v).with_order(*o));
        }

        // Lowest order wins, ties broken by insertion
        let min_order = values.iter().map(|(_, o)| *o).min().unwrap();
        let winner = values.iter().find(|(_, o)| *o == min_order).unwrap().0;
        prop_assert_eq!(stat.current_value(), winner);
    }
}
