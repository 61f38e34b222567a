//! Property-based tests using proptest.
//!
//! Tests invariants that should hold for all inputs.

use std::collections::HashSet;

use crate::parser::StageSpec;
use crate::{ExecMode, IntStage, MapOp, Pipeline, Predicate, SortOrder, Stage, evaluate};
use proptest::prelude::*;

fn int_stage() -> impl Strategy<Value = IntStage> {
    prop_oneof![
        (-100i64..100).prop_map(|k| IntStage::Map(MapOp::Add(k))),
        (-10i64..10).prop_map(|k| IntStage::Map(MapOp::Mul(k))),
        Just(IntStage::Map(MapOp::Neg)),
        Just(IntStage::Filter(Predicate::Odd)),
        (-100i64..100).prop_map(|k| IntStage::Filter(Predicate::Ge(k))),
        Just(IntStage::Distinct),
        (0usize..20).prop_map(IntStage::Skip),
        (0usize..20).prop_map(IntStage::Limit),
        Just(IntStage::Sort(SortOrder::Ascending)),
        Just(IntStage::Sort(SortOrder::Descending)),
    ]
}

proptest! {
    // ========================================================================
    // Stage Semantics
    // ========================================================================

    /// Re-evaluating the same stage list on the same input is deterministic
    #[test]
    fn evaluation_is_repeatable(
        input in prop::collection::vec(-1000i32..1000, 0..50),
        skip in 0usize..10,
        limit in 0usize..40,
    ) {
        let stages: Vec<Stage<i32>> = vec![
            Stage::map(|n: i32| n / 3),
            Stage::filter(|n: &i32| n % 2 == 0),
            Stage::flat_map(|n: i32| vec![n, -n]),
            Stage::distinct(),
            Stage::Skip(skip),
            Stage::Limit(limit),
        ];
        let first = evaluate(input.clone(), &stages).unwrap();
        let second = evaluate(input, &stages).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Distinct output has no repeats and keeps first-seen order
    #[test]
    fn distinct_keeps_first_occurrences(input in prop::collection::vec(0u8..16, 0..60)) {
        let out = Pipeline::<u8>::from_vec(input.clone()).distinct().to_vec();

        let mut seen = HashSet::new();
        let expected: Vec<u8> = input.into_iter().filter(|v| seen.insert(*v)).collect();
        prop_assert_eq!(out, expected);
    }

    /// Sorting by key is stable: equal keys keep input order
    #[test]
    fn sort_is_stable(input in prop::collection::vec((0u8..4, any::<u16>()), 0..60)) {
        let sorted = Pipeline::<(u8, u16)>::from_vec(input.clone())
            .sorted_by_key(|(key, _)| *key)
            .to_vec();

        for key in 0u8..4 {
            let before: Vec<u16> = input.iter().filter(|(k, _)| *k == key).map(|(_, v)| *v).collect();
            let after: Vec<u16> = sorted.iter().filter(|(k, _)| *k == key).map(|(_, v)| *v).collect();
            prop_assert_eq!(before, after);
        }
        prop_assert!(sorted.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    /// skip(n) then limit(m) selects the window [n, n + m)
    #[test]
    fn skip_limit_window(
        input in prop::collection::vec(any::<i32>(), 0..40),
        n in 0usize..50,
        m in 0usize..50,
    ) {
        let out = Pipeline::<i32>::from_vec(input.clone()).skip(n).limit(m).to_vec();
        let expected: Vec<i32> = input.into_iter().skip(n).take(m).collect();
        prop_assert_eq!(out, expected);
    }

    // ========================================================================
    // Reductions
    // ========================================================================

    /// Partitioned fold equals sequential fold for an associative combiner
    #[test]
    fn partitioned_fold_matches_sequential(input in prop::collection::vec(any::<i32>(), 0..500)) {
        let widen = |acc: i64, n: i32| acc + i64::from(n);
        let sequential = Pipeline::<i32>::from_vec(input.clone())
            .fold_with(0i64, widen, |a, b| a + b, ExecMode::Sequential)
            .unwrap();
        let partitioned = Pipeline::<i32>::from_vec(input)
            .par_fold(0i64, widen, |a, b| a + b)
            .unwrap();
        prop_assert_eq!(sequential, partitioned);
    }

    /// Reduce without identity is empty exactly when the input is empty
    #[test]
    fn reduce_presence_tracks_input(input in prop::collection::vec(any::<i32>(), 0..20)) {
        let expected = input.iter().copied().max();
        let reduced = Pipeline::<i32>::from_vec(input).reduce(i32::max).unwrap();
        prop_assert_eq!(reduced.is_present(), expected.is_some());
        prop_assert_eq!(reduced.into_option(), expected);
    }

    // ========================================================================
    // Stage Specs
    // ========================================================================

    /// Canonical stage specs parse back to the same stage
    #[test]
    fn stage_spec_display_parses_back(stage in int_stage()) {
        let rendered = StageSpec::Stage(stage).to_string();
        let parsed: StageSpec = rendered.parse().unwrap();
        prop_assert_eq!(parsed, StageSpec::Stage(stage));
    }
}
