//! Property-based tests for coverage, ROC points, ranking and construction
//!
//! Uses proptest to generate random datasets and candidate pools and
//! verify invariants

use proptest::prelude::*;
use roccer::{
    coverage, generate, rank, roc_point, Condition, Dataset, DecisionList, RocPoint, Rule,
    RuleSet, SampleSet,
};

proptest! {
    #[test]
    fn test_coverage_partitions_dataset(ds in any_dataset(), pool in any_candidates()) {
        let items = DecisionList::new(pool).evaluation_items();
        let sets = coverage(&ds, &items).unwrap();
        prop_assert_eq!(sets.len(), items.len());

        let mut seen = SampleSet::new();
        for set in &sets {
            // No sample is claimed twice
            prop_assert!(set.is_disjoint(&seen));
            seen.extend(set.iter().copied());
        }
        prop_assert_eq!(seen, ds.all_ids());
    }

    #[test]
    fn test_roc_point_bounds(ds in any_dataset()) {
        prop_assert_eq!(roc_point(&ds, &ds.all_ids()), RocPoint::TERMINAL);
        prop_assert_eq!(roc_point(&ds, &SampleSet::new()), RocPoint::ORIGIN);
        prop_assert_eq!(ds.pos_total() + ds.neg_total(), ds.len());
    }

    #[test]
    fn test_rank_is_ordered_permutation(ds in any_dataset(), pool in any_candidates()) {
        let n = pool.len();
        let ranked = rank(&ds, pool).unwrap();

        let mut indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..n).collect::<Vec<_>>());

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                // Ties keep input order
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn test_built_list_points_are_monotone(ds in any_dataset(), pool in any_candidates()) {
        let n = pool.len();
        let outcome = generate(&ds, pool).unwrap();
        let list = outcome.decision_list;
        prop_assert!(list.len() <= n);
        prop_assert!(list.items.iter().all(|set| !set.is_abstain()));

        let points = list.roc_points(&ds).unwrap();
        let mut prev = RocPoint::ORIGIN;
        for p in points {
            prop_assert!((0.0..=1.0).contains(&p.fpr));
            prop_assert!((0.0..=1.0).contains(&p.tpr));
            prop_assert!(p.fpr >= prev.fpr && p.tpr >= prev.tpr);
            prev = p;
        }
        prop_assert_eq!(outcome.trace.accepted() + outcome.trace.rejected(), n);
    }
}

/// Between 2 and 32 samples of one feature, with both classes present
fn any_dataset() -> impl Strategy<Value = Dataset> {
    (
        0u8..10,
        0u8..10,
        prop::collection::vec((0u8..10, any::<bool>()), 0..30),
    )
        .prop_map(|(pos, neg, rest)| {
            let mut rows = vec![(vec![f64::from(pos)], true), (vec![f64::from(neg)], false)];
            rows.extend(rest.into_iter().map(|(v, label)| (vec![f64::from(v)], label)));
            Dataset::new(vec!["x".into()], rows).unwrap()
        })
}

fn any_condition() -> impl Strategy<Value = Condition> {
    (0u8..5, 0u8..10, 0u8..10).prop_map(|(kind, a, b)| {
        let (a, b) = (f64::from(a), f64::from(b));
        match kind {
            0 => Condition::Equal(a),
            1 => Condition::AtLeast(a),
            2 => Condition::GreaterThan(a),
            3 => Condition::AtMost(a),
            _ => Condition::Range {
                low: a.min(b),
                high: a.max(b),
            },
        }
    })
}

fn any_candidates() -> impl Strategy<Value = Vec<RuleSet>> {
    let rule = prop::collection::vec(any_condition(), 0..3).prop_map(|conditions| {
        conditions
            .into_iter()
            .fold(Rule::new(), |rule, c| rule.with("x", c))
    });
    prop::collection::vec(
        prop::collection::vec(rule, 0..3).prop_map(RuleSet::new),
        0..8,
    )
}
