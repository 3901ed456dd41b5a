//! Hull repair: restore convexity around a freshly inserted item
//!
//! Inserting an item can leave a concavity on either side of it in the
//! cumulative ROC polyline:
//!
//! - **Before**: the previous vertex falls on or below the chord from the
//!   vertex two back (or the origin) to the new one. The previous item and
//!   the new item are merged into one disjunctive item.
//! - **After**: a later vertex falls below the chord from the new vertex to
//!   the vertex after it. That later item is dropped, and the scan repeats
//!   until a pass drops nothing.
//!
//! Points are recomputed from scratch after every structural change, since
//! first-match coverage depends on item order.
//!
//! Repair is local to the insertion point. The before-check runs once and
//! the after-check only compares against chords anchored at the insertion
//! index, so a vertex elsewhere in the list can still end up below the
//! chord of its neighbours. [`crate::roc::is_concave_down`] reports it.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::geometry::chord_tpr;
use crate::roc::{cumulative_points, RocPoint};
use crate::rules::DecisionListItem;

/// The repaired list and what changed
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub items: Vec<DecisionListItem>,
    /// Index of the merged item, when the before-check merged
    pub merged_at: Option<usize>,
    /// Indices dropped by the after-check, in the order they were dropped
    pub removed: Vec<usize>,
}

/// Repair `items` after an insertion at `inserted`
///
/// Lists shorter than three items (one rule set plus the default) are
/// returned unchanged.
pub fn repair(
    dataset: &Dataset,
    items: Vec<DecisionListItem>,
    inserted: usize,
) -> Result<RepairOutcome> {
    let mut outcome = RepairOutcome {
        items,
        merged_at: None,
        removed: Vec::new(),
    };
    if outcome.items.len() < 3 {
        return Ok(outcome);
    }

    let points = cumulative_points(dataset, &outcome.items)?;
    if let Some(items) = merge_before(&outcome.items, &points, inserted) {
        outcome.items = items;
        outcome.merged_at = Some(inserted - 1);
    }

    // The forward scan keeps the insertion index even after a merge has
    // shifted the items after it.
    loop {
        let points = cumulative_points(dataset, &outcome.items)?;
        match concavity_after(&outcome.items, &points, inserted) {
            Some(idx) => {
                let mut items = outcome.items;
                items.remove(idx);
                outcome.items = items;
                outcome.removed.push(idx);
            }
            None => break,
        }
    }

    Ok(outcome)
}

/// Merged list if the vertex before `idx` is not convex
fn merge_before(
    items: &[DecisionListItem],
    points: &[RocPoint],
    idx: usize,
) -> Option<Vec<DecisionListItem>> {
    if idx == 0 || idx >= points.len() {
        return None;
    }
    let before_prev = if idx == 1 {
        RocPoint::ORIGIN
    } else {
        points[idx - 2]
    };
    let prev = points[idx - 1];
    if prev.tpr > chord_tpr(before_prev, points[idx], prev.fpr) {
        return None;
    }

    let (DecisionListItem::Rules(prev_set), DecisionListItem::Rules(new_set)) =
        (&items[idx - 1], &items[idx])
    else {
        return None;
    };

    let mut merged = items.to_vec();
    merged[idx - 1] = DecisionListItem::Rules(prev_set.clone().merged(new_set.clone()));
    merged.remove(idx);
    Some(merged)
}

/// Index of the first item after `idx` whose vertex lies below the chord
/// from `idx`'s vertex to the one after it
fn concavity_after(items: &[DecisionListItem], points: &[RocPoint], idx: usize) -> Option<usize> {
    if idx + 3 > items.len() {
        return None;
    }
    let anchor = points[idx];
    for j in idx..points.len() {
        let (Some(&mid), Some(&far)) = (points.get(j + 1), points.get(j + 2)) else {
            break;
        };
        // The default always sits at (1, 1), so it is never removed
        if mid == RocPoint::TERMINAL {
            break;
        }
        if mid.tpr < chord_tpr(anchor, far, mid.fpr) {
            return Some(j + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::rules::{Rule, RuleSet};

    fn dataset() -> Dataset {
        // 4 positives (x = 1..=4), 4 negatives (x = 5..=8)
        let rows = (1..=8).map(|i| (vec![i as f64], i <= 4)).collect();
        Dataset::new(vec!["x".into()], rows).unwrap()
    }

    fn rules(set: Vec<Rule>) -> DecisionListItem {
        DecisionListItem::Rules(RuleSet::new(set))
    }

    fn x(cond: Condition) -> Rule {
        Rule::new().with("x", cond)
    }

    #[test]
    fn test_short_list_unchanged() {
        let ds = dataset();
        let items = vec![rules(vec![x(Condition::AtMost(3.0))]), DecisionListItem::Default];
        let outcome = repair(&ds, items.clone(), 0).unwrap();
        assert_eq!(outcome.items, items);
        assert!(outcome.merged_at.is_none());
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_convex_list_unchanged() {
        let ds = dataset();
        // (0, .5) then (.25, 1) then (1, 1)
        let items = vec![
            rules(vec![x(Condition::AtMost(2.0))]),
            rules(vec![x(Condition::AtMost(5.0))]),
            DecisionListItem::Default,
        ];
        let outcome = repair(&ds, items.clone(), 0).unwrap();
        assert_eq!(outcome.items, items);
    }

    #[test]
    fn test_merge_before() {
        let ds = dataset();
        // Previous: x in {1, 5} -> (.25, .25), on the chord from the
        // origin to the inserted vertex x<=4 cumulative (.25, 1)
        let prev = rules(vec![x(Condition::Equal(1.0)), x(Condition::Equal(5.0))]);
        let inserted = rules(vec![x(Condition::AtMost(4.0))]);
        let items = vec![prev, inserted, DecisionListItem::Default];

        let outcome = repair(&ds, items, 1).unwrap();
        assert_eq!(outcome.merged_at, Some(0));
        assert_eq!(outcome.items.len(), 2);
        match &outcome.items[0] {
            DecisionListItem::Rules(set) => assert_eq!(set.rules.len(), 3),
            DecisionListItem::Default => panic!("merged item should hold rules"),
        }
        assert!(outcome.items[1].is_default());
    }

    #[test]
    fn test_remove_after() {
        let ds = dataset();
        let items = vec![
            rules(vec![x(Condition::AtMost(3.0))]),
            rules(vec![x(Condition::Range {
                low: 4.0,
                high: 6.0,
            })]),
            rules(vec![x(Condition::AtMost(4.0))]),
            DecisionListItem::Default,
        ];
        // Points: (0, .75), (.5, .75), (.5, 1), (1, 1)
        // Vertex (.5, .75) is below the chord (0, .75) -> (.5, 1)
        let outcome = repair(&ds, items, 0).unwrap();
        assert_eq!(outcome.removed, vec![1]);
        assert_eq!(
            outcome.items,
            vec![
                rules(vec![x(Condition::AtMost(3.0))]),
                rules(vec![x(Condition::AtMost(4.0))]),
                DecisionListItem::Default,
            ]
        );
    }

    #[test]
    fn test_after_check_stops_at_terminal() {
        let ds = dataset();
        let items = vec![
            rules(vec![x(Condition::AtMost(3.0))]),
            rules(vec![x(Condition::AtLeast(0.0))]),
            rules(vec![x(Condition::AtMost(4.0))]),
            DecisionListItem::Default,
        ];
        // The second item already reaches (1, 1); nothing after it is examined
        let outcome = repair(&ds, items.clone(), 0).unwrap();
        assert_eq!(outcome.items, items);
    }

    #[test]
    fn test_after_check_keeps_insertion_index_after_merge() {
        let ds = dataset();
        // Points: (1, 0), (1, 0), (1, 0), (1, 1). The first two merge; the
        // forward scan then anchors at index 1, which leaves too few items
        // after it to examine, so x=6 survives.
        let items = vec![
            rules(vec![x(Condition::GreaterThan(4.0))]),
            rules(vec![x(Condition::Equal(5.0))]),
            rules(vec![x(Condition::Equal(6.0))]),
            DecisionListItem::Default,
        ];

        let outcome = repair(&ds, items, 1).unwrap();
        assert_eq!(outcome.merged_at, Some(0));
        assert!(outcome.removed.is_empty());
        assert_eq!(
            outcome.items,
            vec![
                rules(vec![x(Condition::GreaterThan(4.0)), x(Condition::Equal(5.0))]),
                rules(vec![x(Condition::Equal(6.0))]),
                DecisionListItem::Default,
            ]
        );
    }
}
