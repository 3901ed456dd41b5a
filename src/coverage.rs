//! Coverage: which samples a rule set or decision list claims
//!
//! Decision lists are evaluated first-match: an item only claims samples
//! that no earlier item claimed. Coverage is always computed against an
//! explicit pool of sample identifiers, and the caller's pool is never
//! modified.

use crate::condition::Condition;
use crate::dataset::{Dataset, SampleSet};
use crate::error::Result;
use crate::rules::{DecisionListItem, Rule, RuleSet};

/// A rule with its features resolved to dataset columns
struct BoundRule<'a> {
    conditions: Vec<(usize, &'a Condition)>,
}

impl<'a> BoundRule<'a> {
    fn bind(dataset: &Dataset, rule: &'a Rule) -> Result<Self> {
        let conditions = rule
            .conditions
            .iter()
            .map(|c| Ok((dataset.feature_index(&c.feature)?, &c.condition)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { conditions })
    }

    fn matches(&self, values: &[f64]) -> bool {
        self.conditions
            .iter()
            .all(|(col, cond)| values.get(*col).is_some_and(|x| cond.matches(*x)))
    }
}

/// Samples in `pool` matched by any rule of `rule_set`
pub fn rule_set_coverage(
    dataset: &Dataset,
    pool: &SampleSet,
    rule_set: &RuleSet,
) -> Result<SampleSet> {
    let bound = rule_set
        .rules
        .iter()
        .map(|r| BoundRule::bind(dataset, r))
        .collect::<Result<Vec<_>>>()?;

    Ok(pool
        .iter()
        .copied()
        .filter(|&id| {
            dataset
                .sample(id)
                .is_some_and(|s| bound.iter().any(|r| r.matches(&s.values)))
        })
        .collect())
}

/// Samples in `pool` claimed by a single decision list item
pub fn item_coverage(
    dataset: &Dataset,
    pool: &SampleSet,
    item: &DecisionListItem,
) -> Result<SampleSet> {
    match item {
        DecisionListItem::Default => Ok(pool.clone()),
        DecisionListItem::Rules(rule_set) => rule_set_coverage(dataset, pool, rule_set),
    }
}

/// Per-item coverage of a decision list over the whole dataset
///
/// Entry `i` holds the samples claimed by `items[i]` once everything
/// claimed by `items[..i]` has been removed from the pool.
pub fn coverage(dataset: &Dataset, items: &[DecisionListItem]) -> Result<Vec<SampleSet>> {
    coverage_from(dataset, &dataset.all_ids(), items)
}

/// Like [`coverage`], starting from an arbitrary pool
pub fn coverage_from(
    dataset: &Dataset,
    pool: &SampleSet,
    items: &[DecisionListItem],
) -> Result<Vec<SampleSet>> {
    let mut remaining = pool.clone();
    let mut covered = Vec::with_capacity(items.len());

    for item in items {
        let claimed = item_coverage(dataset, &remaining, item)?;
        remaining.retain(|id| !claimed.contains(id));
        covered.push(claimed);
    }

    Ok(covered)
}

/// Samples of the whole dataset left unclaimed by `items`
pub fn residual(dataset: &Dataset, items: &[DecisionListItem]) -> Result<SampleSet> {
    let mut remaining = dataset.all_ids();
    for claimed in coverage(dataset, items)? {
        remaining.retain(|id| !claimed.contains(id));
    }
    Ok(remaining)
}
