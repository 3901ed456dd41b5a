//! Hull builder: greedy ROC convex hull construction
//!
//! The decision list starts as the lone default item. Each ranked
//! candidate walks the list from the top. At every step it is compared
//! against the hull segment between the cumulative points of the items
//! already passed (`lower`) and the next item (`upper`), using only the
//! samples those earlier items left unclaimed. A candidate that lies
//! strictly above the segment is inserted in front of the upper item and
//! the hull is repaired; one that never does is discarded.

use crate::coverage::{item_coverage, rule_set_coverage};
use crate::dataset::{Dataset, SampleSet};
use crate::error::Result;
use crate::geometry::chord_tpr;
use crate::hull::repair;
use crate::rank::RankedCandidate;
use crate::roc::{roc_point, RocPoint};
use crate::rules::{DecisionList, DecisionListItem, RuleSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Build a decision list from ranked candidates
pub fn build(dataset: &Dataset, ranked: &[RankedCandidate]) -> Result<DecisionList> {
    Ok(HullBuilder::new().build(dataset, ranked)?.decision_list)
}

/// Why a candidate was not inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Matches every sample; equivalent to the closing default
    Abstain,
    /// Not above the hull segment ending at the default item
    BelowHull,
    /// Walked past the last item without extending the hull
    Exhausted,
    /// Covers nothing once earlier items claimed their samples
    Vacuous,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Abstain => write!(f, "abstains"),
            RejectReason::BelowHull => write!(f, "does not extend the hull"),
            RejectReason::Exhausted => write!(f, "no segment left to compare"),
            RejectReason::Vacuous => write!(f, "covers no remaining samples"),
        }
    }
}

/// One step of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    /// Candidate inserted at `position`; `point` is its cumulative point there
    Accepted {
        candidate: usize,
        position: usize,
        point: RocPoint,
    },
    Rejected {
        candidate: usize,
        reason: RejectReason,
    },
    /// Item at `position` absorbed the item after it
    Merged { position: usize },
    /// Item at `position` dropped as a concavity
    Removed { position: usize },
}

impl std::fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildEvent::Accepted {
                candidate,
                position,
                point,
            } => write!(
                f,
                "candidate {} accepted at position {} {}",
                candidate, position, point
            ),
            BuildEvent::Rejected { candidate, reason } => {
                write!(f, "candidate {} rejected: {}", candidate, reason)
            }
            BuildEvent::Merged { position } => {
                write!(f, "item {} merged with its successor", position)
            }
            BuildEvent::Removed { position } => write!(f, "item {} removed", position),
        }
    }
}

/// Everything that happened during a build, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuildTrace {
    pub events: Vec<BuildEvent>,
}

impl BuildTrace {
    pub fn accepted(&self) -> usize {
        self.count(|e| matches!(e, BuildEvent::Accepted { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|e| matches!(e, BuildEvent::Rejected { .. }))
    }

    fn count(&self, pred: impl Fn(&BuildEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

/// Result of a build
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub decision_list: DecisionList,
    pub trace: BuildTrace,
}

/// Greedy hull builder
#[derive(Debug, Default)]
pub struct HullBuilder {
    items: Vec<DecisionListItem>,
    trace: BuildTrace,
}

/// Where a candidate's walk ended
enum Walk {
    Insert { position: usize, point: RocPoint },
    Reject(RejectReason),
}

impl HullBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try every candidate in order and return the list without its default
    pub fn build(mut self, dataset: &Dataset, ranked: &[RankedCandidate]) -> Result<BuildOutcome> {
        self.items = vec![DecisionListItem::Default];

        for candidate in ranked {
            self.offer(dataset, candidate)?;
        }

        let decision_list = DecisionList::new(
            self.items
                .into_iter()
                .filter_map(|item| match item {
                    DecisionListItem::Rules(set) => Some(set),
                    DecisionListItem::Default => None,
                })
                .collect(),
        );
        Ok(BuildOutcome {
            decision_list,
            trace: self.trace,
        })
    }

    fn offer(&mut self, dataset: &Dataset, candidate: &RankedCandidate) -> Result<()> {
        let walk = if candidate.rule_set.is_abstain() {
            Walk::Reject(RejectReason::Abstain)
        } else {
            self.walk(dataset, &candidate.rule_set)?
        };

        match walk {
            Walk::Reject(reason) => self.trace.events.push(BuildEvent::Rejected {
                candidate: candidate.index,
                reason,
            }),
            Walk::Insert { position, point } => {
                self.trace.events.push(BuildEvent::Accepted {
                    candidate: candidate.index,
                    position,
                    point,
                });

                let mut items = std::mem::take(&mut self.items);
                items.insert(position, DecisionListItem::Rules(candidate.rule_set.clone()));
                let outcome = repair(dataset, items, position)?;
                self.items = outcome.items;

                if let Some(position) = outcome.merged_at {
                    self.trace.events.push(BuildEvent::Merged { position });
                }
                for position in outcome.removed {
                    self.trace.events.push(BuildEvent::Removed { position });
                }
            }
        }
        Ok(())
    }

    /// Find the insertion point of a candidate, if it has one
    fn walk(&self, dataset: &Dataset, rule_set: &RuleSet) -> Result<Walk> {
        let all = dataset.all_ids();
        let mut remaining = all.clone();
        let mut claimed = SampleSet::new();

        let mut lower = RocPoint::ORIGIN;
        let mut upper = roc_point(dataset, &item_coverage(dataset, &all, &self.items[0])?);
        let mut point = roc_point(dataset, &rule_set_coverage(dataset, &all, rule_set)?);

        for i in 0..self.items.len() {
            let hull_tpr = chord_tpr(lower, upper, point.fpr);
            if point.fpr <= upper.fpr && point.tpr > hull_tpr {
                return Ok(Walk::Insert { position: i, point });
            }
            if self.items[i].is_default() {
                return Ok(Walk::Reject(RejectReason::BelowHull));
            }
            if i == self.items.len() - 1 {
                return Ok(Walk::Reject(RejectReason::Exhausted));
            }

            // Step past item i: its samples are no longer available to
            // the candidate or to the items after it.
            lower = upper;
            let passed = item_coverage(dataset, &remaining, &self.items[i])?;
            remaining.retain(|id| !passed.contains(id));
            claimed.extend(passed);

            let mut through_next = claimed.clone();
            through_next.extend(item_coverage(dataset, &remaining, &self.items[i + 1])?);
            upper = roc_point(dataset, &through_next);

            let still_covered = rule_set_coverage(dataset, &remaining, rule_set)?;
            if still_covered.is_empty() {
                return Ok(Walk::Reject(RejectReason::Vacuous));
            }
            let mut with_candidate = claimed.clone();
            with_candidate.extend(still_covered);
            point = roc_point(dataset, &with_candidate);
        }

        Ok(Walk::Reject(RejectReason::Exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::rank::rank;
    use crate::rules::Rule;

    fn dataset() -> Dataset {
        // 4 positives (x = 1..=4), 4 negatives (x = 5..=8)
        let rows = (1..=8).map(|i| (vec![i as f64], i <= 4)).collect();
        Dataset::new(vec!["x".into()], rows).unwrap()
    }

    fn at_most(v: f64) -> RuleSet {
        RuleSet::single(Rule::new().with("x", Condition::AtMost(v)))
    }

    fn run(candidates: Vec<RuleSet>) -> BuildOutcome {
        let ds = dataset();
        let ranked = rank(&ds, candidates).unwrap();
        HullBuilder::new().build(&ds, &ranked).unwrap()
    }

    #[test]
    fn test_no_candidates_gives_empty_list() {
        let outcome = run(vec![]);
        assert!(outcome.decision_list.is_empty());
        assert!(outcome.trace.events.is_empty());
    }

    #[test]
    fn test_single_pure_rule_kept() {
        let outcome = run(vec![at_most(3.0)]);
        assert_eq!(outcome.decision_list.items, vec![at_most(3.0)]);
        assert_eq!(
            outcome.trace.events,
            vec![BuildEvent::Accepted {
                candidate: 0,
                position: 0,
                point: RocPoint::new(0.0, 0.75),
            }]
        );
    }

    #[test]
    fn test_rule_on_diagonal_rejected() {
        // x in {4, 5}: one positive, one negative -> (.25, .25)
        let on_diagonal = RuleSet::single(Rule::new().with("x", Condition::Range {
            low: 3.0,
            high: 5.0,
        }));
        let outcome = run(vec![on_diagonal]);
        assert!(outcome.decision_list.is_empty());
        assert_eq!(
            outcome.trace.events,
            vec![BuildEvent::Rejected {
                candidate: 0,
                reason: RejectReason::BelowHull,
            }]
        );
    }

    #[test]
    fn test_second_rule_extends_hull_below_first() {
        // x<=5: (.25, 1) ranked first, then x<=2: (0, .5) goes in front
        let outcome = run(vec![at_most(2.0), at_most(5.0)]);
        assert_eq!(outcome.decision_list.items, vec![at_most(2.0), at_most(5.0)]);
        assert_eq!(outcome.trace.accepted(), 2);
    }

    #[test]
    fn test_abstaining_candidate_rejected() {
        let outcome = run(vec![RuleSet::single(Rule::new()), at_most(3.0)]);
        assert_eq!(outcome.decision_list.items, vec![at_most(3.0)]);
        assert!(outcome.trace.events.contains(&BuildEvent::Rejected {
            candidate: 0,
            reason: RejectReason::Abstain,
        }));
    }

    #[test]
    fn test_duplicate_coverage_is_vacuous() {
        let same = RuleSet::single(Rule::new().with("x", Condition::Range {
            low: 0.0,
            high: 3.0,
        }));
        let outcome = run(vec![at_most(3.0), same]);
        assert_eq!(outcome.decision_list.items, vec![at_most(3.0)]);
        assert!(outcome.trace.events.contains(&BuildEvent::Rejected {
            candidate: 1,
            reason: RejectReason::Vacuous,
        }));
    }

    #[test]
    fn test_build_free_function() {
        let ds = dataset();
        let ranked = rank(&ds, vec![at_most(3.0)]).unwrap();
        assert_eq!(build(&ds, &ranked).unwrap().items, vec![at_most(3.0)]);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_string(&BuildEvent::Rejected {
            candidate: 2,
            reason: RejectReason::Vacuous,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"event":"rejected","candidate":2,"reason":"vacuous"}"#
        );
    }
}
