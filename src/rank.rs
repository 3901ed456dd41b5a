//! Candidate ranking by distance to the ideal ROC corner
//!
//! Each candidate is scored as if it were a one-item decision list over
//! the whole dataset. Candidates closest to (0, 1) are tried first by the
//! hull builder. Equal distances keep their input order.

use crate::coverage::rule_set_coverage;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::roc::{roc_point, RocPoint};
use crate::rules::RuleSet;
use serde::Serialize;

/// A candidate with its standalone ROC point
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    /// Position in the input candidate list
    pub index: usize,
    pub rule_set: RuleSet,
    pub point: RocPoint,
    pub distance: f64,
}

/// Score and order candidates, closest to (0, 1) first
pub fn rank(dataset: &Dataset, candidates: Vec<RuleSet>) -> Result<Vec<RankedCandidate>> {
    let pool = dataset.all_ids();
    let mut ranked = candidates
        .into_iter()
        .enumerate()
        .map(|(index, rule_set)| {
            let point = roc_point(dataset, &rule_set_coverage(dataset, &pool, &rule_set)?);
            Ok(RankedCandidate {
                index,
                rule_set,
                point,
                distance: point.distance_to_ideal(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(ranked)
}
