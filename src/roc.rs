//! ROC points: operating points of covered sample sets
//!
//! FPR and TPR are always taken relative to the class totals of the whole
//! dataset, never of a shrinking pool, so points of successive decision
//! list prefixes share a coordinate system.

use crate::coverage::coverage;
use crate::dataset::{Dataset, SampleSet};
use crate::error::Result;
use crate::geometry::chord_tpr;
use crate::rules::DecisionListItem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Slack allowed when checking hull convexity on computed points
pub const HULL_TOLERANCE: f64 = 1e-9;

/// A (false positive rate, true positive rate) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

impl RocPoint {
    /// Nothing covered
    pub const ORIGIN: RocPoint = RocPoint { fpr: 0.0, tpr: 0.0 };
    /// Everything covered
    pub const TERMINAL: RocPoint = RocPoint { fpr: 1.0, tpr: 1.0 };
    /// The perfect classifier corner
    pub const IDEAL: RocPoint = RocPoint { fpr: 0.0, tpr: 1.0 };

    pub fn new(fpr: f64, tpr: f64) -> Self {
        Self { fpr, tpr }
    }

    /// Euclidean distance to (0, 1)
    pub fn distance_to_ideal(&self) -> f64 {
        (self.fpr - Self::IDEAL.fpr).hypot(self.tpr - Self::IDEAL.tpr)
    }
}

impl std::fmt::Display for RocPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.fpr, self.tpr)
    }
}

/// ROC point of a covered sample set
///
/// Identifiers outside the dataset are ignored.
pub fn roc_point(dataset: &Dataset, covered: &SampleSet) -> RocPoint {
    let (mut tp, mut fp) = (0usize, 0usize);
    for &id in covered {
        match dataset.is_positive(id) {
            Some(true) => tp += 1,
            Some(false) => fp += 1,
            None => {}
        }
    }
    RocPoint {
        fpr: fp as f64 / dataset.neg_total() as f64,
        tpr: tp as f64 / dataset.pos_total() as f64,
    }
}

/// Cumulative ROC point after each item of `items`
///
/// Entry `i` is the point of everything claimed by `items[..=i]`.
pub fn cumulative_points(dataset: &Dataset, items: &[DecisionListItem]) -> Result<Vec<RocPoint>> {
    let mut so_far = SampleSet::new();
    Ok(coverage(dataset, items)?
        .into_iter()
        .map(|claimed| {
            so_far.extend(claimed);
            roc_point(dataset, &so_far)
        })
        .collect())
}

/// `points` bracketed by the origin and the terminal corner
pub fn hull_polyline(points: &[RocPoint]) -> Vec<RocPoint> {
    let mut polyline = Vec::with_capacity(points.len() + 2);
    polyline.push(RocPoint::ORIGIN);
    polyline.extend_from_slice(points);
    if polyline.last() != Some(&RocPoint::TERMINAL) {
        polyline.push(RocPoint::TERMINAL);
    }
    polyline
}

/// Trapezoidal area under a polyline
pub fn polyline_auc(polyline: &[RocPoint]) -> f64 {
    polyline
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[0].tpr + w[1].tpr) / 2.0)
        .sum()
}

/// Does every interior vertex lie on or above the chord of its neighbours?
///
/// Vertices on a vertical run are collinear with their neighbours and pass.
pub fn is_concave_down(polyline: &[RocPoint]) -> bool {
    polyline.windows(3).all(|w| {
        w[0].fpr == w[2].fpr || w[1].tpr + HULL_TOLERANCE >= chord_tpr(w[0], w[2], w[1].fpr)
    })
}
