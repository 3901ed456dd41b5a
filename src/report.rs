//! Run reports
//!
//! A [`RunReport`] summarizes one decision list run: fingerprints of the
//! inputs, class totals, how many candidates survived, the cumulative ROC
//! points of the result and the area under its hull.

use crate::builder::{BuildOutcome, BuildTrace};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::roc::{hull_polyline, is_concave_down, polyline_auc, RocPoint};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Summary of a completed run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "ROCCER Report", description = "Summary of a decision list run")]
pub struct RunReport {
    /// Fingerprint of the dataset content
    pub dataset_hash: String,

    /// Fingerprint of the rule file content
    pub rules_hash: String,

    pub samples: usize,
    pub positives: usize,
    pub negatives: usize,

    /// Candidates offered to the builder
    pub candidates: usize,

    /// Items in the final decision list
    pub items: usize,

    /// Cumulative ROC point after each item
    pub points: Vec<RocPoint>,

    /// Area under the hull polyline from (0, 0) to (1, 1)
    pub auc: f64,

    /// Whether the hull polyline is concave-down
    pub convex: bool,

    pub trace: BuildTrace,

    /// When this report was generated
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schemars(with = "i64")]
    pub generated_at: DateTime<Utc>,

    /// ROCCER version that produced the run
    pub tool_version: String,
}

impl RunReport {
    /// Summarize a build of `dataset` from the given raw inputs
    pub fn new(
        dataset: &Dataset,
        dataset_content: &[u8],
        rules_content: &[u8],
        candidates: usize,
        outcome: &BuildOutcome,
    ) -> Result<Self> {
        let points = outcome.decision_list.roc_points(dataset)?;
        let polyline = hull_polyline(&points);

        Ok(Self {
            dataset_hash: content_hash(dataset_content),
            rules_hash: content_hash(rules_content),
            samples: dataset.len(),
            positives: dataset.pos_total(),
            negatives: dataset.neg_total(),
            candidates,
            items: outcome.decision_list.len(),
            auc: polyline_auc(&polyline),
            convex: is_concave_down(&polyline),
            points,
            trace: outcome.trace.clone(),
            generated_at: Utc::now(),
            tool_version: crate::VERSION.to_string(),
        })
    }

    /// Human-readable summary
    pub fn to_report(&self, with_trace: bool) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Dataset: {} samples ({} positive, {} negative) [{}]\n",
            self.samples, self.positives, self.negatives, self.dataset_hash
        ));
        out.push_str(&format!(
            "Candidates: {} [{}]\n",
            self.candidates, self.rules_hash
        ));
        out.push_str(&format!(
            "Decision list: {} item(s), AUC {:.4}{}\n",
            self.items,
            self.auc,
            if self.convex { "" } else { " (hull not convex)" }
        ));

        if !self.points.is_empty() {
            out.push_str("\nROC points:\n");
            for (i, p) in self.points.iter().enumerate() {
                out.push_str(&format!("  {:>3}  FPR {:.4}  TPR {:.4}\n", i + 1, p.fpr, p.tpr));
            }
        }

        if with_trace && !self.trace.events.is_empty() {
            out.push_str("\nTrace:\n");
            for event in &self.trace.events {
                out.push_str(&format!("  {}\n", event));
            }
        }

        out
    }
}

/// Short SHA-256 fingerprint of some content
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::HullBuilder;
    use crate::condition::Condition;
    use crate::rank::rank;
    use crate::rules::{Rule, RuleSet};

    #[test]
    fn test_content_hash() {
        let a = content_hash(b"x,class\n1,1\n");
        assert_eq!(a, content_hash(b"x,class\n1,1\n")); // Same content = same hash
        assert_ne!(a, content_hash(b"x,class\n1,0\n"));
        assert!(a.starts_with("sha256:"));
        assert_eq!(a.len(), "sha256:".len() + 16);
    }

    #[test]
    fn test_report_for_single_rule() {
        let rows = (1..=8).map(|i| (vec![i as f64], i <= 4)).collect();
        let ds = Dataset::new(vec!["x".into()], rows).unwrap();
        let candidates = vec![RuleSet::single(Rule::new().with("x", Condition::AtMost(3.0)))];
        let ranked = rank(&ds, candidates).unwrap();
        let outcome = HullBuilder::new().build(&ds, &ranked).unwrap();

        let report = RunReport::new(&ds, b"data", b"rules", 1, &outcome).unwrap();
        assert_eq!(report.items, 1);
        assert_eq!(report.points, vec![RocPoint::new(0.0, 0.75)]);
        // 0.75 * 0 + 1.0 * (0.75 + 1) / 2
        assert!((report.auc - 0.875).abs() < 1e-12);
        assert!(report.convex);

        let text = report.to_report(true);
        assert!(text.contains("8 samples (4 positive, 4 negative)"));
        assert!(text.contains("candidate 0 accepted at position 0"));
        assert!(!report.to_report(false).contains("Trace:"));
    }
}
