// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # ROCCER — ROC Convex hull rule sElectoR
//!
//! Builds a decision list for a binary classification problem out of a
//! pool of candidate rules, keeping only the rules that lie on the ROC
//! convex hull of the list built so far.
//!
//! ## Core Concept
//!
//! A decision list is evaluated top to bottom: each item claims the
//! samples it matches that no earlier item claimed, and an implicit
//! default item claims whatever is left. After each item the list has a
//! cumulative ROC point (false positive rate, true positive rate) measured
//! against the class totals of the whole dataset. ROCCER keeps a candidate
//! only if it lifts that curve, and repairs concavities around each
//! insertion so the points approximate the ROC convex hull from (0, 0) to
//! (1, 1).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roccer::{generate, Dataset, RuleFile};
//!
//! let dataset = Dataset::from_csv_str("x,class\n1,1\n2,1\n3,0\n4,0\n", "class")?;
//! let candidates = RuleFile::from_json(r#"[[{"x": "x<=2"}], [{"x": "x<=3"}]]"#)?
//!     .into_rule_sets()?;
//!
//! let outcome = generate(&dataset, candidates)?;
//! for (item, point) in outcome
//!     .decision_list
//!     .items
//!     .iter()
//!     .zip(outcome.decision_list.roc_points(&dataset)?)
//! {
//!     println!("{} -> {}", item, point);
//! }
//! ```
//!
//! ## Conditions
//!
//! ```
//! use roccer::Condition;
//!
//! let c = Condition::parse("30<x<=45").unwrap();
//! assert!(c.matches(45.0));
//! assert!(!c.matches(30.0));
//! assert_eq!(c.to_string(), "30<x<=45");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  CSV ──► Dataset            rules.json ──► Vec<RuleSet>     │
//! │              │                                  │           │
//! │              └──────────► rank() ◄──────────────┘           │
//! │                             │                               │
//! │                             ▼                               │
//! │                  HullBuilder::build() ──► BuildTrace        │
//! │                   (walk, insert, repair)                    │
//! │                             │                               │
//! │                             ▼                               │
//! │                 DecisionList ──► RunReport (points, AUC)    │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// Data model
pub mod condition;
pub mod config;
pub mod dataset;
pub mod error;
pub mod rules;

// Geometry and scoring
pub mod coverage;
pub mod geometry;
pub mod rank;
pub mod roc;

// Construction
pub mod builder;
pub mod hull;

// Runs
pub mod pipeline;
pub mod report;

// Re-exports
pub use builder::{build, BuildEvent, BuildOutcome, BuildTrace, HullBuilder, RejectReason};
pub use condition::Condition;
pub use config::{OutputFormat, RunConfig, CONFIG_FILE};
pub use coverage::{coverage, coverage_from, item_coverage, residual, rule_set_coverage};
pub use dataset::{Dataset, Sample, SampleId, SampleSet, DEFAULT_CLASS_LABEL};
pub use error::{Error, Result};
pub use geometry::{chord_tpr, Line};
pub use hull::{repair, RepairOutcome};
pub use pipeline::{
    check_features, generate, load_rule_file, parse_rule_file, render_decision_list, run,
    RunOutput,
};
pub use rank::{rank, RankedCandidate};
pub use report::{content_hash, RunReport};
pub use roc::{
    cumulative_points, hull_polyline, is_concave_down, polyline_auc, roc_point, RocPoint,
    HULL_TOLERANCE,
};
pub use rules::{DecisionList, DecisionListItem, FeatureCondition, RawRule, Rule, RuleFile, RuleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
