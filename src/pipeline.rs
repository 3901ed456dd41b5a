//! End-to-end runs: load inputs, rank, build, write the decision list

use crate::builder::{BuildOutcome, HullBuilder};
use crate::config::{OutputFormat, RunConfig};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::rank::rank;
use crate::report::RunReport;
use crate::rules::{DecisionList, RuleFile, RuleSet};
use std::path::{Path, PathBuf};

/// Fail on the first feature name that is not a dataset column
pub fn check_features(dataset: &Dataset, candidates: &[RuleSet]) -> Result<()> {
    for candidate in candidates {
        for feature in candidate.features() {
            dataset.feature_index(feature)?;
        }
    }
    Ok(())
}

/// Rank `candidates` and build a decision list from them
///
/// Every referenced feature is checked against the dataset up front, so
/// an unknown name fails before any geometry is done.
pub fn generate(dataset: &Dataset, candidates: Vec<RuleSet>) -> Result<BuildOutcome> {
    check_features(dataset, &candidates)?;
    let ranked = rank(dataset, candidates)?;
    HullBuilder::new().build(dataset, &ranked)
}

/// Parse rule file content, choosing the format from the file name
pub fn parse_rule_file(content: &str, path: &Path) -> Result<RuleFile> {
    match OutputFormat::from_path(path) {
        OutputFormat::Json => RuleFile::from_json(content),
        OutputFormat::Yaml => RuleFile::from_yaml(content),
    }
}

/// Read a rule file from disk
pub fn load_rule_file(path: &Path) -> Result<RuleFile> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_rule_file(&content, path)
}

/// Serialize a decision list in the given format
pub fn render_decision_list(list: &DecisionList, format: OutputFormat) -> Result<String> {
    let file = list.to_rule_file();
    match format {
        OutputFormat::Json => file.to_json(),
        OutputFormat::Yaml => file.to_yaml(),
    }
}

/// Result of [`run`]
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub decision_list: DecisionList,
    pub report: RunReport,
    /// Where the decision list was written, if anywhere
    pub written_to: Option<PathBuf>,
}

/// Run the whole pipeline on files
///
/// `rules` and `output` may be directories, in which case the configured
/// file names are used inside them. With no `output`, nothing is written.
pub fn run(
    config: &RunConfig,
    data: &Path,
    rules: &Path,
    output: Option<&Path>,
) -> Result<RunOutput> {
    let data_content = std::fs::read_to_string(data).map_err(Error::Io)?;
    let dataset = Dataset::from_csv_str(&data_content, &config.class_label)?;

    let rules_path = config.resolve_rules_path(rules);
    let rules_content = std::fs::read_to_string(&rules_path).map_err(Error::Io)?;
    let candidates = parse_rule_file(&rules_content, &rules_path)?.into_rule_sets()?;
    let candidate_count = candidates.len();

    let outcome = generate(&dataset, candidates)?;
    let report = RunReport::new(
        &dataset,
        data_content.as_bytes(),
        rules_content.as_bytes(),
        candidate_count,
        &outcome,
    )?;

    let written_to = match output {
        Some(path) => {
            let path = config.resolve_output_path(path);
            let rendered = render_decision_list(&outcome.decision_list, config.output_format)?;
            std::fs::write(&path, rendered).map_err(Error::Io)?;
            Some(path)
        }
        None => None,
    };

    Ok(RunOutput {
        decision_list: outcome.decision_list,
        report,
        written_to,
    })
}
