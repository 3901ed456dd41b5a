//! Rule types: the core data model
//!
//! A [`Rule`] is a conjunction of feature conditions. A [`RuleSet`] is a
//! disjunction of rules; every candidate in a rule file is one rule set,
//! and every item of a decision list is one rule set. The implicit
//! catch-all at the end of a decision list is the
//! [`DecisionListItem::Default`] sentinel.
//!
//! ## Rule file format
//!
//! ```json
//! [
//!   [{"age": "30<x<=45", "bmi": "x<=25"}],
//!   [{"smoker": "x=1"}, {"age": "60<x"}]
//! ]
//! ```
//!
//! The outer array holds candidates (or decision list items), each an
//! array of rules, each rule a map from feature name to condition text.

use crate::condition::Condition;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::roc::{cumulative_points, RocPoint};
use schemars::JsonSchema;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// One feature constrained by one condition
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCondition {
    pub feature: String,
    pub condition: Condition,
}

/// A conjunction of feature conditions
///
/// The empty rule has no conditions and matches every sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rule {
    pub conditions: Vec<FeatureCondition>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition (builder style)
    pub fn with(mut self, feature: impl Into<String>, condition: Condition) -> Self {
        self.conditions.push(FeatureCondition {
            feature: feature.into(),
            condition,
        });
        self
    }

    /// True for the empty conjunction
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn to_raw(&self) -> RawRule {
        RawRule(
            self.conditions
                .iter()
                .map(|c| (c.feature.clone(), c.condition.to_string()))
                .collect(),
        )
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.conditions.len()))?;
        for c in &self.conditions {
            map.serialize_entry(&c.feature, &c.condition)?;
        }
        map.end()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "true");
        }
        let parts: Vec<_> = self
            .conditions
            .iter()
            .map(|c| format!("{}: {}", c.feature, c.condition))
            .collect();
        write!(f, "{}", parts.join(" AND "))
    }
}

/// A disjunction of rules
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// A rule set holding exactly one rule
    pub fn single(rule: Rule) -> Self {
        Self { rules: vec![rule] }
    }

    /// Does this rule set match everything it is shown?
    ///
    /// True when it has no rules at all or any of its rules is empty.
    pub fn is_abstain(&self) -> bool {
        self.rules.is_empty() || self.rules.iter().any(Rule::is_empty)
    }

    /// Disjunction of `self` followed by `other`
    pub fn merged(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Names of all features referenced by this rule set
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .flat_map(|r| r.conditions.iter().map(|c| c.feature.as_str()))
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rules.is_empty() {
            return write!(f, "true");
        }
        let parts: Vec<_> = self.rules.iter().map(|r| format!("({})", r)).collect();
        write!(f, "{}", parts.join(" OR "))
    }
}

/// An item of a decision list under construction
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionListItem {
    /// A disjunction of rules claiming the samples it matches
    Rules(RuleSet),
    /// The closing catch-all; claims every remaining sample
    Default,
}

impl DecisionListItem {
    pub fn is_default(&self) -> bool {
        matches!(self, DecisionListItem::Default)
    }
}

/// A finished decision list, with the closing default removed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecisionList {
    pub items: Vec<RuleSet>,
}

impl DecisionList {
    pub fn new(items: Vec<RuleSet>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items as they are evaluated: the listed rule sets, then the default
    pub fn evaluation_items(&self) -> Vec<DecisionListItem> {
        self.items
            .iter()
            .cloned()
            .map(DecisionListItem::Rules)
            .chain(std::iter::once(DecisionListItem::Default))
            .collect()
    }

    /// Cumulative ROC point after each listed item
    ///
    /// The implicit default is evaluated but its point, always (1, 1), is
    /// not returned.
    pub fn roc_points(&self, dataset: &Dataset) -> Result<Vec<RocPoint>> {
        let mut points = cumulative_points(dataset, &self.evaluation_items())?;
        points.pop();
        Ok(points)
    }

    /// Convert to the raw file form
    pub fn to_rule_file(&self) -> RuleFile {
        RuleFile(
            self.items
                .iter()
                .map(|set| set.rules.iter().map(Rule::to_raw).collect())
                .collect(),
        )
    }

    /// Read a decision list written by [`DecisionList::to_rule_file`]
    pub fn from_rule_file(file: RuleFile) -> Result<Self> {
        Ok(Self::new(file.into_rule_sets()?))
    }
}

/// A rule in file form: feature name to condition text, in document order
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct RawRule(#[schemars(with = "BTreeMap<String, String>")] pub Vec<(String, String)>);

impl Serialize for RawRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (feature, condition) in &self.0 {
            map.serialize_entry(feature, condition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RawRuleVisitor;

        impl<'de> Visitor<'de> for RawRuleVisitor {
            type Value = RawRule;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a map from feature name to condition string")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<RawRule, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((feature, condition)) = access.next_entry::<String, String>()? {
                    entries.push((feature, condition));
                }
                Ok(RawRule(entries))
            }
        }

        deserializer.deserialize_map(RawRuleVisitor)
    }
}

/// A rule file: candidates (or decision list items), each a list of rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(
    title = "ROCCER Rule File",
    description = "Ordered rule sets, each a disjunction of feature-condition maps"
)]
pub struct RuleFile(pub Vec<Vec<RawRule>>);

impl RuleFile {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::RuleFile(e.to_string()))
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::RuleFile(e.to_string()))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::RuleFile(e.to_string()))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::RuleFile(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse every condition string, failing on the first malformed one
    pub fn into_rule_sets(self) -> Result<Vec<RuleSet>> {
        self.0
            .into_iter()
            .enumerate()
            .map(|(candidate, raw_rules)| {
                let rules = raw_rules
                    .into_iter()
                    .enumerate()
                    .map(|(rule, raw)| parse_rule(candidate, rule, raw))
                    .collect::<Result<Vec<_>>>()?;
                Ok(RuleSet::new(rules))
            })
            .collect()
    }
}

fn parse_rule(candidate: usize, rule: usize, raw: RawRule) -> Result<Rule> {
    let conditions = raw
        .0
        .into_iter()
        .map(|(feature, text)| match Condition::parse(&text) {
            Some(condition) => Ok(FeatureCondition { feature, condition }),
            None => Err(Error::MalformedCondition {
                candidate,
                rule,
                feature,
                condition: text,
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Rule { conditions })
}
