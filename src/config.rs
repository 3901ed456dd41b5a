//! Run configuration
//!
//! Handles loading of `roccer.yaml`, the optional per-directory settings
//! for a decision list run. Every field has a default, so an absent file
//! or an empty one both give [`RunConfig::default`].

use crate::dataset::DEFAULT_CLASS_LABEL;
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file looked up in a run directory
pub const CONFIG_FILE: &str = "roccer.yaml";

/// Settings for one decision list run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "ROCCER Config", description = "Decision list run settings")]
pub struct RunConfig {
    /// Name of the 0/1 class label column in the dataset
    #[serde(default = "default_class_label")]
    pub class_label: String,

    /// Rule file name used when a directory is given for the rules
    #[serde(default = "default_rules_file")]
    pub rules_file: String,

    /// Output file name used when a directory is given for the output
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Serialization of the written decision list
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Serialization format of rule files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Guess from a file extension, falling back to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

fn default_class_label() -> String {
    DEFAULT_CLASS_LABEL.to_string()
}

fn default_rules_file() -> String {
    "Association_Rules.json".to_string()
}

fn default_output_file() -> String {
    "Decision_List.json".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            class_label: default_class_label(),
            rules_file: default_rules_file(),
            output_file: default_output_file(),
            output_format: OutputFormat::default(),
        }
    }
}

impl RunConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RunConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        if config.class_label.trim().is_empty() {
            return Err(Error::Config("class_label must not be empty".into()));
        }
        Ok(config)
    }

    /// Load `roccer.yaml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_file).map_err(Error::Io)?;
        Self::from_yaml(&content).map(Some)
    }

    /// Load `roccer.yaml` from a directory, or fall back to defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        Ok(Self::load_from_dir(dir)?.unwrap_or_default())
    }

    /// Resolve a rules argument: directories get the configured file name
    pub fn resolve_rules_path(&self, path: &Path) -> std::path::PathBuf {
        if path.is_dir() {
            path.join(&self.rules_file)
        } else {
            path.to_path_buf()
        }
    }

    /// Resolve an output argument: directories get the configured file name
    pub fn resolve_output_path(&self, path: &Path) -> std::path::PathBuf {
        if path.is_dir() {
            path.join(&self.output_file)
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.class_label, "class");
        assert_eq!(config.rules_file, "Association_Rules.json");
        assert_eq!(config.output_file, "Decision_List.json");
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RunConfig::from_yaml("class_label: outcome\noutput_format: yaml\n").unwrap();
        assert_eq!(config.class_label, "outcome");
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert_eq!(config.rules_file, "Association_Rules.json"); // Inherited default
    }

    #[test]
    fn test_empty_class_label_rejected() {
        assert!(matches!(
            RunConfig::from_yaml("class_label: ''"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(matches!(
            RunConfig::from_yaml("output_format: xml"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let temp = TempDir::new().unwrap();
        assert!(RunConfig::load_from_dir(temp.path()).unwrap().is_none());
        assert_eq!(
            RunConfig::load_or_default(temp.path()).unwrap(),
            RunConfig::default()
        );

        fs::write(temp.path().join(CONFIG_FILE), "rules_file: rules.yaml\n").unwrap();
        let config = RunConfig::load_from_dir(temp.path()).unwrap().unwrap();
        assert_eq!(config.rules_file, "rules.yaml");
        assert_eq!(
            config.resolve_rules_path(temp.path()),
            temp.path().join("rules.yaml")
        );
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.yml")),
            OutputFormat::Yaml
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.json")),
            OutputFormat::Json
        );
    }
}
