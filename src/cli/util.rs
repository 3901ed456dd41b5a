//! CLI utility helpers

use roccer::{Error, Result, RunConfig};
use std::path::{Path, PathBuf};

/// Flags that take a value, so their values are not read as positionals
const VALUE_FLAGS: &[&str] = &["--output", "-o", "--class-label", "-c"];

/// Arguments that are neither flags nor flag values
pub fn positional_args(args: &[String]) -> Vec<&str> {
    let mut positional = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with('-') {
            positional.push(arg.as_str());
        }
    }
    positional
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following any of `names`
pub fn parse_flag_value(args: &[String], names: &[&str]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if names.contains(&arg.as_str()) {
            if let Some(value) = args.get(i + 1) {
                return Some(value.clone());
            }
        }
    }
    None
}

/// Parse --output argument to determine output file path
pub fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    parse_flag_value(args, &["--output", "-o"]).map(PathBuf::from)
}

/// Load `roccer.yaml` next to the rules, then apply --class-label
///
/// A rules directory is searched itself; a rules file is searched in its
/// parent directory.
pub fn load_config(rules: &Path, args: &[String]) -> Result<RunConfig> {
    let dir = if rules.is_dir() {
        rules
    } else {
        rules.parent().unwrap_or(Path::new("."))
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mut config = RunConfig::load_or_default(dir)?;
    if let Some(label) = parse_flag_value(args, &["--class-label", "-c"]) {
        if label.trim().is_empty() {
            return Err(Error::Config("--class-label must not be empty".into()));
        }
        config.class_label = label;
    }
    Ok(config)
}
