//! The build command

use super::util::{has_flag, load_config, parse_output_arg, positional_args};
use roccer::*;
use std::path::Path;

pub fn cmd_build(args: &[String]) -> Result<()> {
    let positional = positional_args(args);
    if positional.len() < 2 {
        return Err("Usage: roccer build <data.csv> <rules.json|dir> [--output <file|dir>] [--class-label <col>] [--yaml] [--json] [--trace]".into());
    }

    let data = Path::new(positional[0]);
    let rules = Path::new(positional[1]);
    let output = parse_output_arg(args);
    let json_output = has_flag(args, "--json");
    let with_trace = has_flag(args, "--trace");

    let mut config = load_config(rules, args)?;
    if has_flag(args, "--yaml") {
        config.output_format = OutputFormat::Yaml;
    } else if let Some(path) = output.as_deref().filter(|p| !p.is_dir()) {
        if OutputFormat::from_path(path) == OutputFormat::Yaml {
            config.output_format = OutputFormat::Yaml;
        }
    }

    let result = run(&config, data, rules, output.as_deref())?;

    match &result.written_to {
        Some(path) => {
            eprintln!("Written to: {}", path.display());
            if json_output {
                println!("{}", serde_json::to_string_pretty(&result.report)?);
            } else {
                print!("{}", result.report.to_report(with_trace));
            }
        }
        None if json_output => {
            let combined = serde_json::json!({
                "decision_list": result.decision_list,
                "report": result.report,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        None => {
            println!(
                "{}",
                render_decision_list(&result.decision_list, config.output_format)?
            );
            eprint!("{}", result.report.to_report(with_trace));
        }
    }

    Ok(())
}
