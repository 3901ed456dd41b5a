//! ROCCER CLI - Command-line interface
//!
//! Commands:
//!   build    - Build a decision list from a dataset and candidate rules
//!   rank     - Show candidates in the order they are tried
//!   points   - Evaluate a decision list on a dataset
//!   schema   - Print JSON Schemas

mod cli;

use roccer::VERSION;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "build" => cli::cmd_build(&args[2..]),
        "rank" => cli::cmd_rank(&args[2..]),
        "points" => cli::cmd_points(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("roccer {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
ROCCER - ROC convex hull decision lists

USAGE:
    roccer <COMMAND> [OPTIONS]

COMMANDS:
    build <data.csv> <rules.json|dir>      Build a decision list
    rank <data.csv> <rules.json|dir>       Show candidates in build order
    points <data.csv> <decision_list.json> Cumulative ROC points and AUC
    schema [rules|config|report]           Print JSON schema
    version                                Print version

OPTIONS:
    --output, -o <file|dir>     Write the decision list (default: stdout)
    --class-label, -c <col>     Class label column (default: class)
    --yaml                      Write the decision list as YAML
    --json                      JSON output (build, rank, points)
    --trace                     Include the build trace in the report

A roccer.yaml next to the rules (or inside a rules directory) sets
class_label, rules_file, output_file and output_format.

EXAMPLES:
    roccer build heart.csv rules/ --output rules/
    roccer build heart.csv Association_Rules.json --yaml > dl.yaml
    roccer rank heart.csv Association_Rules.json --json
    roccer points heart.csv Decision_List.json
"#
    );
}
