//! Inspection commands: rank, points

use super::util::{has_flag, load_config, positional_args};
use roccer::*;
use std::path::Path;

/// Score every candidate as a one-item list and print them in build order
pub fn cmd_rank(args: &[String]) -> Result<()> {
    let positional = positional_args(args);
    if positional.len() < 2 {
        return Err("Usage: roccer rank <data.csv> <rules.json> [--class-label <col>] [--json]".into());
    }

    let config = load_config(Path::new(positional[1]), args)?;
    let dataset = Dataset::from_csv_path(Path::new(positional[0]), &config.class_label)?;
    let rules_path = config.resolve_rules_path(Path::new(positional[1]));
    let candidates = load_rule_file(&rules_path)?.into_rule_sets()?;
    check_features(&dataset, &candidates)?;

    let ranked = rank(&dataset, candidates)?;

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    println!("{:>4}  {:>9}  {:>6}  {:>6}  {:>8}  RULES", "RANK", "CANDIDATE", "FPR", "TPR", "DISTANCE");
    for (i, r) in ranked.iter().enumerate() {
        println!(
            "{:>4}  {:>9}  {:>6.4}  {:>6.4}  {:>8.4}  {}",
            i + 1,
            r.index,
            r.point.fpr,
            r.point.tpr,
            r.distance,
            r.rule_set
        );
    }
    Ok(())
}

/// Evaluate an existing decision list against a dataset
pub fn cmd_points(args: &[String]) -> Result<()> {
    let positional = positional_args(args);
    if positional.len() < 2 {
        return Err("Usage: roccer points <data.csv> <decision_list.json> [--class-label <col>] [--json]".into());
    }

    let list_path = Path::new(positional[1]);
    let config = load_config(list_path, args)?;
    let dataset = Dataset::from_csv_path(Path::new(positional[0]), &config.class_label)?;
    let list = DecisionList::from_rule_file(load_rule_file(list_path)?)?;

    let points = list.roc_points(&dataset)?;
    let polyline = hull_polyline(&points);
    let auc = polyline_auc(&polyline);
    let convex = is_concave_down(&polyline);

    if has_flag(args, "--json") {
        let output = serde_json::json!({
            "items": list.len(),
            "points": points,
            "auc": auc,
            "convex": convex,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (i, (item, point)) in list.items.iter().zip(&points).enumerate() {
        println!("{:>3}  {}  {}", i + 1, point, item);
    }
    println!(
        "AUC {:.4}{}",
        auc,
        if convex { "" } else { " (hull not convex)" }
    );
    Ok(())
}
