//! Smoke test to verify basic functionality

use roccer::{generate, Dataset, RuleFile};

#[test]
fn smoke_test_basic_build() {
    let dataset = Dataset::from_csv_str(
        "x,class\n1,1\n2,1\n3,1\n4,1\n5,0\n6,0\n7,0\n8,0\n",
        "class",
    )
    .unwrap();
    let candidates = RuleFile::from_json(r#"[[{"x": "x<=3"}], [{"x": "5<=x"}]]"#)
        .unwrap()
        .into_rule_sets()
        .unwrap();

    let outcome = generate(&dataset, candidates).unwrap();
    // Basic sanity checks
    assert_eq!(outcome.decision_list.len(), 1);
    assert_eq!(outcome.decision_list.items[0].to_string(), "(x: x<=3)");
    assert_eq!(outcome.trace.accepted(), 1);
    assert_eq!(outcome.trace.rejected(), 1);
}
