//! Configuration Verification Integration Tests
//!
//! These tests run the full verification report over the default
//! matcher configuration and over a TOML override, the check a
//! deployment runs before trusting a tuned affix list.

use wqgrade_engine::verify::{VerificationStatus, run_verification};
use wqgrade_engine::{MatcherConfig, StationType, WaterQualityClassifier};

#[test]
fn test_default_configuration_verifies_clean() {
    let config = MatcherConfig::default();
    let report = run_verification(&config);

    println!("\nVerification of default configuration:");
    println!(
        "  matcher    {}/{} passed",
        report.summary.matcher_passed, report.summary.matcher_total
    );
    println!(
        "  thresholds {}/{} passed",
        report.summary.threshold_passed, report.summary.threshold_total
    );
    println!(
        "  colors     {}/{} passed",
        report.summary.color_passed, report.summary.color_total
    );

    for result in &report.matcher_results {
        assert_eq!(
            result.status,
            VerificationStatus::Passed,
            "pair ('{}', '{}') failed: expected match={}, actual={}",
            result.registered,
            result.query,
            result.expected_match,
            result.actual_match
        );
    }
    assert!(report.all_passed());
}

#[test]
fn test_toml_override_with_curated_pairs() {
    // A project override: extra local affixes plus its own curated
    // pairs, the shape the open affix-list question expects projects
    // to maintain.
    let doc = r#"
        strip_prefixes = ["国控", "省控", "市控", "县控"]
        strip_suffixes = ["监测站", "水质站", "站点", "点位", "断面", "站", "自动站"]

        [[match_tests]]
        registered = "示例湖泊站"
        query = "示例湖泊自动站"
        should_match = true

        [[match_tests]]
        registered = "示例湖泊站"
        query = "县控示例湖泊站"
        should_match = true

        [[match_tests]]
        registered = "甲水库"
        query = "乙水库"
        should_match = false
    "#;
    let config = MatcherConfig::from_toml_str(doc).expect("override should parse");
    let report = run_verification(&config);
    assert!(
        report.all_passed(),
        "override configuration should verify clean:\n{}",
        report.to_json().unwrap_or_default()
    );

    // The verified configuration actually drives classification.
    let mut classifier = WaterQualityClassifier::with_matcher(StationType::River, config);
    classifier.add_lake_station("示例湖泊站");
    assert!(classifier.is_lake_station("示例湖泊自动站", true));
    assert!(classifier.is_lake_station("县控示例湖泊站", true));
    assert!(!classifier.is_lake_station("甲水库", true));
}

#[test]
fn test_overreaching_override_is_caught() {
    // Stripping "湖" erases water-body identity; a curated pair pins
    // the regression down before deployment.
    let doc = r#"
        strip_suffixes = ["站", "站点", "点位", "湖"]

        [[match_tests]]
        registered = "青山湖"
        query = "青山"
        should_match = false
    "#;
    let config = MatcherConfig::from_toml_str(doc).expect("document itself is well-formed");
    let report = run_verification(&config);
    assert!(
        !report.all_passed(),
        "an affix list that erases water-body identity must fail verification"
    );
    assert!(report.summary.matcher_failed >= 1);
}

#[test]
fn test_report_json_round_trips() {
    let report = run_verification(&MatcherConfig::default());
    let json = report.to_json().expect("report should serialize");

    let parsed: serde_json::Value =
        serde_json::from_str(&json).expect("report JSON should parse back");
    assert_eq!(
        parsed["summary"]["threshold_total"],
        serde_json::json!(report.summary.threshold_total)
    );
    assert!(parsed["timestamp"].is_string());
}
