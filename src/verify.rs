//! Configuration Verification Module
//!
//! Checks the engine's static configuration before deployment: curated
//! fuzzy-matcher pairs, threshold table structure, and the category
//! color map. A matcher tweak that starts cross-matching distinct
//! stations, or a table typo that swaps two limits, would silently
//! miscolor whole reports, so these checks fail loudly up front.
//!
//! Run this whenever the matcher configuration changes, with the
//! project's curated `[[match_tests]]` pairs included.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::colors::CATEGORY_COLORS;
use crate::config::{MatchExpectation, MatcherConfig};
use crate::grade::thresholds::{self, ThresholdScale, TABLE_INDEX};
use crate::logging::{self, Source};
use crate::model::{Category, MetricId, StationType};
use crate::stations::fuzzy_key;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub matcher_results: Vec<MatcherVerification>,
    pub threshold_results: Vec<ThresholdVerification>,
    pub color_results: Vec<ColorVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub matcher_total: usize,
    pub matcher_passed: usize,
    pub matcher_failed: usize,
    pub threshold_total: usize,
    pub threshold_passed: usize,
    pub threshold_failed: usize,
    pub color_total: usize,
    pub color_passed: usize,
    pub color_failed: usize,
}

/// Outcome of one curated matcher pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherVerification {
    pub registered: String,
    pub query: String,
    pub expected_match: bool,
    pub actual_match: bool,
    pub status: VerificationStatus,
}

/// Structural checks for one threshold table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdVerification {
    pub metric: MetricId,
    pub station_type: StationType,
    pub monotonic: bool,
    pub boundary_inclusive: bool,
    pub status: VerificationStatus,
}

/// Checks for one category color entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorVerification {
    pub category: Category,
    pub color: String,
    pub well_formed: bool,
    pub distinct: bool,
    pub status: VerificationStatus,
}

impl VerificationReport {
    /// Whether every check in the report passed.
    pub fn all_passed(&self) -> bool {
        self.summary.matcher_failed == 0
            && self.summary.threshold_failed == 0
            && self.summary.color_failed == 0
    }

    /// Renders the report as pretty-printed JSON for archiving next to
    /// the configuration it validated.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Matcher Verification
// ============================================================================

/// Curated pairs every deployment must satisfy, regardless of local
/// configuration overrides. The first three are the engine's contract
/// examples; the rest pin down known near-miss hazards.
pub fn builtin_match_expectations() -> Vec<MatchExpectation> {
    let pair = |registered: &str, query: &str, should_match: bool| MatchExpectation {
        registered: registered.to_string(),
        query: query.to_string(),
        should_match,
    };
    vec![
        pair("示例湖泊站", "示例湖泊站 ", true),
        pair("示例湖泊站", "示例湖泊站点", true),
        pair("示例湖泊站", "另一湖泊站", false),
        // Separator variants of one station must converge.
        pair("东湖-1号点位", "东湖–1号", true),
        pair("东湖-1号点位", "东湖 1号", true),
        // Different water bodies sharing a stem must not converge.
        pair("青山湖", "青山水库", false),
        pair("示例湖泊站", "示例湖泊二站", false),
        // Control-level prefixes are qualifiers, not identity.
        pair("国控示例湖泊站", "示例湖泊站", true),
    ]
}

/// Runs one curated pair through the fuzzy matcher.
pub fn verify_matcher_pair(
    config: &MatcherConfig,
    expectation: &MatchExpectation,
) -> MatcherVerification {
    let actual_match =
        fuzzy_key(&expectation.registered, config) == fuzzy_key(&expectation.query, config);
    let status = if actual_match == expectation.should_match {
        VerificationStatus::Passed
    } else {
        VerificationStatus::Failed
    };
    MatcherVerification {
        registered: expectation.registered.clone(),
        query: expectation.query.clone(),
        expected_match: expectation.should_match,
        actual_match,
        status,
    }
}

// ============================================================================
// Threshold Verification
// ============================================================================

/// Checks every threshold table for strict monotonicity and for the
/// inclusive-on-the-cleaner-side boundary rule.
pub fn verify_threshold_tables() -> Vec<ThresholdVerification> {
    TABLE_INDEX
        .iter()
        .map(|&(metric, station_type)| {
            let (monotonic, boundary_inclusive) = check_table(metric, station_type);
            let status = if monotonic && boundary_inclusive {
                VerificationStatus::Passed
            } else {
                VerificationStatus::Failed
            };
            ThresholdVerification {
                metric,
                station_type,
                monotonic,
                boundary_inclusive,
                status,
            }
        })
        .collect()
}

fn check_table(metric: MetricId, station_type: StationType) -> (bool, bool) {
    match thresholds::table_for(metric, station_type) {
        ThresholdScale::AscendingLimits(limits) => {
            let monotonic = limits.windows(2).all(|pair| pair[0] < pair[1]);
            let inclusive = boundaries_classify_clean(metric, station_type, limits);
            (monotonic, inclusive)
        }
        ThresholdScale::DescendingLimits(limits) => {
            let monotonic = limits.windows(2).all(|pair| pair[0] > pair[1]);
            let inclusive = boundaries_classify_clean(metric, station_type, limits);
            (monotonic, inclusive)
        }
        ThresholdScale::AcceptableRange { min, max } => {
            let monotonic = min < max;
            let inclusive = thresholds::classify_value(metric, *min, station_type) == Category::I
                && thresholds::classify_value(metric, *max, station_type) == Category::I;
            (monotonic, inclusive)
        }
    }
}

/// A value exactly on boundary i must land in the i-th (cleaner) grade.
fn boundaries_classify_clean(
    metric: MetricId,
    station_type: StationType,
    limits: &[f64; 5],
) -> bool {
    let grades = [Category::I, Category::II, Category::III, Category::IV, Category::V];
    limits
        .iter()
        .zip(grades)
        .all(|(limit, grade)| thresholds::classify_value(metric, *limit, station_type) == grade)
}

// ============================================================================
// Color Verification
// ============================================================================

/// Checks that the color map is total, every token is a well-formed
/// `#RRGGBB` string, and no two categories share a color.
pub fn verify_category_colors() -> Vec<ColorVerification> {
    CATEGORY_COLORS
        .iter()
        .map(|&(category, color)| {
            let well_formed = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            let distinct = CATEGORY_COLORS
                .iter()
                .filter(|(_, other)| *other == color)
                .count()
                == 1;
            let status = if well_formed && distinct {
                VerificationStatus::Passed
            } else {
                VerificationStatus::Failed
            };
            ColorVerification {
                category,
                color: color.to_string(),
                well_formed,
                distinct,
                status,
            }
        })
        .collect()
}

// ============================================================================
// Full Report
// ============================================================================

/// Runs every configuration check: built-in matcher pairs plus the
/// configuration's own `match_tests`, threshold table structure, and
/// the color map. Failures are logged and collected, never panicked on,
/// so the report always describes the whole configuration.
pub fn run_verification(config: &MatcherConfig) -> VerificationReport {
    let mut matcher_results = Vec::new();
    for expectation in builtin_match_expectations().iter().chain(&config.match_tests) {
        let result = verify_matcher_pair(config, expectation);
        if result.status == VerificationStatus::Failed {
            logging::warn(
                Source::Verify,
                None,
                &format!(
                    "matcher pair failed: '{}' vs '{}' expected match={}, got {}",
                    result.registered, result.query, result.expected_match, result.actual_match
                ),
            );
        }
        matcher_results.push(result);
    }

    let threshold_results = verify_threshold_tables();
    for result in &threshold_results {
        if result.status == VerificationStatus::Failed {
            logging::warn(
                Source::Verify,
                None,
                &format!(
                    "threshold table failed: {:?}/{:?} monotonic={} inclusive={}",
                    result.metric, result.station_type, result.monotonic, result.boundary_inclusive
                ),
            );
        }
    }

    let color_results = verify_category_colors();
    for result in &color_results {
        if result.status == VerificationStatus::Failed {
            logging::warn(
                Source::Verify,
                None,
                &format!("color entry failed: {:?} -> {}", result.category, result.color),
            );
        }
    }

    let matcher_failed = matcher_results
        .iter()
        .filter(|r| r.status == VerificationStatus::Failed)
        .count();
    let threshold_failed = threshold_results
        .iter()
        .filter(|r| r.status == VerificationStatus::Failed)
        .count();
    let color_failed = color_results
        .iter()
        .filter(|r| r.status == VerificationStatus::Failed)
        .count();
    let summary = VerificationSummary {
        matcher_total: matcher_results.len(),
        matcher_passed: matcher_results.len() - matcher_failed,
        matcher_failed,
        threshold_total: threshold_results.len(),
        threshold_passed: threshold_results.len() - threshold_failed,
        threshold_failed,
        color_total: color_results.len(),
        color_passed: color_results.len() - color_failed,
        color_failed,
    };

    let report = VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        matcher_results,
        threshold_results,
        color_results,
        summary,
    };

    logging::info(
        Source::Verify,
        None,
        &format!(
            "verification complete: matcher {}/{}, thresholds {}/{}, colors {}/{}",
            report.summary.matcher_passed,
            report.summary.matcher_total,
            report.summary.threshold_passed,
            report.summary.threshold_total,
            report.summary.color_passed,
            report.summary.color_total
        ),
    );

    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pairs_pass_under_default_config() {
        let config = MatcherConfig::default();
        for expectation in builtin_match_expectations() {
            let result = verify_matcher_pair(&config, &expectation);
            assert_eq!(
                result.status,
                VerificationStatus::Passed,
                "builtin pair ('{}', '{}') should pass, actual match: {}",
                expectation.registered,
                expectation.query,
                result.actual_match
            );
        }
    }

    #[test]
    fn test_threshold_tables_pass() {
        for result in verify_threshold_tables() {
            assert_eq!(
                result.status,
                VerificationStatus::Passed,
                "table {:?}/{:?} failed: monotonic={} inclusive={}",
                result.metric,
                result.station_type,
                result.monotonic,
                result.boundary_inclusive
            );
        }
    }

    #[test]
    fn test_category_colors_pass() {
        for result in verify_category_colors() {
            assert_eq!(result.status, VerificationStatus::Passed);
        }
    }

    #[test]
    fn test_full_report_passes_and_counts_add_up() {
        let report = run_verification(&MatcherConfig::default());
        assert!(report.all_passed());
        assert_eq!(
            report.summary.matcher_total,
            report.summary.matcher_passed + report.summary.matcher_failed
        );
        assert_eq!(report.summary.threshold_total, 6);
        assert_eq!(report.summary.color_total, 7);
    }

    #[test]
    fn test_failing_expectation_is_reported_not_panicked() {
        let mut config = MatcherConfig::default();
        config.match_tests.push(MatchExpectation {
            registered: "示例湖泊站".to_string(),
            query: "完全不同的名字".to_string(),
            should_match: true,
        });
        let report = run_verification(&config);
        assert!(!report.all_passed());
        assert_eq!(report.summary.matcher_failed, 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = run_verification(&MatcherConfig::default());
        let json = report.to_json().expect("report should serialize");
        assert!(json.contains("\"matcher_results\""));
        assert!(json.contains("\"summary\""));
    }
}
