//! Free-text metric header recognition.
//!
//! Spreadsheet column headers name the same indicator many ways ("pH",
//! "PH值", "溶解氧(mg/L)", "高锰酸盐指数", "CODMn"). This module maps a
//! header to its canonical `MetricId` through a fixed synonym table so
//! collaborators can discover which columns are classifiable.

use crate::model::MetricId;

/// Case-insensitive keywords recognized for each metric, probed in
/// order. First hit wins; pH is probed first so headers like "pH值"
/// cannot fall through to a later keyword.
const SYNONYMS: &[(MetricId, &[&str])] = &[
    (MetricId::Ph, &["ph"]),
    (MetricId::DissolvedOxygen, &["溶解氧", "do"]),
    (MetricId::PermanganateIndex, &["高锰酸", "codmn", "cod"]),
    (MetricId::AmmoniaNitrogen, &["氨氮", "nh"]),
    (MetricId::TotalPhosphorus, &["总磷", "tp"]),
];

/// Resolves a free-text column header to a canonical metric identifier.
///
/// Pure function of the input and the static synonym table. Matching is
/// case-insensitive substring search; headers that match nothing
/// resolve to `None`, never to a default metric.
pub fn recognized_metric_id(label: &str) -> Option<MetricId> {
    let lowered = label.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    for (metric, keywords) in SYNONYMS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Some(*metric);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
