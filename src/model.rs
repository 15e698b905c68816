//! Core domain types for the water-quality grading engine.
//!
//! This module defines the shared domain model imported by all other
//! modules. It contains no I/O and no classification logic, only the
//! types and their ordering and display behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Metric identifiers
// ---------------------------------------------------------------------------

/// The five surface-water indicators this engine grades.
///
/// The set is closed. Free-text column headers resolve to a member via
/// `metrics::recognized_metric_id`, and headers that match nothing
/// resolve to `None` rather than any default member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricId {
    /// pH (dimensionless). Graded by a closed acceptable range.
    Ph,
    /// Dissolved oxygen, mg/L. Higher is better.
    DissolvedOxygen,
    /// Permanganate index (CODMn), mg/L. Lower is better.
    PermanganateIndex,
    /// Ammonia nitrogen (NH3-N), mg/L. Lower is better.
    AmmoniaNitrogen,
    /// Total phosphorus, mg/L. Lower is better. The only metric whose
    /// limits depend on the station type (river vs. lake/reservoir).
    TotalPhosphorus,
}

impl MetricId {
    /// All members, in report column order.
    pub const ALL: [MetricId; 5] = [
        MetricId::Ph,
        MetricId::DissolvedOxygen,
        MetricId::PermanganateIndex,
        MetricId::AmmoniaNitrogen,
        MetricId::TotalPhosphorus,
    ];

    /// Canonical report label, matching the column headers the export
    /// side writes.
    pub fn label(self) -> &'static str {
        match self {
            MetricId::Ph => "pH",
            MetricId::DissolvedOxygen => "溶解氧",
            MetricId::PermanganateIndex => "CODMn",
            MetricId::AmmoniaNitrogen => "氨氮",
            MetricId::TotalPhosphorus => "总磷",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Station type
// ---------------------------------------------------------------------------

/// Water body type of a monitoring station, governing which threshold
/// table applies to type-sensitive metrics.
///
/// `River` is the default: a station grades as a river unless its name
/// is registered as a lake/reservoir station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StationType {
    #[default]
    River,
    /// Lake or reservoir ("湖库").
    Lake,
}

impl StationType {
    /// Report label ("河流" / "湖库").
    pub fn label(self) -> &'static str {
        match self {
            StationType::River => "河流",
            StationType::Lake => "湖库",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Grade categories
// ---------------------------------------------------------------------------

/// Regulatory water-quality grade, ordered from cleanest (I) to most
/// degraded (WorseThanV), plus a sentinel for invalid or missing input.
///
/// The derived ordering follows grading order, so after filtering out
/// `Unclassifiable` the worst grade in a set is simply the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    I,
    II,
    III,
    IV,
    V,
    WorseThanV,
    /// Sentinel for readings that could not be graded (missing cell,
    /// unparseable text, non-physical value). A data-quality signal,
    /// never a program fault.
    Unclassifiable,
}

impl Category {
    /// All members, grading order first, sentinel last.
    pub const ALL: [Category; 7] = [
        Category::I,
        Category::II,
        Category::III,
        Category::IV,
        Category::V,
        Category::WorseThanV,
        Category::Unclassifiable,
    ];

    /// 1-based position in the grading order, used for worst-of
    /// aggregation. `Unclassifiable` carries no rank.
    pub fn rank(self) -> Option<u8> {
        match self {
            Category::I => Some(1),
            Category::II => Some(2),
            Category::III => Some(3),
            Category::IV => Some(4),
            Category::V => Some(5),
            Category::WorseThanV => Some(6),
            Category::Unclassifiable => None,
        }
    }

    /// Canonical report label ("I类" ... "劣V类"). `Unclassifiable`
    /// renders as an empty string, matching the blank cell the report
    /// side writes for ungraded readings.
    pub fn label(self) -> &'static str {
        match self {
            Category::I => "I类",
            Category::II => "II类",
            Category::III => "III类",
            Category::IV => "IV类",
            Category::V => "V类",
            Category::WorseThanV => "劣V类",
            Category::Unclassifiable => "",
        }
    }

    /// Lenient re-parse of a report label back into a grade.
    ///
    /// Accepts the canonical labels plus the variant spellings found in
    /// historical sheets: full-width roman numerals ("Ⅲ类"), bare digits
    /// ("3"), a trailing "类" present or absent, "合格" (treated as
    /// Grade I), and any "劣"-prefixed form for worse-than-V. Anything
    /// else parses as `Unclassifiable`.
    pub fn parse_label(raw: &str) -> Category {
        let mut s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        for (wide, plain) in [('Ⅰ', "I"), ('Ⅱ', "II"), ('Ⅲ', "III"), ('Ⅳ', "IV"), ('Ⅴ', "V")] {
            s = s.replace(wide, plain);
        }
        if s.starts_with('劣') {
            return Category::WorseThanV;
        }
        let core = s.strip_suffix('类').unwrap_or(&s);
        match core {
            "I" | "1" | "合格" => Category::I,
            "II" | "2" => Category::II,
            "III" | "3" => Category::III,
            "IV" | "4" => Category::IV,
            "V" | "5" => Category::V,
            _ => Category::Unclassifiable,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating engine configuration.
///
/// Configuration defects are hard failures, unlike bad readings: a
/// classifier running with a broken matcher config would silently
/// miscolor whole reports, so these propagate to the caller.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The TOML document could not be deserialized.
    Parse(String),
    /// The document deserialized but fails a semantic check
    /// (e.g. an affix entry that normalizes to nothing).
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read configuration: {}", err),
            ConfigError::Parse(msg) => write!(f, "failed to parse configuration: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
