//! Regulatory threshold tables and value classification.
//!
//! Boundary values follow the GB 3838-2002 surface-water limits. Each
//! (metric, station type) pair has an ordered table partitioning the
//! number line into the six grade buckets. A value exactly on a
//! boundary belongs to the cleaner grade: limits are inclusive on the
//! cleaner side, so "≤ 0.15 mg/L" reads the way the standard prints it.

use crate::colors;
use crate::model::{Category, MetricId, StationType};

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

/// Grades assigned by the five-boundary tables, cleanest first. A value
/// beyond every boundary falls through to `WorseThanV`.
const LADDER_GRADES: [Category; 5] = [
    Category::I,
    Category::II,
    Category::III,
    Category::IV,
    Category::V,
];

/// How a metric's boundary table partitions the number line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdScale {
    /// Lower is better: value ≤ limits[i] selects grade i. Limits ascend.
    AscendingLimits([f64; 5]),
    /// Higher is better: value ≥ limits[i] selects grade i. Limits descend.
    DescendingLimits([f64; 5]),
    /// Closed acceptable range: inside is Grade I, outside worse than V.
    AcceptableRange { min: f64, max: f64 },
}

/// pH acceptable range (dimensionless).
const PH_RANGE: ThresholdScale = ThresholdScale::AcceptableRange { min: 6.0, max: 9.0 };

/// Dissolved oxygen, mg/L.
const DISSOLVED_OXYGEN: ThresholdScale =
    ThresholdScale::DescendingLimits([7.5, 6.0, 5.0, 3.0, 2.0]);

/// Permanganate index (CODMn), mg/L.
const PERMANGANATE_INDEX: ThresholdScale =
    ThresholdScale::AscendingLimits([2.0, 4.0, 6.0, 10.0, 15.0]);

/// Ammonia nitrogen, mg/L.
const AMMONIA_NITROGEN: ThresholdScale =
    ThresholdScale::AscendingLimits([0.15, 0.5, 1.0, 1.5, 2.0]);

/// Total phosphorus, mg/L, river standard.
const TOTAL_PHOSPHORUS_RIVER: ThresholdScale =
    ThresholdScale::AscendingLimits([0.02, 0.1, 0.2, 0.3, 0.4]);

/// Total phosphorus, mg/L, lake/reservoir standard.
const TOTAL_PHOSPHORUS_LAKE: ThresholdScale =
    ThresholdScale::AscendingLimits([0.015, 0.025, 0.05, 0.1, 0.2]);

/// Every (metric, station type) pair with a distinct table. Verification
/// and monotonicity tests iterate this list.
pub const TABLE_INDEX: [(MetricId, StationType); 6] = [
    (MetricId::Ph, StationType::River),
    (MetricId::DissolvedOxygen, StationType::River),
    (MetricId::PermanganateIndex, StationType::River),
    (MetricId::AmmoniaNitrogen, StationType::River),
    (MetricId::TotalPhosphorus, StationType::River),
    (MetricId::TotalPhosphorus, StationType::Lake),
];

/// Looks up the boundary table for a (metric, station type) pair.
///
/// Total phosphorus is the only metric with type-specific tables; for
/// every other metric the station type is ignored.
pub fn table_for(metric: MetricId, station_type: StationType) -> &'static ThresholdScale {
    match (metric, station_type) {
        (MetricId::Ph, _) => &PH_RANGE,
        (MetricId::DissolvedOxygen, _) => &DISSOLVED_OXYGEN,
        (MetricId::PermanganateIndex, _) => &PERMANGANATE_INDEX,
        (MetricId::AmmoniaNitrogen, _) => &AMMONIA_NITROGEN,
        (MetricId::TotalPhosphorus, StationType::River) => &TOTAL_PHOSPHORUS_RIVER,
        (MetricId::TotalPhosphorus, StationType::Lake) => &TOTAL_PHOSPHORUS_LAKE,
    }
}

/// Physically plausible reading range per metric. Readings outside are
/// data-quality failures, not Grade I water: a negative concentration
/// would otherwise sit below every ascending limit.
fn physical_range(metric: MetricId) -> (f64, f64) {
    match metric {
        MetricId::Ph => (0.0, 14.0),
        _ => (0.0, f64::INFINITY),
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies a single reading into a grade category.
///
/// Total over `f64`: every finite, physically plausible value maps to
/// exactly one grade. NaN, infinities, and out-of-range readings map to
/// `Category::Unclassifiable`. Malformed cells are an expected input
/// condition, so this never panics and never returns an error.
pub fn classify_value(metric: MetricId, value: f64, station_type: StationType) -> Category {
    if !value.is_finite() {
        return Category::Unclassifiable;
    }
    let (min, max) = physical_range(metric);
    if value < min || value > max {
        return Category::Unclassifiable;
    }
    match table_for(metric, station_type) {
        ThresholdScale::AscendingLimits(limits) => {
            for (grade, limit) in LADDER_GRADES.iter().zip(limits) {
                if value <= *limit {
                    return *grade;
                }
            }
            Category::WorseThanV
        }
        ThresholdScale::DescendingLimits(limits) => {
            for (grade, limit) in LADDER_GRADES.iter().zip(limits) {
                if value >= *limit {
                    return *grade;
                }
            }
            Category::WorseThanV
        }
        ThresholdScale::AcceptableRange { min, max } => {
            if (*min..=*max).contains(&value) {
                Category::I
            } else {
                Category::WorseThanV
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Boundary listings
// ---------------------------------------------------------------------------

/// Ordered (grade, boundary) pairs for a metric, best to worst: the
/// values chart annotations draw horizontal rules at. pH reports both
/// endpoints of its acceptable range under Grade I.
pub fn metric_boundaries(metric: MetricId, station_type: StationType) -> Vec<(Category, f64)> {
    match table_for(metric, station_type) {
        ThresholdScale::AscendingLimits(limits) | ThresholdScale::DescendingLimits(limits) => {
            LADDER_GRADES.iter().copied().zip(limits.iter().copied()).collect()
        }
        ThresholdScale::AcceptableRange { min, max } => {
            vec![(Category::I, *min), (Category::I, *max)]
        }
    }
}

/// `metric_boundaries` with each grade's display color attached, ready
/// for chart legends.
pub fn visual_boundaries(
    metric: MetricId,
    station_type: StationType,
) -> Vec<(Category, f64, &'static str)> {
    metric_boundaries(metric, station_type)
        .into_iter()
        .map(|(grade, value)| (grade, value, colors::color_for(grade)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
