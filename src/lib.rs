//! Water-quality grade classification engine.
//!
//! Grades measured indicator readings (pH, dissolved oxygen, CODMn,
//! ammonia nitrogen, total phosphorus) into the GB 3838-2002 categories
//! (Grade I through V, worse than V) according to station type, and
//! maps each grade to a display color for spreadsheet reporting.
//!
//! This crate is the classification core only. File loading,
//! spreadsheet writing, and UI glue are collaborators that consume
//! [`WaterQualityClassifier`] and [`CATEGORY_COLORS`]. The lake-station
//! registry is populated exclusively through explicit calls at runtime;
//! nothing is read from or written to external storage.
//!
//! ```
//! use wqgrade_engine::{Category, MetricId, StationType, WaterQualityClassifier};
//!
//! let mut classifier = WaterQualityClassifier::new(StationType::River);
//! classifier.set_lake_stations(["示例湖泊站"]);
//!
//! assert_eq!(classifier.classify_value(MetricId::DissolvedOxygen, 7.5), Category::I);
//!
//! // Total phosphorus limits differ by water body type; the registry
//! // decides which table a named station grades under.
//! assert_eq!(
//!     classifier.classify_total_phosphorus_by_type(0.03, Some("示例湖泊站")),
//!     Category::III,
//! );
//! assert_eq!(
//!     classifier.classify_total_phosphorus_by_type(0.03, None),
//!     Category::II,
//! );
//! ```

pub mod colors;
pub mod config;
pub mod grade;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod stations;
pub mod verify;

pub use colors::{CATEGORY_COLORS, color_for, fill_argb};
pub use config::{MatchExpectation, MatcherConfig};
pub use grade::classifier::{WaterQualityClassifier, coerce_numeric};
pub use grade::thresholds::{
    ThresholdScale, classify_value, metric_boundaries, table_for, visual_boundaries,
};
pub use metrics::recognized_metric_id;
pub use model::{Category, ConfigError, MetricId, StationType};
pub use stations::StationRegistry;
