//! Registry-aware classification facade.
//!
//! `WaterQualityClassifier` is the object collaborators construct. It
//! owns the lake-station registry, resolves free-text headers, coerces
//! raw spreadsheet cells, and threads station identity into the
//! type-sensitive total-phosphorus table.

use crate::config::MatcherConfig;
use crate::grade::thresholds;
use crate::logging::{self, Source};
use crate::metrics;
use crate::model::{Category, MetricId, StationType};
use crate::stations::StationRegistry;

// ---------------------------------------------------------------------------
// Raw cell coercion
// ---------------------------------------------------------------------------

/// Cell contents treated as "no reading". Export pipelines emit a wide
/// zoo of missing markers; all of them grade as Unclassifiable rather
/// than aborting a batch.
const MISSING_TOKENS: &[&str] = &[
    "--", "—", "-", "–", "－", "nan", "none", "null", "na", "n/a", "nd", "n.d.", "未检出",
    "空", "无",
];

/// Marks stripped before numeric parsing. A detection-limit reading
/// like "<0.05" coerces to the limit itself, which grades
/// conservatively on lower-is-better tables.
const COMPARATOR_MARKS: &[char] = &['<', '>', '≤', '≥', '≈', '~', '～'];

/// Coerces a raw spreadsheet cell to a numeric reading.
///
/// Recognized missing markers and unparseable text coerce to `None`.
/// Comparator and approximation marks are stripped, as are embedded
/// unit suffixes ("0.12mg/L").
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() || MISSING_TOKENS.contains(&lowered.as_str()) {
        return None;
    }
    let cleaned: String = lowered
        .chars()
        .filter(|c| !COMPARATOR_MARKS.contains(c) && !c.is_whitespace())
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

// ---------------------------------------------------------------------------
// Classifier facade
// ---------------------------------------------------------------------------

/// Grades indicator readings for monitoring stations.
///
/// Classification itself is pure; the only state is the lake-station
/// registry and the default station type. Intended use is sequential
/// (seed the registry once, then classify many rows); share across
/// threads only behind external synchronization.
#[derive(Debug, Clone)]
pub struct WaterQualityClassifier {
    registry: StationRegistry,
    default_type: StationType,
}

impl Default for WaterQualityClassifier {
    fn default() -> Self {
        WaterQualityClassifier::new(StationType::River)
    }
}

impl WaterQualityClassifier {
    /// Creates a classifier with an empty registry. Type-sensitive
    /// metrics grade under `default_type` when no station name is
    /// available.
    pub fn new(default_type: StationType) -> Self {
        Self::with_matcher(default_type, MatcherConfig::default())
    }

    /// Creates a classifier with a custom fuzzy-matcher configuration.
    pub fn with_matcher(default_type: StationType, matcher: MatcherConfig) -> Self {
        WaterQualityClassifier {
            registry: StationRegistry::new(matcher),
            default_type,
        }
    }

    /// Creates a classifier seeded with an initial lake-station list.
    pub fn with_lake_stations<I, S>(default_type: StationType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classifier = Self::new(default_type);
        classifier.set_lake_stations(names);
        classifier
    }

    // --- Registry operations ------------------------------------------------

    /// Replaces the lake-station registry content. See
    /// [`StationRegistry::set_lake_stations`].
    pub fn set_lake_stations<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.set_lake_stations(names);
    }

    /// Registers one lake-station name. No-op if already present.
    pub fn add_lake_station(&mut self, name: &str) {
        self.registry.add_lake_station(name);
    }

    /// Removes one lake-station name. No-op if absent.
    pub fn remove_lake_station(&mut self, name: &str) {
        self.registry.remove_lake_station(name);
    }

    /// Whether `name` matches a registered lake station.
    pub fn is_lake_station(&self, name: &str, fuzzy: bool) -> bool {
        self.registry.is_lake_station(name, fuzzy)
    }

    /// Read access to the lake-station registry.
    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// The station type assumed when no station name is available.
    pub fn default_station_type(&self) -> StationType {
        self.default_type
    }

    // --- Classification -----------------------------------------------------

    /// Classifies a reading under the instance default station type.
    pub fn classify_value(&self, metric: MetricId, value: f64) -> Category {
        thresholds::classify_value(metric, value, self.default_type)
    }

    /// Classifies total phosphorus with station identity threaded
    /// through to table selection.
    ///
    /// A registered lake-station name (fuzzy match) selects the lake
    /// table; any other name grades as a river; no name falls back to
    /// the instance default type.
    pub fn classify_total_phosphorus_by_type(
        &self,
        value: f64,
        station_name: Option<&str>,
    ) -> Category {
        let station_type = match station_name {
            Some(name) => self.resolve_station_type(name),
            None => self.default_type,
        };
        thresholds::classify_value(MetricId::TotalPhosphorus, value, station_type)
    }

    /// Station type for a name: `Lake` when the registry knows it
    /// (fuzzily), `River` otherwise.
    pub fn resolve_station_type(&self, station_name: &str) -> StationType {
        if self.registry.is_lake_station(station_name, true) {
            StationType::Lake
        } else {
            StationType::River
        }
    }

    /// Resolves a free-text column header and classifies the reading.
    ///
    /// Headers that resolve to no known metric grade as Unclassifiable:
    /// a stray column is a data-quality condition, and one bad header
    /// must not abort a batch run.
    pub fn classify_metric(&self, header: &str, value: f64) -> Category {
        match metrics::recognized_metric_id(header) {
            Some(metric) => self.classify_value(metric, value),
            None => {
                logging::debug(
                    Source::Classifier,
                    None,
                    &format!("unrecognized metric header: {:?}", header),
                );
                Category::Unclassifiable
            }
        }
    }

    /// Classifies a raw spreadsheet cell, coercing its text to a number
    /// first. Missing markers and unparseable text grade as
    /// Unclassifiable.
    pub fn classify_cell(&self, metric: MetricId, raw: &str) -> Category {
        match coerce_numeric(raw) {
            Some(value) => self.classify_value(metric, value),
            None => Category::Unclassifiable,
        }
    }

    /// Worst grade across a set of per-metric results: the overall
    /// station grade. Unclassifiable members carry no grading
    /// information and are skipped; if nothing classifiable remains,
    /// the overall grade is itself Unclassifiable.
    pub fn overall_category<I>(categories: I) -> Category
    where
        I: IntoIterator<Item = Category>,
    {
        categories
            .into_iter()
            .filter(|category| *category != Category::Unclassifiable)
            .max()
            .unwrap_or(Category::Unclassifiable)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
