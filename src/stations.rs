//! Station registry for lake/reservoir identification.
//!
//! Tracks which station names refer to lake or reservoir stations.
//! Total phosphorus limits differ by water body type, so the classifier
//! asks this registry before choosing a threshold table. The registry is
//! the single source of truth for station typing: collaborators inject
//! names at runtime, and nothing is ever read from or written to
//! external storage.
//!
//! Matching is tolerant of the formatting noise spreadsheet exports
//! introduce (stray spaces, width variants, qualifier suffixes), but it
//! is a deterministic normalization pipeline, never an edit-distance
//! heuristic: two names fuzzy-match exactly when their fuzzy keys are
//! equal, so genuinely distinct stations sharing a substring cannot
//! cross-match.

use std::collections::BTreeMap;

use crate::config::MatcherConfig;
use crate::logging::{self, Source};

// ---------------------------------------------------------------------------
// Name normalization
// ---------------------------------------------------------------------------

/// Zero-width and BOM-like marks that cells pick up from copy-paste.
fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200F}' | '\u{2060}' | '\u{FEFF}')
}

/// Folds full-width ASCII forms (Ａ-Ｚ, ０-９, punctuation) and the
/// ideographic space to their half-width counterparts. Station lists
/// exported from spreadsheets routinely mix the two widths.
fn fold_width(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => {
            char::from_u32(c as u32 - 0xFF01 + 0x21).unwrap_or(c)
        }
        _ => c,
    }
}

/// Canonical exact-match form of a station name: zero-width marks
/// removed, widths folded, whitespace runs collapsed to single spaces,
/// trimmed, lowercased.
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|c| !is_zero_width(*c))
        .map(fold_width)
        .collect();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Fuzzy-match key for a station name: the normalized form with
/// separator characters deleted and configured non-discriminative
/// affixes stripped (longest affix first, repeated until none applies,
/// never stripping a name to nothing).
pub fn fuzzy_key(raw: &str, config: &MatcherConfig) -> String {
    let mut key: String = normalize_name(raw)
        .chars()
        .filter(|c| !config.separators.contains(c))
        .collect();
    while let Some(next) = strip_one_affix(&key, config) {
        key = next;
    }
    key
}

/// Strips the longest matching configured affix, suffixes first (the
/// common case for station names). Returns `None` when no affix applies
/// or when stripping would leave nothing of the name.
fn strip_one_affix(key: &str, config: &MatcherConfig) -> Option<String> {
    let suffix = config
        .strip_suffixes
        .iter()
        .filter(|a| key.len() > a.len() && key.ends_with(a.as_str()))
        .max_by_key(|a| a.len());
    if let Some(affix) = suffix {
        return Some(key[..key.len() - affix.len()].to_string());
    }
    config
        .strip_prefixes
        .iter()
        .filter(|a| key.len() > a.len() && key.starts_with(a.as_str()))
        .max_by_key(|a| a.len())
        .map(|affix| key[affix.len()..].to_string())
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Mutable set of known lake/reservoir station names.
///
/// Created empty (or seeded from an explicit initial list), mutated
/// only through its add/remove/replace operations, and discarded with
/// the owning classifier. Entries are stored under their normalized
/// name together with their precomputed fuzzy key.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    matcher: MatcherConfig,
    stations: BTreeMap<String, String>,
}

impl StationRegistry {
    /// Creates an empty registry with the given matcher configuration.
    pub fn new(matcher: MatcherConfig) -> Self {
        StationRegistry {
            matcher,
            stations: BTreeMap::new(),
        }
    }

    /// Replaces the entire registry content with the given names.
    /// Duplicate input names collapse to one entry; names that
    /// normalize to nothing are skipped.
    pub fn set_lake_stations<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stations.clear();
        for name in names {
            self.insert(name.as_ref());
        }
        logging::info(
            Source::Registry,
            None,
            &format!("lake station list replaced: {} entries", self.stations.len()),
        );
    }

    /// Inserts one name. No-op if an equivalent name is already
    /// registered.
    pub fn add_lake_station(&mut self, name: &str) {
        if self.insert(name) {
            logging::debug(Source::Registry, Some(name), "lake station registered");
        }
    }

    /// Removes one name if present. No-op if absent.
    pub fn remove_lake_station(&mut self, name: &str) {
        let normalized = normalize_name(name);
        if self.stations.remove(&normalized).is_some() {
            logging::debug(Source::Registry, Some(name), "lake station removed");
        }
    }

    /// Whether `name` matches a registered lake station.
    ///
    /// The exact path compares normalized names. The fuzzy path (the
    /// default for classification) additionally compares fuzzy keys,
    /// tolerating separator variants and configured qualifier affixes.
    pub fn is_lake_station(&self, name: &str, fuzzy: bool) -> bool {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return false;
        }
        if self.stations.contains_key(&normalized) {
            return true;
        }
        if !fuzzy {
            return false;
        }
        let key = fuzzy_key(name, &self.matcher);
        self.stations.values().any(|registered| *registered == key)
    }

    /// Registered names in their normalized form, sorted.
    pub fn lake_station_names(&self) -> Vec<&str> {
        self.stations.keys().map(String::as_str).collect()
    }

    /// Number of registered lake stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The matcher configuration this registry compares names under.
    pub fn matcher(&self) -> &MatcherConfig {
        &self.matcher
    }

    fn insert(&mut self, name: &str) -> bool {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            logging::debug(Source::Registry, None, "ignoring blank lake station name");
            return false;
        }
        let key = fuzzy_key(name, &self.matcher);
        self.stations.insert(normalized, key).is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> StationRegistry {
        let mut registry = StationRegistry::default();
        registry.set_lake_stations(names.iter().copied());
        registry
    }

    // --- Normalization ------------------------------------------------------

    #[test]
    fn test_normalize_trims_and_collapses_whitespace() {
        assert_eq!(normalize_name("  示例  湖泊站 "), "示例 湖泊站");
    }

    #[test]
    fn test_normalize_folds_full_width_ascii() {
        assert_eq!(normalize_name("ＡＢ湖１号"), "ab湖1号");
        assert_eq!(normalize_name("东湖　水库"), "东湖 水库");
    }

    #[test]
    fn test_normalize_strips_zero_width_marks() {
        assert_eq!(normalize_name("示例\u{200B}湖泊站\u{FEFF}"), "示例湖泊站");
    }

    #[test]
    fn test_normalize_case_folds_latin() {
        assert_eq!(normalize_name("Lake Taihu"), "lake taihu");
    }

    #[test]
    fn test_fuzzy_key_deletes_separators_and_affixes() {
        let config = MatcherConfig::default();
        assert_eq!(fuzzy_key("东湖-1号断面", &config), "东湖1号");
        assert_eq!(fuzzy_key("东湖–1号", &config), "东湖1号");
        assert_eq!(fuzzy_key("国控东湖1号", &config), "东湖1号");
    }

    #[test]
    fn test_fuzzy_key_never_strips_name_to_nothing() {
        let config = MatcherConfig::default();
        // The whole name is a configured suffix word; it must survive.
        assert_eq!(fuzzy_key("断面", &config), "断面");
        assert_eq!(fuzzy_key("站", &config), "站");
    }

    // --- Exact membership ---------------------------------------------------

    #[test]
    fn test_add_then_exact_lookup_round_trip() {
        let mut registry = StationRegistry::default();
        registry.add_lake_station("示例湖泊站");
        assert!(registry.is_lake_station("示例湖泊站", false));

        registry.remove_lake_station("示例湖泊站");
        assert!(!registry.is_lake_station("示例湖泊站", false));
    }

    #[test]
    fn test_exact_lookup_tolerates_formatting_noise_only() {
        let registry = registry_with(&["示例湖泊站"]);
        // Normalization noise still matches exactly.
        assert!(registry.is_lake_station(" 示例湖泊站 ", false));
        assert!(registry.is_lake_station("示例\u{200B}湖泊站", false));
        // Affix variants need the fuzzy path.
        assert!(!registry.is_lake_station("示例湖泊站点", false));
    }

    #[test]
    fn test_set_replaces_and_collapses_duplicates() {
        let mut registry = registry_with(&["甲湖站", "乙湖站"]);
        registry.set_lake_stations(["丙湖站", "丙湖站", " 丙湖站"]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_lake_station("甲湖站", false));
        assert!(registry.is_lake_station("丙湖站", false));
    }

    #[test]
    fn test_add_duplicate_and_remove_absent_are_no_ops() {
        let mut registry = StationRegistry::default();
        registry.add_lake_station("示例湖泊站");
        registry.add_lake_station("示例湖泊站");
        assert_eq!(registry.len(), 1);

        registry.remove_lake_station("从未注册");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let mut registry = StationRegistry::default();
        registry.add_lake_station("   ");
        assert!(registry.is_empty());
        assert!(!registry.is_lake_station("", true));
    }

    // --- Fuzzy membership ---------------------------------------------------

    #[test]
    fn test_fuzzy_matches_trailing_space_and_qualifier() {
        let registry = registry_with(&["示例湖泊站"]);
        assert!(registry.is_lake_station("示例湖泊站 ", true));
        assert!(registry.is_lake_station("示例湖泊站点", true));
    }

    #[test]
    fn test_fuzzy_matches_punctuation_variants() {
        let registry = registry_with(&["东湖-1号点位"]);
        assert!(registry.is_lake_station("东湖–1号", true));
        assert!(registry.is_lake_station("东湖 1号", true));
        assert!(registry.is_lake_station("东湖·1号断面", true));
    }

    #[test]
    fn test_fuzzy_matches_control_level_prefix() {
        let registry = registry_with(&["国控示例湖泊站"]);
        assert!(registry.is_lake_station("示例湖泊站", true));
    }

    #[test]
    fn test_fuzzy_rejects_distinct_station_sharing_substring() {
        let registry = registry_with(&["示例湖泊站"]);
        assert!(!registry.is_lake_station("另一湖泊站", true));
        assert!(!registry.is_lake_station("示例湖泊二站", true));
    }

    #[test]
    fn test_fuzzy_rejects_discriminative_suffix_difference() {
        // "水库" names a different water body, not a qualifier word.
        let registry = registry_with(&["青山湖"]);
        assert!(!registry.is_lake_station("青山水库", true));
    }

    #[test]
    fn test_names_listed_sorted_and_normalized() {
        let registry = registry_with(&["乙湖站", " 甲湖站 "]);
        assert_eq!(registry.lake_station_names(), vec!["乙湖站", "甲湖站"]);
    }
}
