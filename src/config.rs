//! Fuzzy-matcher configuration.
//!
//! The affix and separator lists used by fuzzy station matching are
//! project tuning, not engine logic, so they live here as configuration
//! with compiled-in defaults and optional TOML overrides. An override
//! should ship with curated `[[match_tests]]` pairs; `verify` runs them
//! before the configuration is trusted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::{self, Source};
use crate::model::ConfigError;
use crate::stations::normalize_name;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Station/section qualifier words stripped from name ends. These say
/// what kind of monitoring point a name denotes, not which one.
const DEFAULT_SUFFIXES: &[&str] = &["监测站", "水质站", "站点", "点位", "断面", "站"];

/// Administrative control-level qualifiers stripped from name starts.
const DEFAULT_PREFIXES: &[&str] = &["国控", "省控", "市控"];

/// Separator characters deleted inside fuzzy keys, so hyphen, dash,
/// dot, and space variants of the same name compare equal. Full-width
/// forms are already folded to these by normalization.
const DEFAULT_SEPARATORS: &[char] = &['-', '–', '—', '_', '·', '・', ' '];

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// A curated matcher test pair: should `query` fuzzy-match a registry
/// containing `registered`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchExpectation {
    pub registered: String,
    pub query: String,
    pub should_match: bool,
}

/// Configuration for the station-name fuzzy matcher.
///
/// Affix entries are compared against normalized names (width-folded,
/// lowercased); loading canonicalizes them the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Non-discriminative prefixes stripped when building fuzzy keys.
    pub strip_prefixes: Vec<String>,
    /// Non-discriminative suffixes stripped when building fuzzy keys.
    pub strip_suffixes: Vec<String>,
    /// Separator characters deleted when building fuzzy keys.
    pub separators: Vec<char>,
    /// Curated true/false match pairs consumed by `verify` to gate
    /// configuration changes before deployment.
    pub match_tests: Vec<MatchExpectation>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            strip_prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            strip_suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            separators: DEFAULT_SEPARATORS.to_vec(),
            match_tests: Vec::new(),
        }
    }
}

impl MatcherConfig {
    /// Parses a configuration from a TOML document. Missing fields fall
    /// back to the compiled-in defaults; affixes are canonicalized and
    /// the result validated.
    pub fn from_toml_str(doc: &str) -> Result<Self, ConfigError> {
        let mut config: MatcherConfig =
            toml::from_str(doc).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.canonicalize();
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let doc = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        let config = Self::from_toml_str(&doc)?;
        logging::info(
            Source::Config,
            None,
            &format!(
                "matcher configuration loaded from {}: {} prefixes, {} suffixes, {} match tests",
                path.as_ref().display(),
                config.strip_prefixes.len(),
                config.strip_suffixes.len(),
                config.match_tests.len()
            ),
        );
        Ok(config)
    }

    /// Brings affix entries into the normalized form names are compared
    /// in, and drops duplicates while keeping order.
    fn canonicalize(&mut self) {
        for list in [&mut self.strip_prefixes, &mut self.strip_suffixes] {
            for affix in list.iter_mut() {
                *affix = normalize_name(affix);
            }
            let mut seen = std::collections::HashSet::new();
            list.retain(|affix| seen.insert(affix.clone()));
        }
    }

    /// Semantic checks on a parsed configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for affix in self.strip_prefixes.iter().chain(&self.strip_suffixes) {
            if affix.is_empty() {
                return Err(ConfigError::Invalid(
                    "affix entry normalizes to an empty string".to_string(),
                ));
            }
        }
        for expectation in &self.match_tests {
            if normalize_name(&expectation.registered).is_empty()
                || normalize_name(&expectation.query).is_empty()
            {
                return Err(ConfigError::Invalid(format!(
                    "match test pair ('{}', '{}') contains a blank name",
                    expectation.registered, expectation.query
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
