/// Parser configuration — word limits and the fallback stats snapshot.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::encounter::StatsSnapshot;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Tunables for [`EncounterParser`](crate::core::parser::EncounterParser).
///
/// Every field has a default, so a RON file only needs the fields it
/// overrides:
///
/// ```ron
/// (introduction_words: 100)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Word limit for the introduction section.
    pub introduction_words: usize,
    /// Word limit for the description section.
    pub description_words: usize,
    /// Snapshot used when no player stats are available.
    pub default_stats: StatsSnapshot,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            introduction_words: 145,
            description_words: 600,
            default_stats: StatsSnapshot::default(),
        }
    }
}

impl ParserConfig {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ParserConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a configuration from a RON string.
    pub fn parse_ron(input: &str) -> Result<ParserConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
