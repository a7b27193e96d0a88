/// The encounter parser: narrative text → `Encounter` orchestration.
///
/// Wires together header and section slicing, mechanic extraction,
/// truncation, cleanup, and the stats snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::core::cleanup::{clean_field, clean_options};
use crate::core::conclusion::{self, CONCLUSION_NUMBER};
use crate::core::config::{ConfigError, ParserConfig};
use crate::core::context::{ErrorSink, NoPlayer, StatsProvider, TracingErrorSink};
use crate::core::mechanic::parse_mechanic;
use crate::core::sections::{Header, Sections};
use crate::core::text::truncate_words;
use crate::schema::encounter::{Encounter, MechanicKind, StatsSnapshot};

/// Fatal parse failures. No partial encounter is produced for any of them;
/// callers should treat them as "regenerate upstream".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("encounter line not found")]
    MissingHeader,
    #[error("narrative format is incorrect: expected at least 8 sections, found {found}")]
    MalformedSections { found: usize },
    #[error("mechanic block is missing or empty")]
    MissingMechanic,
    #[error("riddle answer index could not be read: {0}")]
    IndexParseFailure(String),
    #[error("combat difficulty is not a number: {0}")]
    InvalidDifficulty(String),
}

/// Turns generated narrative into encounter records. Built via
/// `EncounterParser::builder()`.
///
/// The parser holds no per-call state, so one instance can serve any
/// number of threads.
#[derive(Clone)]
pub struct EncounterParser {
    config: ParserConfig,
    stats: Arc<dyn StatsProvider>,
    errors: Arc<dyn ErrorSink>,
}

/// Builder for constructing an `EncounterParser`.
pub struct EncounterParserBuilder {
    config: Option<ParserConfig>,
    config_path: Option<PathBuf>,
    stats: Arc<dyn StatsProvider>,
    errors: Arc<dyn ErrorSink>,
}

impl Default for EncounterParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
            stats: Arc::new(NoPlayer),
            errors: Arc::new(TracingErrorSink),
        }
    }
}

impl std::fmt::Debug for EncounterParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterParser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EncounterParser {
    pub fn builder() -> EncounterParserBuilder {
        EncounterParserBuilder {
            config: None,
            config_path: None,
            stats: Arc::new(NoPlayer),
            errors: Arc::new(TracingErrorSink),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one encounter from narrative text.
    ///
    /// `image_ref` is stored as given. On failure the error is reported to
    /// the error sink before being returned.
    pub fn parse(&self, narrative: &str, image_ref: &str) -> Result<Encounter, ParseError> {
        self.parse_encounter(narrative, image_ref).inspect_err(|err| {
            self.errors.report(&format!("Error parsing page: {}", err));
        })
    }

    /// Parse the end-of-story message. Never fails: missing markers leave
    /// the name or body empty.
    pub fn parse_conclusion(&self, message: &str, image_ref: &str) -> Encounter {
        let text = conclusion::extract(message);

        let stats = self.stats.current_stats().unwrap_or_else(|| {
            tracing::warn!("no player stats while parsing conclusion; using defaults");
            self.config.default_stats
        });

        Encounter {
            number: CONCLUSION_NUMBER.to_string(),
            name: text.name,
            introduction: text.introduction,
            image_ref: image_ref.to_string(),
            image_prompt: String::new(),
            description: String::new(),
            mechanic_kind: MechanicKind::None,
            mechanic_info: String::new(),
            options: Vec::new(),
            stats,
        }
    }

    fn parse_encounter(&self, narrative: &str, image_ref: &str) -> Result<Encounter, ParseError> {
        // 1. Header
        let header = Header::parse(narrative)?;

        // 2. Sections
        let sections = Sections::split(narrative)?;
        let block = sections
            .mechanic_block()
            .ok_or(ParseError::MissingMechanic)?;

        // 3. Mechanic
        let mechanic = parse_mechanic(block)?;

        // 4. Truncate, then clean. Cleanup never runs before this point.
        let introduction = truncate_words(sections.introduction(), self.config.introduction_words);
        let description = truncate_words(sections.description(), self.config.description_words);

        let encounter = Encounter {
            number: clean_field(&header.number),
            name: clean_field(&header.name),
            introduction: clean_field(&introduction),
            image_ref: image_ref.to_string(),
            image_prompt: sections.image_prompt().unwrap_or_default().to_string(),
            description: clean_field(&description),
            mechanic_kind: mechanic.kind(),
            mechanic_info: mechanic.info().map(clean_field).unwrap_or_default(),
            options: clean_options(&mechanic),
            // 5. Stats
            stats: self.stats_snapshot(),
        };

        tracing::debug!(
            number = %encounter.number,
            kind = encounter.mechanic_kind.name(),
            options = encounter.options.len(),
            "parsed encounter"
        );
        Ok(encounter)
    }

    fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats
            .current_stats()
            .unwrap_or(self.config.default_stats)
    }
}

impl EncounterParserBuilder {
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a RON file at build time.
    pub fn config_path(mut self, path: &Path) -> Self {
        self.config_path = Some(path.to_path_buf());
        self
    }

    pub fn stats_provider(mut self, provider: impl StatsProvider + 'static) -> Self {
        self.stats = Arc::new(provider);
        self
    }

    /// Share an existing provider, e.g. a live player session.
    pub fn shared_stats_provider(mut self, provider: Arc<dyn StatsProvider>) -> Self {
        self.stats = provider;
        self
    }

    pub fn error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.errors = Arc::new(sink);
        self
    }

    pub fn shared_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.errors = sink;
        self
    }

    /// A config file, when given, overrides a directly provided config.
    pub fn build(self) -> Result<EncounterParser, ConfigError> {
        let config = match self.config_path {
            Some(ref path) => ParserConfig::load_from_ron(path)?,
            None => self.config.unwrap_or_default(),
        };

        Ok(EncounterParser {
            config,
            stats: self.stats,
            errors: self.errors,
        })
    }
}
