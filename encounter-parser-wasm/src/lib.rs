//! WASM bindings for encounter-parser — lets the web client parse
//! generated pages without a server round trip.

use wasm_bindgen::prelude::*;

use encounter_parser::core::config::ParserConfig;
use encounter_parser::core::image::{conclusion_image_prompt, encounter_image_prompt};
use encounter_parser::core::parser::EncounterParser;
use encounter_parser::schema::encounter::{MechanicKind, StatsSnapshot};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct StatsInput {
    health: i32,
    luck: i32,
    skill_modifier: i32,
}

impl From<StatsInput> for StatsSnapshot {
    fn from(input: StatsInput) -> Self {
        StatsSnapshot::new(input.health, input.luck, input.skill_modifier)
    }
}

#[derive(serde::Serialize)]
struct ParseFailure {
    error: String,
}

// ---------------------------------------------------------------------------
// EncounterSession — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct EncounterSession {
    parser: EncounterParser,
}

#[wasm_bindgen]
impl EncounterSession {
    /// Create a session. `config_ron` may be empty to use the defaults;
    /// `stats_json` may be empty when no player is active.
    #[wasm_bindgen(constructor)]
    pub fn new(config_ron: &str, stats_json: &str) -> Result<EncounterSession, JsError> {
        let config = if config_ron.trim().is_empty() {
            ParserConfig::default()
        } else {
            ParserConfig::parse_ron(config_ron)
                .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?
        };

        let mut builder = EncounterParser::builder().config(config);
        if !stats_json.trim().is_empty() {
            let stats: StatsInput = serde_json::from_str(stats_json)
                .map_err(|e| JsError::new(&format!("Invalid stats JSON: {e}")))?;
            builder = builder.stats_provider(StatsSnapshot::from(stats));
        }

        let parser = builder
            .build()
            .map_err(|e| JsError::new(&format!("Parser build error: {e}")))?;
        Ok(EncounterSession { parser })
    }

    /// Parse one encounter page. Returns the encounter as JSON, or
    /// `{"error": ...}` when the page must be regenerated.
    pub fn parse_encounter(&self, narrative: &str, image_ref: &str) -> Result<String, JsError> {
        match self.parser.parse(narrative, image_ref) {
            Ok(encounter) => serde_json::to_string(&encounter),
            Err(e) => serde_json::to_string(&ParseFailure {
                error: e.to_string(),
            }),
        }
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    pub fn parse_conclusion(&self, message: &str, image_ref: &str) -> Result<String, JsError> {
        let encounter = self.parser.parse_conclusion(message, image_ref);
        serde_json::to_string(&encounter)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Image prompt of a raw message, read before the page is parsed.
    pub fn image_prompt(message: &str, conclusion: bool) -> Option<String> {
        if conclusion {
            conclusion_image_prompt(message)
        } else {
            encounter_image_prompt(message)
        }
    }

    pub fn mechanic_kinds() -> String {
        let names: Vec<&str> = MechanicKind::ALL.iter().map(|k| k.name()).collect();
        serde_json::to_string(&names).unwrap_or_default()
    }
}
