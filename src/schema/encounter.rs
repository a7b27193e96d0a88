use serde::{Deserialize, Serialize};

/// Point-in-time copy of the player's state, taken when an encounter is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub health: i32,
    pub luck: i32,
    pub skill_modifier: i32,
}

impl StatsSnapshot {
    pub const fn new(health: i32, luck: i32, skill_modifier: i32) -> Self {
        Self {
            health,
            luck,
            skill_modifier,
        }
    }
}

impl Default for StatsSnapshot {
    /// The snapshot used when no live player state is available.
    fn default() -> Self {
        Self::new(10, 2, 0)
    }
}

/// The gameplay rule that decides how an encounter's choices resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MechanicKind {
    Roll,
    Riddle,
    Check,
    Combat,
    Luck,
    PlainOptions,
    None,
}

impl MechanicKind {
    /// Every kind, with the sigil-marked mechanics first.
    pub const ALL: [MechanicKind; 7] = [
        Self::Roll,
        Self::Riddle,
        Self::Check,
        Self::Combat,
        Self::Luck,
        Self::PlainOptions,
        Self::None,
    ];

    /// Returns a stable lowercase name (e.g., "plain_options").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Riddle => "riddle",
            Self::Check => "check",
            Self::Combat => "combat",
            Self::Luck => "luck",
            Self::PlainOptions => "plain_options",
            Self::None => "none",
        }
    }
}

/// A single player-facing choice.
///
/// `outcome` depends on the mechanic: a life/luck delta for rolls,
/// "Correct"/"Wrong" for riddles, a percentage threshold for checks,
/// a difficulty for combat, or free effect text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterOption {
    pub text: String,
    pub outcome: String,
}

impl EncounterOption {
    pub fn new(text: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: outcome.into(),
        }
    }
}

/// One page of interactive narrative, ready for persistence or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub number: String,
    pub name: String,
    pub introduction: String,
    /// The caller's image reference: a generation prompt or an asset path.
    pub image_ref: String,
    /// The image-generation prompt found in the narrative itself.
    #[serde(default)]
    pub image_prompt: String,
    pub description: String,
    pub mechanic_kind: MechanicKind,
    pub mechanic_info: String,
    pub options: Vec<EncounterOption>,
    pub stats: StatsSnapshot,
}

impl Encounter {
    /// True for the terminal record produced from an end-of-story message.
    pub fn is_conclusion(&self) -> bool {
        self.mechanic_kind == MechanicKind::None && self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_snapshot() {
        let stats = StatsSnapshot::default();
        assert_eq!(stats, StatsSnapshot::new(10, 2, 0));
    }

    #[test]
    fn mechanic_kind_names_are_unique() {
        let mut names: Vec<&str> = MechanicKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MechanicKind::ALL.len());
    }

    #[test]
    fn unmarked_kinds_come_last() {
        assert_eq!(
            MechanicKind::ALL[5..],
            [MechanicKind::PlainOptions, MechanicKind::None]
        );
    }

    #[test]
    fn encounter_ron_round_trip() {
        let encounter = Encounter {
            number: "ADV01".to_string(),
            name: "The Gate".to_string(),
            introduction: "You arrive.".to_string(),
            image_ref: "page1_image.png".to_string(),
            image_prompt: "A rusted gate".to_string(),
            description: "It creaks.".to_string(),
            mechanic_kind: MechanicKind::Combat,
            mechanic_info: String::new(),
            options: vec![EncounterOption::new("Combat with Troll", "7")],
            stats: StatsSnapshot::default(),
        };

        let serialized = ron::to_string(&encounter).unwrap();
        let deserialized: Encounter = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, encounter);
    }
}
