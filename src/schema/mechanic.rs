use serde::{Deserialize, Serialize};

use super::encounter::{EncounterOption, MechanicKind};

/// Outcome tags for die faces 1 through 5. Face 6 carries its own
/// outcome in the narrative text.
pub const ROLL_OUTCOMES: [&str; 5] = ["-2 life", "-1 life", "Nothing", "+1 luck", "+1 life"];

/// Returns the outcome tag for a die face, if the face has a fixed one.
pub fn roll_outcome(face: u8) -> Option<&'static str> {
    match face {
        1..=5 => Some(ROLL_OUTCOMES[usize::from(face) - 1]),
        _ => None,
    }
}

/// One labelled die face of a roll encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollFace {
    /// 1-based die face.
    pub face: u8,
    pub label: String,
    /// What landing on this face does, e.g. "-1 life".
    pub outcome: String,
}

/// One of the two scenarios of a luck event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckScenario {
    pub text: String,
    pub effect: String,
}

/// A plain branching choice and the effect text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainChoice {
    pub text: String,
    pub effect: String,
}

/// A skill check read from a `%%Check%%` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    pub description: String,
    /// Success threshold in percent, with the `%` sign removed.
    pub threshold: String,
}

/// The mechanic block of an encounter, as extracted from the narrative.
///
/// Each variant holds only what its mechanic needs. Optional pieces that
/// the narrative did not provide are `None` or empty rather than errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mechanic {
    Roll {
        faces: Vec<RollFace>,
    },
    Riddle {
        prompt: Option<String>,
        answers: Vec<String>,
        /// 0-based index into `answers`.
        correct: Option<usize>,
    },
    Check {
        check: Option<SkillCheck>,
    },
    Combat {
        opponent: Option<String>,
        difficulty: i32,
    },
    Luck {
        scenarios: [LuckScenario; 2],
    },
    Plain {
        info: Option<String>,
        choices: Vec<PlainChoice>,
    },
}

impl Mechanic {
    pub fn kind(&self) -> MechanicKind {
        match self {
            Self::Roll { .. } => MechanicKind::Roll,
            Self::Riddle { .. } => MechanicKind::Riddle,
            Self::Check { .. } => MechanicKind::Check,
            Self::Combat { .. } => MechanicKind::Combat,
            Self::Luck { .. } => MechanicKind::Luck,
            Self::Plain { .. } => MechanicKind::PlainOptions,
        }
    }

    /// The flavor line shown with the mechanic, if any.
    pub fn info(&self) -> Option<&str> {
        match self {
            Self::Riddle { prompt, .. } => prompt.as_deref(),
            Self::Plain { info, .. } => info.as_deref(),
            _ => None,
        }
    }

    /// Flattens the mechanic into the ordered option list of an encounter.
    ///
    /// Option text is returned uncleaned; parenthetical handling happens
    /// afterwards, once every section has been extracted.
    pub fn options(&self) -> Vec<EncounterOption> {
        match self {
            Self::Roll { faces } => faces
                .iter()
                .map(|f| EncounterOption::new(f.label.clone(), f.outcome.clone()))
                .collect(),
            Self::Riddle {
                answers, correct, ..
            } => answers
                .iter()
                .enumerate()
                .map(|(i, answer)| {
                    let verdict = if Some(i) == *correct {
                        "Correct"
                    } else {
                        "Wrong"
                    };
                    EncounterOption::new(answer.clone(), verdict)
                })
                .collect(),
            Self::Check { check } => check
                .iter()
                .map(|c| EncounterOption::new(c.description.clone(), c.threshold.clone()))
                .collect(),
            Self::Combat {
                opponent,
                difficulty,
            } => vec![EncounterOption::new(
                format!("Combat with {}", opponent.as_deref().unwrap_or("")),
                difficulty.to_string(),
            )],
            Self::Luck { scenarios } => scenarios
                .iter()
                .map(|s| EncounterOption::new(s.text.clone(), s.effect.clone()))
                .collect(),
            Self::Plain { choices, .. } => choices
                .iter()
                .map(|c| EncounterOption::new(c.text.clone(), c.effect.clone()))
                .collect(),
        }
    }
}
