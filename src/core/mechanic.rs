/// Mechanic block extraction — dispatch on the block's first line and
/// pull each mechanic's pieces out of its sigil markers.
///
/// Sub-markers are optional. A marker that is absent leaves its field
/// empty and is logged at debug level; only an unreadable riddle answer
/// or combat difficulty stops the parse.

use crate::core::parser::ParseError;
use crate::core::sections::lines;
use crate::core::text::first_parenthetical;
use crate::schema::mechanic::{roll_outcome, LuckScenario, Mechanic, PlainChoice, RollFace, SkillCheck};

pub const ROLL_MARKER: &str = "$$Roll$$";
pub const ROLL_LABEL_DELIMITER: &str = "$$";

pub const RIDDLE_MARKER: &str = "&&Riddle&&";
pub const RIDDLE_DESCRIPTION_MARKER: &str = "&&RiddleDescription&&";
pub const RIDDLE_ANSWER_MARKER: &str = "&&RiddleAns&&";

pub const CHECK_MARKER: &str = "%%Check%%";
pub const CHECK_DESCRIPTION_MARKER: &str = "%%CheckDescription%%";

pub const COMBAT_MARKER: &str = "##Combat##";
pub const COMBAT_NAME_MARKER: &str = "##Name##";
pub const COMBAT_DIFFICULTY_MARKER: &str = "##Diff##";

pub const LUCK_MARKER: &str = "@@luck@@";
pub const LUCK_SIGIL: &str = "@@";
pub const LUCK_SCENARIO_MARKERS: [&str; 2] = ["@@scenario 1:@@", "@@scenario 2:@@"];
pub const LUCK_DESCRIPTION_MARKERS: [&str; 2] = ["@@luck1Description@@", "@@luck2Description@@"];

pub const EFFECT_SEPARATOR: &str = "!!";

const ROLL_FACES: u8 = 6;
const MAX_CHOICES: u8 = 3;

/// Parse a mechanic block. The first line selects the mechanic; a block
/// with no known marker is read as plain numbered options.
pub fn parse_mechanic(block: &str) -> Result<Mechanic, ParseError> {
    let lines = lines(block);
    let discriminator = lines.first().map(|l| l.trim()).unwrap_or_default();

    let mechanic = if discriminator.starts_with(ROLL_MARKER) {
        parse_roll(&lines)
    } else if discriminator.starts_with(RIDDLE_MARKER) {
        parse_riddle(&lines)?
    } else if discriminator.starts_with(CHECK_MARKER) {
        parse_check(&lines)
    } else if discriminator.starts_with(COMBAT_MARKER) {
        parse_combat(&lines)?
    } else if discriminator.starts_with(LUCK_MARKER) {
        parse_luck(&lines)
    } else {
        parse_plain(&lines)
    };

    tracing::debug!(kind = mechanic.kind().name(), "parsed mechanic block");
    Ok(mechanic)
}

fn parse_roll(lines: &[&str]) -> Mechanic {
    let faces = (1..=ROLL_FACES)
        .filter_map(|face| {
            let body = numbered(lines, face)?;
            let label = body
                .split(ROLL_LABEL_DELIMITER)
                .next()
                .unwrap_or_default()
                .trim();
            // Face 6 has no table entry; it names its own outcome in
            // its first parenthetical.
            let outcome = match roll_outcome(face) {
                Some(tag) => tag,
                None => first_parenthetical(label).unwrap_or_default(),
            };
            Some(RollFace {
                face,
                label: label.to_string(),
                outcome: outcome.to_string(),
            })
        })
        .collect();
    Mechanic::Roll { faces }
}

fn parse_riddle(lines: &[&str]) -> Result<Mechanic, ParseError> {
    let prompt = line_after(lines, RIDDLE_DESCRIPTION_MARKER).map(|l| l.trim().to_string());

    let answers: Vec<String> = (1..=MAX_CHOICES)
        .filter_map(|n| numbered(lines, n))
        .map(str::to_string)
        .collect();

    let correct = match marker_index(lines, RIDDLE_ANSWER_MARKER) {
        Some(index) => {
            let line = lines.get(index + 1).ok_or_else(|| {
                ParseError::IndexParseFailure(format!("no line after {}", RIDDLE_ANSWER_MARKER))
            })?;
            Some(answer_index(line, answers.len())?)
        }
        None => None,
    };

    Ok(Mechanic::Riddle {
        prompt,
        answers,
        correct,
    })
}

// "2. A man" -> 1. The leading number is 1-based and must name an answer.
fn answer_index(line: &str, answers: usize) -> Result<usize, ParseError> {
    let raw = line.trim().split('.').next().unwrap_or_default().trim();
    let number: usize = raw
        .parse()
        .map_err(|_| ParseError::IndexParseFailure(raw.to_string()))?;
    if number == 0 || number > answers {
        return Err(ParseError::IndexParseFailure(format!(
            "answer {} out of range 1..={}",
            number, answers
        )));
    }
    Ok(number - 1)
}

fn parse_check(lines: &[&str]) -> Mechanic {
    let check = marker_index(lines, CHECK_DESCRIPTION_MARKER).and_then(|index| {
        let description = lines.get(index + 1)?.trim().to_string();
        let threshold = match lines.get(index + 2) {
            Some(line) => line.replace('%', "").trim().to_string(),
            None => {
                tracing::debug!(marker = CHECK_DESCRIPTION_MARKER, "check threshold missing");
                String::new()
            }
        };
        Some(SkillCheck {
            description,
            threshold,
        })
    });
    Mechanic::Check { check }
}

fn parse_combat(lines: &[&str]) -> Result<Mechanic, ParseError> {
    let mut opponent = None;
    let mut difficulty = 0;

    for line in lines {
        if line.starts_with(COMBAT_NAME_MARKER) {
            opponent = Some(line.replace(COMBAT_NAME_MARKER, "").trim().to_string());
        } else if line.starts_with(COMBAT_DIFFICULTY_MARKER) {
            let raw = line.replace(COMBAT_DIFFICULTY_MARKER, "");
            difficulty = raw
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidDifficulty(raw.trim().to_string()))?;
        }
    }

    if opponent.is_none() {
        tracing::debug!(marker = COMBAT_NAME_MARKER, "marker not found");
    }

    Ok(Mechanic::Combat {
        opponent,
        difficulty,
    })
}

fn parse_luck(lines: &[&str]) -> Mechanic {
    let mut scenarios: [LuckScenario; 2] = Default::default();

    for (i, line) in lines.iter().enumerate() {
        for (slot, scenario) in scenarios.iter_mut().enumerate() {
            let effect_marker = LUCK_SCENARIO_MARKERS[slot];
            if line.starts_with(effect_marker) {
                scenario.effect = line
                    .replace(effect_marker, "")
                    .trim()
                    .replace(LUCK_SIGIL, "")
                    .trim()
                    .to_string();
            }
            if line.starts_with(LUCK_DESCRIPTION_MARKERS[slot]) {
                if let Some(next) = lines.get(i + 1) {
                    scenario.text = next.to_string();
                }
            }
        }
    }

    for (slot, scenario) in scenarios.iter().enumerate() {
        if scenario.text.is_empty() {
            tracing::debug!(marker = LUCK_DESCRIPTION_MARKERS[slot], "marker not found");
        }
    }

    Mechanic::Luck { scenarios }
}

fn parse_plain(lines: &[&str]) -> Mechanic {
    let mut info = None;
    let mut choices = Vec::new();

    for line in lines {
        if (1..=MAX_CHOICES).any(|n| line.starts_with(&format!("{}.", n))) {
            // The number stays on the option text. Only the field between
            // the first and second separator is the effect.
            let mut fields = line.split(EFFECT_SEPARATOR);
            let text = fields.next().unwrap_or_default();
            let effect = fields.next().unwrap_or_else(|| {
                tracing::debug!(marker = EFFECT_SEPARATOR, line = %line, "option has no effect");
                ""
            });
            choices.push(PlainChoice {
                text: text.trim().to_string(),
                effect: effect.trim().to_string(),
            });
        } else if info.is_none() && !line.starts_with(EFFECT_SEPARATOR) {
            info = Some(line.trim().to_string());
        }
    }

    Mechanic::Plain { info, choices }
}

/// Body of the first line numbered `n.`, with the number removed.
fn numbered<'a>(lines: &[&'a str], n: u8) -> Option<&'a str> {
    let prefix = format!("{}.", n);
    lines
        .iter()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
}

fn marker_index(lines: &[&str], marker: &str) -> Option<usize> {
    let index = lines.iter().position(|line| line.starts_with(marker));
    if index.is_none() {
        tracing::debug!(marker, "marker not found");
    }
    index
}

/// The line following the first line that starts with `marker`.
fn line_after<'a>(lines: &[&'a str], marker: &str) -> Option<&'a str> {
    marker_index(lines, marker).and_then(|index| lines.get(index + 1).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::encounter::MechanicKind;

    #[test]
    fn roll_reads_six_faces_in_order() {
        let block = "$$Roll$$\n\
            1. You slip (ouch) $$-2$$\n\
            2. A rock grazes you (bruise) $$-1$$\n\
            3. Nothing happens (calm)\n\
            4. A clover (lucky) $$+1$$\n\
            5. A spring (fresh) $$+1$$\n\
            6. A fairy (+2 life) (blessing) $$+2$$";
        let Mechanic::Roll { faces } = parse_mechanic(block).unwrap() else {
            panic!("expected roll");
        };
        assert_eq!(faces.len(), 6);
        assert_eq!(faces[0].face, 1);
        assert_eq!(faces[0].label, "You slip (ouch)");
        assert_eq!(faces[2].label, "Nothing happens (calm)");
        assert_eq!(faces[5].label, "A fairy (+2 life) (blessing)");
        assert_eq!(faces[0].outcome, "-2 life");
        assert_eq!(faces[5].outcome, "+2 life");
    }

    #[test]
    fn roll_outcomes_follow_the_die_face() {
        let block = "$$Roll$$\n1. a (x)\n2. b (x)\n3. c (x)\n4. d (x)\n6. f (treasure) (r)";
        let outcomes: Vec<String> = parse_mechanic(block)
            .unwrap()
            .options()
            .into_iter()
            .map(|o| o.outcome)
            .collect();
        assert_eq!(
            outcomes,
            vec!["-2 life", "-1 life", "Nothing", "+1 luck", "treasure"]
        );
    }

    #[test]
    fn roll_skips_missing_faces() {
        let block = "$$Roll$$\n1. One\n3. Three";
        let Mechanic::Roll { faces } = parse_mechanic(block).unwrap() else {
            panic!("expected roll");
        };
        let numbers: Vec<u8> = faces.iter().map(|f| f.face).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn riddle_with_answer() {
        let block = "&&Riddle&&\n\
            &&RiddleDescription&&\n\
            What has keys but no locks?\n\
            1. A piano\n\
            2. A map\n\
            3. A door\n\
            &&RiddleAns&&\n\
            1. A piano";
        let mechanic = parse_mechanic(block).unwrap();
        assert_eq!(
            mechanic,
            Mechanic::Riddle {
                prompt: Some("What has keys but no locks?".to_string()),
                answers: vec!["A piano".into(), "A map".into(), "A door".into()],
                correct: Some(0),
            }
        );
    }

    #[test]
    fn riddle_without_answer_marker_is_soft() {
        let block = "&&Riddle&&\n1. Yes\n2. No";
        let Mechanic::Riddle {
            prompt, correct, ..
        } = parse_mechanic(block).unwrap()
        else {
            panic!("expected riddle");
        };
        assert_eq!(prompt, None);
        assert_eq!(correct, None);
    }

    #[test]
    fn riddle_answer_not_a_number() {
        let block = "&&Riddle&&\n1. Yes\n2. No\n&&RiddleAns&&\nsecond";
        let err = parse_mechanic(block).unwrap_err();
        assert!(matches!(err, ParseError::IndexParseFailure(_)));
    }

    #[test]
    fn riddle_answer_out_of_range() {
        let block = "&&Riddle&&\n1. Yes\n2. No\n&&RiddleAns&&\n3. Maybe";
        let err = parse_mechanic(block).unwrap_err();
        assert!(matches!(err, ParseError::IndexParseFailure(_)));
    }

    #[test]
    fn check_reads_description_and_threshold() {
        let block = "%%Check%%\n%%CheckDescription%%\nClimb the wall\n 65% \n";
        assert_eq!(
            parse_mechanic(block).unwrap(),
            Mechanic::Check {
                check: Some(SkillCheck {
                    description: "Climb the wall".to_string(),
                    threshold: "65".to_string(),
                }),
            }
        );
    }

    #[test]
    fn check_without_description_marker() {
        let mechanic = parse_mechanic("%%Check%%\nClimb").unwrap();
        assert_eq!(mechanic, Mechanic::Check { check: None });
    }

    #[test]
    fn combat_markers_anywhere() {
        let block = "##Combat##\nA troll blocks the path.\n##Diff## 7\n##Name## Cave Troll";
        assert_eq!(
            parse_mechanic(block).unwrap(),
            Mechanic::Combat {
                opponent: Some("Cave Troll".to_string()),
                difficulty: 7,
            }
        );
    }

    #[test]
    fn combat_bad_difficulty() {
        let err = parse_mechanic("##Combat##\n##Diff## hard").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDifficulty(ref v) if v == "hard"));
    }

    #[test]
    fn luck_scenarios() {
        let block = "@@luck@@\n\
            @@scenario 1:@@ +1 luck @@\n\
            @@luck1Description@@\n\
            You find a coin.\n\
            @@scenario 2:@@ -1 life\n\
            @@luck2Description@@\n\
            A branch snaps.";
        let Mechanic::Luck { scenarios } = parse_mechanic(block).unwrap() else {
            panic!("expected luck");
        };
        assert_eq!(scenarios[0].effect, "+1 luck");
        assert_eq!(scenarios[0].text, "You find a coin.");
        assert_eq!(scenarios[1].effect, "-1 life");
        assert_eq!(scenarios[1].text, "A branch snaps.");
    }

    #[test]
    fn luck_always_has_two_scenarios() {
        let mechanic = parse_mechanic("@@luck@@\n@@scenario 1:@@ +1 luck").unwrap();
        assert_eq!(mechanic.options().len(), 2);
        assert_eq!(mechanic.kind(), MechanicKind::Luck);
    }

    #[test]
    fn plain_options_with_info() {
        let block = "The corridor splits.\n\
            !!ignored note\n\
            1. Go left !! You find a torch\n\
            2. Go right!!A trap springs\n\
            3. Wait";
        let mechanic = parse_mechanic(block).unwrap();
        assert_eq!(
            mechanic,
            Mechanic::Plain {
                info: Some("The corridor splits.".to_string()),
                choices: vec![
                    PlainChoice {
                        text: "1. Go left".into(),
                        effect: "You find a torch".into()
                    },
                    PlainChoice {
                        text: "2. Go right".into(),
                        effect: "A trap springs".into()
                    },
                    PlainChoice {
                        text: "3. Wait".into(),
                        effect: String::new()
                    },
                ],
            }
        );
    }

    #[test]
    fn plain_info_skips_separator_lines() {
        let mechanic = parse_mechanic("!!note\nChoose wisely\n1. A!!B").unwrap();
        assert_eq!(mechanic.info(), Some("Choose wisely"));
    }

    #[test]
    fn plain_effect_stops_at_second_separator() {
        let mechanic = parse_mechanic("Pick\n1. Climb !! You reach the top !! (+1 luck)").unwrap();
        let options = mechanic.options();
        assert_eq!(options[0].text, "1. Climb");
        assert_eq!(options[0].outcome, "You reach the top");
    }

    #[test]
    fn plain_ignores_fourth_option() {
        let mechanic = parse_mechanic("Pick\n1. a!!x\n4. d!!y").unwrap();
        assert_eq!(mechanic.options().len(), 1);
    }
}
