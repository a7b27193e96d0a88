/// Cleanup pass — cosmetic transforms applied after every section has
/// been extracted.
///
/// Parenthetical annotations are generator notes rather than prose, so
/// they are removed from every text field. Roll options are the exception:
/// the first annotation of each of the first five options is replaced by
/// the outcome tag for that position in the list.

use crate::core::text::{remove_nth_parenthetical, strip_parenthetical, substitute_parenthetical, tidy};
use crate::schema::encounter::EncounterOption;
use crate::schema::mechanic::{Mechanic, ROLL_OUTCOMES};

/// Strip annotations from a header or prose field.
pub fn clean_field(text: &str) -> String {
    tidy(&strip_parenthetical(text))
}

/// The mechanic's options with their text cleaned for display.
pub fn clean_options(mechanic: &Mechanic) -> Vec<EncounterOption> {
    let mut options = mechanic.options();

    match mechanic {
        Mechanic::Roll { .. } => {
            for (position, option) in options.iter_mut().enumerate() {
                option.text = clean_roll_label(&option.text, position);
            }
        }
        _ => {
            for option in &mut options {
                option.text = clean_field(&option.text);
            }
        }
    }

    options
}

// Tags are keyed by list position, so with a face missing the sixth face
// moves up and takes the fifth tag. The sixth option keeps its first
// annotation and drops the second.
fn clean_roll_label(label: &str, position: usize) -> String {
    match ROLL_OUTCOMES.get(position) {
        Some(tag) => tidy(&substitute_parenthetical(label, &format!("({})", tag))),
        None => tidy(&remove_nth_parenthetical(label, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::mechanic::{PlainChoice, RollFace};

    fn roll(labels: &[&str]) -> Mechanic {
        Mechanic::Roll {
            faces: labels
                .iter()
                .enumerate()
                .map(|(i, label)| RollFace {
                    face: i as u8 + 1,
                    label: label.to_string(),
                    outcome: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn clean_field_strips_and_tidies() {
        assert_eq!(clean_field("  ADV01 (draft) "), "ADV01");
        assert_eq!(clean_field("A (b) C"), "A C");
    }

    #[test]
    fn roll_faces_get_table_tags() {
        let mechanic = roll(&[
            "Trip (bad)",
            "Scrape (meh)",
            "Pause (ok)",
            "Clover (good)",
            "Spring (great)",
            "Fairy (+2 life) (blessing)",
        ]);
        let texts: Vec<String> = clean_options(&mechanic).into_iter().map(|o| o.text).collect();
        assert_eq!(
            texts,
            vec![
                "Trip (-2 life)",
                "Scrape (-1 life)",
                "Pause (Nothing)",
                "Clover (+1 luck)",
                "Spring (+1 life)",
                "Fairy (+2 life)",
            ]
        );
    }

    #[test]
    fn roll_tags_follow_list_position_when_a_face_is_missing() {
        let mut mechanic = roll(&["a (x)", "b (x)", "c (x)", "d (x)", "f (q) (r)"]);
        if let Mechanic::Roll { faces } = &mut mechanic {
            faces[4].face = 6;
        }
        let texts: Vec<String> = clean_options(&mechanic).into_iter().map(|o| o.text).collect();
        assert_eq!(
            texts,
            vec!["a (-2 life)", "b (-1 life)", "c (Nothing)", "d (+1 luck)", "f (+1 life) (r)"]
        );
    }

    #[test]
    fn roll_face_without_annotation_is_unchanged() {
        let mechanic = roll(&["Nothing to see"]);
        assert_eq!(clean_options(&mechanic)[0].text, "Nothing to see");
    }

    #[test]
    fn other_mechanics_strip_annotations() {
        let mechanic = Mechanic::Plain {
            info: None,
            choices: vec![PlainChoice {
                text: "Open the door (risky)".to_string(),
                effect: "A draft (cold)".to_string(),
            }],
        };
        let options = clean_options(&mechanic);
        assert_eq!(options[0].text, "Open the door");
        // Outcomes are payloads, not display text.
        assert_eq!(options[0].outcome, "A draft (cold)");
    }
}
