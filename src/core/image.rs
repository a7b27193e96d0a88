//! Image prompt extraction — pulls the image-generation prompt out of a
//! raw message so an image can be requested before the record is parsed.

use crate::core::conclusion::{CONCLUSION_IMAGE_MARKER, CONCLUSION_WRAPPER};
use crate::core::sections::Sections;

/// Headings that can follow the image prompt when the generator forgets
/// the `**` delimiter between them.
const PROMPT_END_TAGS: [&str; 2] = ["Encounter Description:", "Mechanics:"];

const IMAGE_START_TAG: &str = "image generation";
const IMAGE_END_TAG: &str = "end image generation";

/// The prompt in section 6 of an encounter narrative.
pub fn encounter_image_prompt(message: &str) -> Option<String> {
    let sections = Sections::split_lenient(message);
    let Some(prompt) = sections.image_prompt() else {
        tracing::warn!(
            sections = sections.len(),
            "image generation section not found in message content"
        );
        return None;
    };

    let end = PROMPT_END_TAGS
        .iter()
        .find_map(|tag| find_ignore_case(prompt, tag));
    let prompt = match end {
        Some(index) => &prompt[..index],
        None => prompt,
    };
    Some(prompt.trim().to_string())
}

/// The text after `^^conclusion image description^^`. Both the wrapper
/// token and the image marker must be present.
pub fn conclusion_image_prompt(message: &str) -> Option<String> {
    let wrapper = find_ignore_case(message, CONCLUSION_WRAPPER);
    let marker = find_ignore_case(message, CONCLUSION_IMAGE_MARKER);

    match (wrapper, marker) {
        (Some(_), Some(index)) => {
            Some(message[index + CONCLUSION_IMAGE_MARKER.len()..].trim().to_string())
        }
        _ => {
            tracing::warn!("conclusion image description section not found in message content");
            None
        }
    }
}

/// The text between the `image generation` and `end image generation`
/// tags, matched case-insensitively.
pub fn tagged_image_prompt(message: &str) -> Option<String> {
    let end = find_ignore_case(message, IMAGE_END_TAG)?;
    // The end tag contains the start tag, so search only before it.
    let start = find_ignore_case(&message[..end], IMAGE_START_TAG)? + IMAGE_START_TAG.len();
    let prompt = message[start..end].trim();
    (!prompt.is_empty()).then(|| prompt.to_string())
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
