/// Conclusion extraction — the end-of-story message has a header and a
/// body, but no sections or mechanic.

use crate::core::cleanup::clean_field;
use crate::core::sections::lines;

pub const CONCLUSION_HEADER: &str = "### Conclusion:";
pub const CONCLUSION_IMAGE_MARKER: &str = "^^conclusion image description^^";
pub const CONCLUSION_WRAPPER: &str = "^^conclusion^^";

/// Number given to every conclusion record.
pub const CONCLUSION_NUMBER: &str = "Conclusion";

/// Name and body text of a conclusion message, already cleaned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConclusionText {
    pub name: String,
    pub introduction: String,
}

/// Read the header name and the body lines preceding the image marker.
///
/// Missing markers are not errors: without a header the name is empty,
/// and without an image marker the whole message is body.
pub fn extract(message: &str) -> ConclusionText {
    let mut name = String::new();
    let mut body: Vec<&str> = Vec::new();

    for line in lines(message) {
        if let Some(rest) = line.strip_prefix(CONCLUSION_HEADER) {
            name = rest.trim().to_string();
        } else if line.starts_with(CONCLUSION_IMAGE_MARKER) {
            break;
        } else {
            let line = line.trim();
            if !line.is_empty() {
                body.push(line);
            }
        }
    }

    if name.is_empty() {
        tracing::debug!(marker = CONCLUSION_HEADER, "conclusion header not found");
    }

    let introduction = body.join(" ").replace(CONCLUSION_WRAPPER, "");

    ConclusionText {
        name: clean_field(&name),
        introduction: clean_field(&introduction),
    }
}
