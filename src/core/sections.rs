//! Structural slicing of a narrative: the `###` header line and the
//! `**`-delimited section segments.
//!
//! The generator lays out an encounter as
//!
//! ```text
//! ### ADV01: The Gate
//! **Introduction:**
//! ...
//! **Encounter Description:**
//! ...
//! **Image Generation:**
//! ...
//! **Mechanics:**
//! ...
//! ```
//!
//! so splitting on `**` puts the section bodies at even positions 2, 4,
//! 6 and 8. All positional knowledge of that layout lives in this module.

use crate::core::parser::ParseError;

pub const HEADER_MARKER: &str = "###";
pub const SECTION_DELIMITER: &str = "**";

/// Fewer segments than this and the narrative is not an encounter.
pub const MIN_SEGMENTS: usize = 8;

const INTRODUCTION: usize = 2;
const DESCRIPTION: usize = 4;
const IMAGE_PROMPT: usize = 6;
const MECHANIC: usize = 8;

/// Non-empty lines of `text`, with any trailing `\r` removed.
///
/// Lines are otherwise left untrimmed: markers are matched against the
/// start of the raw line.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect()
}

/// The `### <number>: <name>` line of an encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub number: String,
    pub name: String,
}

impl Header {
    /// Find the first line starting with `###` and split it once on `:`.
    pub fn parse(narrative: &str) -> Result<Header, ParseError> {
        let line = lines(narrative)
            .into_iter()
            .find(|line| line.starts_with(HEADER_MARKER))
            .ok_or(ParseError::MissingHeader)?;

        let rest = line.replace(HEADER_MARKER, "");
        let (number, name) = match rest.trim().split_once(':') {
            Some((number, name)) => (number.trim(), name.trim()),
            None => (rest.trim(), ""),
        };

        Ok(Header {
            number: number.to_string(),
            name: name.to_string(),
        })
    }
}

/// The `**`-split segments of a narrative, with named access to the
/// positions that carry content.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    /// Split on `**`, requiring at least [`MIN_SEGMENTS`] segments.
    pub fn split(narrative: &'a str) -> Result<Self, ParseError> {
        let segments: Vec<&str> = narrative.split(SECTION_DELIMITER).collect();
        if segments.len() < MIN_SEGMENTS {
            return Err(ParseError::MalformedSections {
                found: segments.len(),
            });
        }
        Ok(Self { segments })
    }

    /// Split without enforcing the minimum, for callers that only need a
    /// single early section.
    pub fn split_lenient(narrative: &'a str) -> Self {
        Self {
            segments: narrative.split(SECTION_DELIMITER).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn segment(&self, index: usize) -> Option<&'a str> {
        self.segments.get(index).map(|s| s.trim())
    }

    pub fn introduction(&self) -> &'a str {
        self.segment(INTRODUCTION).unwrap_or_default()
    }

    pub fn description(&self) -> &'a str {
        self.segment(DESCRIPTION).unwrap_or_default()
    }

    pub fn image_prompt(&self) -> Option<&'a str> {
        self.segment(IMAGE_PROMPT)
    }

    /// The mechanic block, or `None` when it is missing or blank.
    pub fn mechanic_block(&self) -> Option<&'a str> {
        self.segment(MECHANIC).filter(|block| !block.is_empty())
    }
}
