//! Text utilities — word truncation and parenthetical annotation handling.
//!
//! All functions are pure and total. Parenthetical patterns are flat:
//! a span runs from `(` to the first following `)`, and nesting is not
//! understood.

use regex::Regex;
use std::sync::LazyLock;

/// Appended to text that was cut short by [`truncate_words`].
pub const CONTINUATION: &str = "...";

// `(` up to the first `)`. Used for stripping and substitution.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

// Innermost spans only, used when a specific span is addressed by position.
static INNER_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid regex"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Keep at most `max_words` whitespace-separated words.
///
/// Text within the limit is returned unchanged. Longer text is rejoined
/// with single spaces and gets [`CONTINUATION`] appended to the last kept
/// word, so truncating the result again is a no-op.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    if text.split_whitespace().count() <= max_words {
        return text.to_string();
    }

    let mut out = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(CONTINUATION);
    out
}

/// Remove every `(...)` span in a single left-to-right pass.
///
/// Surrounding whitespace is left alone: `"A (b) C"` becomes `"A  C"`.
/// Use [`tidy`] to normalize the result.
pub fn strip_parenthetical(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").into_owned()
}

/// Replace the first `(...)` span with `replacement`.
pub fn substitute_parenthetical(text: &str, replacement: &str) -> String {
    // `NoExpand` keeps `$` in the replacement literal.
    PARENTHETICAL
        .replace(text, regex::NoExpand(replacement))
        .into_owned()
}

/// Remove only the `n`-th (0-based) innermost `(...)` span, leaving the
/// others intact. Text with fewer spans is returned unchanged.
pub fn remove_nth_parenthetical(text: &str, n: usize) -> String {
    match INNER_PARENTHETICAL.find_iter(text).nth(n) {
        Some(m) => {
            let mut out = String::with_capacity(text.len() - m.len());
            out.push_str(&text[..m.start()]);
            out.push_str(&text[m.end()..]);
            out
        }
        None => text.to_string(),
    }
}

/// The contents of the first `(...)` span, without the parentheses.
pub fn first_parenthetical(text: &str) -> Option<&str> {
    PARENTHETICAL
        .find(text)
        .map(|m| text[m.start() + 1..m.end() - 1].trim())
}

/// Trim the ends and collapse runs of spaces left behind by removals.
///
/// Newlines are kept so that multi-paragraph prose survives cleanup.
pub fn tidy(text: &str) -> String {
    SPACE_RUN.replace_all(text.trim(), " ").into_owned()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn short_text_is_untouched(words in prop::collection::vec("[a-z]{1,8}", 0..20), extra in 0usize..5) {
            let text = words.join(" ");
            let limit = words.len() + extra;
            prop_assert_eq!(truncate_words(&text, limit), text);
        }

        #[test]
        fn long_text_keeps_exactly_limit_words(words in prop::collection::vec("[a-z]{1,8}", 2..40), cut in 1usize..40) {
            let limit = cut % (words.len() - 1) + 1;
            let text = words.join(" ");
            let out = truncate_words(&text, limit);
            prop_assert!(out.ends_with(CONTINUATION));
            prop_assert_eq!(out.split_whitespace().count(), limit);
            prop_assert_eq!(truncate_words(&out, limit), out.clone());
        }

        #[test]
        fn strip_without_parentheses_is_identity(text in "[^()]{0,60}") {
            prop_assert_eq!(strip_parenthetical(&text), text);
        }

        #[test]
        fn strip_removes_all_closed_spans(text in "[a-z ()]{0,60}") {
            let out = strip_parenthetical(&text);
            prop_assert!(!PARENTHETICAL.is_match(&out));
        }
    }
}
