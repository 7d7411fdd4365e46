// Text normalizer: lowercase and blank out punctuation.
//
// Every character outside [a-z0-9] and whitespace becomes exactly one space,
// so "don't" splits into two tokens ("don", "t") rather than fusing into "dont".
// Whitespace means Unicode whitespace: NBSP and ideographic space survive.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// Anything that is not a lowercase ASCII letter, digit, or ASCII whitespace.
/// Applied after lowercasing, so uppercase input has already been folded.
/// regex-lite's `\s` is ASCII-only, so matches are re-checked per char.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid pattern"));

/// Lowercase `text` and replace each non-alphanumeric, non-whitespace
/// character with a single space.
pub fn clean_text(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if matched.chars().all(char::is_whitespace) {
                matched.to_string()
            } else {
                " ".to_string()
            }
        })
        .into_owned()
}

/// Normalize a batch of texts. Output order and length match the input.
pub fn clean_texts<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts.iter().map(|t| clean_text(t.as_ref())).collect()
}
