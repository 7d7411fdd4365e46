// Output formatting: terminal display of scores, tweets, and packages.

pub mod terminal;

/// One-line preview of `text`: whitespace runs collapse to a single space,
/// and anything past `max_chars` characters is cut with "...".
///
/// Counts characters, not bytes, so emoji and accented letters never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
