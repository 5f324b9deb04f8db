use regex::Regex;
use std::sync::LazyLock;

/// Honorifics and suffixes dropped before initials are taken.
static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(mr|mrs|ms|dr|jr|sr)\.?\b").unwrap());

static NON_ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

/// Derives an uppercase label of at most `length` characters from `username`.
///
/// A single remaining word contributes its leading characters, several words
/// contribute one leading character each. Titles are removed before
/// punctuation, so `"Dr. Robert Smith Jr."` becomes `"RS"`, and any other
/// symbol breaks words apart, so `"mary.jane@email.com"` becomes `"MJ"`.
pub fn extract_initials(username: &str, length: usize) -> String {
    if username.is_empty() {
        return String::new();
    }

    let without_titles = TITLE_REGEX.replace_all(username, "");
    // Stripped symbols still separate words: "mary.jane" is two words.
    let cleaned = NON_ALPHANUMERIC_REGEX
        .replace_all(&without_titles, " ")
        .trim()
        .to_ascii_uppercase();

    let words: Vec<&str> = cleaned.split_whitespace().collect();

    match words.as_slice() {
        [] => String::new(),
        [word] => word.chars().take(length).collect(),
        words => words
            .iter()
            .take(length)
            .filter_map(|word| word.chars().next())
            .collect(),
    }
}
