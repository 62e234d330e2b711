//! Text normalization helpers.
//!
//! All matchers compare against the same normalized view of the submission:
//! ASCII-lowercased with runs of whitespace collapsed to single spaces.
//! ASCII lowercasing is deliberate — it preserves byte offsets, which keeps
//! normalized positions translatable back to the source text.

/// Lowercase (ASCII) and collapse all whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Strip leading and trailing punctuation from a token.
pub fn trim_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// Bounded word-number table: zero through twenty plus the tens up to one hundred.
/// Anything past that ("three hundred forty-two") is out of scope by design.
const WORD_NUMBERS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("seventy", 70.0),
    ("eighty", 80.0),
    ("ninety", 90.0),
    ("hundred", 100.0),
];

/// Parse a numeric token: plain digits (optionally decimal), or one of the
/// bounded number words. Returns `None` for anything else.
pub fn parse_number(token: &str) -> Option<f64> {
    let token = trim_punctuation(token);
    if token.is_empty() {
        return None;
    }
    if let Ok(value) = token.parse::<f64>() {
        return Some(value);
    }
    let lower = token.to_ascii_lowercase();
    WORD_NUMBERS
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|(_, value)| *value)
}
