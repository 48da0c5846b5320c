use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Shortest run of characters that counts as a skill token.
pub const MIN_TOKEN_LEN: usize = 3;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9+#.]{3,}").expect("token pattern is valid"))
}

/// Lowercases `text` and collects every run of ASCII letters, digits, `+`, `#`
/// and `.` that is at least [`MIN_TOKEN_LEN`] long.
///
/// No stemming or stopword removal happens here, so "and" or "the" come back as
/// tokens just like "python" or "c++".
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|token| token.as_str().to_string())
        .collect()
}
