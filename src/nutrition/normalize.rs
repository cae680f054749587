//! Food-name normalization
//!
//! Produces the canonical lookup key shared by dataset keys, synonym aliases
//! and user queries.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Spacing diacritics left over after decomposition (`·`, `^`, `´`, `¨`)
static DIACRITIC_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\p{Diacritic}").ok());

/// Canonical form of a food name
///
/// Lowercases, decomposes (NFD) and drops combining marks and other
/// diacritics, turns `\`, `/` and `,` into spaces, then collapses whitespace
/// runs and trims.
///
/// Lowercasing happens before decomposition: some uppercase letters lowercase
/// into a base letter plus a combining mark (`İ` -> `i̇`), and stripping after
/// lowercasing keeps the function idempotent.
pub fn normalize_name(raw: &str) -> String {
    let decomposed: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let undiacritic = match DIACRITIC_PATTERN.as_ref() {
        Some(pattern) => pattern.replace_all(&decomposed, ""),
        None => decomposed.as_str().into(),
    };

    let stripped: String = undiacritic
        .chars()
        .map(|c| if matches!(c, '\\' | '/' | ',') { ' ' } else { c })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Dataset key for a preparation variant of a normalized name
pub fn variant_key(normalized: &str, variant: &str) -> String {
    format!("{} ({})", normalized, variant)
}
