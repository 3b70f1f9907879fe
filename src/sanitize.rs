//! Free-text sanitization for folder and file names.
//!
//! Metadata-driven planning receives arbitrary descriptive text (often
//! AI-generated) for folder names and file stems. This module reduces such
//! text to a bounded, filesystem-safe token that is guaranteed non-empty
//! and free of path separators and punctuation.

use regex::Regex;
use std::sync::LazyLock;

/// Default maximum length of a sanitized token, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// Default maximum number of underscore-joined words in a sanitized token.
pub const DEFAULT_MAX_WORDS: usize = 5;

/// Fallback token returned when sanitization leaves nothing usable.
pub const FALLBACK_NAME: &str = "untitled";

/// Trailing filename extension, e.g. ".jpg" in "sunset photo.jpg".
static TRAILING_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9]{1,5}$").expect("valid extension pattern"));

/// Filler words, document-type nouns, and extension words that carry no
/// naming value. Removal is whole-word and case-insensitive.
static STOP_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jpg|jpeg|png|gif|bmp|txt|md|pdf|docx|xls|xlsx|csv|ppt|pptx|image|picture|photo|this|that|these|those|here|there|please|note|additional|notes|folder|name|sure|heres|a|an|the|and|of|in|to|for|on|with|your|answer|should|be|only|summary|summarize|text|category)\b",
    )
    .expect("valid stop-word pattern")
});

/// Any character that is not alphanumeric, whitespace, or underscore.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word pattern"));

/// Runs of whitespace and/or underscores.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid separator pattern"));

/// Sanitizes free text into a filesystem-safe token using the default
/// length and word limits.
///
/// # Examples
///
/// ```
/// use reshelf::sanitize::sanitize;
///
/// assert_eq!(sanitize("Sunset Over The Lake.jpg"), "sunset_over_lake");
/// assert_eq!(sanitize("!!!"), "untitled");
/// ```
pub fn sanitize(raw: &str) -> String {
    sanitize_with_limits(raw, DEFAULT_MAX_LENGTH, DEFAULT_MAX_WORDS)
}

/// Sanitizes free text into a filesystem-safe token with explicit limits.
///
/// The transforms run in a fixed order: strip a trailing extension, drop
/// stop-words, strip punctuation, collapse separators to single
/// underscores, lowercase, limit the word count, then limit the length.
/// If nothing survives, returns [`FALLBACK_NAME`].
pub fn sanitize_with_limits(raw: &str, max_length: usize, max_words: usize) -> String {
    let without_extension = TRAILING_EXTENSION.replace(raw, "");
    let without_stop_words = STOP_WORDS.replace_all(&without_extension, "");
    let word_chars_only = NON_WORD.replace_all(&without_stop_words, "");
    let collapsed = SEPARATOR_RUN.replace_all(word_chars_only.trim(), "_");
    let lowered = collapsed.to_lowercase();
    let trimmed = lowered.trim_matches('_');

    let limited: Vec<&str> = trimmed
        .split('_')
        .filter(|word| !word.is_empty())
        .take(max_words)
        .collect();
    let joined = limited.join("_");

    let bounded: String = joined.chars().take(max_length).collect();
    if bounded.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        bounded
    }
}
