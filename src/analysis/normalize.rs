use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup tags, collapse whitespace runs, trim and lowercase.
///
/// Shared preprocessing for the arrangement classifier and the skill
/// matcher. Total (callers pass "" for absent fields) and idempotent.
pub fn normalize(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_lowercase()
}

// ── Tests ──
