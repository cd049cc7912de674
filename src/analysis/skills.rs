//! Skill-term matching over normalized listing text.

use regex::Regex;
use serde::Serialize;

use super::normalize::normalize;

/// Terms the `skills` command tallies, in report order.
const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "sql",
    "react",
    "javascript",
    "c#",
    "aws",
    "azure",
    "docker",
    "php",
    "c++",
    "angular",
];

struct Term {
    name: String,
    pattern: Regex,
}

/// Compiled skill vocabulary. Term order is preserved end to end and
/// breaks ranking ties.
pub struct Vocabulary {
    terms: Vec<Term>,
}

impl Vocabulary {
    /// The built-in vocabulary.
    pub fn standard() -> Self {
        let terms = DEFAULT_SKILLS
            .iter()
            .map(|name| Term {
                name: (*name).to_string(),
                pattern: Regex::new(&pattern_for(name)).unwrap(),
            })
            .collect();
        Vocabulary { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Count matches of every term in one piece of raw listing text,
    /// one slot per term in vocabulary order. Every non-overlapping match
    /// counts, not mere presence.
    pub fn count_in(&self, raw: &str) -> Vec<u64> {
        let text = normalize(raw);
        self.terms
            .iter()
            .map(|term| term.pattern.find_iter(&text).count() as u64)
            .collect()
    }

    /// Turn accumulated totals into a report: zero-count terms are dropped
    /// and the rest sorted by count, highest first. The sort is stable, so
    /// tied terms keep vocabulary order.
    pub fn rank(&self, totals: &[u64]) -> Vec<SkillCount> {
        let mut ranked: Vec<SkillCount> = self
            .terms
            .iter()
            .zip(totals)
            .filter(|(_, count)| **count > 0)
            .map(|(term, count)| SkillCount {
                skill: term.name.clone(),
                count: *count,
            })
            .collect();
        ranked.sort_by_key(|entry| std::cmp::Reverse(entry.count));
        ranked
    }
}

fn pattern_for(term: &str) -> String {
    // "#" is not a word character, so \b assertions never match around
    // "c#"; that one is matched literally.
    if term == "c#" {
        r"(?i)c#".to_string()
    } else {
        format!(r"(?i)\b{}\b", regex::escape(term))
    }
}

/// One row of the skill report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u64,
}

// ── Tests ──
