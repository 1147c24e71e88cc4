use itertools::Itertools;
use std::fmt;

/// A word-boundary anchored alternation over a set of names: `\b(?:a|b|c)\b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPattern {
    source: String,
    alternatives: usize,
}

impl WordPattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// How many distinct names the alternation holds.
    pub fn alternatives(&self) -> usize {
        self.alternatives
    }

    /// Wraps the alternation in a capture group, e.g. for use in a larger pattern.
    pub fn captured(&self) -> String {
        format!("({})", self.source)
    }

    /// Requires a call parenthesis right after the name, without consuming it.
    pub fn followed_by_call(&self) -> String {
        format!("{}(?=\\()", self.source)
    }
}

impl fmt::Display for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Builds a single pattern matching any one of `names` as a whole word.
///
/// Returns `None` when there is nothing to match, so callers can skip the rule.
/// Names are escaped, de-duplicated (first occurrence wins) and ordered longest
/// first so that a name can never be shadowed by one of its own prefixes, even
/// when the names contain non-word characters where `\b` would not help.
pub fn build_word_pattern<S: AsRef<str>>(names: &[S]) -> Option<WordPattern> {
    let mut unique: Vec<&str> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .unique()
        .collect();

    if unique.is_empty() {
        return None;
    }

    // Stable: names of equal length keep their taxonomy order.
    unique.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternatives = unique.len();
    let body = unique.into_iter().map(regex::escape).join("|");
    Some(WordPattern {
        source: format!("\\b(?:{})\\b", body),
        alternatives,
    })
}
