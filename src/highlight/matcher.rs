use crate::error::HighlightError;
use regex_automata::meta::Regex;
use regex_automata::util::captures::Captures;
use regex_automata::{Anchored, Input};

/// A compiled rule pattern.
///
/// The synthesized grammar targets Oniguruma, which supports lookaround. The
/// `regex` engines do not, so a single trailing positive lookahead `(?=...)`
/// is split off and checked separately against the text that follows the
/// match. That is the only lookaround form the synthesizer emits.
#[derive(Debug)]
pub(crate) struct Matcher {
    body: Regex,
    lookahead: Option<Regex>,
}

impl Matcher {
    pub(crate) fn compile(rule: &str, pattern: &str) -> Result<Self, HighlightError> {
        let (body, lookahead) = split_trailing_lookahead(pattern);
        let invalid = |e: regex_automata::meta::BuildError| HighlightError::InvalidPattern {
            rule: rule.to_string(),
            message: e.to_string(),
        };

        let body = Regex::new(body).map_err(invalid)?;
        let lookahead = lookahead.map(Regex::new).transpose().map_err(invalid)?;

        Ok(Self { body, lookahead })
    }

    /// Matches only if a non-empty match starts exactly at `pos`.
    ///
    /// Searches are anchored, so a failed attempt never scans the rest of the
    /// line. The whole line stays the haystack and `\b` sees the text before `pos`.
    pub(crate) fn match_at(&self, line: &str, pos: usize) -> Option<Captures> {
        let mut caps = self.body.create_captures();
        let input = Input::new(line).range(pos..).anchored(Anchored::Yes);
        self.body.search_captures(&input, &mut caps);

        let whole = caps.get_match()?;
        if whole.is_empty() {
            return None;
        }
        if let Some(ahead) = &self.lookahead {
            let rest = Input::new(line).range(whole.end()..).anchored(Anchored::Yes);
            if !ahead.is_match(rest) {
                return None;
            }
        }
        Some(caps)
    }
}

fn split_trailing_lookahead(pattern: &str) -> (&str, Option<&str>) {
    if !pattern.ends_with(')') {
        return (pattern, None);
    }
    match pattern.rfind("(?=") {
        Some(idx) => {
            let inner = &pattern[idx + 3..pattern.len() - 1];
            if is_group_free(inner) {
                (&pattern[..idx], Some(inner))
            } else {
                (pattern, None)
            }
        }
        None => (pattern, None),
    }
}

/// `true` if `s` has no unescaped parentheses, i.e. the lookahead is one flat group.
fn is_group_free(s: &str) -> bool {
    let mut escaped = false;
    for c in s.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' | ')' => return false,
            _ => {}
        }
    }
    true
}
