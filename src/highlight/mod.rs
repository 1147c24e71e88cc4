//! A small reference engine that applies a synthesized [`Grammar`] to text.
//!
//! Editors evaluate the generated grammar themselves; this engine exists so
//! the classification of a recipe can be previewed and tested without one. It
//! works line by line like a TextMate tokenizer: at each position the rules are
//! tried in precedence order and the first match wins. `begin`/`end` regions
//! stay open across lines and may nest.

use crate::error::HighlightError;
use crate::grammar::{Grammar, Include, Rule};
use ahash::AHashMap;
use std::fmt;

mod matcher;

use matcher::Matcher;

/// A classified span of the input. Offsets are byte offsets into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub scope: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}:{:<3} {:<40} {:?}",
            self.line + 1,
            self.start + 1,
            self.scope,
            self.text
        )
    }
}

#[derive(Debug)]
enum CompiledRule {
    Match {
        matcher: Matcher,
        name: Option<String>,
        captures: Vec<(usize, String)>,
    },
    Block {
        name: String,
        begin: Matcher,
        end: Matcher,
        patterns: Vec<String>,
    },
}

/// What a rule matched at the current position.
enum Step<'h> {
    Spans { end: usize, spans: Vec<(usize, usize, &'h str)> },
    Open { rule: &'h str, end: usize },
}

#[derive(Debug)]
pub struct Highlighter {
    rules: AHashMap<String, CompiledRule>,
    top_level: Vec<String>,
}

impl Highlighter {
    /// Compiles every repository rule and checks that all includes resolve.
    pub fn new(grammar: &Grammar) -> Result<Self, HighlightError> {
        let mut rules = AHashMap::new();
        for (name, rule) in grammar.repository.iter() {
            rules.insert(name.to_string(), compile_rule(name, rule)?);
        }

        let top_level = resolve_includes(&grammar.patterns, &rules)?;
        for rule in rules.values() {
            if let CompiledRule::Block { patterns, .. } = rule {
                for target in patterns {
                    if !rules.contains_key(target) {
                        return Err(HighlightError::UnknownInclude(target.clone()));
                    }
                }
            }
        }

        Ok(Self { rules, top_level })
    }

    /// Classifies `text`, returning tokens in document order.
    ///
    /// Text no rule claims outside of a region (whitespace, punctuation) yields
    /// no token.
    pub fn highlight(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut open: Vec<&str> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let mut pos = 0;
            let mut pending: Option<usize> = None;

            while pos < line.len() {
                let region = open.last().and_then(|name| match self.rules.get(*name) {
                    Some(CompiledRule::Block {
                        name: scope,
                        end,
                        patterns,
                        ..
                    }) => Some((scope.as_str(), end, patterns.as_slice())),
                    _ => None,
                });

                if let Some((scope, end, patterns)) = region {
                    if let Some(caps) = end.match_at(line, pos) {
                        let close = caps.get_match().map_or(pos, |m| m.end());
                        flush(&mut tokens, line_no, line, &mut pending, pos, scope);
                        push(&mut tokens, line_no, line, pos, close, scope);
                        open.pop();
                        pos = close;
                        continue;
                    }

                    match self.step(patterns, line, pos) {
                        Some(step) => {
                            flush(&mut tokens, line_no, line, &mut pending, pos, scope);
                            pos = self.apply(step, &mut tokens, &mut open, line_no, line, pos);
                        }
                        None => {
                            pending.get_or_insert(pos);
                            pos += char_width(line, pos);
                        }
                    }
                } else {
                    match self.step(&self.top_level, line, pos) {
                        Some(step) => {
                            pos = self.apply(step, &mut tokens, &mut open, line_no, line, pos)
                        }
                        None => pos += char_width(line, pos),
                    }
                }
            }

            if let Some(CompiledRule::Block { name, .. }) =
                open.last().and_then(|name| self.rules.get(*name))
            {
                flush(&mut tokens, line_no, line, &mut pending, line.len(), name);
            }
        }

        tokens
    }

    /// Tries `candidates` in order at `pos` and returns the first match.
    fn step<'h>(&'h self, candidates: &'h [String], line: &str, pos: usize) -> Option<Step<'h>> {
        for candidate in candidates {
            let Some(rule) = self.rules.get(candidate) else {
                continue;
            };
            match rule {
                CompiledRule::Match {
                    matcher,
                    name,
                    captures,
                } => {
                    let Some(caps) = matcher.match_at(line, pos) else {
                        continue;
                    };
                    let end = caps.get_match().map_or(pos, |m| m.end());
                    let spans = if captures.is_empty() {
                        name.iter().map(|scope| (pos, end, scope.as_str())).collect()
                    } else {
                        captures
                            .iter()
                            .filter_map(|(group, scope)| {
                                caps.get_group(*group)
                                    .filter(|span| !span.is_empty())
                                    .map(|span| (span.start, span.end, scope.as_str()))
                            })
                            .collect()
                    };
                    return Some(Step::Spans { end, spans });
                }
                CompiledRule::Block { begin, .. } => {
                    if let Some(caps) = begin.match_at(line, pos) {
                        let end = caps.get_match().map_or(pos, |m| m.end());
                        return Some(Step::Open {
                            rule: candidate.as_str(),
                            end,
                        });
                    }
                }
            }
        }
        None
    }

    fn apply<'h>(
        &'h self,
        step: Step<'h>,
        tokens: &mut Vec<Token>,
        open: &mut Vec<&'h str>,
        line_no: usize,
        line: &str,
        pos: usize,
    ) -> usize {
        match step {
            Step::Spans { end, spans } => {
                for (start, stop, scope) in spans {
                    push(tokens, line_no, line, start, stop, scope);
                }
                end
            }
            Step::Open { rule, end } => {
                if let Some(CompiledRule::Block { name, .. }) = self.rules.get(rule) {
                    push(tokens, line_no, line, pos, end, name);
                }
                open.push(rule);
                end
            }
        }
    }
}

fn compile_rule(name: &str, rule: &Rule) -> Result<CompiledRule, HighlightError> {
    match rule {
        Rule::Match(rule) => Ok(CompiledRule::Match {
            matcher: Matcher::compile(name, &rule.pattern)?,
            name: rule.name.clone(),
            captures: rule
                .captures
                .iter()
                .map(|(group, capture)| (*group as usize, capture.name.clone()))
                .collect(),
        }),
        Rule::Block(rule) => Ok(CompiledRule::Block {
            name: rule.name.clone(),
            begin: Matcher::compile(name, &rule.begin)?,
            end: Matcher::compile(name, &rule.end)?,
            patterns: rule
                .patterns
                .iter()
                .map(|include| include_target(include).map(str::to_string))
                .collect::<Result<_, _>>()?,
        }),
    }
}

fn resolve_includes(
    includes: &[Include],
    rules: &AHashMap<String, CompiledRule>,
) -> Result<Vec<String>, HighlightError> {
    includes
        .iter()
        .map(|include| {
            let target = include_target(include)?;
            if rules.contains_key(target) {
                Ok(target.to_string())
            } else {
                Err(HighlightError::UnknownInclude(include.include.clone()))
            }
        })
        .collect()
}

fn include_target(include: &Include) -> Result<&str, HighlightError> {
    include
        .target()
        .ok_or_else(|| HighlightError::UnknownInclude(include.include.clone()))
}

fn push(
    tokens: &mut Vec<Token>,
    line_no: usize,
    line: &str,
    start: usize,
    end: usize,
    scope: &str,
) {
    if start < end {
        tokens.push(Token {
            line: line_no,
            start,
            end,
            text: line[start..end].to_string(),
            scope: scope.to_string(),
        });
    }
}

fn flush(
    tokens: &mut Vec<Token>,
    line_no: usize,
    line: &str,
    pending: &mut Option<usize>,
    end: usize,
    scope: &str,
) {
    if let Some(start) = pending.take() {
        push(tokens, line_no, line, start, end, scope);
    }
}

fn char_width(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, char::len_utf8)
}
