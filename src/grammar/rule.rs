use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A reference to a repository rule, `{"include": "#name"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Include {
    pub include: String,
}

impl Include {
    pub fn rule(name: &str) -> Self {
        Self {
            include: format!("#{}", name),
        }
    }

    /// The repository key this include points at, if it is a local reference.
    pub fn target(&self) -> Option<&str> {
        self.include.strip_prefix('#')
    }
}

/// The scope given to a single capture group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub name: String,
}

/// Capture group index -> scope. Serialized with string keys, as TextMate expects.
pub type Captures = BTreeMap<u32, Capture>;

/// A single tokenizer rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    Match(MatchRule),
    Block(BlockRule),
}

/// A single-line rule: one regex, optionally split into scoped capture groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Captures::is_empty")]
    pub captures: Captures,
}

/// A region delimited by `begin`/`end`, possibly spanning lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRule {
    pub name: String,
    pub begin: String,
    pub end: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Include>,
}

impl Rule {
    pub fn scoped(scope: impl Into<String>, pattern: impl Into<String>) -> Self {
        Rule::Match(MatchRule {
            name: Some(scope.into()),
            pattern: pattern.into(),
            captures: Captures::new(),
        })
    }

    pub fn captured<I, S>(pattern: impl Into<String>, captures: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Rule::Match(MatchRule {
            name: None,
            pattern: pattern.into(),
            captures: captures
                .into_iter()
                .map(|(group, scope)| (group, Capture { name: scope.into() }))
                .collect(),
        })
    }

    pub fn block(
        scope: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
        patterns: Vec<Include>,
    ) -> Self {
        Rule::Block(BlockRule {
            name: scope.into(),
            begin: begin.into(),
            end: end.into(),
            patterns,
        })
    }

    /// Every scope label this rule can assign.
    pub fn scopes(&self) -> Vec<&str> {
        match self {
            Rule::Match(rule) => rule
                .name
                .iter()
                .map(String::as_str)
                .chain(rule.captures.values().map(|c| c.name.as_str()))
                .collect(),
            Rule::Block(rule) => vec![rule.name.as_str()],
        }
    }
}

/// Named rules in insertion order.
///
/// The order carries no matching semantics (that is what `patterns` is for),
/// but keeping it stable makes regenerated artifacts diff cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    entries: Vec<(String, Rule)>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a rule. A replaced rule keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = rule,
            None => self.entries.push((name, rule)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Repository {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}
