use crate::error::ArtifactError;
use serde::Serialize;

pub mod metadata;
pub mod pattern;
pub mod rule;
pub mod scope;
mod synthesizer;

pub use metadata::GrammarMetadata;
pub use pattern::{WordPattern, build_word_pattern};
pub use rule::{BlockRule, Capture, Captures, Include, MatchRule, Repository, Rule};
pub use synthesizer::{GrammarSynthesizer, Synthesis, SynthesizerBuilder, synthesize};

/// The generated tokenizer description, laid out as a TextMate grammar.
///
/// `patterns` is the precedence order: a renderer tries the referenced rules
/// in this order at each position and keeps the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub name: String,
    pub scope_name: String,
    pub file_types: Vec<String>,
    pub patterns: Vec<Include>,
    pub repository: Repository,
}

impl Grammar {
    /// The repository rules referenced by `patterns`, in precedence order.
    pub fn precedence(&self) -> Vec<&str> {
        self.patterns.iter().filter_map(Include::target).collect()
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.repository.get(name)
    }

    /// Serializes the grammar as pretty-printed JSON with a trailing newline.
    ///
    /// The output depends only on the grammar, so an unchanged taxonomy
    /// always produces byte-identical artifacts.
    pub fn to_json(&self) -> Result<String, ArtifactError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
