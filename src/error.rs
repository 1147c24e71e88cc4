use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a token taxonomy document.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Could not read taxonomy file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed taxonomy document: {0}")]
    Malformed(String),
}

/// Errors that can occur while serializing or writing the generated grammar.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to serialize grammar: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write grammar artifact to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the build configuration layer.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file '{path}': {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Any failure of a single load -> synthesize -> write cycle.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Errors from the preview highlighter.
#[derive(Error, Debug, Clone)]
pub enum HighlightError {
    #[error("Rule '{rule}' has a pattern the preview engine cannot compile: {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("Include '{0}' does not name a rule in the repository")]
    UnknownInclude(String),
}

/// A taxonomy category that produced no rule because it holds no names.
///
/// This is not a failure: the grammar is still valid, it simply has one
/// classification fewer than it could.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPatternWarning {
    /// The repository rule that was skipped.
    pub rule: String,
    /// The taxonomy category the rule would have been built from.
    pub category: String,
}

impl fmt::Display for EmptyPatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Category '{}' is empty, rule '{}' was not emitted",
            self.category, self.rule
        )
    }
}
