use crate::build::BuildOptions;
use crate::error::ConfigError;
use crate::grammar::GrammarMetadata;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "kondate.json";

/// Project-level build settings. Every field is optional in the file.
///
/// ```json
/// {
///   "taxonomy": "grammar/tokens.json",
///   "output": "syntaxes/food.tmLanguage.json",
///   "pollIntervalMs": 500,
///   "grammar": { "name": "Food", "scopeName": "source.food", "fileTypes": ["food"] },
///   "keywordScopes": { "modifiers": "storage.modifier" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    pub taxonomy: PathBuf,
    pub output: PathBuf,
    pub poll_interval_ms: u64,
    pub grammar: GrammarMetadata,
    pub keyword_scopes: BTreeMap<String, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            taxonomy: PathBuf::from("grammar/tokens.json"),
            output: PathBuf::from("syntaxes/food.tmLanguage.json"),
            poll_interval_ms: 500,
            grammar: GrammarMetadata::default(),
            keyword_scopes: BTreeMap::new(),
        }
    }
}

impl BuildConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads `explicit` if given (it must exist), otherwise [`DEFAULT_CONFIG_FILE`]
    /// inside `dir` if present, otherwise the built-in defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::from_file(candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn to_options(&self) -> BuildOptions {
        BuildOptions {
            taxonomy_path: self.taxonomy.clone(),
            output_path: self.output.clone(),
            metadata: self.grammar.clone(),
            keyword_scopes: self.keyword_scopes.clone(),
        }
    }
}
