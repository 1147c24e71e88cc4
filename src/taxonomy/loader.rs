use super::document::TokenTaxonomy;
use crate::error::TaxonomyError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads and parses a taxonomy document from disk.
///
/// Only the shape of the document is checked. Missing categories are treated
/// as empty and unknown top-level keys are ignored.
pub fn load(path: impl AsRef<Path>) -> Result<TokenTaxonomy, TaxonomyError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    TokenTaxonomy::from_json(&content)
}

impl TokenTaxonomy {
    /// Parses a taxonomy from its JSON text. Group nesting depth is not limited.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let invalid =
            |e: serde_json::Error| TaxonomyError::Malformed(format!("invalid JSON: {}", e));

        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer).map_err(invalid)?;
        deserializer.end().map_err(invalid)?;

        if !value.is_object() {
            return Err(TaxonomyError::Malformed(format!(
                "expected a JSON object at the top level, found {}",
                kind_of(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| TaxonomyError::Malformed(e.to_string()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
