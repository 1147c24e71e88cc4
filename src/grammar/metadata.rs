use serde::Deserialize;

/// Header fields of the generated grammar and the few knobs that are not
/// derived from the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrammarMetadata {
    /// Human readable language name, e.g. `Food`.
    pub name: String,
    /// Root scope of the grammar, e.g. `source.food`.
    pub scope_name: String,
    /// File extensions the grammar applies to, without the dot.
    pub file_types: Vec<String>,
    /// Keyword that introduces a function definition. Empty disables the rule.
    pub function_keyword: String,
}

impl Default for GrammarMetadata {
    fn default() -> Self {
        Self {
            name: "Food".to_string(),
            scope_name: "source.food".to_string(),
            file_types: vec!["food".to_string()],
            function_keyword: "fn".to_string(),
        }
    }
}

impl GrammarMetadata {
    /// The language id appended to every scope: the last segment of `scope_name`.
    pub fn language(&self) -> &str {
        self.scope_name.rsplit('.').next().unwrap_or_default()
    }
}
