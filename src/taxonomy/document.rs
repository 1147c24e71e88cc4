use super::group::{TokenGroup, ordered_entries};
use serde::Deserialize;

/// The source-of-truth vocabulary shared by the highlighter grammar and the
/// recipe validator.
///
/// Every category is optional in the document; a missing category behaves
/// exactly like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenTaxonomy {
    /// Keyword categories (`declaration`, `control`, ...) in document order.
    #[serde(deserialize_with = "ordered_entries")]
    pub keywords: Vec<(String, Vec<String>)>,
    /// Constructor names, grouped e.g. by ingredient and utensil.
    pub types: TokenGroup,
    /// Free functions such as `wait` or `serve`.
    pub builtins: Vec<String>,
    /// Method names invoked on constructed values, e.g. `pot.boil()`.
    pub actions: TokenGroup,
}

/// Name counts of a taxonomy, reported after each build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxonomyStats {
    pub keywords: usize,
    pub constructors: usize,
    pub builtins: usize,
    pub actions: usize,
}

impl TokenTaxonomy {
    /// The names of one keyword category, if the document declares it.
    pub fn keyword_category(&self, category: &str) -> Option<&[String]> {
        self.keywords
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, words)| words.as_slice())
    }

    /// All constructor names, flattened across groups.
    pub fn constructors(&self) -> Vec<String> {
        self.types.flatten()
    }

    /// All action names, flattened across groups.
    pub fn action_names(&self) -> Vec<String> {
        self.actions.flatten()
    }

    /// Returns `true` if the taxonomy declares no names at all.
    pub fn is_empty(&self) -> bool {
        self.keywords.iter().all(|(_, words)| words.is_empty())
            && self.types.is_empty()
            && self.builtins.is_empty()
            && self.actions.is_empty()
    }

    pub fn stats(&self) -> TaxonomyStats {
        TaxonomyStats {
            keywords: self.keywords.iter().map(|(_, words)| words.len()).sum(),
            constructors: self.types.len(),
            builtins: self.builtins.len(),
            actions: self.actions.len(),
        }
    }
}
