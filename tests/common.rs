//! Common test utilities: taxonomy fixtures and token lookups.
use kondate::highlight::Token;
use kondate::prelude::*;

/// The small taxonomy used throughout the classification tests.
#[allow(dead_code)]
pub const KITCHEN_TAXONOMY_JSON: &str = r#"{
    "keywords": {"declaration": ["fn"]},
    "types": {"utensils": ["Pot"]},
    "builtins": ["wait"],
    "actions": {"utensil": ["boil"]}
}"#;

/// A taxonomy shaped like the real `tokens.json`, with nested groups.
#[allow(dead_code)]
pub const FULL_TAXONOMY_JSON: &str = r#"{
    "keywords": {
        "declaration": ["fn", "let", "new"],
        "control": ["if", "else", "while", "return"]
    },
    "types": {
        "ingredients": ["Flour", "Egg", "Milk", "Butter"],
        "utensils": {
            "vessels": ["Bowl", "MixingBowl", "Pot", "Pan"],
            "tools": ["Whisk", "Spatula"]
        }
    },
    "builtins": ["wait", "serve", "preheat", "mix", "mixTogether"],
    "actions": {
        "bowl": ["add", "mix", "mixTogether", "fold"],
        "heat": {"pot": ["boil", "simmer"], "pan": ["fry", "flip"]}
    }
}"#;

#[allow(dead_code)]
pub fn kitchen_taxonomy() -> TokenTaxonomy {
    TokenTaxonomy::from_json(KITCHEN_TAXONOMY_JSON).expect("fixture must parse")
}

#[allow(dead_code)]
pub fn full_taxonomy() -> TokenTaxonomy {
    TokenTaxonomy::from_json(FULL_TAXONOMY_JSON).expect("fixture must parse")
}

/// Highlights `source` with the default grammar for `taxonomy`.
#[allow(dead_code)]
pub fn highlight(taxonomy: &TokenTaxonomy, source: &str) -> Vec<Token> {
    let grammar = synthesize(taxonomy);
    Highlighter::new(&grammar)
        .expect("synthesized grammar must compile")
        .highlight(source)
}

/// The scopes of every token whose text is exactly `text`, in order.
#[allow(dead_code)]
pub fn scopes_of<'a>(tokens: &'a [Token], text: &str) -> Vec<&'a str> {
    tokens
        .iter()
        .filter(|t| t.text == text)
        .map(|t| t.scope.as_str())
        .collect()
}

/// The scope of the first token whose text is exactly `text`.
#[allow(dead_code)]
pub fn scope_of<'a>(tokens: &'a [Token], text: &str) -> Option<&'a str> {
    scopes_of(tokens, text).into_iter().next()
}
