//! Unit tests for core Kondate functionality.
mod common;
use common::*;
use kondate::prelude::*;
use regex::Regex;
use std::collections::HashSet;

#[test]
fn test_flatten_is_identity_on_flat_input() {
    let flat = TokenGroup::Leaf(vec!["Bowl".to_string(), "Pot".to_string()]);
    assert_eq!(flatten(&flat), vec!["Bowl", "Pot"]);
    assert_eq!(flatten(&TokenGroup::Leaf(flatten(&flat))), flatten(&flat));
}

#[test]
fn test_flatten_nested_follows_traversal_order() {
    let taxonomy = TokenTaxonomy::from_json(r#"{"types": {"a": ["x"], "b": {"c": ["y", "z"]}}}"#)
        .unwrap();
    assert_eq!(flatten(&taxonomy.types), vec!["x", "y", "z"]);
}

#[test]
fn test_flatten_collects_every_leaf() {
    let taxonomy = full_taxonomy();
    let constructors: HashSet<String> = taxonomy.constructors().into_iter().collect();
    let expected: HashSet<String> = [
        "Flour", "Egg", "Milk", "Butter", "Bowl", "MixingBowl", "Pot", "Pan", "Whisk", "Spatula",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(constructors, expected);
    assert_eq!(taxonomy.stats().constructors, 10);
}

#[test]
fn test_empty_word_pattern_is_none() {
    let names: Vec<String> = Vec::new();
    assert!(build_word_pattern(&names).is_none());
}

#[test]
fn test_word_pattern_prefers_longer_name() {
    let pattern = build_word_pattern(&["mix", "mixTogether"]).unwrap();
    let re = Regex::new(pattern.as_str()).unwrap();
    let found = re.find("mixTogether(").unwrap();
    assert_eq!(found.as_str(), "mixTogether");

    // Declaration order does not matter.
    let pattern = build_word_pattern(&["mixTogether", "mix"]).unwrap();
    let re = Regex::new(pattern.as_str()).unwrap();
    assert_eq!(re.find("mixTogether(").unwrap().as_str(), "mixTogether");
    assert_eq!(re.find("mix(").unwrap().as_str(), "mix");
}

#[test]
fn test_word_pattern_respects_word_boundaries() {
    let pattern = build_word_pattern(&["Bowl", "MixingBowl"]).unwrap();
    let re = Regex::new(pattern.as_str()).unwrap();
    let found: Vec<&str> = re
        .find_iter("new MixingBowl() new Bowl() Bowler")
        .map(|m| m.as_str())
        .collect();
    assert_eq!(found, vec!["MixingBowl", "Bowl"]);
}

#[test]
fn test_error_display() {
    let err = TaxonomyError::Malformed("expected a JSON object".to_string());
    assert!(err.to_string().contains("Malformed taxonomy"));
    assert!(err.to_string().contains("expected a JSON object"));

    let warning = EmptyPatternWarning {
        rule: "builtin-call".to_string(),
        category: "builtins".to_string(),
    };
    assert!(warning.to_string().contains("builtins"));
    assert!(warning.to_string().contains("builtin-call"));

    let build_err: BuildError = TaxonomyError::Malformed("bad".to_string()).into();
    assert!(build_err.to_string().contains("bad"));
}
