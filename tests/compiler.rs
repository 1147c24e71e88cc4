//! Tests for grammar synthesis: rule layout, precedence and artifact shape.
mod common;
use common::*;
use kondate::prelude::*;
use serde_json::Value;

#[test]
fn test_empty_taxonomy_synthesizes_structural_rules_only() {
    let taxonomy = TokenTaxonomy::from_json("{}").unwrap();
    let synthesis = GrammarSynthesizer::builder(&taxonomy).build().synthesize();
    let grammar = &synthesis.grammar;

    assert_eq!(
        grammar.precedence(),
        vec![
            "line-comment",
            "block-comment",
            "string",
            "function-definition",
            "function-call",
            "property",
            "variable"
        ]
    );
    assert_eq!(synthesis.warnings.len(), 4);
    assert!(grammar.to_json().is_ok());
}

#[test]
fn test_precedence_puts_comments_and_strings_first() {
    let grammar = synthesize(&full_taxonomy());
    let order = grammar.precedence();

    let position = |name: &str| order.iter().position(|r| *r == name).unwrap();
    assert_eq!(&order[..3], &["line-comment", "block-comment", "string"]);
    assert!(position("keyword-declaration") < position("keyword-control"));
    assert!(position("keyword-control") < position("type"));
    assert!(position("type") < position("builtin-call"));
    assert!(position("builtin-call") < position("action-call"));
    assert!(position("action-call") < position("function-definition"));
    assert!(position("function-call") < position("property"));
    assert_eq!(*order.last().unwrap(), "variable");
}

#[test]
fn test_every_include_resolves() {
    let grammar = synthesize(&full_taxonomy());
    for name in grammar.precedence() {
        assert!(grammar.rule(name).is_some(), "missing rule {name}");
    }
    match grammar.rule("block-comment").unwrap() {
        Rule::Block(block) => assert_eq!(block.patterns, vec![Include::rule("block-comment")]),
        other => panic!("expected a begin/end rule, got {other:?}"),
    }
    match grammar.rule("string").unwrap() {
        Rule::Block(block) => assert_eq!(block.patterns, vec![Include::rule("string-escape")]),
        other => panic!("expected a begin/end rule, got {other:?}"),
    }
}

#[test]
fn test_builtin_and_action_rules_use_call_lookahead() {
    let grammar = synthesize(&kitchen_taxonomy());
    match grammar.rule("builtin-call").unwrap() {
        Rule::Match(rule) => assert_eq!(rule.pattern, r"\b(?:wait)\b(?=\()"),
        other => panic!("unexpected rule {other:?}"),
    }
    match grammar.rule("action-call").unwrap() {
        Rule::Match(rule) => {
            assert_eq!(rule.pattern, r"(\.)\s*(\b(?:boil)\b)(?=\()");
            assert_eq!(rule.captures[&2].name, "entity.name.function.member.food");
        }
        other => panic!("unexpected rule {other:?}"),
    }
}

#[test]
fn test_artifact_layout() {
    let json = synthesize(&kitchen_taxonomy()).to_json().unwrap();
    assert!(json.ends_with('\n'));

    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Food");
    assert_eq!(value["scopeName"], "source.food");
    assert_eq!(value["fileTypes"], serde_json::json!(["food"]));
    assert_eq!(value["patterns"][0]["include"], "#line-comment");
    assert_eq!(
        value["repository"]["type"],
        serde_json::json!({"name": "entity.name.type.food", "match": "\\b(?:Pot)\\b"})
    );
    assert_eq!(value["repository"]["block-comment"]["begin"], "/\\*");
}

#[test]
fn test_scopes_are_stable_across_rebuilds() {
    let taxonomy = full_taxonomy();
    let first = synthesize(&taxonomy);
    let second = synthesize(&taxonomy);
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_nested_actions_are_flattened_into_one_rule() {
    let grammar = synthesize(&full_taxonomy());
    match grammar.rule("action-call").unwrap() {
        Rule::Match(rule) => {
            for name in ["add", "mixTogether", "fold", "boil", "simmer", "fry", "flip"] {
                assert!(rule.pattern.contains(name), "{name} missing from {}", rule.pattern);
            }
            // `mix` is listed in two groups but appears once.
            let mix_count =
                rule.pattern.matches("|mix|").count() + rule.pattern.matches("|mix)").count();
            assert_eq!(mix_count, 1);
        }
        other => panic!("unexpected rule {other:?}"),
    }
}
