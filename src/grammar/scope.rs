//! Scope labels assigned by the generated grammar.
//!
//! Renderers key their styling off these strings, so a category must always
//! map to the same label across rebuilds. Every label is suffixed with the
//! grammar's language id (the last segment of its `scopeName`).

pub const LINE_COMMENT: &str = "comment.line.double-slash";
pub const BLOCK_COMMENT: &str = "comment.block";
pub const STRING: &str = "string.quoted.double";
pub const STRING_ESCAPE: &str = "constant.character.escape";
pub const KEYWORD_DECLARATION: &str = "keyword.declaration";
pub const KEYWORD_CONTROL: &str = "keyword.control";
pub const KEYWORD_OTHER: &str = "keyword.other";
pub const TYPE: &str = "entity.name.type";
pub const BUILTIN: &str = "support.function.builtin";
pub const ACCESSOR: &str = "punctuation.accessor";
pub const ACTION: &str = "entity.name.function.member";
pub const FUNCTION: &str = "entity.name.function";
pub const PROPERTY: &str = "variable.other.property";
pub const VARIABLE: &str = "variable.other";

/// Appends the language id: `scoped("keyword.control", "food")` is `keyword.control.food`.
pub fn scoped(base: &str, language: &str) -> String {
    if language.is_empty() {
        base.to_string()
    } else {
        format!("{}.{}", base, language)
    }
}

/// The base scope for a keyword category.
///
/// The two well-known categories get their own TextMate scopes; any other
/// category is kept apart under `keyword.other.<category>`.
pub fn keyword_base(category: &str) -> String {
    match category {
        "declaration" => KEYWORD_DECLARATION.to_string(),
        "control" => KEYWORD_CONTROL.to_string(),
        other => format!("{}.{}", KEYWORD_OTHER, slug(other)),
    }
}

/// Position of a keyword category in the grammar. `declaration` always
/// precedes `control`; every other category follows them.
pub fn keyword_rank(category: &str) -> u8 {
    match category {
        "declaration" => 0,
        "control" => 1,
        _ => 2,
    }
}

/// Lowercases a category name and replaces anything outside `[a-z0-9]` with `-`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
