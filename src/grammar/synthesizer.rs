use super::metadata::GrammarMetadata;
use super::pattern::build_word_pattern;
use super::rule::{Include, Repository, Rule};
use super::scope::{self, scoped};
use super::Grammar;
use crate::error::EmptyPatternWarning;
use crate::taxonomy::TokenTaxonomy;
use ahash::AHashMap;
use itertools::Itertools;
use tracing::debug;

const IDENTIFIER: &str = "[A-Za-z_][A-Za-z0-9_]*";
const CALL_LOOKAHEAD: &str = "(?=\\()";

/// The synthesized grammar together with the categories that produced no rule.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub grammar: Grammar,
    pub warnings: Vec<EmptyPatternWarning>,
}

/// Turns a [`TokenTaxonomy`] into a precedence-ordered [`Grammar`].
///
/// The synthesizer is pure: it never touches the file system and the same
/// taxonomy and metadata always yield the same grammar.
pub struct GrammarSynthesizer<'a> {
    taxonomy: &'a TokenTaxonomy,
    metadata: GrammarMetadata,
    keyword_scopes: AHashMap<String, String>,
}

pub struct SynthesizerBuilder<'a> {
    taxonomy: &'a TokenTaxonomy,
    metadata: GrammarMetadata,
    keyword_scopes: AHashMap<String, String>,
}

impl<'a> SynthesizerBuilder<'a> {
    pub fn new(taxonomy: &'a TokenTaxonomy) -> Self {
        Self {
            taxonomy,
            metadata: GrammarMetadata::default(),
            keyword_scopes: AHashMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: GrammarMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Overrides the base scope of one keyword category, e.g. mapping
    /// `modifiers` to `storage.modifier` instead of `keyword.other.modifiers`.
    pub fn with_keyword_scope(mut self, category: &str, base_scope: &str) -> Self {
        self.keyword_scopes
            .insert(category.to_string(), base_scope.to_string());
        self
    }

    pub fn build(self) -> GrammarSynthesizer<'a> {
        GrammarSynthesizer {
            taxonomy: self.taxonomy,
            metadata: self.metadata,
            keyword_scopes: self.keyword_scopes,
        }
    }
}

/// Synthesizes a grammar with default metadata.
pub fn synthesize(taxonomy: &TokenTaxonomy) -> Grammar {
    GrammarSynthesizer::builder(taxonomy)
        .build()
        .synthesize()
        .grammar
}

/// Accumulates rules, keeping the precedence list and repository in step.
struct RuleSet {
    patterns: Vec<Include>,
    repository: Repository,
    warnings: Vec<EmptyPatternWarning>,
}

impl RuleSet {
    fn push(&mut self, name: &str, rule: Rule) {
        self.patterns.push(Include::rule(name));
        self.repository.insert(name, rule);
    }

    /// Registers a rule that is only reachable through another rule's `patterns`.
    fn push_nested(&mut self, name: &str, rule: Rule) {
        self.repository.insert(name, rule);
    }

    fn skip(&mut self, name: &str, category: &str) {
        debug!(rule = name, category, "Category is empty, no rule emitted");
        self.warnings.push(EmptyPatternWarning {
            rule: name.to_string(),
            category: category.to_string(),
        });
    }

    /// A repository key not used yet, derived from `base`.
    fn unique_name(&self, base: &str) -> String {
        if !self.repository.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.repository.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

impl<'a> GrammarSynthesizer<'a> {
    pub fn builder(taxonomy: &'a TokenTaxonomy) -> SynthesizerBuilder<'a> {
        SynthesizerBuilder::new(taxonomy)
    }

    pub fn synthesize(&self) -> Synthesis {
        let mut rules = RuleSet {
            patterns: Vec::new(),
            repository: Repository::new(),
            warnings: Vec::new(),
        };

        // The order of these calls is the matching precedence of the grammar.
        self.comment_rules(&mut rules);
        self.string_rules(&mut rules);
        self.keyword_rules(&mut rules);
        self.type_rule(&mut rules);
        self.builtin_rule(&mut rules);
        self.action_rule(&mut rules);
        self.function_rules(&mut rules);
        self.variable_rules(&mut rules);

        let grammar = Grammar {
            name: self.metadata.name.clone(),
            scope_name: self.metadata.scope_name.clone(),
            file_types: self.metadata.file_types.clone(),
            patterns: rules.patterns,
            repository: rules.repository,
        };

        Synthesis {
            grammar,
            warnings: rules.warnings,
        }
    }

    fn scope(&self, base: &str) -> String {
        scoped(base, self.metadata.language())
    }

    fn comment_rules(&self, rules: &mut RuleSet) {
        rules.push("line-comment", Rule::scoped(self.scope(scope::LINE_COMMENT), "//.*$"));
        // Includes itself so nested block comments close at the right `*/`.
        rules.push(
            "block-comment",
            Rule::block(
                self.scope(scope::BLOCK_COMMENT),
                "/\\*",
                "\\*/",
                vec![Include::rule("block-comment")],
            ),
        );
    }

    fn string_rules(&self, rules: &mut RuleSet) {
        rules.push(
            "string",
            Rule::block(
                self.scope(scope::STRING),
                "\"",
                "\"",
                vec![Include::rule("string-escape")],
            ),
        );
        rules.push_nested(
            "string-escape",
            Rule::scoped(self.scope(scope::STRING_ESCAPE), "\\\\."),
        );
    }

    fn keyword_rules(&self, rules: &mut RuleSet) {
        if self.taxonomy.keywords.is_empty() {
            rules.skip("keyword", "keywords");
            return;
        }

        // Stable, so categories of equal rank keep their document order.
        let categories = self
            .taxonomy
            .keywords
            .iter()
            .sorted_by_key(|(category, _)| scope::keyword_rank(category));

        for (category, words) in categories {
            let slug = scope::slug(category);
            let base_name = if slug.is_empty() {
                "keyword".to_string()
            } else {
                format!("keyword-{}", slug)
            };
            let name = rules.unique_name(&base_name);

            match build_word_pattern(words) {
                Some(pattern) => {
                    let base_scope = self
                        .keyword_scopes
                        .get(category)
                        .cloned()
                        .unwrap_or_else(|| scope::keyword_base(category));
                    rules.push(&name, Rule::scoped(self.scope(&base_scope), pattern.as_str()));
                }
                None => rules.skip(&name, &format!("keywords.{}", category)),
            }
        }
    }

    fn type_rule(&self, rules: &mut RuleSet) {
        match build_word_pattern(&self.taxonomy.constructors()) {
            Some(pattern) => rules.push(
                "type",
                Rule::scoped(self.scope(scope::TYPE), pattern.as_str()),
            ),
            None => rules.skip("type", "types"),
        }
    }

    /// Builtins only count as such when called; a bare `wait` is just a word.
    fn builtin_rule(&self, rules: &mut RuleSet) {
        match build_word_pattern(&self.taxonomy.builtins) {
            Some(pattern) => rules.push(
                "builtin-call",
                Rule::scoped(self.scope(scope::BUILTIN), pattern.followed_by_call()),
            ),
            None => rules.skip("builtin-call", "builtins"),
        }
    }

    fn action_rule(&self, rules: &mut RuleSet) {
        match build_word_pattern(&self.taxonomy.action_names()) {
            Some(pattern) => rules.push(
                "action-call",
                Rule::captured(
                    format!("(\\.)\\s*{}{}", pattern.captured(), CALL_LOOKAHEAD),
                    [
                        (1, self.scope(scope::ACCESSOR)),
                        (2, self.scope(scope::ACTION)),
                    ],
                ),
            ),
            None => rules.skip("action-call", "actions"),
        }
    }

    fn function_rules(&self, rules: &mut RuleSet) {
        let keyword = &self.metadata.function_keyword;
        if !keyword.is_empty() {
            rules.push(
                "function-definition",
                Rule::captured(
                    format!(
                        "\\b({})\\s+({})(?=\\s*\\()",
                        regex::escape(keyword),
                        IDENTIFIER
                    ),
                    [
                        (1, self.scope(scope::KEYWORD_DECLARATION)),
                        (2, self.scope(scope::FUNCTION)),
                    ],
                ),
            );
        }
        rules.push(
            "function-call",
            Rule::scoped(
                self.scope(scope::FUNCTION),
                format!("\\b{}{}", IDENTIFIER, CALL_LOOKAHEAD),
            ),
        );
    }

    fn variable_rules(&self, rules: &mut RuleSet) {
        rules.push(
            "property",
            Rule::captured(
                format!("(\\.)\\s*({})", IDENTIFIER),
                [
                    (1, self.scope(scope::ACCESSOR)),
                    (2, self.scope(scope::PROPERTY)),
                ],
            ),
        );
        rules.push(
            "variable",
            Rule::scoped(self.scope(scope::VARIABLE), "\\b[a-z_][A-Za-z0-9_]*\\b"),
        );
    }
}
