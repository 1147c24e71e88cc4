//! # Kondate - Grammar Compiler for the Food Recipe Language
//!
//! **Kondate** turns the recipe language's token taxonomy (`tokens.json`) into a
//! TextMate grammar that editors use to highlight `.food` files. The taxonomy is
//! the single shared contract: the recipe validator reads the same document to
//! reject recipes that use undeclared constructors or actions, and this crate
//! keeps the highlighter in step with it.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: [`taxonomy::load`] reads the taxonomy. Nested groups such as
//!     `types.ingredients` / `types.utensils` are kept as [`TokenGroup`] trees.
//! 2.  **Synthesize**: [`GrammarSynthesizer`] flattens every category, builds a
//!     word-boundary anchored pattern per category and lays the rules out in a
//!     fixed precedence order (comments, strings, keywords, types, builtin
//!     calls, action calls, generic functions, variables).
//! 3.  **Write**: [`build::build_once`] serializes the grammar and replaces the
//!     artifact in one step. [`build::run_watch`] repeats this for every change
//!     reported by a [`build::TaxonomyWatcher`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kondate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let taxonomy = TokenTaxonomy::from_json(
//!         r#"{"keywords": {"declaration": ["fn"]}, "types": {"utensils": ["Pot"]},
//!             "builtins": ["wait"], "actions": {"utensil": ["boil"]}}"#,
//!     )?;
//!
//!     let grammar = GrammarSynthesizer::builder(&taxonomy).build().synthesize().grammar;
//!     println!("{}", grammar.to_json()?);
//!
//!     // Preview how an editor would classify a recipe.
//!     let highlighter = Highlighter::new(&grammar)?;
//!     for token in highlighter.highlight("pot.boil()") {
//!         println!("{}", token);
//!     }
//!     Ok(())
//! }
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod grammar;
pub mod highlight;
pub mod prelude;
pub mod taxonomy;

pub use grammar::{Grammar, GrammarSynthesizer, synthesize};
pub use taxonomy::{TokenGroup, TokenTaxonomy};
