//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! kondate crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kondate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let options = BuildOptions::new("grammar/tokens.json", "syntaxes/food.tmLanguage.json");
//! let summary = build_once(&options)?;
//! println!("Wrote {} rules to {}", summary.rules, summary.output_path.display());
//! # Ok(())
//! # }
//! ```

// Loading
pub use crate::taxonomy::{TaxonomyStats, TokenGroup, TokenTaxonomy, flatten, load};

// Synthesis
pub use crate::grammar::{
    Grammar, GrammarMetadata, GrammarSynthesizer, Include, Rule, Synthesis, WordPattern,
    build_word_pattern, synthesize,
};

// Orchestration
pub use crate::build::{BuildOptions, BuildSummary, build_once, run_watch};
pub use crate::config::BuildConfig;

// Preview
pub use crate::highlight::{Highlighter, Token};

// Error types
pub use crate::error::{
    ArtifactError, BuildError, ConfigError, EmptyPatternWarning, HighlightError, TaxonomyError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
