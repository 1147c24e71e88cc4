use crate::error::{ArtifactError, BuildError, EmptyPatternWarning};
use crate::grammar::{GrammarMetadata, GrammarSynthesizer, Synthesis};
use crate::taxonomy::{self, TaxonomyStats, TokenTaxonomy};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod watch;

pub use watch::{TaxonomyEvent, TaxonomyWatcher, WatchHandle, WatchReport, run_watch};

/// Everything one build needs. Paths are resolved by the caller; nothing in
/// the pipeline falls back to a fixed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub taxonomy_path: PathBuf,
    pub output_path: PathBuf,
    pub metadata: GrammarMetadata,
    /// Keyword category -> base scope overrides.
    pub keyword_scopes: BTreeMap<String, String>,
}

impl BuildOptions {
    pub fn new(taxonomy_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            taxonomy_path: taxonomy_path.into(),
            output_path: output_path.into(),
            metadata: GrammarMetadata::default(),
            keyword_scopes: BTreeMap::new(),
        }
    }
}

/// The outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub rules: usize,
    pub bytes: usize,
    pub stats: TaxonomyStats,
    pub warnings: Vec<EmptyPatternWarning>,
}

/// Runs one full load -> synthesize -> write cycle.
///
/// The artifact is regenerated from scratch every time. Any failure aborts the
/// whole build and leaves a previously written artifact untouched.
pub fn build_once(options: &BuildOptions) -> Result<BuildSummary, BuildError> {
    let taxonomy = taxonomy::load(&options.taxonomy_path)?;
    let stats = taxonomy.stats();

    let synthesis = synthesize_with(options, &taxonomy);

    let json = synthesis.grammar.to_json()?;
    write_atomic(&options.output_path, json.as_bytes())?;

    info!(
        output = %options.output_path.display(),
        rules = synthesis.grammar.repository.len(),
        keywords = stats.keywords,
        constructors = stats.constructors,
        builtins = stats.builtins,
        actions = stats.actions,
        "Grammar written"
    );

    Ok(BuildSummary {
        output_path: options.output_path.clone(),
        rules: synthesis.grammar.repository.len(),
        bytes: json.len(),
        stats,
        warnings: synthesis.warnings,
    })
}

/// Synthesizes `taxonomy` with the grammar settings of `options`.
pub fn synthesize_with(options: &BuildOptions, taxonomy: &TokenTaxonomy) -> Synthesis {
    let mut synthesizer =
        GrammarSynthesizer::builder(taxonomy).with_metadata(options.metadata.clone());
    for (category, scope) in &options.keyword_scopes {
        synthesizer = synthesizer.with_keyword_scope(category, scope);
    }
    synthesizer.build().synthesize()
}

/// Replaces `path` with `bytes` in one step by writing a sibling temp file
/// and renaming it over the target. A missing parent directory is an error.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    let write_error = |source: std::io::Error| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(std::io::Error::other("output path has no file name")))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    // Whichever step fails, the temp file does not outlive the call.
    if let Err(e) = fs::write(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(e));
    }
    debug!(path = %path.display(), bytes = bytes.len(), "Artifact replaced");
    Ok(())
}
