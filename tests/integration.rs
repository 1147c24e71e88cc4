//! Integration tests for Kondate
//!
//! End-to-end tests that run the full load -> synthesize -> write pipeline
//! against real files.
//!
mod common;
use common::*;
use kondate::build::{TaxonomyEvent, WatchReport};
use kondate::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::mpsc;

fn options_in(dir: &Path, taxonomy_json: &str) -> BuildOptions {
    let taxonomy_path = dir.join("tokens.json");
    fs::write(&taxonomy_path, taxonomy_json).unwrap();
    BuildOptions::new(taxonomy_path, dir.join("food.tmLanguage.json"))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_build_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), FULL_TAXONOMY_JSON);

        let summary = build_once(&options).expect("build should succeed");
        assert_eq!(summary.output_path, options.output_path);
        assert!(summary.warnings.is_empty());
        assert_eq!(summary.stats.builtins, 5);
        assert_eq!(summary.stats.keywords, 7);

        let written = fs::read_to_string(&options.output_path).unwrap();
        assert_eq!(written.len(), summary.bytes);
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["scopeName"], "source.food");
        assert_eq!(
            value["patterns"].as_array().unwrap().len(),
            12,
            "3 structural + 2 keyword + type + builtin + action + 2 function + property + variable"
        );
    }

    #[test]
    fn test_deeply_nested_taxonomy_builds() {
        let mut group = r#"["Pot"]"#.to_string();
        for depth in 0..200 {
            group = format!(r#"{{"shelf{}": {}}}"#, depth, group);
        }
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), &format!(r#"{{"types": {}}}"#, group));

        let summary = build_once(&options).expect("deep nesting is valid");
        assert_eq!(summary.stats.constructors, 1);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), FULL_TAXONOMY_JSON);

        build_once(&options).unwrap();
        let first = fs::read(&options.output_path).unwrap();
        build_once(&options).unwrap();
        let second = fs::read(&options.output_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_taxonomy_fails_and_keeps_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), KITCHEN_TAXONOMY_JSON);
        build_once(&options).unwrap();
        let before = fs::read(&options.output_path).unwrap();

        fs::write(&options.taxonomy_path, r#"{"types": {"utensils": "Pot"}}"#).unwrap();
        let err = build_once(&options).unwrap_err();
        assert!(matches!(err, BuildError::Taxonomy(TaxonomyError::Malformed(_))));
        assert_eq!(fs::read(&options.output_path).unwrap(), before);
    }

    #[test]
    fn test_missing_output_directory_is_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options_in(dir.path(), KITCHEN_TAXONOMY_JSON);
        options.output_path = dir.path().join("no-such-dir").join("food.tmLanguage.json");

        let err = build_once(&options).unwrap_err();
        assert!(matches!(err, BuildError::Artifact(ArtifactError::Write { .. })));
    }

    #[test]
    fn test_missing_taxonomy_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let options =
            BuildOptions::new(dir.path().join("absent.json"), dir.path().join("out.json"));

        let err = build_once(&options).unwrap_err();
        assert!(matches!(err, BuildError::Taxonomy(TaxonomyError::Io { .. })));
        assert!(!options.output_path.exists());
    }

    #[test]
    fn test_empty_categories_are_reported_as_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(
            dir.path(),
            r#"{"keywords": {"declaration": ["fn"]}, "builtins": []}"#,
        );

        let summary = build_once(&options).unwrap();
        let categories: Vec<&str> = summary.warnings.iter().map(|w| w.category.as_str()).collect();
        assert_eq!(categories, vec!["types", "builtins", "actions"]);
    }

    #[test]
    fn test_watch_loop_rebuilds_per_event_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), KITCHEN_TAXONOMY_JSON);

        let (tx, rx) = mpsc::channel();
        tx.send(TaxonomyEvent::Changed).unwrap();
        tx.send(TaxonomyEvent::Changed).unwrap();
        drop(tx);

        let report = run_watch(&options, &rx);
        assert_eq!(report, WatchReport { builds: 3, failures: 0 });
        assert!(options.output_path.exists());
    }

    #[test]
    fn test_watch_loop_survives_failed_builds() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), "not json at all");

        let (tx, rx) = mpsc::channel();
        tx.send(TaxonomyEvent::Changed).unwrap();
        drop(tx);

        let report = run_watch(&options, &rx);
        assert_eq!(report, WatchReport { builds: 0, failures: 2 });
        assert!(!options.output_path.exists());
    }

    #[test]
    fn test_config_drives_grammar_metadata() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tokens.json"), KITCHEN_TAXONOMY_JSON).unwrap();
        let config_path = dir.path().join("kondate.json");
        fs::write(
            &config_path,
            format!(
                r#"{{
                    "taxonomy": {taxonomy:?},
                    "output": {output:?},
                    "grammar": {{
                        "name": "Recipe",
                        "scopeName": "source.recipe",
                        "fileTypes": ["recipe"]
                    }},
                    "keywordScopes": {{"declaration": "storage.type"}}
                }}"#,
                taxonomy = dir.path().join("tokens.json").to_string_lossy(),
                output = dir.path().join("recipe.json").to_string_lossy(),
            ),
        )
        .unwrap();

        let config = BuildConfig::resolve(Some(config_path.as_path()), dir.path()).unwrap();
        build_once(&config.to_options()).unwrap();

        let written = fs::read_to_string(dir.path().join("recipe.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["name"], "Recipe");
        assert_eq!(value["repository"]["keyword-declaration"]["name"], "storage.type.recipe");
        assert_eq!(value["repository"]["type"]["name"], "entity.name.type.recipe");
    }
}
