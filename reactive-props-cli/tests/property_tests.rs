//! Property-based tests for reactive-props-cli.
//!
//! Properties tested:
//! - File discovery finds exactly the files with the model extension
//! - Filter patterns select exactly the matching relative paths
//! - CLI arguments override configuration values, unset ones do not
//! - Dry runs never touch the file system
//! - Unchanged content is never rewritten

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use reactive_props_cli::{
    config::{CliArgs, Config, ConfigManager, OutputFormat},
    scanner::ModelScanner,
    writer::{FileWriter, WriteResult},
};

// =============================================================================
// Generators for property tests
// =============================================================================

/// Generate a file name (without extension).
fn arb_filename() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

fn arb_extension() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["json", "cs", "txt", "model"])
}

/// Files as (subdirectory, name, extension), unique by path.
fn arb_tree() -> impl Strategy<Value = Vec<(Option<&'static str>, String, &'static str)>> {
    prop::collection::vec(
        (
            prop::option::of(prop::sample::select(vec!["vm", "models"])),
            arb_filename(),
            arb_extension(),
        ),
        1..12,
    )
    .prop_map(|files| {
        let mut seen = BTreeSet::new();
        files
            .into_iter()
            .filter(|(dir, name, ext)| seen.insert(relative(*dir, name, ext)))
            .collect()
    })
}

fn relative(dir: Option<&str>, name: &str, ext: &str) -> String {
    match dir {
        Some(dir) => format!("{dir}/{name}.{ext}"),
        None => format!("{name}.{ext}"),
    }
}

fn create_tree(files: &[(Option<&'static str>, String, &'static str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (sub, name, ext) in files {
        let path = dir.path().join(relative(*sub, name, ext));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }
    dir
}

fn scanned(scanner: &ModelScanner) -> BTreeSet<String> {
    scanner
        .scan_allow_empty()
        .unwrap()
        .into_iter()
        .map(|f| f.relative_path.to_string_lossy().replace('\\', "/"))
        .collect()
}

// =============================================================================
// Scanner
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_discovery_is_complete(files in arb_tree()) {
        let dir = create_tree(&files);

        let expected: BTreeSet<String> = files
            .iter()
            .filter(|(_, _, ext)| *ext == "json")
            .map(|(sub, name, ext)| relative(*sub, name, ext))
            .collect();

        prop_assert_eq!(scanned(&ModelScanner::new(dir.path())), expected);
    }

    #[test]
    fn prop_filter_selects_matching_paths(files in arb_tree()) {
        let dir = create_tree(&files);
        let scanner = ModelScanner::new(dir.path()).with_filter("vm/*").unwrap();

        let expected: BTreeSet<String> = files
            .iter()
            .filter(|(sub, _, ext)| *sub == Some("vm") && *ext == "json")
            .map(|(sub, name, ext)| relative(*sub, name, ext))
            .collect();

        prop_assert_eq!(scanned(&scanner), expected);
    }
}

// =============================================================================
// Configuration
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_cli_overrides_config(
        input in prop::option::of(arb_filename()),
        output in prop::option::of(arb_filename()),
        filter in prop::option::of("[a-z]{1,5}/\\*\\.json"),
        json in prop::option::of(any::<bool>()),
    ) {
        let base = Config::default();
        let format = json.map(|json| if json { OutputFormat::Json } else { OutputFormat::Human });
        let args = CliArgs {
            input: input.clone().map(PathBuf::from),
            output: output.clone().map(PathBuf::from),
            filter: filter.clone(),
            format,
        };

        let merged = ConfigManager::merge_cli_args(base.clone(), &args);

        prop_assert!(merged.validate().is_ok());
        prop_assert_eq!(&merged.input.dir, &input.map(PathBuf::from).unwrap_or(base.input.dir));
        prop_assert_eq!(&merged.output.dir, &output.map(PathBuf::from).unwrap_or(base.output.dir));
        prop_assert_eq!(&merged.input.filter, &filter.or(base.input.filter));
        prop_assert_eq!(merged.diagnostics.format, format.unwrap_or(base.diagnostics.format));
        prop_assert_eq!(&merged.render, &base.render);
    }
}

// =============================================================================
// Writer
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_dry_run_is_safe(name in arb_filename(), content in ".{0,200}") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join(format!("{name}.g.cs"));

        let result = FileWriter::new(true).write(&path, &content).unwrap();

        prop_assert!(!result.was_written());
        prop_assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn prop_unchanged_content_is_not_rewritten(name in arb_filename(), content in ".{0,200}") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(format!("{name}.g.cs"));
        let writer = FileWriter::new(false);

        prop_assert!(writer.write(&path, &content).unwrap().was_written());
        let again = writer.write(&path, &content).unwrap();

        let unchanged = matches!(again, WriteResult::Unchanged { .. });
        prop_assert!(unchanged);
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
