//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → diff → baseline → report pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use api_baseline::cli::{run_baseline, run_diff, SnapshotPaths};
use api_baseline::config::AppConfig;
use api_baseline::pipeline::{
    compute_baseline, exit_codes, load_snapshot_with_context, output_report, write_output,
    Comparison, OutputTarget, PipelineError,
};
use api_baseline::reports::{create_reporter, ReportConfig, ReportFormat};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn quiet(mut config: AppConfig) -> AppConfig {
    config.behavior.quiet = true;
    config
}

fn json_config(output: &Path, fail_on_mismatch: bool) -> AppConfig {
    quiet(
        AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(output.to_path_buf()))
            .fail_on_mismatch(fail_on_mismatch)
            .build(),
    )
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("report should exist");
    serde_json::from_str(&content).expect("report should be valid JSON")
}

// ============================================================================
// Load Stage
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_fixture() {
        let snapshot =
            load_snapshot_with_context(&fixture_path("api-1.0.0.json"), true).expect("load");
        assert_eq!(snapshot.identity, "com.example.api");
        assert_eq!(snapshot.units.len(), 3);
        assert_eq!(snapshot.types.len(), 4);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = load_snapshot_with_context(Path::new("/nonexistent/api.json"), true)
            .expect_err("missing file");
        let message = format!("{err:#}");
        assert!(message.contains("/nonexistent/api.json"), "{message}");
        assert!(err.downcast_ref::<PipelineError>().is_some());
    }

    #[test]
    fn load_invalid_json() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, r#"{"identity": "x", "units": [{"name": "p"}, {"name": "p"}]}"#)
            .expect("write");

        let err = load_snapshot_with_context(&path, true).expect_err("duplicate unit");
        assert!(format!("{err:#}").contains("broken.json"));
    }
}

// ============================================================================
// Diff and Baseline Stages
// ============================================================================

mod stages {
    use super::*;

    fn comparison(newer: &str, older: Option<&str>) -> Comparison {
        let config = AppConfig::default();
        let newer = load_snapshot_with_context(&fixture_path(newer), true).expect("newer");
        let older = older
            .map(|name| load_snapshot_with_context(&fixture_path(name), true).expect("older"));
        Comparison::new(newer, older, &config.policy)
    }

    #[test]
    fn comparison_exposes_metadata() {
        let comparison = comparison("api-2.0.0.json", Some("api-1.0.0.json"));
        assert_eq!(comparison.newer().identity, "com.example.api");
        assert!(comparison.older().is_some());

        let older = comparison.older_metadata().expect("older metadata");
        assert_eq!(older.unit("r").expect("unit r").version.qualifier(), Some("rc1"));
        assert_eq!(comparison.newer_metadata().units.len(), 3);
    }

    #[test]
    fn first_release_diff_is_one_sided() {
        let comparison = comparison("fresh-0.0.0.json", None);
        let diff = comparison.diff().expect("diff");
        assert!(diff.is_one_sided());
        assert!(comparison.older_metadata().is_none());
    }

    #[test]
    fn empty_unit_instruction_fails_baseline() {
        let comparison = comparison("api-2.0.0.json", Some("api-1.0.0.json"));
        let diff = comparison.diff().expect("diff");
        let config = quiet(AppConfig::builder().unit("!").build());

        let err = compute_baseline(&config, &comparison, &diff).expect_err("empty instruction");
        assert!(format!("{err:#}").contains("Invalid baseline configuration"));
    }

    #[test]
    fn summary_report_names_mismatch() {
        let comparison = comparison("api-1.1.0-underdeclared.json", Some("api-1.0.0.json"));
        let diff = comparison.diff().expect("diff");
        let config = quiet(AppConfig::default());
        let result = compute_baseline(&config, &comparison, &diff).expect("baseline");

        let report = create_reporter(ReportFormat::Summary)
            .generate_baseline_report(&result, &ReportConfig::default())
            .expect("report");
        assert!(report.contains("Version mismatch"), "{report}");
        assert!(report.contains("com.example.api"), "{report}");
    }

    #[test]
    fn output_report_writes_file() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let output = tmp.path().join("report.json");
        let config = json_config(&output, false);

        let comparison = comparison("api-2.0.0.json", Some("api-1.0.0.json"));
        let diff = comparison.diff().expect("diff");
        let result = compute_baseline(&config, &comparison, &diff).expect("baseline");
        output_report(
            &config,
            &result,
            &fixture_path("api-2.0.0.json"),
            Some(&fixture_path("api-1.0.0.json")),
        )
        .expect("output");

        let report = read_json(&output);
        assert_eq!(report["result"]["suggested_version"], "2.0.0");
        assert_eq!(report["result"]["units"].as_array().map(Vec::len), Some(3));
        assert!(report["metadata"]["older"]
            .as_str()
            .is_some_and(|path| path.ends_with("api-1.0.0.json")));
    }
}

// ============================================================================
// CLI Handlers
// ============================================================================

mod cli {
    use super::*;

    #[test]
    fn baseline_consistent_release_succeeds() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let output = tmp.path().join("report.json");
        let paths = SnapshotPaths {
            newer: fixture_path("api-2.0.0.json"),
            older: Some(fixture_path("api-1.0.0.json")),
        };

        let code = run_baseline(json_config(&output, true), paths).expect("run");
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(read_json(&output)["result"]["mismatch"], false);
    }

    #[test]
    fn baseline_mismatch_exit_code() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let output = tmp.path().join("report.json");
        let paths = SnapshotPaths {
            newer: fixture_path("api-1.1.0-underdeclared.json"),
            older: Some(fixture_path("api-1.0.0.json")),
        };

        let code = run_baseline(json_config(&output, true), paths.clone()).expect("run");
        assert_eq!(code, exit_codes::MISMATCH);

        // Mismatches are reported but only fail the run when asked to
        let code = run_baseline(json_config(&output, false), paths).expect("run");
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(read_json(&output)["result"]["mismatch"], true);
    }

    #[test]
    fn baseline_missing_older_fails() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let paths = SnapshotPaths {
            newer: fixture_path("api-2.0.0.json"),
            older: Some(fixture_path("does-not-exist.json")),
        };
        let result = run_baseline(json_config(&tmp.path().join("r.json"), true), paths);
        assert!(result.is_err());
    }

    #[test]
    fn diff_summary_lists_changes() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let output = tmp.path().join("diff.txt");
        let config = quiet(
            AppConfig::builder()
                .output_format(ReportFormat::Summary)
                .output_file(Some(output.clone()))
                .build(),
        );

        let code = run_diff(
            config,
            &fixture_path("api-2.0.0.json"),
            &fixture_path("api-1.0.0.json"),
        )
        .expect("run");
        assert_eq!(code, exit_codes::SUCCESS);

        let report = std::fs::read_to_string(output).expect("report");
        assert!(report.contains("n()"), "{report}");
        assert!(report.contains("q.I"), "{report}");
    }
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn write_output_to_file() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    let path = tmp.path().join("out.txt");
    write_output("content", &OutputTarget::File(path.clone()), true).expect("write");
    assert_eq!(std::fs::read_to_string(path).expect("read"), "content");
}
