//! End-to-end baselining scenarios.
//!
//! Each test loads real snapshot fixtures, builds the policy-decorated trees,
//! diffs them and checks the versions suggested for the component and its
//! exported units.

use api_baseline::baseline::BaselineResult;
use api_baseline::config::AppConfig;
use api_baseline::pipeline::{compute_baseline, Comparison};
use api_baseline::{Delta, Snapshot, Version};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> Snapshot {
    Snapshot::load(&Path::new(FIXTURES_DIR).join(name)).expect("fixture should load")
}

fn v(s: &str) -> Version {
    s.parse().expect("valid version")
}

fn quiet_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.behavior.quiet = true;
    config
}

/// Run the diff and baseline stages over two snapshots and hand the result to
/// `check`.
fn baseline_with<T>(
    config: &AppConfig,
    newer: Snapshot,
    older: Option<Snapshot>,
    check: impl FnOnce(&BaselineResult<'_>) -> T,
) -> T {
    let comparison = Comparison::new(newer, older, &config.policy);
    let diff = comparison.diff().expect("diff should succeed");
    let result = compute_baseline(config, &comparison, &diff).expect("baseline should succeed");
    check(&result)
}

fn baseline<T>(
    newer: &str,
    older: Option<&str>,
    check: impl FnOnce(&BaselineResult<'_>) -> T,
) -> T {
    baseline_with(&quiet_config(), fixture(newer), older.map(fixture), check)
}

// ============================================================================
// Unit Scenarios
// ============================================================================

mod units {
    use super::*;

    #[test]
    fn added_method_is_minor() {
        baseline("api-2.0.0.json", Some("api-1.0.0.json"), |result| {
            let unit = result.unit("p").expect("unit p");
            assert_eq!(unit.delta, Delta::Minor);
            assert_eq!(unit.suggested_version, Some(v("1.1.0")));
            assert!(!unit.mismatch);
            assert!(
                unit.reason.iter().any(|line| line.starts_with("+ method n()")),
                "{:?}",
                unit.reason
            );
        });
    }

    #[test]
    fn removed_interface_method_is_major() {
        baseline("api-2.0.0.json", Some("api-1.0.0.json"), |result| {
            let unit = result.unit("q").expect("unit q");
            assert_eq!(unit.delta, Delta::Major);
            assert_eq!(unit.suggested_version, Some(v("2.0.0")));
            assert!(!unit.mismatch);
            assert!(unit.providers.is_empty());
            assert_eq!(unit.suggested_if_providers, None);
        });
    }

    #[test]
    fn qualified_baseline_bumps_micro() {
        baseline("api-2.0.0.json", Some("api-1.0.0.json"), |result| {
            let unit = result.unit("r").expect("unit r");
            assert!(unit.delta <= Delta::Unchanged, "{}", unit.delta);
            assert_eq!(unit.suggested_version, Some(v("1.0.1")));
            assert!(!unit.mismatch);
            assert!(
                unit.warnings.iter().any(|w| w.contains("qualifier")),
                "{:?}",
                unit.warnings
            );
        });
    }

    #[test]
    fn underdeclared_units_mismatch() {
        baseline(
            "api-1.1.0-underdeclared.json",
            Some("api-1.0.0.json"),
            |result| {
                let p = result.unit("p").expect("unit p");
                assert!(p.mismatch);
                assert_eq!(p.newer_version, Some(v("1.0.0")));
                assert_eq!(p.suggested_version, Some(v("1.1.0")));

                let q = result.unit("q").expect("unit q");
                assert!(q.mismatch);
                assert_eq!(q.suggested_version, Some(v("2.0.0")));

                let r = result.unit("r").expect("unit r");
                assert!(!r.mismatch);

                let mismatched: Vec<_> = result
                    .units
                    .iter()
                    .filter(|unit| unit.mismatch)
                    .map(|unit| unit.name.as_str())
                    .collect();
                assert_eq!(mismatched, vec!["p", "q"]);
            },
        );
    }

    #[test]
    fn provider_remediation_is_a_hint() {
        baseline(
            "listener-1.1.0.json",
            Some("listener-1.0.0.json"),
            |result| {
                let unit = result.unit("s").expect("unit s");
                assert_eq!(unit.delta, Delta::Major);
                assert_eq!(unit.suggested_version, Some(v("2.0.0")));
                assert!(unit.mismatch);
                assert_eq!(unit.suggested_if_providers, Some(v("1.1.0")));
                assert_eq!(unit.providers, vec!["Listener"]);
            },
        );
    }

    #[test]
    fn provider_directive_makes_additions_minor() {
        let mark = |mut snapshot: Snapshot| {
            snapshot.units[0]
                .attributes
                .insert("provider-type".to_string(), "Listener".to_string());
            snapshot
        };
        let newer = mark(fixture("listener-1.1.0.json"));
        let older = mark(fixture("listener-1.0.0.json"));

        baseline_with(&quiet_config(), newer, Some(older), |result| {
            let unit = result.unit("s").expect("unit s");
            assert_eq!(unit.delta, Delta::Minor);
            assert_eq!(unit.suggested_version, Some(v("1.1.0")));
            assert!(!unit.mismatch);
            assert_eq!(unit.attributes["provider-type"], "Listener");
            assert!(!result.has_mismatch());
        });
    }
}

// ============================================================================
// Component Scenarios
// ============================================================================

mod component {
    use super::*;

    #[test]
    fn consistent_release() {
        baseline("api-2.0.0.json", Some("api-1.0.0.json"), |result| {
            assert_eq!(result.identity, "com.example.api");
            assert!(!result.first_release);
            assert_eq!(result.older_version, Some(v("1.0.0")));
            assert_eq!(result.suggested_version, v("2.0.0"));
            assert!(!result.mismatch);
            assert!(!result.has_mismatch());
            assert!(
                result.reason.iter().all(|line| line.starts_with("q: ")),
                "{:?}",
                result.reason
            );
            assert!(!result.reason.is_empty());
        });
    }

    #[test]
    fn underdeclared_component_mismatch() {
        baseline(
            "api-1.1.0-underdeclared.json",
            Some("api-1.0.0.json"),
            |result| {
                assert_eq!(result.newer_version, v("1.1.0"));
                assert_eq!(result.suggested_version, v("2.0.0"));
                assert!(result.mismatch);
                assert!(result.has_mismatch());
            },
        );
    }

    #[test]
    fn first_release_defaults_to_one() {
        baseline("fresh-0.0.0.json", None, |result| {
            assert!(result.first_release);
            assert_eq!(result.older_version, None);
            assert_eq!(result.suggested_version, Version::ONE);
            assert!(!result.has_mismatch());

            let unit = result.unit("f").expect("unit f");
            assert_eq!(unit.delta, Delta::Added);
            assert!(!unit.mismatch);
        });
    }

    #[test]
    fn identical_rebuild_is_consistent() {
        baseline("api-1.0.0.json", Some("api-1.0.0.json"), |result| {
            assert_eq!(result.delta, Delta::Unchanged);
            assert_eq!(result.suggested_version, v("1.0.0"));
            assert!(!result.has_mismatch());
            assert!(result.changed_units().next().is_none());
        });
    }

    #[test]
    fn identity_change_restarts_history() {
        let mut older = fixture("api-1.0.0.json");
        older.identity = "com.example.legacy".to_string();

        baseline_with(&quiet_config(), fixture("api-2.0.0.json"), Some(older), |result| {
            assert_eq!(result.older_identity.as_deref(), Some("com.example.legacy"));
            assert_eq!(result.suggested_version, v("2.0.0"));
            assert!(!result.mismatch);
            assert!(result.warnings.iter().any(|w| w.contains("Identity changed")));
        });
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod configured {
    use super::*;

    #[test]
    fn unit_selection_skips_negated_units() {
        let config = {
            let mut config = AppConfig::builder().unit("!q").unit("*").build();
            config.behavior.quiet = true;
            config
        };
        baseline_with(
            &config,
            fixture("api-1.1.0-underdeclared.json"),
            Some(fixture("api-1.0.0.json")),
            |result| {
                let names: Vec<_> = result.units.iter().map(|unit| unit.name.as_str()).collect();
                assert_eq!(names, vec!["p", "r"]);
            },
        );
    }

    #[test]
    fn ignored_paths_do_not_count() {
        let config = {
            let mut config = AppConfig::builder().ignore("q.I#*").build();
            config.behavior.quiet = true;
            config
        };
        baseline_with(
            &config,
            fixture("api-1.1.0-underdeclared.json"),
            Some(fixture("api-1.0.0.json")),
            |result| {
                let q = result.unit("q").expect("unit q");
                assert!(q.delta < Delta::Minor, "{}", q.delta);
                assert!(!q.mismatch);

                // p still needs a minor bump, so the component stays at 1.1.0
                assert_eq!(result.suggested_version, v("1.1.0"));
                assert!(!result.mismatch);
                assert!(result.unit("p").expect("unit p").mismatch);
            },
        );
    }

    #[test]
    fn ignored_method_path_is_exact() {
        let config = {
            let mut config = AppConfig::builder().ignore("p.C#n()").build();
            config.behavior.quiet = true;
            config
        };
        baseline_with(
            &config,
            fixture("api-2.0.0.json"),
            Some(fixture("api-1.0.0.json")),
            |result| {
                let p = result.unit("p").expect("unit p");
                assert!(p.delta < Delta::Micro, "{}", p.delta);
                assert_eq!(p.suggested_version, Some(v("1.0.0")));
                assert!(!p.mismatch);
            },
        );
    }

    #[test]
    fn ignored_unit_is_not_baselined() {
        let config = {
            let mut config = AppConfig::builder().ignore("q").build();
            config.behavior.quiet = true;
            config
        };
        baseline_with(
            &config,
            fixture("api-1.1.0-underdeclared.json"),
            Some(fixture("api-1.0.0.json")),
            |result| {
                let q = result.unit("q").expect("unit q");
                assert_eq!(q.delta, Delta::Ignored);
                assert_eq!(q.suggested_version, Some(v("1.0.0")));
                assert!(q.reason.is_empty());
                assert!(!q.mismatch);
            },
        );
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let sequential = quiet_config();
        let parallel = {
            let mut config = AppConfig::builder().parallel_threshold(1).build();
            config.behavior.quiet = true;
            config
        };

        let summarize = |result: &BaselineResult<'_>| {
            result
                .units
                .iter()
                .map(|unit| (unit.name.clone(), unit.delta, unit.suggested_version.clone()))
                .collect::<Vec<_>>()
        };
        let a = baseline_with(
            &sequential,
            fixture("api-2.0.0.json"),
            Some(fixture("api-1.0.0.json")),
            summarize,
        );
        let b = baseline_with(
            &parallel,
            fixture("api-2.0.0.json"),
            Some(fixture("api-1.0.0.json")),
            summarize,
        );
        assert_eq!(a, b);
    }
}
