//! Config lookup-order and error-message tests.

use assert_fs::prelude::*;
use playdeck_core::{config, Config, ConfigError, Platform};
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// 1. Lookup order
// ---------------------------------------------------------------------------

#[test]
fn missing_files_yield_defaults() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let config = config::load_at(project.path(), Some(home.path())).expect("load");
    assert_eq!(config, Config::default());
}

#[test]
fn project_file_wins_over_user_file() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    project.child("playdeck.yaml").write_str("jobs: 3\n").expect("write");
    home.child(".playdeck/config.yaml")
        .write_str("jobs: 8\ncached: true\n")
        .expect("write");

    let config = config::load_at(project.path(), Some(home.path())).expect("load");
    assert_eq!(config.jobs, 3);
    assert!(!config.cached, "user file must not be merged into project file");
}

#[test]
fn user_file_used_when_project_has_none() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".playdeck/config.yaml")
        .write_str("cached: true\nbuild_dir: /var/tmp/playdeck\n")
        .expect("write");

    let config = config::load_at(project.path(), Some(home.path())).expect("load");
    assert!(config.cached);
    assert_eq!(config.build_dir_for(project.path()), PathBuf::from("/var/tmp/playdeck"));
}

#[test]
fn empty_file_yields_defaults() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project.child("playdeck.yaml").write_str("\n").expect("write");
    let config = config::load_at(project.path(), None).expect("load");
    assert_eq!(config, Config::default());
}

#[test]
fn custom_dependency_dirs_replace_defaults() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project
        .child("playdeck.yaml")
        .write_str("dependency_dirs: [Pods, Carthage, vendor]\n")
        .expect("write");
    project.child("playdeck.yaml").assert(predicate::path::is_file());

    let config = config::load_at(project.path(), None).expect("load");
    assert_eq!(config.dependency_dirs, vec!["Pods", "Carthage", "vendor"]);
}

// ---------------------------------------------------------------------------
// 2. Error messages
// ---------------------------------------------------------------------------

#[rstest]
#[case(": : corrupt : yaml : !!!\n  - broken: [unclosed")]
#[case("- this is a list, not a mapping\n")]
#[case("jobs: many\n")]
fn malformed_config_returns_parse_error_with_path(#[case] yaml: &str) {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project.child("playdeck.yaml").write_str(yaml).expect("write");

    let err = config::load_at(project.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("playdeck.yaml"), "must name the file, got: {err}");
}

// ---------------------------------------------------------------------------
// 3. Platform parsing used by config and CLI
// ---------------------------------------------------------------------------

#[rstest]
#[case("ios", Platform::Ios)]
#[case("IOS", Platform::Ios)]
#[case("macos", Platform::Macos)]
#[case("osx", Platform::Macos)]
#[case("tvos", Platform::Tvos)]
fn platform_from_str(#[case] raw: &str, #[case] expected: Platform) {
    assert_eq!(raw.parse::<Platform>().expect("parse"), expected);
}
