use serde_json::Value;
use tempfile::TempDir;

use crate::common::fixtures::TestProject;
use crate::common::{assert_contains, assert_exit_code, init_test_logging};

#[test]
fn test_config_json_reports_sources() {
    init_test_logging();
    crate::test_log!("TEST START: test_config_json_reports_sources");

    let project = TestProject::new();
    let output = project.run(&["config", "--format", "json", "--floor", "1500"]);

    assert_exit_code(&output, 0);
    let view: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(view["marker_category"]["value"], "compiler");
    assert_eq!(view["marker_category"]["source"]["kind"], "file");
    assert_eq!(view["floor"]["value"], 1500);
    assert_eq!(view["floor"]["source"]["kind"], "cli");
    assert_eq!(view["effective_floor"], 1500);
    assert_eq!(view["ranges"]["compiler"]["min"], 1001);

    crate::test_log!("TEST PASS: test_config_json_reports_sources");
}

#[test]
fn test_environment_overrides_file() {
    init_test_logging();

    let project = TestProject::new();
    let output = project
        .command()
        .env("ERRCAT_MARKER_FLOOR", "1100")
        .args(["next-code", "--bare"])
        .output()
        .expect("Failed to run errcat");

    assert_exit_code(&output, 0);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1101\n");
}

#[test]
fn test_invalid_environment_value_is_a_tool_error() {
    init_test_logging();

    let project = TestProject::new();
    let output = project
        .command()
        .env("ERRCAT_MARKER_FLOOR", "low")
        .arg("check")
        .output()
        .expect("Failed to run errcat");

    assert_exit_code(&output, 2);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "ERRCAT_MARKER_FLOOR");
}

#[test]
fn test_explicit_config_flag() {
    init_test_logging();

    let project = TestProject::new();
    let elsewhere = TempDir::new().expect("Failed to create temp dir");
    let config = project.config.display().to_string();
    let output = project
        .command()
        .current_dir(elsewhere.path())
        .args(["check", "--config", &config])
        .output()
        .expect("Failed to run errcat");

    assert_exit_code(&output, 0);
}

#[test]
fn test_missing_explicit_config_is_a_tool_error() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["check", "--config", "nope.toml"]);

    assert_exit_code(&output, 2);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "error[ERRCAT-E001]");
}

#[test]
fn test_no_catalog_configured() {
    init_test_logging();

    let project = TestProject::new();
    std::fs::write(&project.config, "[ranges]\ncompiler = { min = 1001, max = 1999 }\n")
        .expect("rewrite config");
    let output = project.run(&["check"]);

    assert_exit_code(&output, 2);
    assert_contains(&String::from_utf8_lossy(&output.stderr), "error[ERRCAT-E006]");
}

#[test]
fn test_catalog_flag_without_config_file() {
    init_test_logging();

    let project = TestProject::new();
    std::fs::remove_file(&project.config).expect("remove config");
    let output = project.run(&[
        "check",
        "--catalog",
        "errors.json",
        "--marker",
        "ERRORS.md",
        "--range",
        "compiler=1001:1999",
    ]);

    assert_exit_code(&output, 0);
}
