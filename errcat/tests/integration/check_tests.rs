use serde_json::Value;

use crate::common::fixtures::TestProject;
use crate::common::{assert_contains, assert_exit_code, init_test_logging};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_check_passes_on_consistent_catalog() {
    init_test_logging();
    crate::test_log!("TEST START: test_check_passes_on_consistent_catalog");

    let project = TestProject::new();
    let output = project.run(&["check"]);

    assert_exit_code(&output, 0);
    let out = stdout(&output);
    assert_contains(&out, "PASS code-range: 2 code(s) inside their category ranges");
    assert_contains(&out, "PASS unique-codes: 2 distinct code(s), no duplicates");
    assert_contains(&out, "PASS next-code-marker: marker 1003 is highest code 1002 + 1");
    assert_contains(&out, "3 of 3 checks passed (2 descriptors, next code 1003)");

    crate::test_log!("TEST PASS: test_check_passes_on_consistent_catalog");
}

#[test]
fn test_check_reports_duplicates_with_exit_one() {
    init_test_logging();
    crate::test_log!("TEST START: test_check_reports_duplicates_with_exit_one");

    let project = TestProject::with_catalog(
        r#"{"compiler": {"errA": {"code": 1001}, "errB": {"code": 1001}}}"#,
        "Next error code: 1002\n",
    );
    let output = project.run(&["check"]);

    assert_exit_code(&output, 1);
    let out = stdout(&output);
    assert_contains(&out, "FAIL unique-codes");
    assert_contains(&out, "    - compiler.errB: code 1001 is already used by compiler.errA");
    assert_contains(&out, "PASS code-range");
    assert_contains(&out, "PASS next-code-marker");

    crate::test_log!("TEST PASS: test_check_reports_duplicates_with_exit_one");
}

#[test]
fn test_check_json_report() {
    init_test_logging();
    crate::test_log!("TEST START: test_check_json_report");

    let project = TestProject::with_catalog(
        r#"{"compiler": {"errA": {"code": 1001}, "errB": {"code": 1002}, "errC": {"code": 2000}}}"#,
        "Next error code: 1003\n",
    );
    let output = project.run(&["check", "--format", "json"]);

    assert_exit_code(&output, 1);
    let report: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    assert_eq!(report["descriptors"], 3);
    assert_eq!(report["max_code"], 2000);
    assert_eq!(report["expected_marker"], 2001);
    assert_eq!(report["checks"][0]["kind"], "code-range");
    assert_eq!(report["checks"][0]["pass"], false);
    assert_eq!(report["checks"][1]["pass"], true);
    assert_eq!(report["checks"][2]["violations"][0]["detail"]["kind"], "drift");

    crate::test_log!("TEST PASS: test_check_json_report");
}

#[test]
fn test_check_missing_marker_fails_only_marker_check() {
    init_test_logging();

    let project = TestProject::new();
    std::fs::write(&project.marker, "# Errors\n\nNo marker here.\n").expect("rewrite marker");
    let output = project.run(&["check"]);

    assert_exit_code(&output, 1);
    let out = stdout(&output);
    assert_contains(&out, "FAIL next-code-marker: expected 'Next error code: 1003'");
    assert_contains(&out, "2 of 3 checks passed");
}

#[test]
fn test_cli_range_override_applies() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["check", "--range", "compiler=1002:1999"]);

    assert_exit_code(&output, 1);
    assert_contains(
        &stdout(&output),
        "compiler.unexpectedToken: code 1001 is outside the 'compiler' range [1002, 1999]",
    );
}

#[test]
fn test_missing_catalog_is_a_tool_error() {
    init_test_logging();
    crate::test_log!("TEST START: test_missing_catalog_is_a_tool_error");

    let project = TestProject::new();
    std::fs::remove_file(&project.catalog).expect("remove catalog");
    let output = project.run(&["check"]);

    assert_exit_code(&output, 2);
    let err = stderr(&output);
    assert_contains(&err, "error[ERRCAT-E100]");
    assert_contains(&err, "Run `errcat explain ERRCAT-E100` for details.");
    assert!(output.stdout.is_empty());

    crate::test_log!("TEST PASS: test_missing_catalog_is_a_tool_error");
}

#[test]
fn test_malformed_catalog_is_a_tool_error() {
    init_test_logging();

    let project = TestProject::with_catalog("{ not json", "Next error code: 1001\n");
    let output = project.run(&["check"]);

    assert_exit_code(&output, 2);
    assert_contains(&stderr(&output), "error[ERRCAT-E102]");
}

#[test]
fn test_overlapping_cli_ranges_are_rejected() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["check", "--range", "runtime=1500:2999"]);

    assert_exit_code(&output, 2);
    let err = stderr(&output);
    assert_contains(&err, "error[ERRCAT-E004]");
    assert_contains(&err, "overlaps");
}

#[test]
fn test_catalog_text_serves_as_marker_without_config_marker() {
    init_test_logging();

    let project = TestProject::new();
    std::fs::write(
        &project.config,
        "[catalog]\npath = \"errors.toml\"\n\n[ranges]\ncompiler = { min = 1001, max = 1999 }\n",
    )
    .expect("rewrite config");
    std::fs::write(
        project.dir.path().join("errors.toml"),
        "# Next error code: 1002\n\n[compiler.unexpectedToken]\ncode = 1001\nmessage = \"Unexpected token\"\n",
    )
    .expect("write TOML catalog");

    let output = project.run(&["check"]);

    assert_exit_code(&output, 0);
    assert_contains(&stdout(&output), "3 of 3 checks passed (1 descriptors, next code 1002)");
}
