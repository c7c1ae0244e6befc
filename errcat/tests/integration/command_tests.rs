use serde_json::Value;
use std::process::Command;

use crate::common::fixtures::TestProject;
use crate::common::{assert_contains, assert_exit_code, assert_path_exists, init_test_logging};

#[test]
fn test_errcat_help_includes_description() {
    init_test_logging();
    crate::test_log!("TEST START: test_errcat_help_includes_description");

    let output = Command::new(env!("CARGO_BIN_EXE_errcat"))
        .arg("--help")
        .output()
        .expect("Failed to run errcat --help");

    assert!(output.status.success(), "errcat --help failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "Checks an error-code catalog");
    assert_contains(&stdout, "next-code");

    crate::test_log!("TEST PASS: test_errcat_help_includes_description");
}

#[test]
fn test_next_code_prints_marker_line() {
    init_test_logging();

    let project = TestProject::new();

    let output = project.run(&["next-code"]);
    assert_exit_code(&output, 0);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Next error code: 1003\n");

    let output = project.run(&["next-code", "--bare"]);
    assert_exit_code(&output, 0);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1003\n");
}

#[test]
fn test_next_code_for_empty_category_is_range_min() {
    init_test_logging();

    let project = TestProject::with_catalog(r#"{"compiler": {}}"#, "");
    let output = project.run(&["next-code", "--bare"]);

    assert_exit_code(&output, 0);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1001\n");
}

#[test]
fn test_list_json_rows_in_traversal_order() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["list", "--format", "json"]);

    assert_exit_code(&output, 0);
    let rows: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(rows[0]["path"], "compiler.unexpectedToken");
    assert_eq!(rows[0]["code"], 1001);
    assert_eq!(rows[1]["path"], "compiler.attributes.duplicateAttribute");
    assert_eq!(rows[1]["category"], "compiler");
    assert_eq!(rows[1]["level"], "warning");
}

#[test]
fn test_list_text_table() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["list"]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("CODE"), "{stdout}");
    assert_contains(&stdout, "compiler.attributes.duplicateAttribute");
    assert_contains(&stdout, "Duplicate attribute '{0}'");
}

#[test]
fn test_explain_known_and_unknown_codes() {
    init_test_logging();

    let project = TestProject::new();

    let output = project.run(&["explain", "E102"]);
    assert_exit_code(&output, 0);
    assert_contains(&String::from_utf8_lossy(&output.stdout), "ERRCAT-E102");

    let output = project.run(&["explain", "ERRCAT-E999"]);
    assert_exit_code(&output, 2);
    assert_contains(
        &String::from_utf8_lossy(&output.stderr),
        "unknown error code 'ERRCAT-E999'",
    );
}

#[test]
fn test_explain_lists_every_category() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["explain"]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "Configuration (E001-E099)");
    assert_contains(&stdout, "Catalog (E100-E199)");
}

#[test]
fn test_schema_prints_report_schema() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["schema"]);

    assert_exit_code(&output, 0);
    let schema: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(schema["title"], "ValidationReport");
}

#[test]
fn test_schema_export_writes_files() {
    init_test_logging();

    let project = TestProject::new();
    let out_dir = project.dir.path().join("schemas");
    let output = project.run(&["schema", "--output-dir", "schemas"]);

    assert_exit_code(&output, 0);
    assert_path_exists(&out_dir.join("validation-report.schema.json"));
    assert_path_exists(&out_dir.join("catalog-rows.schema.json"));
    assert_path_exists(&out_dir.join("error-codes.json"));
}

#[test]
fn test_completions_generate_for_bash() {
    init_test_logging();

    let project = TestProject::new();
    let output = project.run(&["completions", "bash"]);

    assert_exit_code(&output, 0);
    assert_contains(&String::from_utf8_lossy(&output.stdout), "errcat");
}

#[test]
fn test_log_file_receives_json_lines() {
    init_test_logging();

    let project = TestProject::new();
    let log_path = project.dir.path().join("logs/errcat.log");
    let output = project.run(&["-v", "--log-file", "logs/errcat.log", "check"]);

    assert_exit_code(&output, 0);
    let contents = std::fs::read_to_string(&log_path).expect("log file written");
    let first = contents.lines().next().expect("at least one log line");
    let entry: Value = serde_json::from_str(first).expect("log line is JSON");
    assert!(entry.get("level").is_some(), "{first}");
}
