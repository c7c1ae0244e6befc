use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables that would leak the developer's setup into the binary under test.
const ISOLATED_VARS: &[&str] = &[
    "ERRCAT_CONFIG",
    "ERRCAT_CATALOG",
    "ERRCAT_MARKER",
    "ERRCAT_MARKER_CATEGORY",
    "ERRCAT_MARKER_FLOOR",
    "ERRCAT_LOG_LEVEL",
    "ERRCAT_LOG_FORMAT",
    "ERRCAT_LOG_FILE",
];

const CONSISTENT_CATALOG: &str = r#"{
  "compiler": {
    "unexpectedToken": { "code": 1001, "message": "Unexpected token '{0}'", "level": "error" },
    "attributes": {
      "duplicateAttribute": { "code": 1002, "message": "Duplicate attribute '{0}'", "level": "warning" }
    }
  }
}
"#;

/// A temp directory holding `errcat.toml`, `errors.json` and `ERRORS.md`.
pub struct TestProject {
    pub dir: TempDir,
    pub config: PathBuf,
    pub catalog: PathBuf,
    pub marker: PathBuf,
}

impl TestProject {
    /// A project whose checks all pass.
    pub fn new() -> Self {
        Self::with_catalog(CONSISTENT_CATALOG, "# Errors\n\nNext error code: 1003\n")
    }

    pub fn with_catalog(catalog: &str, marker: &str) -> Self {
        crate::test_log!("FIXTURE: Creating errcat project");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("errcat.toml");
        let catalog_path = dir.path().join("errors.json");
        let marker_path = dir.path().join("ERRORS.md");

        fs::write(
            &config,
            r#"[catalog]
path = "errors.json"

[marker]
path = "ERRORS.md"
category = "compiler"

[ranges]
compiler = { min = 1001, max = 1999 }
"#,
        )
        .expect("Failed to write errcat.toml");
        fs::write(&catalog_path, catalog).expect("Failed to write errors.json");
        fs::write(&marker_path, marker).expect("Failed to write ERRORS.md");

        Self {
            dir,
            config,
            catalog: catalog_path,
            marker: marker_path,
        }
    }

    /// `errcat` with the project as working directory and no inherited config.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_errcat"));
        cmd.current_dir(self.dir.path()).arg("--no-color");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        crate::test_log!("RUN: errcat {}", args.join(" "));
        self.command()
            .args(args)
            .output()
            .expect("Failed to run errcat")
    }
}
