//! errcat: error-code catalog checker.
#![forbid(unsafe_code)]

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use errcat_common::{ErrcatError, LogConfig, init_logging};
use std::process::ExitCode;

/// Exit status for failures of errcat itself (bad config, unreadable catalog).
const EXIT_TOOL_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut log_config = LogConfig::from_env("error").with_stderr();
    if let Some(level) = verbosity_level(cli.verbose) {
        log_config = log_config.with_level(level);
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.into());
    }
    if let Some(file) = &cli.log_file {
        log_config = log_config.with_file(file);
    }
    let _logging_guards = match init_logging(&log_config) {
        Ok(guards) => guards,
        Err(err) => {
            report_error(&anyhow::Error::new(err));
            return ExitCode::from(EXIT_TOOL_ERROR);
        }
    };

    match commands::run(cli.command) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            report_error(&err);
            ExitCode::from(EXIT_TOOL_ERROR)
        }
    }
}

fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Prints `error[ERRCAT-Exxx]: message` plus remediation for catalogued
/// failures, or a plain `error:` line otherwise.
fn report_error(err: &anyhow::Error) {
    tracing::error!(error = %format!("{err:#}"), "errcat failed");

    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ErrcatError>())
        .map(ErrcatError::code);

    match code {
        Some(code) => {
            let label = format!("error[{}]", code.code_string());
            eprintln!("{}: {err:#}", label.red().bold());
            let remediation = code.remediation();
            if !remediation.is_empty() {
                eprintln!();
                for (idx, step) in remediation.iter().enumerate() {
                    eprintln!("  {}. {step}", idx + 1);
                }
            }
            eprintln!(
                "\n{}",
                format!("Run `errcat explain {}` for details.", code.code_string()).dimmed()
            );
        }
        None => eprintln!("{}: {err:#}", "error".red().bold()),
    }
}
