//! Subcommand implementations.

pub mod check;
pub mod completions;
pub mod config;
pub mod explain;
pub mod helpers;
pub mod list;
pub mod next_code;
pub mod schema;

use crate::cli::Commands;
use anyhow::Result;
use std::process::ExitCode;

/// What a command wants the process to exit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one registry check failed.
    ChecksFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::ChecksFailed => ExitCode::from(1),
        }
    }
}

pub fn run(command: Commands) -> Result<Outcome> {
    match command {
        Commands::Check { catalog, format } => check::run(&catalog, format),
        Commands::List { catalog, format } => list::run(&catalog, format),
        Commands::NextCode { catalog, bare } => next_code::run(&catalog, bare),
        Commands::Config { catalog, format } => config::run(&catalog, format),
        Commands::Schema { kind, output_dir } => schema::run(kind, output_dir.as_deref()),
        Commands::Explain { code, format } => explain::run(code.as_deref(), format),
        Commands::Completions { shell } => completions::run(shell),
    }
}
