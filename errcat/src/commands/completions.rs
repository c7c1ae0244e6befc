//! `errcat completions <shell>`.

use super::Outcome;
use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

pub fn run(shell: Shell) -> Result<Outcome> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "errcat", &mut std::io::stdout());
    Ok(Outcome::Success)
}
