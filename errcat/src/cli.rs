//! Command-line definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use errcat_common::config::ConfigOverrides;
use errcat_common::ranges::{CodeRange, parse_named_range};
use errcat_common::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "errcat",
    version,
    about = "Error-code catalog checker",
    long_about = "Checks an error-code catalog for range membership, globally unique codes \
                  and an up-to-date 'Next error code' marker."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Also write JSON logs to this file
    #[arg(long, global = true, env = "ERRCAT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every registry check against the catalog
    Check {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print every descriptor with its path and code
    List {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the marker line for the next free code
    NextCode {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print only the number
        #[arg(long)]
        bare: bool,
    },

    /// Show the resolved configuration and where each value came from
    Config {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print JSON schemas for machine-readable output
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaKind::Report)]
        kind: SchemaKind,

        /// Write every schema into this directory instead of printing one
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Explain one of errcat's own error codes (e.g. ERRCAT-E102)
    Explain {
        /// Error code; omit to list all
        code: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the catalog, marker and ranges come from.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Configuration file (default: nearest errcat.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file (.json or .toml)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Marker artifact; .toml files are read as versioned metadata
    #[arg(long)]
    pub marker: Option<PathBuf>,

    /// Category whose range seeds the next-code floor
    #[arg(long = "marker-category")]
    pub marker_category: Option<String>,

    /// Explicit next-code floor
    #[arg(long, allow_negative_numbers = true)]
    pub floor: Option<i64>,

    /// Category range as NAME=MIN:MAX (repeatable)
    #[arg(long = "range", value_name = "NAME=MIN:MAX", value_parser = parse_named_range)]
    pub ranges: Vec<(String, CodeRange)>,
}

impl CatalogArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            catalog: self.catalog.clone(),
            marker: self.marker.clone(),
            marker_category: self.marker_category.clone(),
            floor: self.floor,
            ranges: self.ranges.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// `check --format json`
    Report,
    /// `list --format json`
    Rows,
    /// errcat's own error codes
    ErrorCodes,
}
