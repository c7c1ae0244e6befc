//! `ERRCAT_*` environment variables.
//!
//! [`EnvParser`] reads one variable per call and records bad values instead of
//! failing on the first one, so a run reports every broken variable together.
//! Set-but-empty variables count as explicitly unset.

use super::source::Sourced;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const PREFIX: &str = "ERRCAT_";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{var}={value:?} is not {expected}")]
    InvalidValue {
        var: String,
        expected: &'static str,
        value: String,
    },

    #[error("{var}={value:?} is not a log level (one of {})", LOG_LEVELS.join(", "))]
    InvalidLogLevel { var: String, value: String },
}

#[derive(Debug, Default)]
pub struct EnvParser {
    errors: Vec<EnvError>,
}

impl EnvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// `FLOOR` -> `ERRCAT_FLOOR`.
    pub fn var_name(&self, name: &str) -> String {
        format!("{PREFIX}{name}")
    }

    /// The trimmed value, `Some("")` for empty, `None` for unset.
    fn lookup(&self, name: &str) -> (String, Option<String>) {
        let var = self.var_name(name);
        let value = env::var(&var).ok().map(|value| value.trim().to_string());
        (var, value)
    }

    pub fn get_optional_string(&mut self, name: &str) -> Sourced<Option<String>> {
        match self.lookup(name) {
            (var, Some(value)) if value.is_empty() => Sourced::from_env(None, var),
            (var, Some(value)) => Sourced::from_env(Some(value), var),
            (_, None) => Sourced::default_value(None),
        }
    }

    pub fn get_optional_i64(&mut self, name: &str) -> Sourced<Option<i64>> {
        match self.lookup(name) {
            (var, Some(value)) if value.is_empty() => Sourced::from_env(None, var),
            (var, Some(value)) => match value.parse::<i64>() {
                Ok(parsed) => Sourced::from_env(Some(parsed), var),
                Err(_) => {
                    self.errors.push(EnvError::InvalidValue {
                        var,
                        expected: "an integer",
                        value,
                    });
                    Sourced::default_value(None)
                }
            },
            (_, None) => Sourced::default_value(None),
        }
    }

    /// A path, with a leading `~/` expanded.
    pub fn get_optional_path(&mut self, name: &str) -> Sourced<Option<PathBuf>> {
        self.get_optional_string(name)
            .map(|value| value.map(|value| expand_home(&value)))
    }

    /// A bare tracing level. Invalid values are recorded and replaced by
    /// `default`.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> Sourced<String> {
        match self.lookup(name) {
            (var, Some(value)) => {
                let lower = value.to_ascii_lowercase();
                if LOG_LEVELS.contains(&lower.as_str()) {
                    Sourced::from_env(lower, var)
                } else {
                    self.errors.push(EnvError::InvalidLogLevel { var, value });
                    Sourced::default_value(default.to_string())
                }
            }
            (_, None) => Sourced::default_value(default.to_string()),
        }
    }
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(value: &str) -> PathBuf {
    match (value.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}
