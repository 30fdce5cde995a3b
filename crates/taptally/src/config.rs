//! Configuration for the taptally command line
//!
//! This module provides the command line definition, including input
//! selection, report format, parser limits and logging options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use taptally_tap::ParseOptions;

/// Summarise Test Anything Protocol output
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "taptally")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// TAP file to read
    ///
    /// Reads standard input when omitted.
    #[arg(env = "TAPTALLY_INPUT")]
    pub input: Option<PathBuf>,

    /// Format of the report written to stderr
    #[arg(short, long, value_enum, default_value_t, env = "TAPTALLY_FORMAT")]
    pub format: ReportFormat,

    /// Do not echo the consumed TAP lines to stdout
    #[arg(long, default_value = "false")]
    pub no_echo: bool,

    /// Line buffer size in bytes; longer lines mark the output as broken
    #[arg(long, env = "TAPTALLY_MAX_LINE")]
    pub max_line_length: Option<usize>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the echoed TAP.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Report formats
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human readable summary
    #[default]
    Text,
    /// A single JSON object with the summary and verdict
    Json,
}

impl Config {
    /// Parser limits derived from the command line
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::default();
        match self.max_line_length {
            Some(length) => options.with_max_line_length(length),
            None => options,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist or is a directory
    /// - The line length limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if input.is_dir() {
                return Err(ConfigError::InputIsDirectory(input.clone()));
            }
        }

        if self.max_line_length == Some(0) {
            return Err(ConfigError::InvalidLineLength);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is a directory
    #[error("Input path is a directory: {0}")]
    InputIsDirectory(PathBuf),

    /// Line length limit of zero
    #[error("Line length limit must be at least 1 byte")]
    InvalidLineLength,
}
