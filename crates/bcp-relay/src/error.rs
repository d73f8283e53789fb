//! Error types for the bulk copy library.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration problems (bad file content, no tables, ...).
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for I/O problems (missing files, unreadable input).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for bulk copy runs.
#[derive(Error, Debug)]
pub enum BulkCopyError {
    /// Configuration error (missing key, invalid value, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The config file passed on the command line does not exist.
    #[error("Unknown file: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Neither the config file nor the command line named any table.
    #[error(
        "No config found for tables. Please specify tables in config file or using --tables CLI option"
    )]
    NoTables,

    /// INI syntax error in the config file
    #[error("Config file syntax error: {0}")]
    Ini(#[from] ini::ParseError),

    /// Interactive prompt failed (terminal error, unreadable input)
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Operator input reached end of file before an answer was read.
    #[error("Input closed")]
    InputClosed,

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BulkCopyError {
    /// Create a Config error for a key missing from a config section.
    pub fn missing_key(section: &str, key: &str) -> Self {
        BulkCopyError::Config(format!("missing key '{}' in section [{}]", key, section))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BulkCopyError::ConfigNotFound(_) | BulkCopyError::Io(_) => EXIT_IO_ERROR,
            BulkCopyError::Config(_)
            | BulkCopyError::NoTables
            | BulkCopyError::Ini(_)
            | BulkCopyError::Prompt(_)
            | BulkCopyError::InputClosed
            | BulkCopyError::Json(_) => EXIT_CONFIG_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for bulk copy operations.
pub type Result<T> = std::result::Result<T, BulkCopyError>;
