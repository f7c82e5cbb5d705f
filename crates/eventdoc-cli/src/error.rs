//! Error types and handling for the CLI
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::io;
use std::path::PathBuf;

use eventdoc_confluence::PublishError;
use eventdoc_schema::parser::DecodeError;
use eventdoc_schema::SchemaError;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The lifecycle file does not exist
    #[error("can't open lifecycle YAML file '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// The lifecycle document failed to decode
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// Registration or resolution failed
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Rendering or a Confluence call failed
    #[error("{0}")]
    Publish(#[from] PublishError),

    /// One or more pages failed while publishing
    #[error("the following errors occur when creating documentation pages: {0}")]
    Pages(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Exit code reported to the shell
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::FileNotFound { .. } => 2,
            Self::Decode(_) => 3,
            Self::Schema(_) => 4,
            Self::Publish(_) => 5,
            Self::Pages(_) => 6,
            Self::Config(_) => 7,
            Self::InvalidArgs(_) => 8,
            Self::Json(_) => 9,
            Self::Yaml(_) => 10,
            Self::Other { .. } => 99,
        }
    }

    /// Whether the error message should point at `--help`
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
