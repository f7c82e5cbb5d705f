//! Logging setup for the CLI
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Logging configuration derived from verbosity flags and environment
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Include file and line numbers
    pub source_location: bool,
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self {
                level: "warn".to_string(),
                source_location: false,
            },
            1 => Self {
                level: "info".to_string(),
                source_location: false,
            },
            2 => Self {
                level: "debug".to_string(),
                source_location: true,
            },
            _ => Self {
                level: "trace".to_string(),
                source_location: true,
            },
        }
    }

    /// Apply environment overrides; `EVENTDOC_LOG` then `RUST_LOG` win
    /// over the verbosity flags
    pub fn merge_with_env(&mut self) {
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.level = level;
        }

        if let Ok(level) = std::env::var("EVENTDOC_LOG") {
            self.level = level;
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("invalid log filter '{}': {e}", config.level)))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::other(format!("failed to initialize logging: {e}")))?;

    Ok(())
}
