//! Eventdoc CLI - lifecycle event documentation generator
//!
//! Entry point for the `eventdoc` binary: decodes a lifecycle YAML
//! document, resolves its shared types, and checks, renders, or publishes
//! the resulting documentation.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use std::process;

use colored::control;

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use logging::LoggingConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(cli).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let use_color = cli.use_color();

    tracing::info!(command = ?cli.command, "executing command");

    match cli.command {
        Commands::Check(args) => handlers::handle_check(args, use_color),
        Commands::Render(args) => {
            // Render needs no credentials; the config stays optional
            let config = Config::load_with_file(cli.config.as_deref()).unwrap_or_default();
            handlers::handle_render(args, &config)
        }
        Commands::Publish(args) => {
            let config = Config::load_with_file(cli.config.as_deref())?;
            handlers::handle_publish(args, &config, use_color).await
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
