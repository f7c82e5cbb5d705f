//! Command-line argument parsing and definitions
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Eventdoc - lifecycle event documentation from a YAML definition
///
/// Decodes a lifecycle document, resolves its shared type references, and
/// renders annotated documentation pages for Confluence.
#[derive(Parser, Debug)]
#[command(
    name = "eventdoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "EVENTDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode and resolve a lifecycle document, reporting any errors
    Check(CheckArgs),

    /// Render the documentation page body to stdout or a file
    Render(RenderArgs),

    /// Render and publish the documentation to Confluence
    Publish(PublishArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the lifecycle YAML document
    #[arg(value_name = "LIFECYCLE_FILE")]
    pub lifecycle_file: PathBuf,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to the lifecycle YAML document
    #[arg(value_name = "LIFECYCLE_FILE")]
    pub lifecycle_file: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(long = "out", value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the publish command
#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Path to the lifecycle YAML document
    #[arg(value_name = "LIFECYCLE_FILE")]
    pub lifecycle_file: PathBuf,

    /// Prefix prepended to every Confluence page title
    #[arg(long = "title-prefix")]
    pub title_prefix: Option<String>,

    /// Where the published page links are reported
    #[arg(long = "output-format", value_enum, default_value = "cli")]
    pub output_format: OutputFormat,
}

/// Success report formats for the publish command
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per published page on stdout
    Cli,
    /// GitHub Actions output parameter: `links=<json array>`
    GithubAction,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity, zero under `--quiet`
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_command() {
        let cli = Cli::parse_from(["eventdoc", "-vv", "check", "lifecycle.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(
            cli.command,
            Commands::Check(ref args) if args.lifecycle_file.to_str() == Some("lifecycle.yaml")
        ));
    }

    #[test]
    fn quiet_forces_zero_verbosity() {
        let cli = Cli::parse_from(["eventdoc", "--quiet", "check", "lifecycle.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn parses_publish_flags() {
        let cli = Cli::parse_from([
            "eventdoc",
            "publish",
            "lifecycle.yaml",
            "--title-prefix",
            "[draft]",
            "--output-format",
            "github-action",
        ]);

        let Commands::Publish(args) = cli.command else {
            panic!("expected publish command");
        };
        assert_eq!(args.title_prefix.as_deref(), Some("[draft]"));
        assert_eq!(args.output_format, OutputFormat::GithubAction);
    }

    #[test]
    fn publish_output_format_defaults_to_cli() {
        let cli = Cli::parse_from(["eventdoc", "publish", "lifecycle.yaml"]);

        let Commands::Publish(args) = cli.command else {
            panic!("expected publish command");
        };
        assert_eq!(args.output_format, OutputFormat::Cli);
    }
}
