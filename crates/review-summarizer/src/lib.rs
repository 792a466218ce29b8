//! Library interface for the `review-summarizer` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`report`] - Console rendering of results
//! - [`picker`] - File selection for file mode without a path
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;
pub mod picker;
pub mod report;

use clap::{CommandFactory, Parser, Subcommand};
use review_summarizer_core::InputType;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                          Log filter (e.g., debug, review_summarizer=trace)
    REVIEW_SUMMARIZER_LOG_PATH        Explicit log file path
    REVIEW_SUMMARIZER_LOG_DIR         Log directory
    REVIEW_SUMMARIZER_FILE_DIALOG     Set to false to never open a file dialog
    REVIEW_SUMMARIZER_TOP_TERMS       Key points shown per sentiment
";

/// Command-line interface definition for review-summarizer.
#[derive(Parser)]
#[command(name = "review-summarizer")]
#[command(
    about = "Process and analyze reviews for sentiment",
    long_about = "Classify customer reviews as positive, negative or neutral and list the \
                  most frequent terms in positive and negative reviews.\n\n\
                  Reviews come from pasted text (one per line) or a CSV, TXT, PDF, JSON or \
                  JSONL file."
)]
#[command(version, args_conflicts_with_subcommands = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute. Without one, reviews are summarized.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Type of input: text or file (prompted for when omitted)
    #[arg(long = "input_type", alias = "input-type", value_enum)]
    pub input_type: Option<InputType>,

    /// The review text, or the path of a review file
    #[arg(long = "input_data", alias = "input-data", value_name = "DATA")]
    pub input_data: Option<String>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Show package information and effective configuration
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
