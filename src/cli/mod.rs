//! CLI module for the codescope analyzer.
//!
//! ## Usage
//!
//! - `codescope <FILE>` - analyze a file and print a text report
//! - `codescope <FILE> --json` - emit the serialized report
//! - `codescope <FILE> --profile python` - select the language profile
//! - `--lex/--syntax/--semantic <FILE>` - run a single stage (debug)
//! - `--profiles` - list the registered profiles
//!
//! `-` as FILE reads source text from standard input.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Command
//! functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Request-boundary errors (bad usage, unknown profile).
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Three-stage source text analyzer
#[derive(Parser, Debug)]
#[command(name = "codescope")]
#[command(version = VERSION)]
#[command(about = "Lexical, syntactic and semantic analysis of source text", long_about = None)]
pub struct Cli {
    /// File to analyze; use '-' to read from standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language profile to analyze against (default: c-family)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// List the registered profiles and exit
    #[arg(long = "profiles", conflicts_with = "file")]
    pub list_profiles: bool,

    // Debug/development flags
    /// Run the lexical stage only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Run the syntax stage only (debug)
    #[arg(long = "syntax", value_name = "FILE", conflicts_with = "file")]
    pub syntax_file: Option<PathBuf>,

    /// Run the semantic stage only (debug)
    #[arg(long = "semantic", value_name = "FILE", conflicts_with = "file")]
    pub semantic_file: Option<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.list_profiles {
        return commands::list_profiles();
    }

    let profile = cli.profile.as_deref();

    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file, profile);
    }
    if let Some(file) = cli.syntax_file {
        return commands::syntax_file(&file, profile);
    }
    if let Some(file) = cli.semantic_file {
        return commands::semantic_file(&file, profile);
    }

    match cli.file {
        Some(file) => commands::analyze_file(&file, profile, cli.json),
        None => Err(CliError::usage(
            "usage: codescope <FILE> [--profile NAME] [--json] (see --help)",
        )),
    }
}
