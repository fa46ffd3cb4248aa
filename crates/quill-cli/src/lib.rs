//! Quill CLI - documentation comments for JavaScript and TypeScript.
//!
//! This crate wires the `quill-docs` core to the command line:
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`commands`] - one module per subcommand
//! - [`discovery`] - turning patterns into an ordered list of source files
//! - [`error`] - [`CliError`] and its miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and the progress spinner

pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

/// Run a parsed command line to completion.
pub async fn run(args: cli::Cli) -> Result<()> {
    let ctx = commands::Context::from_cli(&args)?;
    match args.command {
        cli::Command::Generate(args) => commands::process::generate(&ctx, args).await,
        cli::Command::Clean(args) => commands::process::clean(&ctx, args).await,
        cli::Command::All(args) => commands::process::all(&ctx, args).await,
        cli::Command::Analyze(args) => commands::analyze::execute(&ctx, args).await,
        cli::Command::Init(args) => commands::init::execute(&ctx, args).await,
    }
}
