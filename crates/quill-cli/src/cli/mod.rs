//! Command-line interface definition.
//!
//! - `quill generate` - insert documentation comments
//! - `quill clean` - strip garbage comments
//! - `quill all` - clean, then generate
//! - `quill analyze` - print extracted structure as JSON
//! - `quill init` - write a default config file

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{AnalyzeArgs, CleanArgs, Command, GenerateArgs, InitArgs, RendererArg};

/// Quill - documentation comments for JavaScript and TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "quill",
    version,
    about = "Generate and clean documentation comments in JavaScript/TypeScript sources",
    long_about = "Quill reads JavaScript and TypeScript files, extracts functions, classes,\n\
                  interfaces and variables, and inserts JSDoc-style comments for declarations\n\
                  that have none. It can also strip empty and placeholder comments."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to use instead of ./quill.config.json
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory patterns are resolved against
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}
