//! Entry point for the `quill` binary.

use clap::Parser;
use miette::Result;
use quill_cli::{cli, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    quill_cli::run(args).await.map_err(error::cli_error_to_miette)
}
