//! `quill init`: write a config file with every option spelled out.

use quill_config::{CommentConfig, ConfigLoader, RendererKind};

use crate::cli::InitArgs;
use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::ui;

pub async fn execute(ctx: &Context, args: InitArgs) -> Result<()> {
    let path = match &ctx.config_file {
        Some(file) => ctx.resolve(file),
        None => ConfigLoader::new(&ctx.root).default_path(),
    };
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    let config = CommentConfig {
        renderer: args.renderer.map(RendererKind::from).unwrap_or_default(),
        ..Default::default()
    };
    config.save(&path)?;

    ui::success(&format!("Wrote {}", ui::display_path(&path, &ctx.root)));
    Ok(())
}
