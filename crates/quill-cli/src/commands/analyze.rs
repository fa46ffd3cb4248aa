use std::path::Path;

use quill_config::ConfigOverrides;
use quill_docs::{AnalyzeOptions, CodeAnalyzer, FileAnalysis, TypeInference};
use serde::Serialize;

use crate::cli::AnalyzeArgs;
use crate::commands::Context;
use crate::error::Result;
use crate::ui;

/// One entry of the `analyze` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFile {
    pub path: String,
    #[serde(flatten)]
    pub analysis: FileAnalysis,
}

pub async fn execute(ctx: &Context, args: AnalyzeArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        infer_types: args.no_infer.then_some(false),
        ..Default::default()
    };
    let config = ctx.config(overrides)?;
    let files = ctx.discover(&args.patterns)?;

    let analyzer = CodeAnalyzer::new(AnalyzeOptions {
        type_inference: TypeInference::from_enabled(config.infer_types),
    });

    let mut analyzed = Vec::with_capacity(files.len());
    let mut skipped = 0;
    for (path, result) in analyzer.analyze_files(files) {
        let display = ui::display_path(&path, &ctx.root);
        match result {
            Ok(analysis) => analyzed.push(AnalyzedFile {
                path: display,
                analysis,
            }),
            Err(err) => {
                skipped += 1;
                ui::warning(&format!("Skipped {display}: {err}"));
            }
        }
    }

    let mut json = serde_json::to_string_pretty(&analyzed)?;
    json.push('\n');
    match &args.output {
        Some(output) => write_output(&ctx.resolve(output), &json).await?,
        None => print!("{json}"),
    }

    let message = format!("Analysis complete for {} file(s)", analyzed.len());
    if skipped == 0 {
        ui::success(&message);
    } else {
        ui::warning(&format!("{message}; {skipped} file(s) skipped"));
    }
    Ok(())
}

async fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    ui::info(&format!("Wrote analysis JSON to {}", path.display()));
    Ok(())
}
