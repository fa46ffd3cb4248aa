//! `generate`, `clean` and `all`.

use quill_config::ConfigOverrides;
use quill_docs::{BatchReport, FsStore, Pipeline, PipelineOptions};

use crate::cli::{CleanArgs, GenerateArgs};
use crate::commands::Context;
use crate::error::Result;
use crate::ui::{self, Spinner};

/// Which passes a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Passes {
    Generate,
    Clean,
    Both,
}

pub async fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    run(ctx, &args.patterns, args.overrides(), Passes::Generate, args.backup, args.dry_run).await
}

pub async fn clean(ctx: &Context, args: CleanArgs) -> Result<()> {
    run(
        ctx,
        &args.patterns,
        ConfigOverrides::default(),
        Passes::Clean,
        args.backup,
        args.dry_run,
    )
    .await
}

/// Clean runs first: a generated comment without description or tags beyond
/// one marker (e.g. `@class`) is itself garbage to the cleaner.
pub async fn all(ctx: &Context, args: GenerateArgs) -> Result<()> {
    run(ctx, &args.patterns, args.overrides(), Passes::Both, args.backup, args.dry_run).await
}

async fn run(
    ctx: &Context,
    patterns: &[String],
    overrides: ConfigOverrides,
    passes: Passes,
    backup: bool,
    dry_run: bool,
) -> Result<()> {
    let config = ctx.config(overrides)?;
    let files = ctx.discover(patterns)?;
    let pipeline = Pipeline::new(&config, PipelineOptions { dry_run })?;
    let store = FsStore::new(backup && !dry_run);

    if matches!(passes, Passes::Clean | Passes::Both) {
        let spinner = Spinner::new("Cleaning up comments...");
        let report = pipeline.clean(&files, &store).await;
        finish(ctx, spinner, &report, "Comment cleanup", "removed", dry_run);
    }

    if matches!(passes, Passes::Generate | Passes::Both) {
        let spinner = Spinner::new("Generating comments...");
        let report = pipeline.generate(&files, &store).await;
        finish(ctx, spinner, &report, "Comment generation", "added", dry_run);
    }

    ui::success("All done!");
    Ok(())
}

fn finish(
    ctx: &Context,
    spinner: Spinner,
    report: &BatchReport,
    task: &str,
    verb: &str,
    dry_run: bool,
) {
    for skipped in &report.skipped {
        spinner.warn(&format!(
            "Skipped {}: {}",
            ui::display_path(&skipped.path, &ctx.root),
            skipped.reason
        ));
    }
    spinner.finish();

    for outcome in report.processed.iter().filter(|outcome| outcome.changes > 0) {
        tracing::info!(
            file = %ui::display_path(&outcome.path, &ctx.root),
            changes = outcome.changes,
            "comments {}",
            verb
        );
    }

    let written = if dry_run {
        "dry run, nothing written".to_string()
    } else {
        format!("{} file(s) updated", report.files_written())
    };
    let summary = format!(
        "{task} completed: {} comment(s) {verb} in {} file(s), {written}",
        report.total_changes(),
        report.processed.len(),
    );
    if report.skipped.is_empty() {
        ui::success(&summary);
    } else {
        ui::warning(&format!("{summary}; {} file(s) skipped", report.skipped.len()));
    }
}
