use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use quill_config::{ConfigOverrides, RendererKind};

/// Available Quill subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert documentation comments before undocumented declarations
    Generate(GenerateArgs),

    /// Remove empty, placeholder and separator comments
    Clean(CleanArgs),

    /// Clean garbage comments, then generate documentation comments
    All(GenerateArgs),

    /// Print the extracted structure of each file as JSON
    Analyze(AnalyzeArgs),

    /// Write a default quill.config.json
    Init(InitArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererArg {
    /// Built-in fixed layout
    Fixed,
    /// Templates, optionally overridden with --templates
    Template,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Fixed => RendererKind::Fixed,
            RendererArg::Template => RendererKind::Template,
        }
    }
}

/// Arguments for `generate` and `all`
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Files, directories or glob patterns to process
    ///
    /// Examples:
    ///   quill generate src
    ///   quill generate "src/**/*.ts" lib/index.js
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Omit {type} annotations
    #[arg(long)]
    pub no_types: bool,

    /// Omit descriptions taken from existing comments
    #[arg(long)]
    pub no_descriptions: bool,

    /// Omit @example sections
    #[arg(long)]
    pub no_examples: bool,

    /// Omit @param lines
    #[arg(long)]
    pub no_params: bool,

    /// Omit @returns lines
    #[arg(long)]
    pub no_returns: bool,

    /// Do not document class methods and properties
    #[arg(long)]
    pub no_members: bool,

    /// Do not infer parameter types from default values
    #[arg(long)]
    pub no_infer: bool,

    /// Comment renderer
    #[arg(long, value_enum, value_name = "RENDERER")]
    pub renderer: Option<RendererArg>,

    /// JSON file with template overrides (implies --renderer template)
    #[arg(long, value_name = "FILE", conflicts_with = "renderer")]
    pub templates: Option<PathBuf>,

    /// Copy each file to <file>.bak before rewriting it
    #[arg(long)]
    pub backup: bool,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Config overrides for the flags that were given.
    pub fn overrides(&self) -> ConfigOverrides {
        let off = |flag: bool| flag.then_some(false);
        ConfigOverrides {
            include_types: off(self.no_types),
            include_descriptions: off(self.no_descriptions),
            include_examples: off(self.no_examples),
            include_params: off(self.no_params),
            include_returns: off(self.no_returns),
            include_members: off(self.no_members),
            infer_types: off(self.no_infer),
            template_path: self.templates.clone(),
            renderer: self
                .renderer
                .map(RendererKind::from)
                .or(self.templates.as_ref().map(|_| RendererKind::Template)),
        }
    }
}

/// Arguments for `clean`
#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    /// Files, directories or glob patterns to process
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Copy each file to <file>.bak before rewriting it
    #[arg(long)]
    pub backup: bool,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `analyze`
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Files, directories or glob patterns to analyze
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not infer parameter types from default values
    #[arg(long)]
    pub no_infer: bool,
}

/// Arguments for `init`
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Renderer recorded in the new config
    #[arg(long, value_enum, value_name = "RENDERER")]
    pub renderer: Option<RendererArg>,
}
