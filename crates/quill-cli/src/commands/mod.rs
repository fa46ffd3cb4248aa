//! Command implementations.

pub mod analyze;
pub mod init;
pub mod process;

use std::path::{Path, PathBuf};

use quill_config::{CommentConfig, ConfigLoader, ConfigOverrides};

use crate::cli::Cli;
use crate::discovery;
use crate::error::Result;
use crate::ui;

/// Settings shared by every command, taken from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self {
            root,
            config_file: cli.config.clone(),
        })
    }

    fn loader(&self, overrides: ConfigOverrides) -> ConfigLoader {
        let mut loader = ConfigLoader::new(&self.root).with_overrides(overrides);
        if let Some(file) = &self.config_file {
            loader = loader.with_file(self.resolve(file));
        }
        loader
    }

    /// Effective configuration. An explicit `--config` that is missing or
    /// invalid is an error; problems with the default file only warn.
    pub fn config(&self, overrides: ConfigOverrides) -> Result<CommentConfig> {
        let loader = self.loader(overrides);
        let mut config = if self.config_file.is_some() {
            loader.try_load()?
        } else {
            loader.load()
        };
        if let Some(path) = &config.template_path {
            config.template_path = Some(self.resolve(path));
        }
        Ok(config)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Source files for `patterns`, announcing the count.
    pub fn discover(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let files = discovery::discover(&self.root, patterns)?;
        if files.is_empty() {
            ui::warning("No files found matching the patterns.");
        } else {
            ui::info(&format!("Found {} file(s) to process", files.len()));
            for file in &files {
                tracing::debug!(file = %ui::display_path(file, &self.root), "matched");
            }
        }
        Ok(files)
    }
}
