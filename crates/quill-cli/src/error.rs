//! Error handling for the Quill CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`, and `main`
//! turns the final error into a `miette` report. Variants carry a hint where
//! there is an obvious next step for the user.

use std::path::PathBuf;

use quill_docs::DocsError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] quill_config::ConfigError),

    /// Failure from the documentation core
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// A file pattern is not a valid glob
    #[error("Invalid file pattern '{pattern}': {source}\n\nHint: Quote patterns so the shell does not expand them")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// `quill init` would overwrite an existing file
    #[error("Config file already exists: {}\n\nHint: Pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report for the final error display.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Docs(DocsError::Parse { path, message }) => miette::miette!(
            help = "Check the file for syntax errors",
            "Failed to parse {}: {}",
            path.display(),
            message
        ),
        CliError::Docs(DocsError::Template(err)) => miette::miette!(
            help = "Fix the template in your templates file or remove the override",
            "Template error: {}",
            err
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: CliError = quill_config::ConfigError::NotFound(PathBuf::from("quill.config.json")).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("quill.config.json"));
    }

    #[test]
    fn docs_errors_are_transparent() {
        let err: CliError = DocsError::NotFound {
            path: PathBuf::from("src/a.ts"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            DocsError::NotFound {
                path: PathBuf::from("src/a.ts")
            }
            .to_string()
        );
    }

    #[test]
    fn already_exists_has_hint() {
        let err = CliError::AlreadyExists(PathBuf::from("quill.config.json"));
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn parse_errors_render_with_path() {
        let report = cli_error_to_miette(CliError::Docs(DocsError::Parse {
            path: PathBuf::from("bad.ts"),
            message: "Unexpected token".into(),
        }));
        assert!(report.to_string().contains("bad.ts"));
    }
}
