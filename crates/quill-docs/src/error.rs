use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for extraction, rendering and file processing.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The source file does not exist. Raised before any parsing.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Failed to read or write a source file.
    #[error("I/O error on '{}': {error}", .path.display())]
    Io {
        /// Path to the file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The parser could not produce a usable tree for any source type.
    #[error("failed to parse source '{}': {message}", .path.display())]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// A template failed to compile or render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Generic error variant.
    #[error("{message}")]
    Other {
        /// Human-readable error message.
        message: String,
    },
}

impl DocsError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }

    /// Map an I/O error, turning `NotFound` into [`DocsError::NotFound`].
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, error }
        }
    }
}
