//! Configuration for the quill comment generator.
//!
//! [`CommentConfig`] is the persisted shape (`quill.config.json`), and
//! [`ConfigLoader`] layers defaults, the config file, `QUILL_*` environment
//! variables and command-line overrides into a single value.

pub mod config;
pub mod error;
pub mod loading;

pub use config::{CommentConfig, ConfigOverrides, DocStyle, RendererKind, CONFIG_FILE_NAME};
pub use error::{ConfigError, Result};
pub use loading::ConfigLoader;
