//! The persisted comment-generation settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "quill.config.json";

/// Style of documentation comment to produce.
///
/// Recorded in the config file for tooling that cares; rendering is the same
/// for every style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    #[default]
    Documentation,
    Jsdoc,
    Typedoc,
}

/// Which comment renderer drives generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Compiled-in line formats.
    Fixed,
    /// Micro-template engine with optional user overrides.
    #[default]
    Template,
}

/// Comment-generation settings, as stored in `quill.config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConfig {
    #[serde(rename = "type", default)]
    pub style: DocStyle,

    #[serde(default = "default_true")]
    pub include_types: bool,

    #[serde(default = "default_true")]
    pub include_descriptions: bool,

    #[serde(default = "default_true")]
    pub include_examples: bool,

    #[serde(default = "default_true")]
    pub include_params: bool,

    #[serde(default = "default_true")]
    pub include_returns: bool,

    /// JSON file with template overrides, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    #[serde(default)]
    pub renderer: RendererKind,

    /// Also document class methods and properties.
    #[serde(default = "default_true")]
    pub include_members: bool,

    /// Fill missing types from literal initializers.
    #[serde(default = "default_true")]
    pub infer_types: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            style: DocStyle::Documentation,
            include_types: true,
            include_descriptions: true,
            include_examples: true,
            include_params: true,
            include_returns: true,
            template_path: None,
            renderer: RendererKind::default(),
            include_members: true,
            infer_types: true,
        }
    }
}

impl CommentConfig {
    /// Create configuration from a JSON value, filling absent keys with defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }
}

/// Partial settings supplied on the command line.
///
/// Only the fields that are `Some` take part in the merge, so an unset flag
/// never masks a value from the config file or environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_types: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_descriptions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_examples: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_params: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_returns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infer_types: Option<bool>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_enable_everything() {
        let config = CommentConfig::default();
        assert!(config.include_types);
        assert!(config.include_descriptions);
        assert!(config.include_examples);
        assert!(config.include_params);
        assert!(config.include_returns);
        assert!(config.include_members);
        assert!(config.infer_types);
        assert_eq!(config.renderer, RendererKind::Template);
        assert!(config.template_path.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = CommentConfig::from_value(json!({ "includeExamples": false }))
            .expect("partial config should parse");
        assert!(!config.include_examples);
        assert!(config.include_types);
        assert_eq!(config.style, DocStyle::Documentation);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(CommentConfig::default()).unwrap();
        assert_eq!(value["type"], "documentation");
        assert_eq!(value["includeTypes"], true);
        assert_eq!(value["renderer"], "template");
        assert!(value.get("templatePath").is_none());
    }

    #[test]
    fn accepts_every_style_tag() {
        for (tag, style) in [
            ("documentation", DocStyle::Documentation),
            ("jsdoc", DocStyle::Jsdoc),
            ("typedoc", DocStyle::Typedoc),
        ] {
            let config = CommentConfig::from_value(json!({ "type": tag })).unwrap();
            assert_eq!(config.style, style);
        }
    }

    #[test]
    fn unknown_style_is_rejected() {
        let result = CommentConfig::from_value(json!({ "type": "minimal" }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_overrides_serialize_to_empty_object() {
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(serde_json::to_value(&overrides).unwrap(), json!({}));
    }
}
