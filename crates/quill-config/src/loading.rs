//! Layered configuration loading.
//!
//! Priority, lowest to highest: built-in defaults, `quill.config.json`,
//! `QUILL_*` environment variables, command-line overrides.

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};

use crate::config::{CONFIG_FILE_NAME, CommentConfig, ConfigOverrides};
use crate::error::{ConfigError, Result};

/// Environment variable prefix, e.g. `QUILL_INCLUDE_TYPES=false`.
pub const ENV_PREFIX: &str = "QUILL_";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    explicit: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Loader that looks for `quill.config.json` under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            explicit: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Use a specific config file instead of the default lookup.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Path of the config file in effect, if one exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.explicit {
            Some(path) => Some(path.clone()),
            None => {
                let candidate = self.root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        }
    }

    /// Load configuration, failing on a missing explicit file or invalid content.
    pub fn try_load(&self) -> Result<CommentConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(CommentConfig::default()));

        if let Some(path) = self.config_path() {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .lowercase(false)
                .map(|key| env_key_to_field(key.as_str()).into()),
        );

        if !self.overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(self.overrides.clone()));
        }

        Ok(figment.extract()?)
    }

    /// Load configuration, falling back to defaults (with a warning) on any error.
    pub fn load(&self) -> CommentConfig {
        match self.try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load configuration, using defaults");
                let mut config = CommentConfig::default();
                apply_overrides(&mut config, &self.overrides);
                config
            }
        }
    }

    /// Where `init` writes a new config file.
    pub fn default_path(&self) -> PathBuf {
        self.explicit
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME))
    }
}

fn apply_overrides(config: &mut CommentConfig, overrides: &ConfigOverrides) {
    let flags = [
        (&mut config.include_types, overrides.include_types),
        (&mut config.include_descriptions, overrides.include_descriptions),
        (&mut config.include_examples, overrides.include_examples),
        (&mut config.include_params, overrides.include_params),
        (&mut config.include_returns, overrides.include_returns),
        (&mut config.include_members, overrides.include_members),
        (&mut config.infer_types, overrides.infer_types),
    ];
    for (slot, value) in flags {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if let Some(path) = &overrides.template_path {
        config.template_path = Some(path.clone());
    }
    if let Some(renderer) = overrides.renderer {
        config.renderer = renderer;
    }
}

/// `INCLUDE_TYPES` -> `includeTypes`.
fn env_key_to_field(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_camel_case() {
        assert_eq!(env_key_to_field("INCLUDE_TYPES"), "includeTypes");
        assert_eq!(env_key_to_field("TEMPLATE_PATH"), "templatePath");
        assert_eq!(env_key_to_field("RENDERER"), "renderer");
        assert_eq!(env_key_to_field("TYPE"), "type");
    }

    #[test]
    fn overrides_apply_on_fallback() {
        let mut config = CommentConfig::default();
        let overrides = ConfigOverrides {
            include_examples: Some(false),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides);
        assert!(!config.include_examples);
        assert!(config.include_types);
    }
}
