//! Micro-template rendering with per-kind overrides.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::context::record_context;
use super::{CommentRenderer, RenderOptions};
use crate::model::{ClassInfo, FunctionInfo, InterfaceInfo, MethodInfo, PropertyInfo, VariableInfo};
use crate::template::{
    Template, TemplateError, CLASS_TEMPLATE, FUNCTION_TEMPLATE, INTERFACE_TEMPLATE,
    METHOD_TEMPLATE, PROPERTY_TEMPLATE, VARIABLE_TEMPLATE,
};

/// Template strings read from a JSON override file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOverrides {
    pub function_template: Option<String>,
    pub class_template: Option<String>,
    pub method_template: Option<String>,
    pub property_template: Option<String>,
    pub variable_template: Option<String>,
}

impl TemplateOverrides {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read overrides from `path`. A missing or malformed file yields no overrides.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read template file, keeping defaults");
                return Self::default();
            }
        };
        match Self::from_json(&content) {
            Ok(overrides) => {
                tracing::debug!(path = %path.display(), "loaded template overrides");
                overrides
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "malformed template file, keeping defaults");
                Self::default()
            }
        }
    }
}

/// One compiled template per entity kind.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub function: Template,
    pub class: Template,
    pub method: Template,
    pub property: Template,
    pub variable: Template,
    pub interface: Template,
}

impl TemplateSet {
    pub fn defaults() -> Result<Self, TemplateError> {
        Ok(Self {
            function: Template::compile(FUNCTION_TEMPLATE)?,
            class: Template::compile(CLASS_TEMPLATE)?,
            method: Template::compile(METHOD_TEMPLATE)?,
            property: Template::compile(PROPERTY_TEMPLATE)?,
            variable: Template::compile(VARIABLE_TEMPLATE)?,
            interface: Template::compile(INTERFACE_TEMPLATE)?,
        })
    }

    /// Replace the kinds present in `overrides`. A template that fails to
    /// compile leaves that kind at its current value.
    pub fn with_overrides(mut self, overrides: &TemplateOverrides) -> Self {
        let slots = [
            ("functionTemplate", &overrides.function_template, &mut self.function),
            ("classTemplate", &overrides.class_template, &mut self.class),
            ("methodTemplate", &overrides.method_template, &mut self.method),
            ("propertyTemplate", &overrides.property_template, &mut self.property),
            ("variableTemplate", &overrides.variable_template, &mut self.variable),
        ];
        for (kind, source, slot) in slots {
            let Some(source) = source else {
                continue;
            };
            match Template::compile(source) {
                Ok(template) => *slot = template,
                Err(err) => {
                    tracing::warn!(kind, error = %err, "invalid template override, keeping default")
                }
            }
        }
        self
    }
}

/// Renders comments through a [`TemplateSet`].
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    templates: TemplateSet,
    options: RenderOptions,
}

impl TemplateRenderer {
    pub fn new(templates: TemplateSet, options: RenderOptions) -> Self {
        Self { templates, options }
    }

    /// Default templates.
    pub fn with_defaults(options: RenderOptions) -> Result<Self, TemplateError> {
        Ok(Self::new(TemplateSet::defaults()?, options))
    }
}

impl CommentRenderer for TemplateRenderer {
    fn function_comment(&self, func: &FunctionInfo) -> String {
        self.templates
            .function
            .render(&record_context(func, &self.options))
    }

    fn class_comment(&self, class: &ClassInfo) -> String {
        self.templates
            .class
            .render(&record_context(class, &self.options))
    }

    fn method_comment(&self, method: &MethodInfo) -> String {
        self.templates
            .method
            .render(&record_context(method, &self.options))
    }

    fn property_comment(&self, prop: &PropertyInfo) -> String {
        self.templates
            .property
            .render(&record_context(prop, &self.options))
    }

    fn variable_comment(&self, variable: &VariableInfo) -> String {
        self.templates
            .variable
            .render(&record_context(variable, &self.options))
    }

    fn interface_comment(&self, iface: &InterfaceInfo) -> String {
        self.templates
            .interface
            .render(&record_context(iface, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_file_ignores_unknown_keys() {
        let overrides =
            TemplateOverrides::from_json(r#"{ "classTemplate": "/** {{name}} */", "other": 1 }"#)
                .unwrap();
        assert_eq!(overrides.class_template.as_deref(), Some("/** {{name}} */"));
        assert!(overrides.function_template.is_none());
    }

    #[test]
    fn broken_override_keeps_default() {
        let overrides = TemplateOverrides {
            variable_template: Some("{{#if x}}".into()),
            ..Default::default()
        };
        let set = TemplateSet::defaults().unwrap().with_overrides(&overrides);
        assert_eq!(set.variable, Template::compile(VARIABLE_TEMPLATE).unwrap());
    }

    #[test]
    fn missing_override_file_yields_nothing() {
        let overrides = TemplateOverrides::load(Path::new("/definitely/not/here.json"));
        assert_eq!(overrides, TemplateOverrides::default());
    }
}
