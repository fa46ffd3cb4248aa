//! Fixed section assembly per entity kind.

use super::context::{comment_text, description};
use super::{CommentRenderer, RenderOptions};
use crate::model::{ClassInfo, FunctionInfo, InterfaceInfo, MethodInfo, PropertyInfo, VariableInfo};

/// Renders comments with hardcoded line formats.
#[derive(Debug, Clone, Default)]
pub struct CommentGenerator {
    options: RenderOptions,
}

impl CommentGenerator {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn shown_description(&self, raw: Option<&str>) -> Option<String> {
        description(raw).filter(|_| self.options.include_descriptions)
    }

    fn typed(&self, ty: &str) -> String {
        if self.options.include_types {
            format!(" {{{}}}", comment_text(ty))
        } else {
            String::new()
        }
    }

    fn described_with_type(
        &self,
        raw_description: Option<&str>,
        placeholder: &str,
        ty: &str,
    ) -> String {
        let mut lines = vec!["/**".to_string()];
        match self.shown_description(raw_description) {
            Some(text) => lines.push(format!(" * {text}")),
            None => lines.push(format!(" * {placeholder}")),
        }
        if self.options.include_types {
            lines.push(" *".to_string());
            lines.push(format!(" * @type {{{}}}", comment_text(ty)));
        }
        lines.push(" */".to_string());
        lines.join("\n")
    }
}

impl CommentRenderer for CommentGenerator {
    fn function_comment(&self, func: &FunctionInfo) -> String {
        let mut lines = vec!["/**".to_string()];
        let summary = description(func.description.as_deref());

        if let Some(text) = summary.as_ref().filter(|_| self.options.include_descriptions) {
            lines.push(format!(" * {text}"));
            lines.push(" *".to_string());
        }

        if self.options.include_params && !func.params.is_empty() {
            for param in &func.params {
                let mut line = format!(" * @param {}", comment_text(&param.name));
                line.push_str(&self.typed(&param.ty));
                if param.is_optional {
                    line.push_str(" [optional]");
                }
                if let Some(default) = param.default_value.as_deref().filter(|d| !d.is_empty()) {
                    line.push_str(&format!(" Default: {}", comment_text(default)));
                }
                if let Some(text) = self.shown_description(param.description.as_deref()) {
                    line.push_str(&format!(" - {text}"));
                }
                lines.push(line);
            }
            lines.push(" *".to_string());
        }

        if self.options.include_returns {
            let mut line = format!(" * @returns{}", self.typed(&func.return_type));
            if summary.is_some() {
                line.push_str(" - Return value description");
            }
            lines.push(line);
        }

        if self.options.include_examples {
            let args = func
                .params
                .iter()
                .map(|param| comment_text(&param.name))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(" *".to_string());
            lines.push(" * @example".to_string());
            lines.push(" * // Example usage".to_string());
            lines.push(format!(
                " * const result = {}({args});",
                comment_text(&func.name)
            ));
        }

        lines.push(" */".to_string());
        lines.join("\n")
    }

    fn class_comment(&self, class: &ClassInfo) -> String {
        let mut lines = vec!["/**".to_string()];
        if let Some(text) = self.shown_description(class.description.as_deref()) {
            lines.push(format!(" * {text}"));
            lines.push(" *".to_string());
        }
        lines.push(" * @class".to_string());
        if self.options.include_examples {
            lines.push(" *".to_string());
            lines.push(" * @example".to_string());
            lines.push(" * // Create an instance".to_string());
            lines.push(format!(
                " * const instance = new {}();",
                comment_text(&class.name)
            ));
        }
        lines.push(" */".to_string());
        lines.join("\n")
    }

    fn method_comment(&self, method: &MethodInfo) -> String {
        self.function_comment(&method.function)
    }

    fn property_comment(&self, prop: &PropertyInfo) -> String {
        self.described_with_type(prop.description.as_deref(), "Property description", &prop.ty)
    }

    fn variable_comment(&self, variable: &VariableInfo) -> String {
        self.described_with_type(
            variable.description.as_deref(),
            "Variable description",
            &variable.ty,
        )
    }

    fn interface_comment(&self, iface: &InterfaceInfo) -> String {
        let mut lines = vec!["/**".to_string()];
        match self.shown_description(iface.description.as_deref()) {
            Some(text) => lines.push(format!(" * {text}")),
            None => lines.push(" * Interface description".to_string()),
        }
        lines.push(" *".to_string());
        lines.push(" * @interface".to_string());
        lines.push(" */".to_string());
        lines.join("\n")
    }
}
