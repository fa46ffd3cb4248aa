//! A small logic-light template language for rendering comments.
//!
//! Supported tags:
//!
//! - `{{key}}` and `{{{key}}}`: substitution (identical output; the triple form
//!   exists so `{{{{type}}}}` can print a value wrapped in literal braces).
//! - `{{#if key}}…{{else}}…{{/if}}` and `{{#unless key}}…{{/unless}}`.
//! - `{{#each key}}…{{/each}}` with `{{@index}}`, `{{@last}}`, `{{this}}` and
//!   `{{../key}}` for the enclosing record.
//!
//! A line holding nothing but block tags and whitespace is dropped from the
//! output entirely, newline included.
//!
//! Templates are compiled once (lexer, then a recursive-descent parser into a
//! node list) and rendered against a [`serde_json::Value`].

mod defaults;
mod lexer;
mod parser;
mod render;

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

pub use defaults::{
    CLASS_TEMPLATE, FUNCTION_TEMPLATE, INTERFACE_TEMPLATE, METHOD_TEMPLATE, PROPERTY_TEMPLATE,
    VARIABLE_TEMPLATE,
};

use parser::Node;

/// Errors raised while compiling a template. Offsets are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated tag starting at offset {offset}")]
    UnterminatedTag { offset: usize },

    #[error("empty tag at offset {offset}")]
    EmptyTag { offset: usize },

    #[error("unknown block helper '#{name}' at offset {offset}")]
    UnknownHelper { name: String, offset: usize },

    #[error("block '#{helper}' opened at offset {offset} is never closed")]
    UnclosedBlock { helper: String, offset: usize },

    #[error("expected '/{expected}' but found '/{found}' at offset {offset}")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unexpected '/{helper}' at offset {offset}")]
    UnexpectedClose { helper: String, offset: usize },

    #[error("'else' outside of a block at offset {offset}")]
    UnexpectedElse { offset: usize },

    #[error("invalid key '{key}' at offset {offset}")]
    InvalidKey { key: String, offset: usize },
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let tokens = lexer::tokenize(source)?;
        let nodes = parser::parse(tokens)?;
        Ok(Self { nodes })
    }

    pub fn render(&self, data: &Value) -> String {
        render::render(&self.nodes, data)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::compile(source)
    }
}

/// Compile and render in one step.
pub fn render_str(source: &str, data: &Value) -> Result<String, TemplateError> {
    Ok(Template::compile(source)?.render(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conditional_includes_block_only_when_truthy() {
        let template = Template::compile("{{#if x}}A{{/if}}").unwrap();
        assert_eq!(template.render(&json!({ "x": true })), "A");
        assert_eq!(template.render(&json!({ "x": false })), "");
        assert_eq!(template.render(&json!({})), "");
        assert_eq!(template.render(&json!({ "x": "" })), "");
        assert_eq!(template.render(&json!({ "x": [] })), "");
        assert_eq!(template.render(&json!({ "x": [1] })), "A");
    }

    #[test]
    fn else_and_unless() {
        let template = Template::compile("{{#if x}}yes{{else}}no{{/if}}").unwrap();
        assert_eq!(template.render(&json!({ "x": 1 })), "yes");
        assert_eq!(template.render(&json!({ "x": 0 })), "no");
        let template = Template::compile("{{#unless x}}missing{{/unless}}").unwrap();
        assert_eq!(template.render(&json!({})), "missing");
        assert_eq!(template.render(&json!({ "x": "v" })), "");
    }

    #[test]
    fn each_joins_with_last_guard() {
        let out = render_str(
            "{{#each items}}{{name}}{{#unless @last}},{{/unless}}{{/each}}",
            &json!({ "items": [{ "name": "a" }, { "name": "b" }] }),
        )
        .unwrap();
        assert_eq!(out, "a,b");
    }

    #[test]
    fn each_exposes_index_last_and_parent() {
        let out = render_str(
            "{{#each xs}}{{@index}}:{{this}}:{{@last}}:{{../tag}};{{/each}}",
            &json!({ "xs": ["p", "q"], "tag": "T" }),
        )
        .unwrap();
        assert_eq!(out, "0:p:false:T;1:q:true:T;");
    }

    #[test]
    fn each_over_missing_or_scalar_is_empty() {
        let template = Template::compile("[{{#each xs}}x{{/each}}]").unwrap();
        assert_eq!(template.render(&json!({})), "[]");
        assert_eq!(template.render(&json!({ "xs": "nope" })), "[]");
    }

    #[test]
    fn missing_fields_render_empty() {
        let out = render_str("<{{a}}|{{{b}}}>", &json!({ "b": null })).unwrap();
        assert_eq!(out, "<|>");
    }

    #[test]
    fn quadruple_braces_wrap_value_in_braces() {
        let out = render_str("@type {{{{type}}}}", &json!({ "type": "Map<string, {a: 1}>" }))
            .unwrap();
        assert_eq!(out, "@type {Map<string, {a: 1}>}");
    }

    #[test]
    fn values_are_not_reinterpreted() {
        let out = render_str("{{a}}", &json!({ "a": "{{b}}", "b": "x" })).unwrap();
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn standalone_block_lines_disappear() {
        let source = "start\n{{#if x}}\n  body\n{{/if}}\nend";
        assert_eq!(render_str(source, &json!({ "x": true })).unwrap(), "start\n  body\nend");
        assert_eq!(render_str(source, &json!({})).unwrap(), "start\nend");
    }

    #[test]
    fn inline_blocks_keep_surrounding_text() {
        let out = render_str("a {{#if x}}b{{/if}} c\n", &json!({ "x": true })).unwrap();
        assert_eq!(out, "a b c\n");
    }

    #[test]
    fn multi_line_block_bodies() {
        let out = render_str("{{#if x}}one\ntwo{{/if}}", &json!({ "x": true })).unwrap();
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn malformed_templates_are_errors() {
        assert!(matches!(
            Template::compile("{{#if x}}open"),
            Err(TemplateError::UnclosedBlock { .. })
        ));
        assert!(matches!(
            Template::compile("{{#if x}}{{/each}}"),
            Err(TemplateError::MismatchedClose { .. })
        ));
        assert!(matches!(
            Template::compile("{{/if}}"),
            Err(TemplateError::UnexpectedClose { .. })
        ));
        assert!(matches!(
            Template::compile("{{else}}"),
            Err(TemplateError::UnexpectedElse { .. })
        ));
        assert!(matches!(
            Template::compile("{{#with x}}{{/with}}"),
            Err(TemplateError::UnknownHelper { .. })
        ));
        assert!(matches!(
            Template::compile("{{name"),
            Err(TemplateError::UnterminatedTag { offset: 0 })
        ));
    }
}
