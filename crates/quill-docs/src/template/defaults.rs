//! Built-in templates. With default options they render exactly what the
//! fixed generator in `render::fixed` produces.

pub const FUNCTION_TEMPLATE: &str = r#"/**
{{#if showDescription}}
 * {{description}}
 *
{{/if}}
{{#if includeParams}}
{{#if params}}
{{#each params}}
 * @param {{name}}{{#if ../includeTypes}} {{{{type}}}}{{/if}}{{#if isOptional}} [optional]{{/if}}{{#if defaultValue}} Default: {{defaultValue}}{{/if}}{{#if description}} - {{description}}{{/if}}
{{/each}}
 *
{{/if}}
{{/if}}
{{#if includeReturns}}
 * @returns{{#if includeTypes}} {{{{returnType}}}}{{/if}}{{#if description}} - Return value description{{/if}}
{{/if}}
{{#if includeExamples}}
 *
 * @example
 * // Example usage
 * const result = {{name}}({{#each params}}{{name}}{{#unless @last}}, {{/unless}}{{/each}});
{{/if}}
 */"#;

pub const METHOD_TEMPLATE: &str = FUNCTION_TEMPLATE;

pub const CLASS_TEMPLATE: &str = r#"/**
{{#if showDescription}}
 * {{description}}
 *
{{/if}}
 * @class
{{#if includeExamples}}
 *
 * @example
 * // Create an instance
 * const instance = new {{name}}();
{{/if}}
 */"#;

pub const PROPERTY_TEMPLATE: &str = r#"/**
{{#if showDescription}}
 * {{description}}
{{else}}
 * Property description
{{/if}}
{{#if includeTypes}}
 *
 * @type {{{{type}}}}
{{/if}}
 */"#;

pub const VARIABLE_TEMPLATE: &str = r#"/**
{{#if showDescription}}
 * {{description}}
{{else}}
 * Variable description
{{/if}}
{{#if includeTypes}}
 *
 * @type {{{{type}}}}
{{/if}}
 */"#;

pub const INTERFACE_TEMPLATE: &str = r#"/**
{{#if showDescription}}
 * {{description}}
{{else}}
 * Interface description
{{/if}}
 *
 * @interface
 */"#;
