//! Turning metadata records into comment text.

mod context;
mod fixed;
mod templated;

use indexmap::IndexMap;
use quill_config::{CommentConfig, RendererKind};

pub use fixed::CommentGenerator;
pub use templated::{TemplateOverrides, TemplateRenderer, TemplateSet};

use crate::error::Result;
use crate::model::{
    ClassInfo, FileAnalysis, FunctionInfo, InterfaceInfo, MethodInfo, PropertyInfo, VariableInfo,
};

/// Identifier → rendered comment. Members are keyed `Class.member`.
pub type CommentMap = IndexMap<String, String>;

/// Which output sections are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_types: bool,
    pub include_descriptions: bool,
    pub include_examples: bool,
    pub include_params: bool,
    pub include_returns: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_types: true,
            include_descriptions: true,
            include_examples: true,
            include_params: true,
            include_returns: true,
        }
    }
}

impl From<&CommentConfig> for RenderOptions {
    fn from(config: &CommentConfig) -> Self {
        Self {
            include_types: config.include_types,
            include_descriptions: config.include_descriptions,
            include_examples: config.include_examples,
            include_params: config.include_params,
            include_returns: config.include_returns,
        }
    }
}

/// Renders one record of each entity kind into a block comment.
pub trait CommentRenderer: Send + Sync {
    fn function_comment(&self, func: &FunctionInfo) -> String;
    fn class_comment(&self, class: &ClassInfo) -> String;
    fn method_comment(&self, method: &MethodInfo) -> String;
    fn property_comment(&self, prop: &PropertyInfo) -> String;
    fn variable_comment(&self, variable: &VariableInfo) -> String;
    fn interface_comment(&self, iface: &InterfaceInfo) -> String;
}

/// Build the renderer selected by `config`.
///
/// Template overrides are read from `config.template_path` (relative paths
/// resolve against the current directory); load problems only warn.
pub fn renderer_for(config: &CommentConfig) -> Result<Box<dyn CommentRenderer>> {
    let options = RenderOptions::from(config);
    match config.renderer {
        RendererKind::Fixed => Ok(Box::new(CommentGenerator::new(options))),
        RendererKind::Template => {
            let mut templates = TemplateSet::defaults()?;
            if let Some(path) = &config.template_path {
                templates = templates.with_overrides(&TemplateOverrides::load(path));
            }
            Ok(Box::new(TemplateRenderer::new(templates, options)))
        }
    }
}

/// Comment-map key of an interface.
///
/// Interfaces merge with same-named classes and functions, so they get their own key space.
pub fn interface_key(name: &str) -> String {
    format!("interface:{name}")
}

/// Render every entity of `analysis`.
///
/// Order: functions, classes with their members, interfaces, variables. When
/// two entities share a key the earlier one wins, so an arrow function keeps
/// its function comment rather than a variable comment.
pub fn build_comment_map(analysis: &FileAnalysis, renderer: &dyn CommentRenderer) -> CommentMap {
    let mut map = CommentMap::new();

    for func in &analysis.functions {
        map.entry(func.name.clone())
            .or_insert_with(|| renderer.function_comment(func));
    }

    for class in &analysis.classes {
        map.entry(class.name.clone())
            .or_insert_with(|| renderer.class_comment(class));
        for method in &class.methods {
            map.entry(format!("{}.{}", class.name, method.name()))
                .or_insert_with(|| renderer.method_comment(method));
        }
        for prop in &class.properties {
            map.entry(format!("{}.{}", class.name, prop.name))
                .or_insert_with(|| renderer.property_comment(prop));
        }
    }

    for iface in &analysis.interfaces {
        map.entry(interface_key(&iface.name))
            .or_insert_with(|| renderer.interface_comment(iface));
    }

    for variable in &analysis.variables {
        map.entry(variable.name.clone())
            .or_insert_with(|| renderer.variable_comment(variable));
    }

    tracing::debug!(comments = map.len(), "built comment map");
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamInfo;

    fn sample_function() -> FunctionInfo {
        FunctionInfo {
            name: "add".into(),
            params: vec![
                ParamInfo {
                    name: "a".into(),
                    ty: "number".into(),
                    description: None,
                    is_optional: false,
                    default_value: None,
                },
                ParamInfo {
                    name: "b".into(),
                    ty: "number".into(),
                    description: Some("// second operand".into()),
                    is_optional: true,
                    default_value: Some("1".into()),
                },
            ],
            return_type: "number".into(),
            description: Some("/** Adds numbers. */".into()),
            is_async: false,
            is_generator: false,
        }
    }

    fn renderers(options: RenderOptions) -> (CommentGenerator, TemplateRenderer) {
        (
            CommentGenerator::new(options),
            TemplateRenderer::with_defaults(options).unwrap(),
        )
    }

    #[test]
    fn fixed_function_layout() {
        let out = CommentGenerator::default().function_comment(&sample_function());
        let expected = "/**\n * Adds numbers.\n *\n * @param a {number}\n * @param b {number} [optional] Default: 1 - second operand\n *\n * @returns {number} - Return value description\n *\n * @example\n * // Example usage\n * const result = add(a, b);\n */";
        assert_eq!(out, expected);
    }

    #[test]
    fn renderers_agree_for_every_option_combination() {
        let class = ClassInfo {
            name: "Box".into(),
            methods: Vec::new(),
            properties: Vec::new(),
            description: None,
        };
        let prop = PropertyInfo {
            name: "size".into(),
            ty: "number".into(),
            description: Some("/** Size. */".into()),
            is_static: false,
            is_private: false,
        };
        let variable = VariableInfo {
            name: "x".into(),
            ty: "any".into(),
            description: None,
            is_constant: true,
        };
        let iface = InterfaceInfo {
            name: "Shape".into(),
            properties: Vec::new(),
            methods: Vec::new(),
            description: None,
        };
        let mut bare = sample_function();
        bare.params.clear();
        bare.description = None;

        for bits in 0..32u8 {
            let options = RenderOptions {
                include_types: bits & 1 != 0,
                include_descriptions: bits & 2 != 0,
                include_examples: bits & 4 != 0,
                include_params: bits & 8 != 0,
                include_returns: bits & 16 != 0,
            };
            let (fixed, templated) = renderers(options);
            for func in [&sample_function(), &bare] {
                assert_eq!(fixed.function_comment(func), templated.function_comment(func));
            }
            let described = fixed.function_comment(&sample_function());
            assert_eq!(
                described.contains("second operand"),
                options.include_descriptions && options.include_params
            );
            assert_eq!(fixed.class_comment(&class), templated.class_comment(&class));
            assert_eq!(fixed.property_comment(&prop), templated.property_comment(&prop));
            assert_eq!(
                fixed.variable_comment(&variable),
                templated.variable_comment(&variable)
            );
            assert_eq!(fixed.interface_comment(&iface), templated.interface_comment(&iface));
        }
    }

    #[test]
    fn placeholder_when_no_description() {
        let variable = VariableInfo {
            name: "x".into(),
            ty: "string".into(),
            description: None,
            is_constant: false,
        };
        let out = CommentGenerator::default().variable_comment(&variable);
        assert_eq!(out, "/**\n * Variable description\n *\n * @type {string}\n */");
    }

    #[test]
    fn comment_map_keys_members_and_prefers_functions() {
        let analysis = FileAnalysis {
            functions: vec![sample_function()],
            classes: vec![ClassInfo {
                name: "Calc".into(),
                methods: vec![MethodInfo {
                    function: sample_function(),
                    is_static: false,
                    is_private: false,
                }],
                properties: Vec::new(),
                description: None,
            }],
            interfaces: Vec::new(),
            variables: vec![VariableInfo {
                name: "add".into(),
                ty: "any".into(),
                description: None,
                is_constant: true,
            }],
        };
        let renderer = CommentGenerator::default();
        let map = build_comment_map(&analysis, &renderer);
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["add", "Calc", "Calc.add"]);
        assert!(map["add"].contains("@param a"));
    }

    #[test]
    fn renderer_for_respects_kind() {
        let config = CommentConfig {
            renderer: RendererKind::Fixed,
            include_examples: false,
            ..Default::default()
        };
        let renderer = renderer_for(&config).unwrap();
        let out = renderer.class_comment(&ClassInfo {
            name: "A".into(),
            methods: Vec::new(),
            properties: Vec::new(),
            description: None,
        });
        assert_eq!(out, "/**\n * @class\n */");
    }
}
