//! Best-effort parameter type resolution.
//!
//! The extractor only asks a resolver when a parameter has no annotation, and
//! treats `None` as "unknown". Resolvers never fail.

use oxc_ast::ast::{ArrayExpressionElement, Expression, FormalParameter};
use serde::{Deserialize, Serialize};

/// What the resolver gets to look at for one parameter.
pub struct ParamSite<'s, 'a> {
    pub name: &'s str,
    pub param: &'s FormalParameter<'a>,
    /// Default value expression, if any.
    pub default: Option<&'s Expression<'a>>,
}

pub trait TypeResolver {
    fn resolve_param_type(&self, site: &ParamSite<'_, '_>) -> Option<String>;
}

/// Resolver for contexts without any inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTypeResolver;

impl TypeResolver for NoopTypeResolver {
    fn resolve_param_type(&self, _site: &ParamSite<'_, '_>) -> Option<String> {
        None
    }
}

/// Widened type of a parameter's default value.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitializerTypeResolver;

impl TypeResolver for InitializerTypeResolver {
    fn resolve_param_type(&self, site: &ParamSite<'_, '_>) -> Option<String> {
        site.default.and_then(expression_type)
    }
}

/// Which resolver an analysis pass uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeInference {
    Disabled,
    #[default]
    Initializers,
}

impl TypeInference {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Initializers
        } else {
            Self::Disabled
        }
    }

    /// Fresh resolver for one analysis call.
    pub fn resolver(self) -> Box<dyn TypeResolver> {
        match self {
            Self::Disabled => Box::new(NoopTypeResolver),
            Self::Initializers => Box::new(InitializerTypeResolver),
        }
    }
}

fn expression_type(expr: &Expression<'_>) -> Option<String> {
    let ty = match expr {
        Expression::NumericLiteral(_) => "number",
        Expression::StringLiteral(_) | Expression::TemplateLiteral(_) => "string",
        Expression::BooleanLiteral(_) => "boolean",
        Expression::BigIntLiteral(_) => "bigint",
        Expression::RegExpLiteral(_) => "RegExp",
        Expression::ObjectExpression(_) => "object",
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => "Function",
        Expression::UnaryExpression(unary) if matches!(unary.operator.as_str(), "-" | "+") => {
            return expression_type(&unary.argument).filter(|ty| ty == "number" || ty == "bigint");
        }
        Expression::ParenthesizedExpression(paren) => return expression_type(&paren.expression),
        Expression::ArrayExpression(array) => return Some(array_type(&array.elements)),
        _ => return None,
    };
    Some(ty.to_string())
}

fn array_type(elements: &[ArrayExpressionElement<'_>]) -> String {
    let mut element_type: Option<String> = None;
    for element in elements {
        let ty = element.as_expression().and_then(expression_type);
        match (ty, &element_type) {
            (Some(ty), None) => element_type = Some(ty),
            (Some(ty), Some(current)) if ty == *current => {}
            _ => return "any[]".to_string(),
        }
    }
    match element_type {
        Some(ty) if ty == "Function" => "Function[]".to_string(),
        Some(ty) => format!("{ty}[]"),
        None => "any[]".to_string(),
    }
}
