//! Metadata records produced by one analysis pass.

use serde::{Deserialize, Serialize};

/// Placeholder for a missing parameter, property or variable type.
pub const UNKNOWN_TYPE: &str = "any";
/// Placeholder for a missing return type.
pub const NO_RETURN_TYPE: &str = "void";
/// Name reported for an unnamed `export default function`.
pub const ANONYMOUS_FUNCTION: &str = "anonymous";
/// Name reported for an unnamed `export default class`.
pub const ANONYMOUS_CLASS: &str = "AnonymousClass";

/// A single formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_optional: bool,
    /// Source text of the default expression.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

/// A named function declaration or an arrow function bound to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub params: Vec<ParamInfo>,
    pub return_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
}

/// A class method or an interface method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    #[serde(flatten)]
    pub function: FunctionInfo,
    pub is_static: bool,
    /// `private` modifier or a `#name` private identifier.
    pub is_private: bool,
}

impl MethodInfo {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// A class property or an interface property signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<MethodInfo>,
    pub properties: Vec<PropertyInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Interface members never carry visibility: `is_static` and `is_private` are always false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    pub properties: Vec<PropertyInfo>,
    pub methods: Vec<MethodInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// A single-identifier variable binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_constant: bool,
}

/// Everything extracted from one file, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub variables: Vec<VariableInfo>,
}

impl FileAnalysis {
    /// Returns `true` when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.interfaces.is_empty()
            && self.variables.is_empty()
    }

    /// Number of top-level entities (members not counted).
    pub fn entity_count(&self) -> usize {
        self.functions.len() + self.classes.len() + self.interfaces.len() + self.variables.len()
    }
}
