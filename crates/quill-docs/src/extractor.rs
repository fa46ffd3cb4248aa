use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassElement, ExportDefaultDeclaration,
    ExportNamedDeclaration, Expression, FormalParameters, Function, TSInterfaceDeclaration,
    TSMethodSignatureKind, TSSignature, TSTypeAnnotation, VariableDeclaration,
    VariableDeclarationKind,
};
use oxc_ast_visit::{walk, Visit};
use oxc_semantic::ScopeFlags;
use oxc_span::GetSpan;

use crate::comments::CommentIndex;
use crate::error::{DocsError, Result};
use crate::model::{
    ClassInfo, FileAnalysis, FunctionInfo, InterfaceInfo, MethodInfo, ParamInfo, PropertyInfo,
    VariableInfo, NO_RETURN_TYPE,
};
use crate::parser::{parse, ParseOptions};
use crate::resolver::{ParamSite, TypeInference, TypeResolver};
use crate::sites::{
    annotation_text, binding_identifier, class_name, function_name, is_documented_method,
    is_private_member, member_name, slice, ExportAnchor,
};

/// Options controlling structural extraction.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Resolver used for unannotated parameters.
    pub type_inference: TypeInference,
}

/// Extracts a [`FileAnalysis`] from JavaScript / TypeScript sources using OXC.
#[derive(Debug, Clone, Default)]
pub struct CodeAnalyzer {
    options: AnalyzeOptions,
}

impl CodeAnalyzer {
    /// Create a new analyzer with the provided options.
    pub fn new(options: AnalyzeOptions) -> Self {
        Self { options }
    }

    /// Analyze several files; each file gets its own result.
    pub fn analyze_files<I>(&self, paths: I) -> Vec<(PathBuf, Result<FileAnalysis>)>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths
            .into_iter()
            .map(|path| {
                let result = self.analyze_file(&path);
                (path, result)
            })
            .collect()
    }

    /// Analyze a file on disk. A missing file fails before any parsing.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<FileAnalysis> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let source =
            fs::read_to_string(path).map_err(|error| DocsError::from_io(path.to_path_buf(), error))?;
        self.analyze_source(path, &source)
    }

    /// Analyze an in-memory source string. `path` only selects the dialect.
    pub fn analyze_source(&self, path: impl AsRef<Path>, source: &str) -> Result<FileAnalysis> {
        let path = path.as_ref();
        let allocator = Allocator::default();
        let parsed = parse(&allocator, source, &ParseOptions::from_path(path))?;

        let comments = CommentIndex::new(parsed.program.comments.iter());
        let resolver = self.options.type_inference.resolver();
        let mut walker = TreeWalker::new(source, &comments, resolver.as_ref());
        walker.visit_program(&parsed.program);

        let analysis = walker.analysis;
        tracing::debug!(
            path = %path.display(),
            functions = analysis.functions.len(),
            classes = analysis.classes.len(),
            interfaces = analysis.interfaces.len(),
            variables = analysis.variables.len(),
            "analyzed source"
        );
        Ok(analysis)
    }
}

/// Pre-order walk that records entities as flat collections.
struct TreeWalker<'s> {
    source: &'s str,
    comments: &'s CommentIndex,
    resolver: &'s dyn TypeResolver,
    anchor: ExportAnchor,
    analysis: FileAnalysis,
}

impl<'s> TreeWalker<'s> {
    fn new(source: &'s str, comments: &'s CommentIndex, resolver: &'s dyn TypeResolver) -> Self {
        Self {
            source,
            comments,
            resolver,
            anchor: ExportAnchor::default(),
            analysis: FileAnalysis::default(),
        }
    }

    fn description(&self, start: u32) -> Option<String> {
        self.comments
            .leading_text(self.source, start)
            .map(str::to_string)
    }

    fn return_type(&self, annotation: Option<&TSTypeAnnotation<'_>>) -> String {
        annotation
            .map(|ann| slice(self.source, ann.type_annotation.span()).trim())
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_RETURN_TYPE)
            .to_string()
    }

    fn params(&self, params: &FormalParameters<'_>) -> Vec<ParamInfo> {
        let mut out: Vec<ParamInfo> = params
            .items
            .iter()
            .map(|param| {
                let (binding, default) = split_default(&param.pattern);
                let annotation = param
                    .pattern
                    .type_annotation
                    .as_deref()
                    .or(binding.type_annotation.as_deref());
                let name = self.binding_text(binding);
                let ty = match annotation {
                    Some(_) => annotation_text(self.source, annotation),
                    None => self
                        .resolve(&ParamSite {
                            name: &name,
                            param,
                            default,
                        })
                        .unwrap_or_else(|| annotation_text(self.source, None)),
                };
                ParamInfo {
                    ty,
                    description: self.description(param.span.start),
                    is_optional: param.pattern.optional || binding.optional,
                    default_value: default.map(|expr| slice(self.source, expr.span()).to_string()),
                    name,
                }
            })
            .collect();

        if let Some(rest) = &params.rest {
            out.push(ParamInfo {
                name: self.binding_text(&rest.argument),
                ty: annotation_text(self.source, rest.argument.type_annotation.as_deref()),
                description: self.description(rest.span.start),
                is_optional: false,
                default_value: None,
            });
        }
        out
    }

    /// Resolution is best effort; a resolver returning nothing means "unknown".
    fn resolve(&self, site: &ParamSite<'_, '_>) -> Option<String> {
        self.resolver
            .resolve_param_type(site)
            .filter(|ty| !ty.trim().is_empty())
    }

    fn binding_text(&self, pattern: &BindingPattern<'_>) -> String {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(id) => id.name.to_string(),
            kind => slice(self.source, kind.span()).to_string(),
        }
    }

    fn function_info(&self, name: String, func: &Function<'_>, anchor: u32) -> FunctionInfo {
        FunctionInfo {
            name,
            params: self.params(&func.params),
            return_type: self.return_type(func.return_type.as_deref()),
            description: self.description(anchor),
            is_async: func.r#async,
            is_generator: func.generator,
        }
    }

    fn class_info(&self, name: String, class: &Class<'_>, anchor: u32) -> ClassInfo {
        let mut methods = Vec::new();
        let mut properties = Vec::new();

        for element in class.body.body.iter() {
            match element {
                ClassElement::MethodDefinition(method) if is_documented_method(method) => {
                    let name = member_name(self.source, &method.key, method.computed);
                    methods.push(MethodInfo {
                        function: self.function_info(name, &method.value, method.span.start),
                        is_static: method.r#static,
                        is_private: is_private_member(&method.key, method.accessibility),
                    });
                }
                ClassElement::PropertyDefinition(prop) => properties.push(PropertyInfo {
                    name: member_name(self.source, &prop.key, prop.computed),
                    ty: annotation_text(self.source, prop.type_annotation.as_deref()),
                    description: self.description(prop.span.start),
                    is_static: prop.r#static,
                    is_private: is_private_member(&prop.key, prop.accessibility),
                }),
                ClassElement::AccessorProperty(prop) => properties.push(PropertyInfo {
                    name: member_name(self.source, &prop.key, prop.computed),
                    ty: annotation_text(self.source, prop.type_annotation.as_deref()),
                    description: self.description(prop.span.start),
                    is_static: prop.r#static,
                    is_private: is_private_member(&prop.key, prop.accessibility),
                }),
                _ => {}
            }
        }

        ClassInfo {
            name,
            methods,
            properties,
            description: self.description(anchor),
        }
    }

    fn interface_info(&self, decl: &TSInterfaceDeclaration<'_>, anchor: u32) -> InterfaceInfo {
        let mut properties = Vec::new();
        let mut methods = Vec::new();

        for signature in decl.body.body.iter() {
            match signature {
                TSSignature::TSPropertySignature(prop) if prop.key.is_identifier() => {
                    properties.push(PropertyInfo {
                        name: member_name(self.source, &prop.key, prop.computed),
                        ty: annotation_text(self.source, prop.type_annotation.as_deref()),
                        description: self.description(prop.span.start),
                        is_static: false,
                        is_private: false,
                    });
                }
                TSSignature::TSMethodSignature(method)
                    if method.kind == TSMethodSignatureKind::Method && method.key.is_identifier() =>
                {
                    methods.push(MethodInfo {
                        function: FunctionInfo {
                            name: member_name(self.source, &method.key, method.computed),
                            params: self.params(&method.params),
                            return_type: self.return_type(method.return_type.as_deref()),
                            description: self.description(method.span.start),
                            is_async: false,
                            is_generator: false,
                        },
                        is_static: false,
                        is_private: false,
                    });
                }
                _ => {}
            }
        }

        InterfaceInfo {
            name: decl.id.name.to_string(),
            properties,
            methods,
            description: self.description(anchor),
        }
    }
}

/// Splits `x = 1` into the binding and its default expression.
fn split_default<'p, 'a>(
    pattern: &'p BindingPattern<'a>,
) -> (&'p BindingPattern<'a>, Option<&'p Expression<'a>>) {
    match &pattern.kind {
        BindingPatternKind::AssignmentPattern(assign) => (&assign.left, Some(&assign.right)),
        _ => (pattern, None),
    }
}

impl<'s, 'ast> Visit<'ast> for TreeWalker<'s> {
    fn visit_export_named_declaration(&mut self, export: &ExportNamedDeclaration<'ast>) {
        self.anchor.enter_named(export);
        walk::walk_export_named_declaration(self, export);
        self.anchor.leave();
    }

    fn visit_export_default_declaration(&mut self, export: &ExportDefaultDeclaration<'ast>) {
        self.anchor.enter_default(export);
        walk::walk_export_default_declaration(self, export);
        self.anchor.leave();
    }

    fn visit_function(&mut self, func: &Function<'ast>, flags: ScopeFlags) {
        if let Some(name) = function_name(func, &mut self.anchor) {
            let anchor = self.anchor.take(func.span.start);
            let info = self.function_info(name, func, anchor);
            self.analysis.functions.push(info);
        }
        walk::walk_function(self, func, flags);
    }

    fn visit_class(&mut self, class: &Class<'ast>) {
        if let Some(name) = class_name(class, &mut self.anchor) {
            let anchor = self.anchor.take(class.span.start);
            let info = self.class_info(name, class, anchor);
            self.analysis.classes.push(info);
        }
        walk::walk_class(self, class);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'ast>) {
        let is_constant = decl.kind == VariableDeclarationKind::Const;
        for (index, declarator) in decl.declarations.iter().enumerate() {
            let anchor = if index == 0 {
                self.anchor.take(decl.span.start)
            } else {
                declarator.span.start
            };
            let Some(name) = binding_identifier(&declarator.id) else {
                continue;
            };
            let description = self.description(anchor);

            if let Some(Expression::ArrowFunctionExpression(arrow)) = &declarator.init {
                self.analysis.functions.push(FunctionInfo {
                    name: name.to_string(),
                    params: self.params(&arrow.params),
                    return_type: self.return_type(arrow.return_type.as_deref()),
                    description: description.clone(),
                    is_async: arrow.r#async,
                    is_generator: false,
                });
            }

            self.analysis.variables.push(VariableInfo {
                name: name.to_string(),
                ty: annotation_text(self.source, declarator.id.type_annotation.as_deref()),
                description,
                is_constant,
            });
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_ts_interface_declaration(&mut self, decl: &TSInterfaceDeclaration<'ast>) {
        let anchor = self.anchor.take(decl.span.start);
        let info = self.interface_info(decl, anchor);
        self.analysis.interfaces.push(info);
        walk::walk_ts_interface_declaration(self, decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> FileAnalysis {
        CodeAnalyzer::default()
            .analyze_source("input.ts", source)
            .expect("analysis should succeed")
    }

    #[test]
    fn nested_functions_are_flat() {
        let analysis = analyze("function outer() {\n  function inner() {}\n}\n");
        let names: Vec<_> = analysis.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["outer", "inner"]);
    }

    #[test]
    fn arrow_bound_to_variable_is_a_function_and_a_variable() {
        let analysis = analyze("const add = async (a: number, b = 2): Promise<number> => a + b;\n");
        let add = &analysis.functions[0];
        assert_eq!(add.name, "add");
        assert!(add.is_async);
        assert_eq!(add.return_type, "Promise<number>");
        assert_eq!(add.params[1].ty, "number");
        assert_eq!(add.params[1].default_value.as_deref(), Some("2"));
        assert_eq!(analysis.variables[0].name, "add");
        assert!(analysis.variables[0].is_constant);
    }

    #[test]
    fn unbound_function_expressions_are_ignored() {
        let analysis = analyze("run(function () {});\nrun(() => 1);\n");
        assert!(analysis.functions.is_empty());
    }

    #[test]
    fn overload_signatures_are_skipped() {
        let analysis =
            analyze("function f(a: string): void;\nfunction f(a: any): void {}\n");
        assert_eq!(analysis.functions.len(), 1);
        assert_eq!(analysis.functions[0].params[0].ty, "any");
    }

    #[test]
    fn default_export_sentinels() {
        let analysis = analyze("export default function () {}\n");
        assert_eq!(analysis.functions[0].name, "anonymous");
        let analysis = analyze("export default class {}\n");
        assert_eq!(analysis.classes[0].name, "AnonymousClass");
    }

    #[test]
    fn exported_declaration_reads_comment_before_export() {
        let analysis = analyze("/** Greets. */\nexport function greet(name: string) {}\n");
        assert_eq!(
            analysis.functions[0].description.as_deref(),
            Some("/** Greets. */")
        );
    }

    #[test]
    fn destructured_variables_are_skipped() {
        let analysis = analyze("const { a, b } = obj;\nlet c;\n");
        assert_eq!(analysis.variables.len(), 1);
        assert_eq!(analysis.variables[0].name, "c");
        assert!(!analysis.variables[0].is_constant);
        assert_eq!(analysis.variables[0].ty, "any");
    }

    #[test]
    fn rest_and_optional_parameters() {
        let analysis = analyze("function f(a?: string, ...rest: number[]) {}\n");
        let params = &analysis.functions[0].params;
        assert!(params[0].is_optional);
        assert_eq!(params[0].ty, "string");
        assert_eq!(params[1].name, "rest");
        assert_eq!(params[1].ty, "number[]");
    }

    #[test]
    fn inference_can_be_disabled() {
        let analyzer = CodeAnalyzer::new(AnalyzeOptions {
            type_inference: TypeInference::Disabled,
        });
        let analysis = analyzer
            .analyze_source("input.js", "function f(a = 1) {}\n")
            .unwrap();
        assert_eq!(analysis.functions[0].params[0].ty, "any");
    }
}
