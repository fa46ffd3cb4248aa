//! Declaration recognition shared by the extractor and the injector.

use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassElement, ClassType, Declaration,
    ExportDefaultDeclaration, ExportDefaultDeclarationKind, ExportNamedDeclaration, Function,
    FunctionType, MethodDefinition, MethodDefinitionKind, MethodDefinitionType, PropertyKey,
    TSAccessibility, TSInterfaceDeclaration, TSTypeAnnotation, VariableDeclaration,
};
use oxc_ast_visit::{walk, Visit};
use oxc_semantic::ScopeFlags;
use oxc_span::{GetSpan, Span};

use crate::model::{ANONYMOUS_CLASS, ANONYMOUS_FUNCTION, UNKNOWN_TYPE};
use crate::render::interface_key;

/// Anchor of declarations wrapped in `export` / `export default`.
///
/// The wrapped declaration takes the pending offset; anything nested deeper
/// falls back to its own start.
#[derive(Debug, Default)]
pub(crate) struct ExportAnchor {
    pending: Option<u32>,
    anonymous_default: bool,
}

impl ExportAnchor {
    pub fn enter_named(&mut self, export: &ExportNamedDeclaration<'_>) {
        let anchors = matches!(
            export.declaration,
            Some(
                Declaration::FunctionDeclaration(_)
                    | Declaration::ClassDeclaration(_)
                    | Declaration::VariableDeclaration(_)
                    | Declaration::TSInterfaceDeclaration(_)
            )
        );
        if anchors {
            let decorated = match &export.declaration {
                Some(Declaration::ClassDeclaration(class)) => decorator_start(class),
                _ => None,
            };
            self.pending = Some(earliest(export.span.start, decorated));
        }
    }

    pub fn enter_default(&mut self, export: &ExportDefaultDeclaration<'_>) {
        let (unnamed, decorated) = match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => (func.id.is_none(), None),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                (class.id.is_none(), decorator_start(class))
            }
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => (false, None),
            _ => return,
        };
        self.pending = Some(earliest(export.span.start, decorated));
        self.anonymous_default = unnamed;
    }

    pub fn leave(&mut self) {
        self.pending = None;
        self.anonymous_default = false;
    }

    pub fn take(&mut self, own_start: u32) -> u32 {
        self.pending.take().unwrap_or(own_start)
    }

    pub fn take_anonymous(&mut self) -> bool {
        std::mem::take(&mut self.anonymous_default)
    }
}

/// Decorators written before `export` sit outside the export span.
fn decorator_start(class: &Class<'_>) -> Option<u32> {
    class.decorators.iter().map(|decorator| decorator.span.start).min()
}

fn earliest(start: u32, other: Option<u32>) -> u32 {
    other.map_or(start, |other| other.min(start))
}

/// Name of a recognised function declaration, or `None` for other function kinds.
///
/// Overload signatures and `declare function` have no body and are skipped.
pub(crate) fn function_name(func: &Function<'_>, anchor: &mut ExportAnchor) -> Option<String> {
    if func.r#type != FunctionType::FunctionDeclaration || func.body.is_none() {
        return None;
    }
    match &func.id {
        Some(id) => Some(id.name.to_string()),
        None if anchor.take_anonymous() => Some(ANONYMOUS_FUNCTION.to_string()),
        None => None,
    }
}

/// Name of a recognised class declaration.
pub(crate) fn class_name(class: &Class<'_>, anchor: &mut ExportAnchor) -> Option<String> {
    if class.r#type != ClassType::ClassDeclaration {
        return None;
    }
    match &class.id {
        Some(id) => Some(id.name.to_string()),
        None if anchor.take_anonymous() => Some(ANONYMOUS_CLASS.to_string()),
        None => None,
    }
}

/// Methods that count as documented members: plain methods with a body, or abstract ones.
pub(crate) fn is_documented_method(method: &MethodDefinition<'_>) -> bool {
    method.kind == MethodDefinitionKind::Method
        && (method.value.body.is_some()
            || method.r#type == MethodDefinitionType::TSAbstractMethodDefinition)
}

/// Declared text of a member key. Private names keep `#`, computed keys keep brackets.
pub(crate) fn member_name(source: &str, key: &PropertyKey<'_>, computed: bool) -> String {
    match key {
        PropertyKey::StaticIdentifier(id) => id.name.to_string(),
        PropertyKey::PrivateIdentifier(id) => format!("#{}", id.name),
        _ if computed => format!("[{}]", slice(source, key.span())),
        _ => slice(source, key.span()).to_string(),
    }
}

pub(crate) fn is_private_member(key: &PropertyKey<'_>, accessibility: Option<TSAccessibility>) -> bool {
    matches!(key, PropertyKey::PrivateIdentifier(_))
        || accessibility == Some(TSAccessibility::Private)
}

/// The identifier of a single-name binding; destructuring yields `None`.
pub(crate) fn binding_identifier<'p>(pattern: &'p BindingPattern<'_>) -> Option<&'p str> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// Source text of an annotation, or the unknown-type placeholder.
pub(crate) fn annotation_text(source: &str, annotation: Option<&TSTypeAnnotation<'_>>) -> String {
    annotation
        .map(|ann| slice(source, ann.type_annotation.span()).trim())
        .filter(|text| !text.is_empty())
        .unwrap_or(UNKNOWN_TYPE)
        .to_string()
}

pub(crate) fn slice(source: &str, span: Span) -> &str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
}

/// A position where the injector may place a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Site {
    pub key: String,
    pub anchor: u32,
}

/// Collects injection sites in pre-order.
pub(crate) struct SiteCollector<'s> {
    source: &'s str,
    include_members: bool,
    anchor: ExportAnchor,
    pub sites: Vec<Site>,
}

impl<'s> SiteCollector<'s> {
    pub fn new(source: &'s str, include_members: bool) -> Self {
        Self {
            source,
            include_members,
            anchor: ExportAnchor::default(),
            sites: Vec::new(),
        }
    }

    fn push(&mut self, key: String, anchor: u32) {
        self.sites.push(Site { key, anchor });
    }

    fn collect_members(&mut self, class_name: &str, class: &Class<'_>) {
        for element in class.body.body.iter() {
            let (key, computed) = match element {
                ClassElement::MethodDefinition(method) if is_documented_method(method) => {
                    (&method.key, method.computed)
                }
                ClassElement::PropertyDefinition(prop) => (&prop.key, prop.computed),
                ClassElement::AccessorProperty(prop) => (&prop.key, prop.computed),
                _ => continue,
            };
            let name = member_name(self.source, key, computed);
            self.push(format!("{class_name}.{name}"), element.span().start);
        }
    }
}

impl<'s, 'ast> Visit<'ast> for SiteCollector<'s> {
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
            self.push(name, anchor);
        }
        walk::walk_function(self, func, flags);
    }

    fn visit_class(&mut self, class: &Class<'ast>) {
        if let Some(name) = class_name(class, &mut self.anchor) {
            let anchor = self.anchor.take(class.span.start);
            self.push(name.clone(), anchor);
            if self.include_members {
                self.collect_members(&name, class);
            }
        }
        walk::walk_class(self, class);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'ast>) {
        for (index, declarator) in decl.declarations.iter().enumerate() {
            let anchor = if index == 0 {
                self.anchor.take(decl.span.start)
            } else {
                declarator.span.start
            };
            if let Some(name) = binding_identifier(&declarator.id) {
                self.push(name.to_string(), anchor);
            }
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_ts_interface_declaration(&mut self, decl: &TSInterfaceDeclaration<'ast>) {
        let anchor = self.anchor.take(decl.span.start);
        self.push(interface_key(&decl.id.name), anchor);
        walk::walk_ts_interface_declaration(self, decl);
    }
}
