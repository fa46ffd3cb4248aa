#![deny(clippy::all)]

//! Documentation comment tooling for JavaScript and TypeScript sources.
//!
//! This crate provides:
//! - A structural extractor that turns an OXC syntax tree into a flat metadata model.
//! - Two comment renderers: fixed section assembly and a small template language.
//! - An injector that inserts rendered comments before their declarations.
//! - A text-only cleaner that strips low-value comments.
//! - A batch pipeline that runs the above over a [`SourceStore`].

pub mod cleaner;
pub mod comments;
pub mod error;
pub mod extractor;
pub mod injector;
pub mod jsdoc;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod template;

mod sites;

pub use cleaner::{is_garbage_comment, Cleaned, CommentCleaner};
pub use comments::CommentIndex;
pub use error::{DocsError, Result};
pub use extractor::{AnalyzeOptions, CodeAnalyzer};
pub use injector::{CommentInjector, InjectOptions, Insertion};
pub use model::{
    ClassInfo, FileAnalysis, FunctionInfo, InterfaceInfo, MethodInfo, ParamInfo, PropertyInfo,
    VariableInfo,
};
pub use parser::{parse, ParseDiagnostic, ParseOptions, ParsedSource};
pub use pipeline::{
    BatchReport, FileOutcome, FsStore, MemoryStore, Pipeline, PipelineOptions, SkippedFile,
    SourceStore,
};
pub use render::{
    build_comment_map, interface_key, renderer_for, CommentGenerator, CommentMap, CommentRenderer, RenderOptions,
    TemplateOverrides, TemplateRenderer, TemplateSet,
};
pub use resolver::{InitializerTypeResolver, NoopTypeResolver, ParamSite, TypeInference, TypeResolver};
pub use template::{Template, TemplateError};
