//! Inserting rendered comments before their declarations.
//!
//! The source is re-parsed on every call, so offsets always refer to the text
//! being rewritten. Insertions are applied from the end of the file backwards:
//! each insertion only shifts text after it, which has already been handled.

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use rustc_hash::FxHashSet;

use crate::comments::CommentIndex;
use crate::error::Result;
use crate::parser::{parse, ParseOptions};
use crate::render::CommentMap;
use crate::sites::{Site, SiteCollector};

/// Options for [`CommentInjector`].
#[derive(Debug, Clone)]
pub struct InjectOptions {
    pub parse: ParseOptions,
    /// Also place `Class.member` comments on class members.
    pub include_members: bool,
    /// Indent inserted comments to match the declaration's line.
    pub reindent: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::typescript(),
            include_members: true,
            reindent: true,
        }
    }
}

/// One planned insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Byte offset in the original text.
    pub offset: u32,
    /// Identifier the comment was looked up under.
    pub key: String,
    /// Exact text inserted at `offset`.
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommentInjector {
    options: InjectOptions,
}

impl CommentInjector {
    pub fn new(options: InjectOptions) -> Self {
        Self { options }
    }

    /// Insertions for `source`, sorted by descending offset.
    ///
    /// Declarations that already have a leading comment are skipped, and at
    /// most one comment is placed at any offset.
    pub fn plan(&self, source: &str, comments: &CommentMap) -> Result<Vec<Insertion>> {
        let allocator = Allocator::default();
        let parsed = parse(&allocator, source, &self.options.parse)?;
        let index = CommentIndex::new(parsed.program.comments.iter());

        let mut collector = SiteCollector::new(source, self.options.include_members);
        collector.visit_program(&parsed.program);

        let mut insertions: Vec<Insertion> = Vec::new();
        let mut taken: FxHashSet<u32> = FxHashSet::default();
        for Site { key, anchor } in collector.sites {
            let Some(comment) = comments.get(&key) else {
                continue;
            };
            if index.has_leading(source, anchor) {
                tracing::debug!(%key, "declaration already documented, skipping");
                continue;
            }
            if !taken.insert(anchor) {
                continue;
            }
            let text = self.insertion_text(source, anchor, comment);
            insertions.push(Insertion {
                offset: anchor,
                key,
                text,
            });
        }

        insertions.sort_by(|a, b| b.offset.cmp(&a.offset));
        Ok(insertions)
    }

    /// Return `source` with every planned comment inserted.
    pub fn inject(&self, source: &str, comments: &CommentMap) -> Result<String> {
        let insertions = self.plan(source, comments)?;
        Ok(apply(source, &insertions))
    }

    /// Like [`inject`](Self::inject), also returning how many comments were inserted.
    pub fn inject_counted(&self, source: &str, comments: &CommentMap) -> Result<(String, usize)> {
        let insertions = self.plan(source, comments)?;
        Ok((apply(source, &insertions), insertions.len()))
    }

    /// Identifier → first leading comment, for every recognised declaration that has one.
    pub fn existing_comments(&self, source: &str) -> Result<CommentMap> {
        let allocator = Allocator::default();
        let parsed = parse(&allocator, source, &self.options.parse)?;
        let index = CommentIndex::new(parsed.program.comments.iter());

        let mut collector = SiteCollector::new(source, self.options.include_members);
        collector.visit_program(&parsed.program);

        let mut existing = CommentMap::new();
        for Site { key, anchor } in collector.sites {
            if let Some(text) = index.leading_text(source, anchor) {
                existing.insert(key, text.to_string());
            }
        }
        Ok(existing)
    }

    /// A declaration sharing its line with earlier code gets the comment on a
    /// line of its own; otherwise it would not lead the declaration.
    fn insertion_text(&self, source: &str, anchor: u32, comment: &str) -> String {
        match line_indent(source, anchor as usize) {
            None => format!("\n{comment}\n"),
            Some(indent) if self.options.reindent && !indent.is_empty() => {
                let mut text = String::with_capacity(comment.len() + indent.len() * 8);
                for (index, line) in comment.lines().enumerate() {
                    if index > 0 {
                        text.push_str(indent);
                    }
                    text.push_str(line);
                    text.push('\n');
                }
                text.push_str(indent);
                text
            }
            Some(_) => format!("{comment}\n"),
        }
    }
}

/// Indentation of the line containing `offset`, if `offset` is the first
/// non-blank character of that line.
fn line_indent(source: &str, offset: usize) -> Option<&str> {
    let line_start = source[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let prefix = &source[line_start..offset];
    prefix
        .chars()
        .all(|ch| ch == ' ' || ch == '\t')
        .then_some(prefix)
}

/// Apply insertions sorted by descending offset.
fn apply(source: &str, insertions: &[Insertion]) -> String {
    let extra: usize = insertions.iter().map(|insertion| insertion.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    out.push_str(source);
    for insertion in insertions {
        out.insert_str(insertion.offset as usize, &insertion.text);
    }
    out
}
