//! Leading-comment lookup over the original source text.

use oxc_ast::ast::Comment;
use oxc_span::Span;

/// Sorted comment spans of one parse, queried by declaration start offset.
///
/// A comment leads a declaration when only whitespace and other comments sit
/// between them. Comments on the same line as the previous token belong to
/// that token instead, except at the very start of the file.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    spans: Vec<Span>,
}

impl CommentIndex {
    pub fn new<'c>(comments: impl IntoIterator<Item = &'c Comment>) -> Self {
        let mut spans: Vec<Span> = comments.into_iter().map(|comment| comment.span).collect();
        spans.sort_unstable_by_key(|span| span.start);
        Self { spans }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Span of the first leading comment of the node starting at `start`.
    pub fn leading(&self, source: &str, start: u32) -> Option<Span> {
        let before = self.spans.partition_point(|span| span.end <= start);

        let mut run = Vec::new();
        let mut cursor = start as usize;
        for span in self.spans[..before].iter().rev() {
            let gap = source.get(span.end as usize..cursor)?;
            if !gap.trim().is_empty() {
                break;
            }
            run.push(*span);
            cursor = span.start as usize;
        }
        if run.is_empty() {
            return None;
        }
        run.reverse();

        let previous_token_end = source[..cursor].trim_end().len();
        let mut collecting = previous_token_end == 0;
        let mut gap_start = previous_token_end;
        for span in run {
            if source[gap_start..span.start as usize].contains('\n') {
                collecting = true;
            }
            if collecting {
                return Some(span);
            }
            gap_start = span.end as usize;
        }
        None
    }

    /// Text of the first leading comment of the node starting at `start`, delimiters included.
    pub fn leading_text<'s>(&self, source: &'s str, start: u32) -> Option<&'s str> {
        self.leading(source, start)
            .and_then(|span| source.get(span.start as usize..span.end as usize))
    }

    pub fn has_leading(&self, source: &str, start: u32) -> bool {
        self.leading(source, start).is_some()
    }
}
