//! Text-only removal of low-value comments.
//!
//! Works without a parse, so it also handles files the parser rejects. Quoted
//! strings and template literals are skipped over so `//` or `/**/` inside them
//! is never mistaken for a comment. Regex literals are not recognised.

use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate comments: line comments and (non-nested) block comments. String
/// literals are matched as well so the scan steps over them.
static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"'(?:[^'\\\r\n]|\\.)*'|"(?:[^"\\\r\n]|\\.)*"|`(?:[^`\\]|\\[\s\S])*`"#,
        r"|//[^\r\n]*|/\*[\s\S]*?\*/",
    ))
    .expect("valid comment regex")
});

/// Empty line comments, bare task markers and separator runs.
static LINE_GARBAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^//[ \t]*(?:(?i:TODO|FIXME|HACK|NOTE|XXX)[ \t]*:?|-{3,}|={3,})?[ \t]*$")
        .expect("valid line garbage regex")
});

/// Block comments with an empty body or a single bare tag.
static BLOCK_GARBAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/\*\*?[\s*]*(?:@[A-Za-z]+[\s*]*)?\*/$").expect("valid block garbage regex")
});

/// Three or more consecutive blank lines. Captures the line terminator.
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^[ \t]*(\r?\n)){3,}").expect("valid blank line regex"));

/// Whether an isolated comment (delimiters included) is low-value.
pub fn is_garbage_comment(comment: &str) -> bool {
    let comment = comment.trim();
    if comment.starts_with("//") {
        LINE_GARBAGE.is_match(comment)
    } else {
        BLOCK_GARBAGE.is_match(comment)
    }
}

/// Result of cleaning one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// Number of comments removed.
    pub removed: usize,
}

impl Cleaned {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentCleaner;

impl CommentCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Remove garbage comments, then collapse runs of blank lines to one.
    ///
    /// A comment that is alone on its line takes the whole line with it.
    pub fn clean(&self, text: &str) -> Cleaned {
        let mut out = String::with_capacity(text.len());
        let mut copied_to = 0;
        let mut removed = 0;

        for found in COMMENT.find_iter(text) {
            if found.as_str().starts_with(['\'', '"', '`']) {
                continue;
            }
            if found.start() < copied_to || !is_garbage_comment(found.as_str()) {
                continue;
            }
            let (start, end) = removal_range(text, found.start(), found.end());
            out.push_str(&text[copied_to..start]);
            copied_to = end;
            removed += 1;
        }
        out.push_str(&text[copied_to..]);

        let text = BLANK_RUN.replace_all(&out, "${1}").into_owned();
        Cleaned { text, removed }
    }
}

/// Byte range to delete for a garbage comment at `start..end`.
fn removal_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = text[..start].rfind('\n').map_or(0, |pos| pos + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |pos| end + pos);
    let before = &text[line_start..start];
    let after = &text[end..line_end];

    if before.trim().is_empty() && after.trim().is_empty() {
        let through_newline = if line_end < text.len() { line_end + 1 } else { line_end };
        return (line_start, through_newline);
    }

    let trimmed_start = start - (before.len() - before.trim_end_matches([' ', '\t']).len());
    (trimmed_start, end)
}
