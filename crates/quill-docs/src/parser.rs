//! Parser façade over OXC.
//!
//! Recoverable syntax errors are kept as diagnostics and the partial tree is
//! used. When the parser gives up entirely we first retry with alternative
//! source types, since mislabelled files (JSX in `.js`, TSX in `.ts`) are common.
//! If every source type gives up, the line holding the earliest error is blanked
//! out with spaces and the text is parsed again. Byte offsets are unchanged, so
//! spans from the recovered tree still index into the original text.

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{DocsError, Result};

/// Upper bound on blanked lines before a file is reported as unparsable.
const MAX_RECOVERY_ATTEMPTS: usize = 32;

/// Parse options for reading source code.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source type (JavaScript, TypeScript, JSX, TSX).
    pub source_type: SourceType,
    /// Retry with other source types when the primary one fails outright.
    pub fallback: bool,
    /// Origin of the text, used in error messages.
    pub path: Option<PathBuf>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::typescript()
    }
}

impl ParseOptions {
    /// Create parse options from a file path (auto-detects source type).
    ///
    /// Unknown extensions are parsed as TypeScript, which accepts plain JavaScript too.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            source_type: SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts()),
            fallback: true,
            path: Some(path.to_path_buf()),
        }
    }

    /// Create parse options for TypeScript.
    pub fn typescript() -> Self {
        Self {
            source_type: SourceType::ts(),
            fallback: true,
            path: None,
        }
    }

    /// Create parse options for TSX.
    pub fn tsx() -> Self {
        Self {
            source_type: SourceType::tsx(),
            ..Self::typescript()
        }
    }

    /// Create parse options for JSX.
    pub fn jsx() -> Self {
        Self {
            source_type: SourceType::jsx(),
            ..Self::typescript()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn candidates(&self) -> Vec<SourceType> {
        let mut types = vec![self.source_type];
        if self.fallback {
            for alternative in [SourceType::tsx(), SourceType::ts(), SourceType::jsx()] {
                if !types.contains(&alternative) {
                    types.push(alternative);
                }
            }
        }
        types
    }

    fn display_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<source>"))
    }
}

/// A recoverable parse error.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    /// Error message.
    pub message: String,
}

/// Parsed program with the text it was parsed from.
pub struct ParsedSource<'a> {
    /// The parsed AST program.
    pub program: Program<'a>,
    /// Recoverable errors reported while parsing.
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Original source text. All spans index into this.
    pub source_text: &'a str,
    /// Source type that produced `program`.
    pub source_type: SourceType,
}

impl<'a> ParsedSource<'a> {
    /// Get the program AST.
    pub fn ast(&self) -> &Program<'a> {
        &self.program
    }

    /// Check if parsing had recoverable errors.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse source code into an AST, tolerating recoverable errors.
///
/// The first source type that parses cleanly wins. Otherwise the first tree
/// that parsed with recoverable errors is returned.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: &ParseOptions,
) -> Result<ParsedSource<'a>> {
    let mut failures = Vec::new();
    let mut partial: Option<ParsedSource<'a>> = None;

    for source_type in options.candidates() {
        let result = Parser::new(allocator, source, source_type).parse();
        let diagnostics: Vec<ParseDiagnostic> = result
            .errors
            .iter()
            .map(|err| ParseDiagnostic {
                message: err.to_string(),
            })
            .collect();

        if result.panicked {
            tracing::debug!(
                path = %options.display_path().display(),
                ?source_type,
                "parser gave up, trying next source type"
            );
            failures.extend(diagnostics.into_iter().map(|d| d.message));
            continue;
        }

        let parsed = ParsedSource {
            program: result.program,
            diagnostics,
            source_text: source,
            source_type,
        };
        if !parsed.has_errors() {
            return Ok(parsed);
        }
        if partial.is_none() {
            partial = Some(parsed);
        }
    }

    if let Some(parsed) = partial {
        tracing::warn!(
            path = %options.display_path().display(),
            errors = parsed.diagnostics.len(),
            "tolerating syntax errors"
        );
        return Ok(parsed);
    }

    if let Some(parsed) = recover(allocator, source, options) {
        return Ok(parsed);
    }

    if failures.is_empty() {
        failures.push("parser produced no program".to_string());
    }
    Err(DocsError::parse_error(options.display_path(), &failures))
}

/// Blank the offending line and re-parse until the parser stops giving up.
fn recover<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: &ParseOptions,
) -> Option<ParsedSource<'a>> {
    let mut text = source.to_string();
    let mut skipped = Vec::new();

    for _ in 0..MAX_RECOVERY_ATTEMPTS {
        let attempt: &'a str = allocator.alloc_str(&text);
        let result = Parser::new(allocator, attempt, options.source_type).parse();

        if !result.panicked {
            let mut diagnostics: Vec<ParseDiagnostic> = skipped
                .iter()
                .map(|line| ParseDiagnostic {
                    message: format!("skipped unparsable line {line}"),
                })
                .collect();
            diagnostics.extend(result.errors.iter().map(|err| ParseDiagnostic {
                message: err.to_string(),
            }));
            tracing::warn!(
                path = %options.display_path().display(),
                skipped = skipped.len(),
                "recovered from syntax errors by skipping lines"
            );
            return Some(ParsedSource {
                program: result.program,
                diagnostics,
                source_text: source,
                source_type: options.source_type,
            });
        }

        let offset = result
            .errors
            .iter()
            .filter_map(|err| err.labels.as_ref())
            .flat_map(|labels| labels.iter().map(|label| label.offset()))
            .min()
            .unwrap_or(text.len());
        let line = blank_line_at(&mut text, offset)?;
        skipped.push(line);
    }

    None
}

/// Replace every byte of the line containing `offset` with a space, keeping
/// line terminators. Falls back to the nearest earlier non-blank line.
///
/// Returns the 1-based line number, or `None` when nothing is left to blank.
fn blank_line_at(text: &mut String, offset: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = offset.min(bytes.len());
    loop {
        let start = bytes[..end]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line_end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map_or(bytes.len(), |i| start + i);

        if bytes[start..line_end].iter().any(|b| !b.is_ascii_whitespace()) {
            let line = bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1;
            let blanked = " ".repeat(line_end - start);
            text.replace_range(start..line_end, &blanked);
            return Some(line);
        }
        if start == 0 {
            return None;
        }
        end = start - 1;
    }
}
