//! Reading the text of an existing comment.

/// Body lines of a raw comment with delimiters and leading `*` removed.
pub fn comment_lines(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if let Some(line) = trimmed.strip_prefix("//") {
        return vec![line.trim().to_string()];
    }
    let inner = trimmed
        .strip_prefix("/**")
        .or_else(|| trimmed.strip_prefix("/*"))
        .unwrap_or(trimmed);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

/// Summary text of a comment: every line before the first tag, joined by spaces.
///
/// Returns `None` when the comment has no summary text.
pub fn summary(raw: &str) -> Option<String> {
    let summary = comment_lines(raw)
        .into_iter()
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.starts_with('@'))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    if summary.is_empty() {
        None
    } else {
        Some(summary.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_block_delimiters_and_stars() {
        let raw = "/**\n * Adds two numbers.\n * Fast.\n * @param a first\n */";
        assert_eq!(summary(raw).as_deref(), Some("Adds two numbers. Fast."));
    }

    #[test]
    fn line_comment_summary() {
        assert_eq!(summary("// hello there").as_deref(), Some("hello there"));
    }

    #[test]
    fn tag_only_comment_has_no_summary() {
        assert_eq!(summary("/** @internal */"), None);
        assert_eq!(summary("/**\n */"), None);
    }

    #[test]
    fn single_line_block() {
        assert_eq!(comment_lines("/* x */"), vec!["x".to_string()]);
    }
}
