use super::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Helper {
    If,
    Unless,
    Each,
}

impl Helper {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Self::If),
            "unless" => Some(Self::Unless),
            "each" => Some(Self::Each),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::Each => "each",
        }
    }
}

/// A lookup path, resolved against the current scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Key {
    Field(String),
    This,
    Index,
    Last,
    Parent(Box<Key>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Literal text; a newline only ever appears as the last character.
    Text(String),
    Var(Key),
    Open {
        helper: Helper,
        key: Key,
        offset: usize,
    },
    Else {
        offset: usize,
    },
    Close {
        name: String,
        offset: usize,
    },
}

impl Token {
    fn is_block_tag(&self) -> bool {
        matches!(self, Token::Open { .. } | Token::Else { .. } | Token::Close { .. })
    }
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];

        if rest.starts_with("{{{{") {
            text.push('{');
            pos += 1;
            continue;
        }

        if let Some(after) = rest.strip_prefix("{{{") {
            let end = after
                .find("}}}")
                .ok_or(TemplateError::UnterminatedTag { offset: pos })?;
            flush_text(&mut tokens, &mut text);
            tokens.push(Token::Var(parse_key(&after[..end], pos)?));
            pos += 3 + end + 3;
            continue;
        }

        if let Some(after) = rest.strip_prefix("{{") {
            let end = after
                .find("}}")
                .ok_or(TemplateError::UnterminatedTag { offset: pos })?;
            flush_text(&mut tokens, &mut text);
            tokens.push(classify(&after[..end], pos)?);
            pos += 2 + end + 2;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        text.push(ch);
        pos += ch.len_utf8();
        if ch == '\n' {
            flush_text(&mut tokens, &mut text);
        }
    }
    flush_text(&mut tokens, &mut text);

    Ok(strip_standalone_lines(tokens))
}

fn flush_text(tokens: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

fn classify(inner: &str, offset: usize) -> Result<Token, TemplateError> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Err(TemplateError::EmptyTag { offset });
    }

    if let Some(open) = inner.strip_prefix('#') {
        let (name, key) = open
            .split_once(char::is_whitespace)
            .unwrap_or((open, ""));
        let helper = Helper::parse(name).ok_or_else(|| TemplateError::UnknownHelper {
            name: name.to_string(),
            offset,
        })?;
        return Ok(Token::Open {
            helper,
            key: parse_key(key, offset)?,
            offset,
        });
    }

    if let Some(name) = inner.strip_prefix('/') {
        return Ok(Token::Close {
            name: name.trim().to_string(),
            offset,
        });
    }

    if inner == "else" {
        return Ok(Token::Else { offset });
    }

    Ok(Token::Var(parse_key(inner, offset)?))
}

fn parse_key(raw: &str, offset: usize) -> Result<Key, TemplateError> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("../") {
        return Ok(Key::Parent(Box::new(parse_key(rest, offset)?)));
    }
    match raw {
        "this" => return Ok(Key::This),
        "@index" => return Ok(Key::Index),
        "@last" => return Ok(Key::Last),
        _ => {}
    }
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$');
    if valid {
        Ok(Key::Field(raw.to_string()))
    } else {
        Err(TemplateError::InvalidKey {
            key: raw.to_string(),
            offset,
        })
    }
}

/// Drops the whitespace (and newline) of lines that hold only block tags.
fn strip_standalone_lines(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut line = Vec::new();
    for token in tokens {
        let ends_line = matches!(&token, Token::Text(text) if text.ends_with('\n'));
        line.push(token);
        if ends_line {
            flush_line(&mut out, &mut line);
        }
    }
    flush_line(&mut out, &mut line);
    out
}

fn flush_line(out: &mut Vec<Token>, line: &mut Vec<Token>) {
    let has_block = line.iter().any(Token::is_block_tag);
    let blank_otherwise = line.iter().all(|token| match token {
        Token::Text(text) => text.trim().is_empty(),
        Token::Var(_) => false,
        _ => true,
    });
    if has_block && blank_otherwise {
        out.extend(line.drain(..).filter(Token::is_block_tag));
    } else {
        out.append(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_text_at_newlines() {
        let tokens = tokenize("a\nb").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Text("a\n".into()), Token::Text("b".into())]
        );
    }

    #[test]
    fn parses_keys() {
        assert_eq!(parse_key("../name", 0).unwrap(), Key::Parent(Box::new(Key::Field("name".into()))));
        assert_eq!(parse_key("@last", 0).unwrap(), Key::Last);
        assert!(parse_key("a b", 0).is_err());
    }

    #[test]
    fn standalone_line_keeps_tag_only() {
        let tokens = tokenize("  {{#if x}}  \nbody").unwrap();
        assert!(matches!(tokens[0], Token::Open { .. }));
        assert_eq!(tokens[1], Token::Text("body".into()));
    }
}
