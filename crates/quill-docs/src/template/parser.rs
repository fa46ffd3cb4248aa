use super::lexer::{Helper, Key, Token};
use super::TemplateError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Var(Key),
    If {
        key: Key,
        negate: bool,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Each {
        key: Key,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

enum End {
    Eof,
    Else,
    Close,
}

pub(crate) fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };
    let (nodes, _) = parser.block(None)?;
    Ok(nodes)
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    /// Parses nodes until the end of input, or until `{{else}}` / the closing tag of `open`.
    fn block(&mut self, open: Option<(Helper, usize)>) -> Result<(Vec<Node>, End), TemplateError> {
        let mut nodes = Vec::new();
        loop {
            let Some(token) = self.tokens.next() else {
                return match open {
                    Some((helper, offset)) => Err(TemplateError::UnclosedBlock {
                        helper: helper.name().to_string(),
                        offset,
                    }),
                    None => Ok((nodes, End::Eof)),
                };
            };

            match token {
                Token::Text(text) => match nodes.last_mut() {
                    Some(Node::Text(previous)) => previous.push_str(&text),
                    _ => nodes.push(Node::Text(text)),
                },
                Token::Var(key) => nodes.push(Node::Var(key)),
                Token::Open {
                    helper,
                    key,
                    offset,
                } => nodes.push(self.helper_block(helper, key, offset)?),
                Token::Else { offset } => {
                    if open.is_none() {
                        return Err(TemplateError::UnexpectedElse { offset });
                    }
                    return Ok((nodes, End::Else));
                }
                Token::Close { name, offset } => {
                    return match open {
                        None => Err(TemplateError::UnexpectedClose {
                            helper: name,
                            offset,
                        }),
                        Some((helper, _)) if helper.name() == name => Ok((nodes, End::Close)),
                        Some((helper, _)) => Err(TemplateError::MismatchedClose {
                            expected: helper.name().to_string(),
                            found: name,
                            offset,
                        }),
                    };
                }
            }
        }
    }

    fn helper_block(&mut self, helper: Helper, key: Key, offset: usize) -> Result<Node, TemplateError> {
        let (body, end) = self.block(Some((helper, offset)))?;
        let otherwise = match end {
            End::Else => match self.block(Some((helper, offset)))? {
                (nodes, End::Close) => nodes,
                _ => return Err(TemplateError::UnexpectedElse { offset }),
            },
            _ => Vec::new(),
        };

        Ok(match helper {
            Helper::If => Node::If {
                key,
                negate: false,
                then: body,
                otherwise,
            },
            Helper::Unless => Node::If {
                key,
                negate: true,
                then: body,
                otherwise,
            },
            Helper::Each => Node::Each {
                key,
                body,
                otherwise,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::lexer::tokenize;

    #[test]
    fn nests_blocks() {
        let nodes = parse(tokenize("{{#each xs}}{{#if y}}a{{/if}}{{/each}}").unwrap()).unwrap();
        let [Node::Each { body, .. }] = nodes.as_slice() else {
            panic!("expected a single each block");
        };
        assert!(matches!(body.as_slice(), [Node::If { negate: false, .. }]));
    }

    #[test]
    fn second_else_is_rejected() {
        let result = parse(tokenize("{{#if x}}a{{else}}b{{else}}c{{/if}}").unwrap());
        assert!(matches!(result, Err(TemplateError::UnexpectedElse { .. })));
    }
}
