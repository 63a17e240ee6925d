use regex::Regex;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Bracket {
    Round,
    Brace,
}

impl Bracket {
    pub fn open_char(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Brace => '{',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Brace => '}',
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum TokenKind<'a> {
    Open(Bracket),
    Close(Bracket),
    Number(&'a str),
    Symbol(&'a str),
}

/// A token together with the 1-based column it starts at.
#[derive(Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub column: usize,
}

#[derive(Debug, Eq, PartialEq)]
pub enum TokenizerError {
    UnexpectedCharacter { column: usize, found: char },
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::UnexpectedCharacter { found, .. } => {
                write!(f, "unexpected character '{}'", found)
            }
        }
    }
}

fn create_token(captured: &str) -> TokenKind<'_> {
    match captured {
        "(" => TokenKind::Open(Bracket::Round),
        ")" => TokenKind::Close(Bracket::Round),
        "{" => TokenKind::Open(Bracket::Brace),
        "}" => TokenKind::Close(Bracket::Brace),
        _ if NUMBER_RE.is_match(captured) => TokenKind::Number(captured),
        _ => TokenKind::Symbol(captured),
    }
}

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(
        r#"(?x)                              # ignore whitespace in this pattern & allow comments
            ^\s*                             # leading whitespace, ignored
            (                                # token capture group
                [(){}]                       # brackets
                |-?[0-9]+                    # numbers take priority over symbols
                |[a-zA-Z0-9_+\-*/\\=<>!&]+   # symbols
            )
        "#
    )
    .unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
}

pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, TokenizerError> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    loop {
        let rest = &input[offset..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let token = TOKEN_RE.captures(rest).and_then(|caps| caps.get(1));
        match token {
            Some(token) => {
                tokens.push(Token {
                    kind: create_token(token.as_str()),
                    column: input[..offset + token.start()].chars().count() + 1,
                });
                offset += token.end();
            }
            None => {
                let skipped = rest.len() - trimmed.len();
                let found = trimmed.chars().next().unwrap_or(' ');
                return Err(TokenizerError::UnexpectedCharacter {
                    column: input[..offset + skipped].chars().count() + 1,
                    found,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn numbers_win_over_symbols() {
        assert_eq!(
            kinds("- -5 5x"),
            vec![
                TokenKind::Symbol("-"),
                TokenKind::Number("-5"),
                TokenKind::Number("5"),
                TokenKind::Symbol("x"),
            ]
        );
    }

    #[test]
    fn brackets_and_columns() {
        let tokens = tokenize("(head {1 2})").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Open(Bracket::Round));
        assert_eq!(tokens[1].kind, TokenKind::Symbol("head"));
        assert_eq!(tokens[1].column, 2);
        assert_eq!(tokens[2].kind, TokenKind::Open(Bracket::Brace));
        assert_eq!(tokens[2].column, 7);
        assert_eq!(tokens[5].kind, TokenKind::Close(Bracket::Brace));
        assert_eq!(tokens[6].kind, TokenKind::Close(Bracket::Round));
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(tokenize("   \t ").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            tokenize("(+ 1 #)"),
            Err(TokenizerError::UnexpectedCharacter {
                column: 6,
                found: '#'
            })
        );
    }
}
