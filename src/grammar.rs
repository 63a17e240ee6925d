//! Builds a [`SyntaxNode`] tree from source text.
//!
//! The tree mirrors the one produced by a combinator grammar of the form
//!
//! ```text
//! number : /-?[0-9]+/ ;
//! symbol : /[a-zA-Z0-9_+\-*\/\\=<>!&]+/ ;
//! sexpr  : '(' <expr>* ')' ;
//! qexpr  : '{' <expr>* '}' ;
//! expr   : <number> | <symbol> | <sexpr> | <qexpr> ;
//! lispc  : /^/ <expr>* /$/ ;
//! ```
//!
//! including the bracket and anchor nodes, which the reader discards.

use crate::syntax::{SyntaxNode, ANCHOR_TAG, ROOT_TAG};
use crate::tokens::{tokenize, Bracket, Token, TokenKind, TokenizerError};
use std::fmt;
use std::iter::Peekable;
use std::slice;

const NUMBER_TAG: &str = "expr|number|regex";
const SYMBOL_TAG: &str = "expr|symbol|regex";
const SEXPR_TAG: &str = "expr|sexpr|>";
const QEXPR_TAG: &str = "expr|qexpr|>";
const CHAR_TAG: &str = "char";

/// Deepest bracket nesting accepted. Reading and evaluation recurse once per
/// level, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 256;

type Tokens<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Tokenizer(TokenizerError),
    UnexpectedClose { column: usize, found: char },
    MismatchedClose { column: usize, expected: char, found: char },
    Unclosed { column: usize, expected: char },
    TooDeep { column: usize },
}

impl ParseError {
    pub fn column(&self) -> usize {
        match self {
            ParseError::Tokenizer(TokenizerError::UnexpectedCharacter { column, .. }) => *column,
            ParseError::UnexpectedClose { column, .. } => *column,
            ParseError::MismatchedClose { column, .. } => *column,
            ParseError::Unclosed { column, .. } => *column,
            ParseError::TooDeep { column } => *column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<stdin>:1:{}: error: ", self.column())?;
        match self {
            ParseError::Tokenizer(e) => write!(f, "{}", e),
            ParseError::UnexpectedClose { found, .. } => {
                write!(f, "unexpected '{}' with no matching open bracket", found)
            }
            ParseError::MismatchedClose {
                expected, found, ..
            } => write!(f, "expected '{}' but found '{}'", expected, found),
            ParseError::Unclosed { expected, .. } => {
                write!(f, "bracket opened here is never closed, expected '{}'", expected)
            }
            ParseError::TooDeep { .. } => {
                write!(f, "brackets nested more than {} deep", MAX_DEPTH)
            }
        }
    }
}

impl From<TokenizerError> for ParseError {
    fn from(e: TokenizerError) -> Self {
        ParseError::Tokenizer(e)
    }
}

pub fn parse(input: &str) -> Result<SyntaxNode, ParseError> {
    let tokens = tokenize(input)?;
    let mut tokens = tokens.iter().peekable();
    let mut children = vec![SyntaxNode::leaf(ANCHOR_TAG, "")];
    while let Some(token) = tokens.next() {
        if let TokenKind::Close(bracket) = token.kind {
            return Err(ParseError::UnexpectedClose {
                column: token.column,
                found: bracket.close_char(),
            });
        }
        children.push(parse_expr(token, &mut tokens, 0)?);
    }
    children.push(SyntaxNode::leaf(ANCHOR_TAG, ""));
    Ok(SyntaxNode::branch(ROOT_TAG, children))
}

fn parse_expr(
    token: &Token<'_>,
    tokens: &mut Tokens<'_>,
    depth: usize,
) -> Result<SyntaxNode, ParseError> {
    match token.kind {
        TokenKind::Number(chars) => Ok(SyntaxNode::leaf(NUMBER_TAG, chars)),
        TokenKind::Symbol(chars) => Ok(SyntaxNode::leaf(SYMBOL_TAG, chars)),
        TokenKind::Open(_) if depth >= MAX_DEPTH => Err(ParseError::TooDeep {
            column: token.column,
        }),
        TokenKind::Open(bracket) => parse_list(token.column, bracket, tokens, depth + 1),
        TokenKind::Close(bracket) => Err(ParseError::UnexpectedClose {
            column: token.column,
            found: bracket.close_char(),
        }),
    }
}

fn parse_list(
    column: usize,
    bracket: Bracket,
    tokens: &mut Tokens<'_>,
    depth: usize,
) -> Result<SyntaxNode, ParseError> {
    let tag = match bracket {
        Bracket::Round => SEXPR_TAG,
        Bracket::Brace => QEXPR_TAG,
    };
    let mut children = vec![SyntaxNode::leaf(
        CHAR_TAG,
        &bracket.open_char().to_string(),
    )];
    loop {
        match tokens.next() {
            Some(Token {
                kind: TokenKind::Close(closing),
                column: close_column,
            }) => {
                if *closing != bracket {
                    return Err(ParseError::MismatchedClose {
                        column: *close_column,
                        expected: bracket.close_char(),
                        found: closing.close_char(),
                    });
                }
                children.push(SyntaxNode::leaf(
                    CHAR_TAG,
                    &bracket.close_char().to_string(),
                ));
                return Ok(SyntaxNode::branch(tag, children));
            }
            Some(token) => children.push(parse_expr(token, tokens, depth)?),
            None => {
                return Err(ParseError::Unclosed {
                    column,
                    expected: bracket.close_char(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_has_anchors() {
        let tree = parse("5").unwrap();
        assert!(tree.is_root());
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].tag, ANCHOR_TAG);
        assert_eq!(tree.children[1], SyntaxNode::leaf(NUMBER_TAG, "5"));
        assert_eq!(tree.children[2].tag, ANCHOR_TAG);
    }

    #[test]
    fn nested_lists_keep_brackets() {
        let tree = parse("(tail {a 1})").unwrap();
        let sexpr = &tree.children[1];
        assert!(sexpr.has_tag("sexpr"));
        let contents: Vec<&str> = sexpr.children.iter().map(|c| c.contents.as_str()).collect();
        assert_eq!(contents, vec!["(", "tail", "", ")"]);
        let qexpr = &sexpr.children[2];
        assert!(qexpr.has_tag("qexpr"));
        assert_eq!(qexpr.children[1], SyntaxNode::leaf(SYMBOL_TAG, "a"));
        assert_eq!(qexpr.children[2], SyntaxNode::leaf(NUMBER_TAG, "1"));
    }

    #[test]
    fn empty_input_is_an_empty_root() {
        let tree = parse("").unwrap();
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn bracket_errors() {
        assert_eq!(
            parse("(+ 1 2"),
            Err(ParseError::Unclosed {
                column: 1,
                expected: ')'
            })
        );
        assert_eq!(
            parse("{1 2)"),
            Err(ParseError::MismatchedClose {
                column: 5,
                expected: '}',
                found: ')'
            })
        );
        assert_eq!(
            parse("1 }"),
            Err(ParseError::UnexpectedClose {
                column: 3,
                found: '}'
            })
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let deepest = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&deepest).is_ok());

        let too_deep = format!("{}1{}", "{".repeat(MAX_DEPTH + 1), "}".repeat(MAX_DEPTH + 1));
        assert_eq!(
            parse(&too_deep),
            Err(ParseError::TooDeep {
                column: MAX_DEPTH + 1
            })
        );

        let huge = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(
            parse(&huge).unwrap_err().to_string(),
            format!(
                "<stdin>:1:{}: error: brackets nested more than {} deep",
                MAX_DEPTH + 1,
                MAX_DEPTH
            )
        );
    }

    #[test]
    fn error_display() {
        let err = parse("(1 $)").unwrap_err();
        assert_eq!(err.to_string(), "<stdin>:1:4: error: unexpected character '$'");
    }
}
