//! Classified tokens
//!
//!     These are what the tokenizer hands to the parser: whitespace, comments and preprocessor
//!     lines are gone, and every token remembers its byte span and the logical line it came
//!     from.

use super::keyword::Keyword;
use super::operator::Operator;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Identifier(String),
    Integer(String),
    /// Character literal, quotes included
    Character(String),
    /// String literal, quotes included
    String(String),
    Keyword(Keyword),
    Operator(Operator),
    /// Body of a `%{ ... %}` block, markers excluded
    RawCode(String),
}

impl Token {
    /// The source lexeme of this token.
    pub fn text(&self) -> &str {
        match self {
            Token::Identifier(text)
            | Token::Integer(text)
            | Token::Character(text)
            | Token::String(text)
            | Token::RawCode(text) => text,
            Token::Keyword(keyword) => keyword.as_str(),
            Token::Operator(op) => op.as_str(),
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(found) if *found == op)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(found) if *found == keyword)
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Words need a space between them when token text is glued back together.
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_) | Token::Integer(_) | Token::Keyword(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Integer(text) => write!(f, "integer {}", text),
            Token::Character(text) => write!(f, "character literal {}", text),
            Token::String(text) => write!(f, "string literal {}", text),
            Token::Keyword(keyword) => write!(f, "directive '{}'", keyword),
            Token::Operator(op) => write!(f, "'{}'", op),
            Token::RawCode(_) => f.write_str("raw code block"),
        }
    }
}

/// A token with its byte span and 1-based logical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
    pub line: usize,
}

impl Spanned {
    pub fn new(token: Token, span: Range<usize>, line: usize) -> Self {
        Self { token, span, line }
    }
}
