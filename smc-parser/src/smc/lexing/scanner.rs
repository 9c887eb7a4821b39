//! Raw scanning with logos
//!
//! This is the source that creates the initial token stream from a string. Nothing here
//! knows about files, line markers or comment metadata; that is the tokenizer's job.

use crate::smc::token::{Keyword, Operator};
use logos::{Lexer, Logos};
use std::fmt;
use thiserror::Error;

/// Multi-character constructs that can be left open at the end of a line or of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Character,
    String,
    Comment,
    RawCode,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Construct::Character => "character literal",
            Construct::String => "string literal",
            Construct::Comment => "comment",
            Construct::RawCode => "raw code block",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum ScanError {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unknown directive")]
    UnknownDirective,
    #[error("unterminated {construct} ({state})")]
    Unterminated { construct: Construct, state: String },
}

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = ScanError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    #[regex(r"//[^\n]*", |lex| lex.slice().to_string())]
    LineComment(String),

    #[token("/*", block_comment)]
    BlockComment(String),

    /// A whole `#...` line; only legal at the start of a line
    #[regex(r"#[^\n]*", |lex| lex.slice().to_string())]
    Directive(String),

    #[regex(r"[A-Za-z][A-Za-z0-9_-]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"[0-9]+[lLuU]*", |lex| lex.slice().to_string())]
    #[regex(r"0[xX][0-9a-fA-F]+[lLuU]*", |lex| lex.slice().to_string())]
    Integer(String),

    #[token("'", |lex| quoted(lex, '\'', Construct::Character))]
    Character(String),

    #[token("\"", |lex| quoted(lex, '"', Construct::String))]
    String(String),

    #[regex(r"%[A-Za-z]+", keyword)]
    Keyword(Keyword),

    #[token("%{", raw_code)]
    RawCode(String),

    #[token("%%", |_| Operator::MapDelimiter)]
    #[token("::", |_| Operator::DoubleColon)]
    #[token(":", |_| Operator::Colon)]
    #[token(";", |_| Operator::Semicolon)]
    #[token(",", |_| Operator::Comma)]
    #[token(".", |_| Operator::Period)]
    #[token("(", |_| Operator::OpenParen)]
    #[token(")", |_| Operator::CloseParen)]
    #[token("{", |_| Operator::OpenBrace)]
    #[token("}", |_| Operator::CloseBrace)]
    #[token("[", |_| Operator::OpenBracket)]
    #[token("]", |_| Operator::CloseBracket)]
    #[token("==", |_| Operator::Equal)]
    #[token("!=", |_| Operator::NotEqual)]
    #[token("=", |_| Operator::Assign)]
    #[token("!", |_| Operator::Not)]
    #[token("&&", |_| Operator::And)]
    #[token("&", |_| Operator::Ampersand)]
    #[token("||", |_| Operator::Or)]
    #[token("|", |_| Operator::Pipe)]
    #[token("^", |_| Operator::Caret)]
    #[token("<", |_| Operator::Less)]
    #[token("<=", |_| Operator::LessEqual)]
    #[token("<<", |_| Operator::ShiftLeft)]
    #[token("<<=", |_| Operator::ShiftLeftAssign)]
    #[token(">", |_| Operator::Greater)]
    #[token(">=", |_| Operator::GreaterEqual)]
    #[token(">>", |_| Operator::ShiftRight)]
    #[token(">>=", |_| Operator::ShiftRightAssign)]
    #[token("+", |_| Operator::Plus)]
    #[token("++", |_| Operator::Increment)]
    #[token("+=", |_| Operator::PlusAssign)]
    #[token("-", |_| Operator::Minus)]
    #[token("--", |_| Operator::Decrement)]
    #[token("-=", |_| Operator::MinusAssign)]
    #[token("->", |_| Operator::Arrow)]
    #[token("*", |_| Operator::Star)]
    #[token("*=", |_| Operator::StarAssign)]
    #[token("/", |_| Operator::Slash)]
    #[token("/=", |_| Operator::SlashAssign)]
    #[token("%=", |_| Operator::PercentAssign)]
    #[token("~", |_| Operator::Tilde)]
    #[token("?", |_| Operator::Question)]
    Operator(Operator),
}

fn keyword(lex: &mut Lexer<RawToken>) -> Result<Keyword, ScanError> {
    Keyword::lookup(lex.slice()).ok_or(ScanError::UnknownDirective)
}

fn block_comment(lex: &mut Lexer<RawToken>) -> Result<String, ScanError> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(lex.slice().to_string())
        }
        None => {
            lex.bump(rest.len());
            Err(ScanError::Unterminated {
                construct: Construct::Comment,
                state: "end of input inside comment".to_string(),
            })
        }
    }
}

fn raw_code(lex: &mut Lexer<RawToken>) -> Result<String, ScanError> {
    let rest = lex.remainder();
    match rest.find("%}") {
        Some(end) => {
            let body = rest[..end].to_string();
            lex.bump(end + 2);
            Ok(body)
        }
        None => {
            lex.bump(rest.len());
            Err(ScanError::Unterminated {
                construct: Construct::RawCode,
                state: "end of input before %}".to_string(),
            })
        }
    }
}

/// Finish a quoted literal. Backslash escapes pass through untouched; a literal may not
/// span lines.
fn quoted(lex: &mut Lexer<RawToken>, quote: char, construct: Construct) -> Result<String, ScanError> {
    let rest = lex.remainder();
    let mut escaped = false;

    for (offset, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => {
                lex.bump(offset);
                return Err(unterminated(construct, quote, "end of line", &rest[..offset], false));
            }
            c if c == quote => {
                lex.bump(offset + c.len_utf8());
                return Ok(lex.slice().to_string());
            }
            _ => {}
        }
    }

    lex.bump(rest.len());
    Err(unterminated(construct, quote, "end of input", rest, escaped))
}

fn unterminated(
    construct: Construct,
    quote: char,
    reached: &str,
    content: &str,
    escaped: bool,
) -> ScanError {
    let state = if escaped {
        format!("{} inside escape sequence", reached)
    } else if content.is_empty() {
        format!("{} after opening quote", reached)
    } else {
        format!("{} after {}{}", reached, quote, content)
    };
    ScanError::Unterminated { construct, state }
}
