//! Operator lexemes
//!
//!     The operator set is closed: one to three characters, matched longest first so that `<`,
//!     `<=`, `<<` and `<<=` never shadow each other. The scanner gets longest match for free
//!     from logos; the table here is the single place mapping lexemes to kinds and back, and is
//!     what error messages and the raw text of arguments are rebuilt from.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// `%%`, the alternative map body delimiter
    MapDelimiter,
    DoubleColon,
    Colon,
    Semicolon,
    Comma,
    Period,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Equal,
    NotEqual,
    Assign,
    Not,
    And,
    Ampersand,
    Or,
    Pipe,
    Caret,
    Less,
    LessEqual,
    ShiftLeft,
    ShiftLeftAssign,
    Greater,
    GreaterEqual,
    ShiftRight,
    ShiftRightAssign,
    Plus,
    Increment,
    PlusAssign,
    Minus,
    Decrement,
    MinusAssign,
    Arrow,
    Star,
    StarAssign,
    Slash,
    SlashAssign,
    PercentAssign,
    Tilde,
    Question,
}

pub(crate) const TABLE: &[(&str, Operator)] = &[
    ("%%", Operator::MapDelimiter),
    ("::", Operator::DoubleColon),
    (":", Operator::Colon),
    (";", Operator::Semicolon),
    (",", Operator::Comma),
    (".", Operator::Period),
    ("(", Operator::OpenParen),
    (")", Operator::CloseParen),
    ("{", Operator::OpenBrace),
    ("}", Operator::CloseBrace),
    ("[", Operator::OpenBracket),
    ("]", Operator::CloseBracket),
    ("==", Operator::Equal),
    ("!=", Operator::NotEqual),
    ("=", Operator::Assign),
    ("!", Operator::Not),
    ("&&", Operator::And),
    ("&", Operator::Ampersand),
    ("||", Operator::Or),
    ("|", Operator::Pipe),
    ("^", Operator::Caret),
    ("<", Operator::Less),
    ("<=", Operator::LessEqual),
    ("<<", Operator::ShiftLeft),
    ("<<=", Operator::ShiftLeftAssign),
    (">", Operator::Greater),
    (">=", Operator::GreaterEqual),
    (">>", Operator::ShiftRight),
    (">>=", Operator::ShiftRightAssign),
    ("+", Operator::Plus),
    ("++", Operator::Increment),
    ("+=", Operator::PlusAssign),
    ("-", Operator::Minus),
    ("--", Operator::Decrement),
    ("-=", Operator::MinusAssign),
    ("->", Operator::Arrow),
    ("*", Operator::Star),
    ("*=", Operator::StarAssign),
    ("/", Operator::Slash),
    ("/=", Operator::SlashAssign),
    ("%=", Operator::PercentAssign),
    ("~", Operator::Tilde),
    ("?", Operator::Question),
];

static BY_LEXEME: Lazy<HashMap<&'static str, Operator>> =
    Lazy::new(|| TABLE.iter().copied().collect());

impl Operator {
    pub fn lookup(text: &str) -> Option<Operator> {
        BY_LEXEME.get(text).copied()
    }

    pub fn as_str(&self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, op)| op == self)
            .map(|(text, _)| *text)
            .unwrap_or("?")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
