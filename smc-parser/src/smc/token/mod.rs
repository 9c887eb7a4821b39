//! Core token types shared across the tokenizer, the parser and the tests.

pub mod core;
pub mod keyword;
pub mod operator;

pub use core::{Spanned, Token};
pub use keyword::Keyword;
pub use operator::Operator;
