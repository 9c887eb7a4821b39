//! Lexer
//!
//!     This module turns `.sm` source text into the token stream the parser consumes.
//!
//! The Lexing Pipeline
//!
//!     The pipeline consists of:
//!         1. Raw scanning with a logos lexer. See [scanner](scanner). Whitespace is skipped
//!            here; comments, preprocessor lines and every literal come out as raw tokens.
//!            Literals that need more than a regular expression (character and string
//!            literals, block comments, `%{ ... %}` raw code) are finished by callbacks so an
//!            unterminated one can say what it was and how far it got.
//!
//!         2. Classification. See [tokenizer](tokenizer). Comments are dropped from the main
//!            stream; documentation and attribute comments are kept on the side as
//!            [metadata](metadata). Preprocessor line markers re-number lines and switch
//!            output on and off.
//!
//! Preprocessor Line Markers
//!
//!     Authors may run a `.sm` file through the C preprocessor to `#include` shared
//!     declarations. The preprocessor leaves markers such as `# 12 "turnstile.sm"` behind. The
//!     tokenizer follows them: line numbers are re-based so errors point into the file the
//!     author edited, and tokens are only emitted while the current file is the original
//!     file. Included content is scanned (it must still be lexically valid) but never reaches
//!     the parser. See [line_markers](line_markers).
//!
//!     The tokenizer is lazy: it is an iterator and only scans as far as the parser pulls.

pub mod line_markers;
pub mod metadata;
pub mod scanner;
pub mod tokenizer;

pub use line_markers::{parse_line_marker, LineIndex, LineMarker};
pub use metadata::Metadata;
pub use scanner::{Construct, RawToken, ScanError};
pub use tokenizer::Tokenizer;

use crate::smc::error::SyntaxError;
use crate::smc::token::Spanned;

/// Tokenize a whole source string, stopping at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, SyntaxError> {
    Tokenizer::new(source).collect()
}
