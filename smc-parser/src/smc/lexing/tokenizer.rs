//! Tokenizer
//!
//!     Wraps the raw scanner and produces [Spanned] tokens for the parser. It owns three
//!     pieces of state the scanner knows nothing about:
//!
//!         - the comment [Metadata] side channel,
//!         - the current file and line offset, driven by preprocessor line markers,
//!         - whether tokens are currently being emitted (only while inside the origin file).
//!
//!     The origin file is the path given to [Tokenizer::with_origin]. Without one, the first
//!     line marker that names a file defines it. Paths are compared as absolute paths, ignoring
//!     ASCII case.
//!
//!     Text outside the origin file is only scanned for line markers, so scan errors there are
//!     skipped. After the first error in the origin file, or the end of input, the iterator is
//!     fused and keeps returning `None`.

use super::line_markers::{parse_line_marker, LineIndex, LineMarker};
use super::metadata::Metadata;
use super::scanner::{RawToken, ScanError};
use crate::smc::error::{Location, SyntaxError};
use crate::smc::token::{Spanned, Token};
use logos::{Lexer, Logos};
use std::ops::Range;
use std::path::{Path, PathBuf};

pub struct Tokenizer<'s> {
    source: &'s str,
    scanner: Lexer<'s, RawToken>,
    lines: LineIndex,
    origin: Option<String>,
    path: Option<PathBuf>,
    line_offset: isize,
    in_file: bool,
    metadata: Metadata,
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            scanner: RawToken::lexer(source),
            lines: LineIndex::new(source),
            origin: None,
            path: None,
            line_offset: 0,
            in_file: true,
            metadata: Metadata::default(),
            finished: false,
        }
    }

    /// Tokenize `source`, which was read from (or preprocessed out of) `path`.
    pub fn with_origin(source: &'s str, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut tokenizer = Self::new(source);
        tokenizer.origin = Some(normalize(path));
        tokenizer.path = Some(path.to_path_buf());
        tokenizer
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The file currently being read, as named by the last line marker.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn take_documentation(&mut self) -> Option<String> {
        self.metadata.take_documentation()
    }

    /// Location of a byte offset, in logical line terms.
    pub fn location(&self, offset: usize) -> Location {
        Location::new(self.path.clone(), self.logical_line(offset))
    }

    /// Location just past the last scanned character, for end of input errors.
    pub fn end_location(&self) -> Location {
        self.location(self.source.len())
    }

    fn logical_line(&self, offset: usize) -> usize {
        let physical = self.lines.line(offset) as isize;
        (physical + self.line_offset).max(1) as usize
    }

    fn directive(&mut self, text: &str, span: Range<usize>) -> Result<(), SyntaxError> {
        let line_start = self.lines.line_start(span.start);
        if !self.source[line_start..span.start].trim().is_empty() {
            return Err(SyntaxError::new(
                "unexpected '#' in the middle of a line",
                self.location(span.start),
            ));
        }

        match parse_line_marker(text) {
            Some(marker) => self.apply_marker(marker, span.start),
            None => tracing::debug!(directive = text, "ignoring preprocessor directive"),
        }
        Ok(())
    }

    fn apply_marker(&mut self, marker: LineMarker, offset: usize) {
        // The marker names the line that follows it.
        let physical_next = self.lines.line(offset) as isize + 1;
        self.line_offset = marker.line as isize - physical_next;

        if let Some(path) = marker.path {
            let normalized = normalize(Path::new(&path));
            self.in_file = match &self.origin {
                Some(origin) => origin.eq_ignore_ascii_case(&normalized),
                None => {
                    self.origin = Some(normalized);
                    true
                }
            };
            self.path = Some(PathBuf::from(path));
        }
    }

    /// Included files are not smc source. Bad characters there are dropped, and an
    /// unterminated construct is abandoned at the end of its line.
    fn skip_foreign(&mut self, error: &ScanError, span: Range<usize>) {
        tracing::trace!(path = ?self.path, %error, "skipping unscannable included text");
        if let ScanError::Unterminated { .. } = error {
            let resume = self
                .lines
                .next_line_start(span.start)
                .unwrap_or(self.source.len());
            if resume < self.scanner.span().end {
                let mut scanner = RawToken::lexer(self.source);
                scanner.bump(resume);
                self.scanner = scanner;
            }
        }
    }

    fn scan_error(&self, error: ScanError, span: Range<usize>) -> SyntaxError {
        let location = self.location(span.start);
        let lexeme = &self.source[span];
        match error {
            ScanError::UnexpectedCharacter => {
                SyntaxError::new(format!("unexpected character '{}'", lexeme), location)
            }
            ScanError::UnknownDirective => {
                SyntaxError::new(format!("unknown directive '{}'", lexeme), location)
            }
            unterminated @ ScanError::Unterminated { .. } => {
                SyntaxError::new(unterminated.to_string(), location)
            }
        }
    }
}

fn normalize(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Spanned, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(result) = self.scanner.next() else {
                self.finished = true;
                return None;
            };
            let span = self.scanner.span();

            let raw = match result {
                Ok(raw) => raw,
                Err(error) if !self.in_file => {
                    self.skip_foreign(&error, span);
                    continue;
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(self.scan_error(error, span)));
                }
            };

            let token = match raw {
                RawToken::LineComment(text) => {
                    if self.in_file {
                        self.metadata.record_line_comment(&text);
                    }
                    continue;
                }
                RawToken::BlockComment(text) => {
                    if self.in_file {
                        self.metadata.record_block_comment(&text);
                    }
                    continue;
                }
                RawToken::Directive(text) => {
                    if let Err(error) = self.directive(&text, span) {
                        if !self.in_file {
                            continue;
                        }
                        self.finished = true;
                        return Some(Err(error));
                    }
                    continue;
                }
                RawToken::Identifier(name) => Token::Identifier(name),
                RawToken::Integer(text) => Token::Integer(text),
                RawToken::Character(text) => Token::Character(text),
                RawToken::String(text) => Token::String(text),
                RawToken::Keyword(keyword) => Token::Keyword(keyword),
                RawToken::RawCode(body) => Token::RawCode(body),
                RawToken::Operator(op) => Token::Operator(op),
            };

            if !self.in_file {
                continue;
            }

            let line = self.logical_line(span.start);
            return Some(Ok(Spanned::new(token, span, line)));
        }
    }
}
