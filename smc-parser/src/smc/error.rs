//! Error types for tokenizing and parsing

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where in the source an error was detected.
///
/// The line is the logical line: it follows preprocessor line markers, so it points into
/// the file the author edited rather than into the preprocessed stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: Option<PathBuf>,
    pub line: usize,
}

impl Location {
    pub fn new(path: Option<PathBuf>, line: usize) -> Self {
        Self { path, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}({})", path.display(), self.line),
            None => write!(f, "<input>({})", self.line),
        }
    }
}

/// Any grammar violation, unterminated literal or unexpected token.
///
/// Parsing stops at the first one; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{} at {location}", detail(.expected, .found))]
pub struct SyntaxError {
    pub message: String,
    pub expected: Option<String>,
    pub found: Option<String>,
    pub location: Location,
}

fn detail(expected: &Option<String>, found: &Option<String>) -> String {
    match (expected, found) {
        (Some(expected), Some(found)) => format!(": expected {}, found {}", expected, found),
        (Some(expected), None) => format!(": expected {}", expected),
        (None, Some(found)) => format!(": found {}", found),
        (None, None) => String::new(),
    }
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            expected: None,
            found: None,
            location,
        }
    }

    /// A token of the wrong class showed up where `expected` was required.
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            message: "syntax error".to_string(),
            expected: Some(expected.into()),
            found: Some(found.into()),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

/// Format source code context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// `line` is 1-based, as reported by [`SyntaxError::line`].
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            lines[line_num]
        ));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_expectation() {
        let err = SyntaxError::unexpected("')'", "'}'", Location::new(None, 3));
        assert_eq!(
            err.to_string(),
            "syntax error: expected ')', found '}' at <input>(3)"
        );
    }

    #[test]
    fn test_display_with_path() {
        let err = SyntaxError::new(
            "unknown directive '%foo'",
            Location::new(Some(PathBuf::from("turnstile.sm")), 7),
        );
        assert_eq!(err.to_string(), "unknown directive '%foo' at turnstile.sm(7)");
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";

        let context = format_source_context(source, 4);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_format_source_context_past_end() {
        let context = format_source_context("only\n", 9);
        assert!(context.is_empty());
    }
}
