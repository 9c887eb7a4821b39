//! Line bookkeeping
//!
//!     [LineIndex] maps byte offsets to physical lines. [parse_line_marker] recognizes the
//!     `# N "path"` and `#line N "path"` markers left behind by the C preprocessor. Any other
//!     `#` line (`#pragma`, `#ident`) is not a marker and is ignored by the tokenizer.

/// A preprocessor line marker: the line after the marker is line `line` of `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarker {
    pub line: usize,
    pub path: Option<String>,
}

pub fn parse_line_marker(text: &str) -> Option<LineMarker> {
    let body = text.strip_prefix('#')?.trim_start();
    let body = match body.strip_prefix("line") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_whitespace()) => rest.trim_start(),
        Some(_) => return None,
        None => body,
    };

    let digits = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    if digits == 0 {
        return None;
    }
    let line = body[..digits].parse().ok()?;

    let rest = body[digits..].trim_start();
    let path = rest
        .strip_prefix('"')
        .and_then(|quoted| quoted.find('"').map(|end| quoted[..end].replace("\\\\", "\\")));

    Some(LineMarker { line, path })
}

/// Byte offsets of every line start, for offset to line lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based physical line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Byte offset where the line containing `offset` begins.
    pub fn line_start(&self, offset: usize) -> usize {
        self.starts[self.line(offset) - 1]
    }

    /// Byte offset of the line after the one containing `offset`, if there is one.
    pub fn next_line_start(&self, offset: usize) -> Option<usize> {
        self.starts.get(self.line(offset)).copied()
    }
}
