/// Line oriented output buffer with an indentation level.
pub(crate) struct CodeWriter {
    output: String,
    indent_level: usize,
    unit: String,
}

impl CodeWriter {
    pub fn new(indent: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            unit: " ".repeat(indent),
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.unit);
        }
    }

    /// Write one indented line. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.push_indent();
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Copy multi-line text as is, without indentation.
    pub fn verbatim(&mut self, text: &str) {
        self.output.push_str(text);
        if !text.ends_with('\n') {
            self.output.push('\n');
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// `{` on its own line, then one level deeper.
    pub fn open_brace(&mut self) {
        self.line("{");
        self.indent();
    }

    /// One level out, then `}` followed by `suffix`.
    pub fn close_brace(&mut self, suffix: &str) {
        self.dedent();
        self.line(format!("}}{}", suffix));
    }

    pub fn finish(self) -> String {
        self.output
    }
}
