//! Comment side channel
//!
//!     Comments never reach the parser, but some of them carry information:
//!
//!         `/// text` and `/** text */`    documentation for the next state, transition or class
//!         `//@ text`                        attribute lines
//!         `// Package: name`               package hint
//!         `// Library: name`               library hint
//!
//!     Documentation accumulates until the parser takes it; everything else is kept for the
//!     whole file.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    documentation: Vec<String>,
    attributes: Vec<String>,
    package: Option<String>,
    library: Option<String>,
}

impl Metadata {
    pub fn record_line_comment(&mut self, text: &str) {
        if let Some(doc) = text.strip_prefix("///") {
            let doc = doc.trim_start_matches('/').trim();
            if !doc.is_empty() {
                self.documentation.push(doc.to_string());
            }
        } else if let Some(attribute) = text.strip_prefix("//@") {
            self.attributes.push(attribute.trim().to_string());
        } else {
            let body = text.trim_start_matches('/').trim();
            if let Some(package) = body.strip_prefix("Package:") {
                self.package = Some(package.trim().to_string());
            } else if let Some(library) = body.strip_prefix("Library:") {
                self.library = Some(library.trim().to_string());
            }
        }
    }

    pub fn record_block_comment(&mut self, text: &str) {
        let Some(body) = text.strip_prefix("/**") else {
            return;
        };
        // `/**/` is an empty plain comment
        if body == "/" {
            return;
        }
        let body = body.strip_suffix("*/").unwrap_or(body);
        self.documentation.extend(
            body.lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    /// Take the documentation gathered since the last call, joined by newlines.
    pub fn take_documentation(&mut self) -> Option<String> {
        if self.documentation.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.documentation).join("\n"))
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }
}
