//! Source loading
//!
//! `SourceLoader` reads a `.sm` file (or takes a string) and runs the front end on it. The CLI
//! and the integration tests both go through it, so a file loaded from disk always gets its
//! path attached to the tokenizer for line markers and error locations.
//!
//! ```rust,ignore
//! use smc_parser::smc::loader::SourceLoader;
//!
//! let fsm = SourceLoader::from_path("turnstile.sm")?.parse()?;
//! let tokens = SourceLoader::from_string("%class A %map M { S {} }").tokenize()?;
//! ```

use crate::smc::error::SyntaxError;
use crate::smc::lexing::Tokenizer;
use crate::smc::model::Fsm;
use crate::smc::parsing::{FreshnessCheck, ParseOutcome, Parser};
use crate::smc::token::Spanned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn tokenizer(&self) -> Tokenizer<'_> {
        match &self.path {
            Some(path) => Tokenizer::with_origin(&self.source, path),
            None => Tokenizer::new(&self.source),
        }
    }

    pub fn tokenize(&self) -> Result<Vec<Spanned>, LoaderError> {
        Ok(self.tokenizer().collect::<Result<Vec<_>, _>>()?)
    }

    pub fn parse(&self) -> Result<Fsm, LoaderError> {
        Ok(Parser::new(self.tokenizer()).parse_model()?)
    }

    pub fn parse_with(&self, freshness: &dyn FreshnessCheck) -> Result<ParseOutcome, LoaderError> {
        Ok(Parser::new(self.tokenizer()).parse(freshness)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::testing::TURNSTILE;
    use std::io::Write;

    #[test]
    fn test_from_string() {
        let fsm = SourceLoader::from_string(TURNSTILE).parse().expect("parse failed");
        assert_eq!(fsm.class_name.as_deref(), Some("Turnstile"));
        assert_eq!(fsm.source_path, None);
    }

    #[test]
    fn test_from_path_attaches_the_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "%class A\n%map M {{\n S {{ T( }}\n}}").expect("write");

        let loader = SourceLoader::from_path(file.path()).expect("load");
        let err = loader.parse().expect_err("should fail");
        let LoaderError::Syntax(syntax) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(syntax.location.path.as_deref(), Some(file.path()));
        assert_eq!(syntax.line(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = SourceLoader::from_path("/definitely/not/here.sm")
            .err()
            .expect("should fail");
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read /definitely/not/here.sm"));
    }
}
