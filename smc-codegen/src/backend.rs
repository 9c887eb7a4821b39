//! Backend trait definition
//!
//!     Every target language implements [Backend]. The trait is object safe so the registry can
//!     hold backends behind `Box<dyn Backend>` and the driver can pick one at runtime.

use crate::error::GenerateError;
use smc_parser::Fsm;

/// One generated file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Knobs shared by all backends. Backends ignore what does not apply to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Emit source line comments and guard markers
    pub debug: bool,
    /// Spaces per indentation level
    pub indent: usize,
    pub header_extension: String,
    pub source_extension: String,
    /// Header of the runtime support library
    pub runtime_include: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            debug: false,
            indent: 4,
            header_extension: "h".to_string(),
            source_extension: "cpp".to_string(),
            runtime_include: "statemap.h".to_string(),
        }
    }
}

/// Trait for code generation targets
///
/// # Examples
///
/// ```ignore
/// struct Listing;
///
/// impl Backend for Listing {
///     fn name(&self) -> &str {
///         "listing"
///     }
///
///     fn generate(&self, fsm: &Fsm, _options: &GenerateOptions) -> Result<Vec<Artifact>, GenerateError> {
///         let stem = file_stem(fsm)?;
///         Ok(vec![Artifact::new(format!("{}.txt", stem), format!("{:?}", fsm))])
///     }
/// }
/// ```
pub trait Backend: Send + Sync {
    /// The name used to select this backend (e.g. "cpp", "dot")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// The artifact whose timestamp tells whether generation can be skipped.
    fn primary_file_name(&self, stem: &str, _options: &GenerateOptions) -> String {
        format!("{}.{}", stem, self.name())
    }

    /// Render every artifact for `fsm`, or fail without producing any.
    fn generate(
        &self,
        fsm: &Fsm,
        options: &GenerateOptions,
    ) -> Result<Vec<Artifact>, GenerateError>;
}

/// Base name shared by the artifacts of one machine.
pub fn file_stem(fsm: &Fsm) -> Result<String, GenerateError> {
    fsm.fsm_file()
        .ok_or_else(|| GenerateError::MissingDirective("%class".to_string()))
}
