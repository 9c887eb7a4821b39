//! Shared configuration loader for the smc toolchain.
//!
//! `defaults/smc.default.toml` is compiled in, so a run needs no file on disk. A project
//! can keep an `smc.toml` beside its `.sm` files; [`Loader`] layers it, an explicit file
//! and flag overrides over the defaults before deserializing into [`SmcConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use smc_codegen::GenerateOptions;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/smc.default.toml");

/// Top-level configuration consumed by smc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SmcConfig {
    pub generator: GeneratorConfig,
    pub cpp: CppConfig,
}

/// Backend selection and run-wide switches.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub backend: String,
    pub debug: bool,
    pub force: bool,
}

/// Knobs of the C++ backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CppConfig {
    pub indent: usize,
    pub header_extension: String,
    pub source_extension: String,
    pub runtime_include: String,
}

impl SmcConfig {
    /// Options handed to whichever backend runs.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            debug: self.generator.debug,
            indent: self.cpp.indent,
            header_extension: self.cpp.header_extension.clone(),
            source_extension: self.cpp.source_extension.clone(),
            runtime_include: self.cpp.runtime_include.clone(),
        }
    }
}

/// Project file picked up from the directory of the `.sm` input.
pub const PROJECT_FILE: &str = "smc.toml";

/// Builds an [SmcConfig] from layers. Later layers win: the embedded defaults, then the
/// project file, then an explicit file, then overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer the project file of `dir`, if it has one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(PROJECT_FILE), false)
    }

    /// Layer a file the user named explicitly. It must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `generator.backend`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SmcConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
