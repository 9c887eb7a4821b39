//! Backend registry for backend discovery and selection
//!
//! Backends are registered once and retrieved by name. The driver selects exactly one per run
//! and passes it down; nothing in the pipeline reaches for a global default.

use crate::backend::{Artifact, Backend, GenerateOptions};
use crate::error::GenerateError;
use smc_parser::Fsm;
use std::collections::HashMap;

/// Registry of code generation backends
///
/// # Examples
///
/// ```ignore
/// let registry = BackendRegistry::with_defaults();
/// let backend = registry.get("cpp")?;
/// let artifacts = backend.generate(&fsm, &GenerateOptions::default())?;
/// ```
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        BackendRegistry {
            backends: HashMap::new(),
        }
    }

    /// Register a backend
    ///
    /// If a backend with the same name already exists, it will be replaced.
    pub fn register<B: Backend + 'static>(&mut self, backend: B) {
        self.backends
            .insert(backend.name().to_string(), Box::new(backend));
    }

    /// Get a backend by name
    pub fn get(&self, name: &str) -> Result<&dyn Backend, GenerateError> {
        self.backends
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| GenerateError::BackendNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// List all available backend names (sorted)
    pub fn list_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description of every backend, sorted by name
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.list_backends()
            .into_iter()
            .filter_map(|name| {
                let description = self.backends.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    /// Generate with the named backend
    pub fn generate(
        &self,
        fsm: &Fsm,
        backend: &str,
        options: &GenerateOptions,
    ) -> Result<Vec<Artifact>, GenerateError> {
        self.get(backend)?.generate(fsm, options)
    }

    /// Create a registry with default backends
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::backends::cpp::CppBackend);
        registry.register(crate::backends::json::JsonBackend);
        registry.register(crate::backends::dot::DotBackend);

        registry
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
