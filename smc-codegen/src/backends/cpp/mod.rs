//! C++ backend
//!
//!     Generates the State pattern over the `statemap` runtime: a declarations unit
//!     `<fsmfile>.h` and a definitions unit `<fsmfile>.cpp` (extensions are configurable).
//!
//!     The user writes a class `C` deriving from the generated `CContext<C>` and calls its
//!     transition methods. Each call is forwarded to the current state object, whose class
//!     overrides only the transitions it defines. Everything else falls through the map's
//!     `Default` state class to the base class, which throws
//!     `statemap::TransitionUndefinedException`.

mod expression;
mod header;
mod names;
mod source;
mod writer;

use crate::backend::{file_stem, Artifact, Backend, GenerateOptions};
use crate::error::GenerateError;
use names::Names;
use smc_parser::Fsm;

pub struct CppBackend;

impl Backend for CppBackend {
    fn name(&self) -> &str {
        "cpp"
    }

    fn description(&self) -> &str {
        "C++ state pattern classes for the statemap runtime"
    }

    fn primary_file_name(&self, stem: &str, options: &GenerateOptions) -> String {
        format!("{}.{}", stem, options.header_extension)
    }

    fn generate(
        &self,
        fsm: &Fsm,
        options: &GenerateOptions,
    ) -> Result<Vec<Artifact>, GenerateError> {
        let stem = file_stem(fsm)?;
        let map = fsm
            .map()
            .ok_or_else(|| GenerateError::MissingDirective("%map".to_string()))?;
        let names = Names::resolve(fsm, map)?;

        tracing::debug!(
            map = %map.name,
            states = map.states.len(),
            signatures = map.signatures.len(),
            "generating C++"
        );

        let header = header::render_header(fsm, map, &names, &stem, options);
        let source = source::render_source(fsm, map, &names, &stem, options);

        Ok(vec![
            Artifact::new(self.primary_file_name(&stem, options), header),
            Artifact::new(format!("{}.{}", stem, options.source_extension), source),
        ])
    }
}
