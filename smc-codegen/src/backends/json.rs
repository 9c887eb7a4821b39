//! JSON backend
//!
//! Dumps the model as pretty printed JSON: the same data the other backends read, for tools
//! that want to consume a parsed machine without linking the parser.

use crate::backend::{file_stem, Artifact, Backend, GenerateOptions};
use crate::error::GenerateError;
use smc_parser::Fsm;

pub struct JsonBackend;

impl Backend for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "The parsed model as JSON"
    }

    fn generate(
        &self,
        fsm: &Fsm,
        _options: &GenerateOptions,
    ) -> Result<Vec<Artifact>, GenerateError> {
        let stem = file_stem(fsm)?;
        let mut contents = serde_json::to_string_pretty(fsm)
            .map_err(|e| GenerateError::Serialization(e.to_string()))?;
        contents.push('\n');
        Ok(vec![Artifact::new(format!("{}.json", stem), contents)])
    }
}
