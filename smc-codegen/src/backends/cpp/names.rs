//! Generated C++ names
//!
//!     For `%class Door`, `%map Main` and a state `Open` the generated names are:
//!
//!         Door                        user class, the context's `Derived`
//!         DoorContext<Door>           context type (`%fsmclass` replaces `DoorContext`)
//!         DoorState                   state base class
//!         Main                        map class, one member per state
//!         Main_Default, Main_Open     state classes

use crate::error::GenerateError;
use smc_parser::smc::model::{Fsm, Map, Signature, DEFAULT_STATE};

pub(crate) struct Names {
    pub class: String,
    pub fsm_class: String,
    pub context: String,
    pub state_base: String,
    pub map: String,
    pub start: String,
    pub return_type: Option<String>,
}

impl Names {
    pub fn resolve(fsm: &Fsm, map: &Map) -> Result<Self, GenerateError> {
        let missing = |directive: &str| GenerateError::MissingDirective(directive.to_string());
        let class = fsm.class_name.clone().ok_or_else(|| missing("%class"))?;
        let fsm_class = fsm.fsm_class().ok_or_else(|| missing("%class"))?;
        let context = fsm.context_type().ok_or_else(|| missing("%class"))?;
        let (start_map, start) = fsm.start_parts().ok_or_else(|| missing("%start"))?;

        if start_map != map.name || map.state_id(&start).is_none() {
            return Err(GenerateError::UnknownState(format!(
                "{}::{}",
                start_map, start
            )));
        }

        Ok(Self {
            state_base: format!("{}State", class),
            class,
            fsm_class,
            context,
            map: map.name.clone(),
            start,
            // `%return void` is the same as no `%return`
            return_type: fsm.return_type.clone().filter(|t| t != "void"),
        })
    }

    pub fn state_class(&self, state: &str) -> String {
        format!("{}_{}", self.map, state)
    }

    pub fn default_class(&self) -> String {
        self.state_class(DEFAULT_STATE)
    }

    pub fn return_type(&self) -> &str {
        self.return_type.as_deref().unwrap_or("void")
    }

    /// `Ctx& context` followed by the transition's own parameters.
    pub fn method_parameters(&self, signature: &Signature) -> String {
        let mut parameters = vec![format!("{}& context", self.context)];
        parameters.extend(declared_parameters(signature));
        parameters.join(", ")
    }
}

/// `type name` for every parameter.
pub(crate) fn declared_parameters(signature: &Signature) -> Vec<String> {
    signature
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_name, p.name))
        .collect()
}

/// Parameter names as call arguments.
pub(crate) fn forwarded_arguments(signature: &Signature) -> Vec<&str> {
    signature.parameters.iter().map(|p| p.name.as_str()).collect()
}
