//! Maps
//!
//!     A map is one state machine: an arena of states plus the list of every distinct
//!     transition signature used by any of them. The signature list drives the generated
//!     dispatch methods, so it is kept in first-seen order.

use super::state::{State, StateId};
use super::transition::Signature;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Name of the implicit fallback state every map has.
pub const DEFAULT_STATE: &str = "Default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Map {
    pub name: String,
    pub states: Vec<State>,
    pub signatures: Vec<Signature>,
    pub line: usize,
    #[serde(skip)]
    index: HashMap<String, StateId>,
}

impl Map {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            signatures: Vec::new(),
            line,
            index: HashMap::new(),
        }
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    pub fn state_named(&self, name: &str) -> Option<&State> {
        self.state_id(name).map(|id| &self[id])
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Look a state up by name, creating a placeholder if it is not known yet.
    pub fn intern(&mut self, name: &str, line: usize) -> StateId {
        if let Some(id) = self.state_id(name) {
            return id;
        }
        let id = StateId(self.states.len());
        self.states.push(State::placeholder(id, name, line));
        self.index.insert(name.to_string(), id);
        tracing::debug!(map = %self.name, state = name, "created state");
        id
    }

    /// Intern `name` and mark it as explicitly declared. The first declaration sets the line.
    pub fn declare(&mut self, name: &str, line: usize) -> StateId {
        let id = self.intern(name, line);
        let state = &mut self[id];
        if !state.declared {
            state.declared = true;
            state.line = line;
        }
        id
    }

    /// Add the implicit `Default` state unless the map already has one.
    pub fn ensure_default_state(&mut self, line: usize) -> StateId {
        self.intern(DEFAULT_STATE, line)
    }

    pub fn default_state(&self) -> Option<&State> {
        self.state_named(DEFAULT_STATE)
    }

    /// Record a signature; returns false if an identical one was already known.
    pub fn register_signature(&mut self, signature: &Signature) -> bool {
        if self.signatures.iter().any(|known| known.same_as(signature)) {
            return false;
        }
        self.signatures.push(signature.clone());
        true
    }

    /// States used as targets but never declared, the implicit default excluded.
    pub fn undeclared_states(&self) -> impl Iterator<Item = &State> {
        self.states
            .iter()
            .filter(|state| !state.declared && !state.is_default())
    }

    pub fn state_name(&self, id: StateId) -> &str {
        self.get(id).map(|state| state.name.as_str()).unwrap_or("?")
    }
}

impl Index<StateId> for Map {
    type Output = State;

    fn index(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }
}

impl IndexMut<StateId> for Map {
    fn index_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::model::Parameter;

    #[test]
    fn test_forward_reference_is_filled_in_place() {
        let mut map = Map::new("Main", 1);
        let target = map.intern("Running", 3);
        assert!(!map[target].declared);

        let declared = map.declare("Running", 7);
        assert_eq!(target, declared);
        assert!(map[declared].declared);
        assert_eq!(map[declared].line, 7);
        assert_eq!(map.states.len(), 1);
    }

    #[test]
    fn test_default_state_is_added_once() {
        let mut map = Map::new("Main", 1);
        map.declare("Idle", 2);
        let first = map.ensure_default_state(9);
        let second = map.ensure_default_state(9);
        assert_eq!(first, second);
        assert_eq!(map.states.len(), 2);
        assert!(map.default_state().is_some());
        assert_eq!(map.undeclared_states().count(), 0);
    }

    #[test]
    fn test_signatures_keep_first_seen_order() {
        let mut map = Map::new("Main", 1);
        assert!(map.register_signature(&Signature::new("Stop", vec![])));
        assert!(map.register_signature(&Signature::new("Go", vec![])));
        assert!(map.register_signature(&Signature::new(
            "Go",
            vec![Parameter::new("speed", "int")]
        )));
        assert!(!map.register_signature(&Signature::new("Stop", vec![])));

        let names: Vec<String> = map.signatures.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Stop()", "Go()", "Go(speed: int)"]);
    }
}
