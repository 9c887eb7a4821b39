//! States
//!
//!     A state is created the first time its name appears, either as a declaration or as the
//!     target of a transition. Only a declaration sets `declared`; a state that is never
//!     declared stays a placeholder. Redeclaring a state appends to the same node.

use super::action::Action;
use super::map::DEFAULT_STATE;
use super::transition::{Signature, Transition};
use serde::Serialize;
use std::fmt;

/// Index of a state inside its map's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateId(pub usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub declared: bool,
    pub entry: Option<Vec<Action>>,
    pub exit: Option<Vec<Action>>,
    pub transitions: Vec<Transition>,
    /// Line of the first declaration, or of the first reference for a placeholder
    pub line: usize,
    pub documentation: Option<String>,
}

impl State {
    pub fn placeholder(id: StateId, name: impl Into<String>, line: usize) -> Self {
        Self {
            id,
            name: name.into(),
            declared: false,
            entry: None,
            exit: None,
            transitions: Vec::new(),
            line,
            documentation: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_STATE
    }

    /// Position of the transition with the same identity as `signature`.
    pub fn find_transition(&self, signature: &Signature) -> Option<usize> {
        self.transitions
            .iter()
            .position(|t| t.signature.same_as(signature))
    }
}
