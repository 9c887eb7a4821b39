use super::action::Action;
use super::expression::Expression;
use super::state::StateId;
use serde::Serialize;

/// Where a guard leaves the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndState {
    /// `nil`: run the actions, stay in the current state without exit or entry
    Nil,
    State(StateId),
}

/// One alternative of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guard {
    /// `None` for an unconditional guard
    pub condition: Option<Expression>,
    pub end: EndState,
    pub actions: Vec<Action>,
    pub line: usize,
}

impl Guard {
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    pub fn target(&self) -> Option<StateId> {
        match self.end {
            EndState::Nil => None,
            EndState::State(id) => Some(id),
        }
    }
}
