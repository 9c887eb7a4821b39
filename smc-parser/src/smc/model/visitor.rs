//! Model traversal
//!
//!     Implement [Visitor] to walk a model. Default implementations are empty, so only the
//!     callbacks you care about need overriding. Order is arena order for states, declaration
//!     order for transitions and guards.

use super::fsm::Fsm;
use super::guard::Guard;
use super::map::Map;
use super::state::State;
use super::transition::Transition;

pub trait Visitor {
    fn visit_fsm(&mut self, _fsm: &Fsm) {}
    fn leave_fsm(&mut self, _fsm: &Fsm) {}

    fn visit_map(&mut self, _map: &Map) {}
    fn leave_map(&mut self, _map: &Map) {}

    fn visit_state(&mut self, _map: &Map, _state: &State) {}
    fn leave_state(&mut self, _map: &Map, _state: &State) {}

    fn visit_transition(&mut self, _map: &Map, _state: &State, _transition: &Transition) {}

    fn visit_guard(&mut self, _map: &Map, _state: &State, _transition: &Transition, _guard: &Guard) {
    }
}

impl Fsm {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_fsm(self);
        for map in &self.maps {
            visitor.visit_map(map);
            for state in &map.states {
                visitor.visit_state(map, state);
                for transition in &state.transitions {
                    visitor.visit_transition(map, state, transition);
                    for guard in &transition.guards {
                        visitor.visit_guard(map, state, transition, guard);
                    }
                }
                visitor.leave_state(map, state);
            }
            visitor.leave_map(map);
        }
        visitor.leave_fsm(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::model::{EndState, Signature};

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        fn visit_map(&mut self, map: &Map) {
            self.0.push(format!("map {}", map.name));
        }
        fn visit_state(&mut self, _map: &Map, state: &State) {
            self.0.push(format!("state {}", state.name));
        }
        fn visit_guard(&mut self, map: &Map, _state: &State, t: &Transition, g: &Guard) {
            let end = match g.end {
                EndState::Nil => "nil".to_string(),
                EndState::State(id) => map.state_name(id).to_string(),
            };
            self.0.push(format!("guard {} -> {}", t.name(), end));
        }
    }

    #[test]
    fn test_walk_order() {
        let mut map = Map::new("Main", 1);
        let idle = map.declare("Idle", 2);
        let running = map.intern("Running", 3);
        let mut go = Transition::new(Signature::new("Go", vec![]), 3);
        go.guards.push(Guard {
            condition: None,
            end: EndState::State(running),
            actions: vec![],
            line: 3,
        });
        map[idle].transitions.push(go);

        let fsm = Fsm {
            maps: vec![map],
            ..Fsm::default()
        };
        let mut recorder = Recorder::default();
        fsm.accept(&mut recorder);

        assert_eq!(
            recorder.0,
            vec!["map Main", "state Idle", "guard Go -> Running", "state Running"]
        );
    }
}
