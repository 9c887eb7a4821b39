//! Graphviz backend
//!
//!     One `digraph` per map. States are boxes, placeholders (targets that were never
//!     declared) are dashed boxes, and every guard is an edge labelled `T(args) [condition]`.
//!     A `nil` guard stays in its state, so it is drawn as a dashed self loop. The implicit
//!     `Default` state only shows up when it has transitions of its own.

use crate::backend::{file_stem, Artifact, Backend, GenerateOptions};
use crate::error::GenerateError;
use smc_parser::smc::model::{EndState, Expression, Fsm, Guard, Map, State, Transition, Visitor};

pub struct DotBackend;

impl Backend for DotBackend {
    fn name(&self) -> &str {
        "dot"
    }

    fn description(&self) -> &str {
        "Graphviz digraph of states and guarded transitions"
    }

    fn generate(
        &self,
        fsm: &Fsm,
        _options: &GenerateOptions,
    ) -> Result<Vec<Artifact>, GenerateError> {
        let stem = file_stem(fsm)?;
        let mut writer = DotWriter {
            output: String::new(),
            start: fsm.start_parts(),
        };
        fsm.accept(&mut writer);
        Ok(vec![Artifact::new(format!("{}.dot", stem), writer.output)])
    }
}

struct DotWriter {
    output: String,
    start: Option<(String, String)>,
}

impl DotWriter {
    fn push_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn shown(state: &State) -> bool {
    !state.is_default() || state.declared || !state.transitions.is_empty()
}

impl Visitor for DotWriter {
    fn visit_map(&mut self, map: &Map) {
        self.push_line(&format!("digraph \"{}\" {{", escape(&map.name)));
        self.push_line("    node [shape=box];");

        let start = self
            .start
            .as_ref()
            .filter(|(start_map, _)| *start_map == map.name)
            .map(|(_, state)| state.clone());
        if let Some(state) = start {
            self.push_line("    \"%start\" [shape=point];");
            self.push_line(&format!("    \"%start\" -> \"{}\";", escape(&state)));
        }
    }

    fn leave_map(&mut self, _map: &Map) {
        self.push_line("}");
    }

    fn visit_state(&mut self, _map: &Map, state: &State) {
        if !shown(state) {
            return;
        }
        if state.declared || state.is_default() {
            self.push_line(&format!("    \"{}\";", escape(&state.name)));
        } else {
            self.push_line(&format!("    \"{}\" [style=dashed];", escape(&state.name)));
        }
    }

    fn visit_guard(&mut self, map: &Map, state: &State, transition: &Transition, guard: &Guard) {
        let label = escape(&edge_label(transition, guard));
        let from = escape(&state.name);
        match guard.end {
            EndState::Nil => self.push_line(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\", style=dashed];",
                from, from, label
            )),
            EndState::State(id) => self.push_line(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                from,
                escape(map.state_name(id)),
                label
            )),
        }
    }
}

fn edge_label(transition: &Transition, guard: &Guard) -> String {
    let arguments: Vec<&str> = transition
        .parameters()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    let mut label = format!("{}({})", transition.name(), arguments.join(", "));
    if let Some(condition) = &guard.condition {
        label.push_str(&format!(" [{}]", bare_condition(condition)));
    }
    label
}

/// Condition text without the parentheses around the outermost operation.
fn bare_condition(condition: &Expression) -> String {
    let text = condition.to_string();
    match condition {
        Expression::Binary { .. } => text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .map(str::to_string)
            .unwrap_or(text),
        _ => text,
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
