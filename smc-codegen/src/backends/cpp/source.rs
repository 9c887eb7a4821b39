//! Definitions unit
//!
//!     Transition bodies are guard chains. Conditional guards are tested in declaration order;
//!     the first unconditional guard becomes the final `else`. Without one, the final `else`
//!     hands the call to the parent class, which ends in `Default` and its
//!     `TransitionUndefinedException`.
//!
//!     A branch with a real end state leaves the current state, switches and enters the new
//!     one, then runs its actions. A `nil` branch only runs its actions.

use super::expression::render_condition;
use super::names::{forwarded_arguments, Names};
use super::writer::CodeWriter;
use crate::backend::GenerateOptions;
use smc_parser::smc::model::{Action, Fsm, Guard, Map, State, Transition};

pub(crate) fn render_source(
    fsm: &Fsm,
    map: &Map,
    names: &Names,
    stem: &str,
    options: &GenerateOptions,
) -> String {
    let mut w = CodeWriter::new(options.indent);

    for include in &fsm.includes {
        w.line(include_line(include));
    }
    if let Some(header) = &fsm.header {
        w.line(include_line(header));
    }
    w.line(format!("#include \"{}.{}\"", stem, options.header_extension));
    w.blank();

    for package in &fsm.packages {
        w.line(format!("namespace {} {{", package));
    }
    if !fsm.packages.is_empty() {
        w.blank();
    }

    map_constructor(&mut w, map, names);
    base_class_bodies(&mut w, map, names);

    let generator = StateBodies {
        fsm,
        map,
        names,
        debug: options.debug,
    };
    let default = map.states.iter().filter(|state| state.is_default());
    let others = map.states.iter().filter(|state| !state.is_default());
    for state in default.chain(others) {
        generator.state(&mut w, state);
    }

    for package in fsm.packages.iter().rev() {
        w.line(format!("}} // namespace {}", package));
    }
    w.finish()
}

fn include_line(file: &str) -> String {
    if file.starts_with('<') {
        format!("#include {}", file)
    } else {
        format!("#include \"{}\"", file)
    }
}

fn map_constructor(w: &mut CodeWriter, map: &Map, names: &Names) {
    w.line("// Map constructor.");
    w.line(format!("{}::{}() :", names.map, names.map));
    w.indent();
    let last = map.states.len().saturating_sub(1);
    for (index, state) in map.states.iter().enumerate() {
        let separator = if index == last { "" } else { "," };
        w.line(format!(
            "{}(\"{}\", {}){}",
            state.name, state.name, index, separator
        ));
    }
    w.dedent();
    w.open_brace();
    w.close_brace("");
    w.blank();
}

fn base_class_bodies(w: &mut CodeWriter, map: &Map, names: &Names) {
    let base = &names.state_base;
    w.line("// State base class.");
    for signature in &map.signatures {
        w.line(format!(
            "{} {}::{}({})",
            names.return_type(),
            base,
            signature.name,
            names.method_parameters(signature)
        ));
        w.open_brace();
        w.line("Default(context);");
        if let Some(return_type) = &names.return_type {
            w.line(format!("return {}();", return_type));
        }
        w.close_brace("");
        w.blank();
    }

    w.line(format!("void {}::Default({}& context)", base, names.context));
    w.open_brace();
    w.line("throw statemap::TransitionUndefinedException(");
    w.line("    context.getState().getName(), context.getTransition());");
    w.close_brace("");
    w.blank();
}

struct StateBodies<'a> {
    fsm: &'a Fsm,
    map: &'a Map,
    names: &'a Names,
    debug: bool,
}

impl StateBodies<'_> {
    fn state(&self, w: &mut CodeWriter, state: &State) {
        let class = self.names.state_class(&state.name);

        if let Some(actions) = &state.entry {
            self.hook(w, &class, "Entry", actions);
        }
        if let Some(actions) = &state.exit {
            self.hook(w, &class, "Exit", actions);
        }
        for transition in &state.transitions {
            self.transition(w, state, &class, transition);
        }
    }

    fn hook(&self, w: &mut CodeWriter, class: &str, hook: &str, actions: &[Action]) {
        w.line(format!(
            "void {}::{}({}& context)",
            class, hook, self.names.context
        ));
        w.open_brace();
        w.line(format!("{}& ctxt = context.getOwner();", self.names.class));
        for action in actions {
            w.line(render_action(action));
        }
        w.close_brace("");
        w.blank();
    }

    fn transition(&self, w: &mut CodeWriter, state: &State, class: &str, transition: &Transition) {
        for guard in transition.unreachable_guards() {
            tracing::warn!(
                state = %state.name,
                transition = %transition.signature,
                line = guard.line,
                "unconditional guard is unreachable and will not be generated"
            );
        }

        if self.debug {
            w.line(format!(
                "// {}({}): {}",
                self.source_name(),
                transition.line,
                transition.signature
            ));
        }
        w.line(format!(
            "{} {}::{}({})",
            self.names.return_type(),
            class,
            transition.name(),
            self.names.method_parameters(&transition.signature)
        ));
        w.open_brace();
        w.line(format!("{}& ctxt = context.getOwner();", self.names.class));
        w.blank();

        let numbered = |wanted: &Guard| {
            transition
                .guards
                .iter()
                .position(|guard| std::ptr::eq(guard, wanted))
                .map(|index| index + 1)
                .unwrap_or(0)
        };
        let conditional: Vec<&Guard> = transition.conditional_guards().collect();
        let fallback = transition.fallback_guard();

        if conditional.is_empty() {
            match fallback {
                Some(guard) => self.guard_body(w, guard, numbered(guard)),
                None => self.parent_call(w, state, transition),
            }
        } else {
            for (index, guard) in conditional.iter().enumerate() {
                let keyword = if index == 0 { "if" } else { "else if" };
                let condition = guard
                    .condition
                    .as_ref()
                    .map(|condition| render_condition(condition, &transition.signature))
                    .unwrap_or_default();
                w.line(format!("{} ({})", keyword, condition));
                w.open_brace();
                self.guard_body(w, guard, numbered(guard));
                w.close_brace("");
            }
            w.line("else");
            w.open_brace();
            match fallback {
                Some(guard) => self.guard_body(w, guard, numbered(guard)),
                None => self.parent_call(w, state, transition),
            }
            w.close_brace("");
        }

        if let Some(return_type) = &self.names.return_type {
            w.line(format!("return {}();", return_type));
        }
        w.close_brace("");
        w.blank();
    }

    fn guard_body(&self, w: &mut CodeWriter, guard: &Guard, number: usize) {
        if self.debug {
            w.line(format!("// Guard {}", number));
        }
        if let Some(id) = guard.target() {
            w.line("context.getState().Exit(context);");
            w.line(format!("context.setState(context.{});", self.map.state_name(id)));
            w.line("context.getState().Entry(context);");
        }
        for action in &guard.actions {
            w.line(render_action(action));
        }
    }

    /// Delegate to the implementation this state inherits.
    fn parent_call(&self, w: &mut CodeWriter, state: &State, transition: &Transition) {
        let parent = if state.is_default() {
            self.names.state_base.clone()
        } else {
            self.names.default_class()
        };
        let mut arguments = vec!["context"];
        arguments.extend(forwarded_arguments(&transition.signature));
        let call = format!(
            "{}::{}({});",
            parent,
            transition.name(),
            arguments.join(", ")
        );
        match self.names.return_type {
            Some(_) => w.line(format!("return {}", call)),
            None => w.line(call),
        }
    }

    fn source_name(&self) -> String {
        self.fsm
            .source_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }
}

fn render_action(action: &Action) -> String {
    let arguments: Vec<&str> = action.arguments.iter().map(|a| a.as_str()).collect();
    format!("ctxt.{}({});", action.name, arguments.join(", "))
}
