//! Declarations unit
//!
//!     Layout, top to bottom: include guard and runtime include, raw code blocks, namespaces,
//!     forward declarations, the state base class, the map's default state class, one class
//!     per remaining state, the map class and finally the context template.

use super::names::{declared_parameters, forwarded_arguments, Names};
use super::writer::CodeWriter;
use crate::backend::GenerateOptions;
use smc_parser::smc::model::{Fsm, Map, State};

pub(crate) fn render_header(
    fsm: &Fsm,
    map: &Map,
    names: &Names,
    stem: &str,
    options: &GenerateOptions,
) -> String {
    let mut w = CodeWriter::new(options.indent);
    let guard = include_guard(stem);

    w.line(format!("#ifndef {}", guard));
    w.line(format!("#define {}", guard));
    w.blank();
    w.line(format!("#include \"{}\"", options.runtime_include));
    w.blank();

    for block in &fsm.raw_code {
        w.verbatim(block.trim_matches('\n'));
        w.blank();
    }

    for package in &fsm.packages {
        w.line(format!("namespace {} {{", package));
    }
    if !fsm.packages.is_empty() {
        w.blank();
    }

    forward_declarations(&mut w, fsm, map, names);
    state_base_class(&mut w, map, names);
    state_classes(&mut w, map, names);
    map_class(&mut w, map, names);
    context_class(&mut w, fsm, map, names);

    for package in fsm.packages.iter().rev() {
        w.line(format!("}} // namespace {}", package));
    }
    if !fsm.packages.is_empty() {
        w.blank();
    }
    w.line(format!("#endif // {}", guard));
    w.finish()
}

fn include_guard(stem: &str) -> String {
    let name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_H", name)
}

fn forward_declarations(w: &mut CodeWriter, fsm: &Fsm, map: &Map, names: &Names) {
    w.line("// Forward declarations.");
    w.line(format!("class {};", names.map));
    for state in &map.states {
        w.line(format!("class {};", names.state_class(&state.name)));
    }
    w.line(format!("class {};", names.state_base));
    w.line(format!("template<typename Derived> class {};", names.fsm_class));
    w.line(format!("class {};", names.class));
    for declare in &fsm.declares {
        if declare.split_whitespace().count() == 1 {
            w.line(format!("class {};", declare));
        } else {
            w.line(format!("{};", declare));
        }
    }
    w.blank();
}

fn state_base_class(w: &mut CodeWriter, map: &Map, names: &Names) {
    let base = &names.state_base;
    w.line("// State base class.");
    w.line(format!("class {} : public statemap::State", base));
    w.line("{");
    w.line("public:");
    w.indent();
    w.line(format!(
        "{}(const char *name, int no) : statemap::State(name, no) {{}}",
        base
    ));
    w.blank();
    w.line(format!("virtual void Entry({}&) {{}}", names.context));
    w.line(format!("virtual void Exit({}&) {{}}", names.context));
    w.blank();
    for signature in &map.signatures {
        w.line(format!(
            "virtual {} {}({});",
            names.return_type(),
            signature.name,
            names.method_parameters(signature)
        ));
    }
    w.dedent();
    w.line("protected:");
    w.indent();
    w.line(format!("virtual void Default({}& context);", names.context));
    w.close_brace(";");
    w.blank();
}

fn state_classes(w: &mut CodeWriter, map: &Map, names: &Names) {
    let default_class = names.default_class();

    w.line("// Map default state class.");
    match map.default_state() {
        Some(default) => state_class(w, default, &default_class, &names.state_base, names),
        None => state_class_shell(w, &default_class, &names.state_base),
    }

    w.line("// Map state classes.");
    for state in map.states.iter().filter(|state| !state.is_default()) {
        let class = names.state_class(&state.name);
        state_class(w, state, &class, &default_class, names);
    }
}

fn state_class_shell(w: &mut CodeWriter, class: &str, parent: &str) {
    w.line(format!("class {} : public {}", class, parent));
    w.line("{");
    w.line("public:");
    w.indent();
    w.line(format!(
        "{}(const char *name, int no) : {}(name, no) {{}}",
        class, parent
    ));
    w.close_brace(";");
    w.blank();
}

fn state_class(w: &mut CodeWriter, state: &State, class: &str, parent: &str, names: &Names) {
    if let Some(documentation) = &state.documentation {
        for line in documentation.lines() {
            w.line(format!("// {}", line).trim_end());
        }
    }
    w.line(format!("class {} : public {}", class, parent));
    w.line("{");
    w.line("public:");
    w.indent();
    w.line(format!(
        "{}(const char *name, int no) : {}(name, no) {{}}",
        class, parent
    ));

    if state.entry.is_some() || state.exit.is_some() {
        w.blank();
    }
    if state.entry.is_some() {
        w.line(format!("void Entry({}& context);", names.context));
    }
    if state.exit.is_some() {
        w.line(format!("void Exit({}& context);", names.context));
    }

    if !state.transitions.is_empty() {
        w.blank();
    }
    for transition in &state.transitions {
        w.line(format!(
            "{} {}({});",
            names.return_type(),
            transition.name(),
            names.method_parameters(&transition.signature)
        ));
    }
    w.close_brace(";");
    w.blank();
}

fn map_class(w: &mut CodeWriter, map: &Map, names: &Names) {
    w.line("// Map class.");
    w.line(format!("class {}", names.map));
    w.line("{");
    w.line("public:");
    w.indent();
    w.line(format!("{}();", names.map));
    w.blank();
    for state in &map.states {
        w.line(format!("{} {};", names.state_class(&state.name), state.name));
    }
    w.close_brace(";");
    w.blank();
}

fn context_class(w: &mut CodeWriter, fsm: &Fsm, map: &Map, names: &Names) {
    let class = &names.fsm_class;

    if let Some(documentation) = &fsm.documentation {
        for line in documentation.lines() {
            w.line(format!("// {}", line).trim_end());
        }
    } else {
        w.line("// Context class.");
    }
    w.line("template<typename Derived>");
    w.line(format!(
        "class {} : public statemap::FSMContext, public {}",
        class, names.map
    ));
    w.line("{");
    w.line("public:");
    w.indent();

    w.line(format!("explicit {}(statemap::Notifier& notifier)", class));
    w.line(format!(
        "    : FSMContext(notifier, {}::{}) {{}}",
        names.map, names.start
    ));
    w.line(format!(
        "{}(statemap::Notifier& notifier, const statemap::State& state)",
        class
    ));
    w.line("    : FSMContext(notifier, state) {}");
    w.blank();

    w.line("void setStartState(const statemap::State& state)");
    w.open_brace();
    w.line("setState(state);");
    w.close_brace("");
    w.blank();

    w.line("virtual void enterStartState()");
    w.open_brace();
    w.line("getState().Entry(*this);");
    w.close_brace("");
    w.blank();

    w.line("Derived& getOwner()");
    w.open_brace();
    w.line("return *static_cast<Derived*>(this);");
    w.close_brace("");
    w.blank();

    w.line("const Derived& getOwner() const");
    w.open_brace();
    w.line("return *static_cast<const Derived*>(this);");
    w.close_brace("");
    w.blank();

    w.line(format!("{}& getState() const", names.state_base));
    w.open_brace();
    w.line("if (_state == nullptr)");
    w.open_brace();
    w.line("throw statemap::StateUndefinedException();");
    w.close_brace("");
    w.line(format!("return dynamic_cast<{}&>(*_state);", names.state_base));
    w.close_brace("");

    for signature in &map.signatures {
        w.blank();
        let mut arguments = vec!["*this"];
        arguments.extend(forwarded_arguments(signature));
        let call = format!("getState().{}({})", signature.name, arguments.join(", "));

        w.line(format!(
            "{} {}({})",
            names.return_type(),
            signature.name,
            declared_parameters(signature).join(", ")
        ));
        w.open_brace();
        w.line(format!("setTransition(\"{}\");", signature.name));
        match &names.return_type {
            Some(return_type) => {
                w.line(format!("{} result = {};", return_type, call));
                w.line("setTransition(nullptr);");
                w.line("return result;");
            }
            None => {
                w.line(format!("{};", call));
                w.line("setTransition(nullptr);");
            }
        }
        w.close_brace("");
    }
    w.close_brace(";");
    w.blank();
}
