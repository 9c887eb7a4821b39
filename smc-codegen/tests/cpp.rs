//! Integration tests for the C++ backend.

use smc_codegen::backends::cpp::CppBackend;
use smc_codegen::{Artifact, Backend, BackendRegistry, GenerateError, GenerateOptions};
use smc_parser::parse_str;
use smc_parser::smc::testing::{CONNECTION, MINIMAL, TURNSTILE};

fn generate_with(source: &str, options: &GenerateOptions) -> (Artifact, Artifact) {
    let fsm = parse_str(source).expect("Failed to parse");
    let mut artifacts = CppBackend.generate(&fsm, options).expect("Failed to generate");
    assert_eq!(artifacts.len(), 2);
    let source = artifacts.remove(1);
    let header = artifacts.remove(0);
    (header, source)
}

fn generate(source: &str) -> (Artifact, Artifact) {
    generate_with(source, &GenerateOptions::default())
}

/// Position of each needle, searching forward from the previous one.
fn ordered_positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    let mut from = 0;
    needles
        .iter()
        .map(|needle| {
            let found = haystack[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' not found in order", needle));
            from += found + needle.len();
            from
        })
        .collect()
}

#[test]
fn test_minimal_source() {
    let (_, source) = generate(MINIMAL);
    assert_eq!(source.file_name, "Ctx_sm.cpp");
    insta::assert_snapshot!(source.contents, @r###"
    #include "Ctx_sm.h"

    // Map constructor.
    Map::Map() :
        Idle("Idle", 0),
        Running("Running", 1),
        Default("Default", 2)
    {
    }

    // State base class.
    void CtxState::Go(CtxContext<Ctx>& context)
    {
        Default(context);
    }

    void CtxState::Stop(CtxContext<Ctx>& context)
    {
        Default(context);
    }

    void CtxState::Default(CtxContext<Ctx>& context)
    {
        throw statemap::TransitionUndefinedException(
            context.getState().getName(), context.getTransition());
    }

    void Map_Idle::Go(CtxContext<Ctx>& context)
    {
        Ctx& ctxt = context.getOwner();

        context.getState().Exit(context);
        context.setState(context.Running);
        context.getState().Entry(context);
    }

    void Map_Running::Stop(CtxContext<Ctx>& context)
    {
        Ctx& ctxt = context.getOwner();

        if (ctxt.done)
        {
            context.getState().Exit(context);
            context.setState(context.Idle);
            context.getState().Entry(context);
        }
        else
        {
            Map_Default::Stop(context);
        }
    }
    "###);
}

#[test]
fn test_minimal_header() {
    let (header, _) = generate(MINIMAL);
    assert_eq!(header.file_name, "Ctx_sm.h");
    let text = &header.contents;

    assert!(text.starts_with("#ifndef CTX_SM_H\n#define CTX_SM_H\n\n#include \"statemap.h\"\n"));
    assert!(text.trim_end().ends_with("#endif // CTX_SM_H"));

    ordered_positions(
        text,
        &[
            "// Forward declarations.",
            "class Map;",
            "class Map_Idle;",
            "class Map_Running;",
            "class Map_Default;",
            "class CtxState;",
            "template<typename Derived> class CtxContext;",
            "class Ctx;",
            "class CtxState : public statemap::State",
            "virtual void Entry(CtxContext<Ctx>&) {}",
            "virtual void Go(CtxContext<Ctx>& context);",
            "virtual void Stop(CtxContext<Ctx>& context);",
            "protected:",
            "virtual void Default(CtxContext<Ctx>& context);",
            "class Map_Default : public CtxState",
            "class Map_Idle : public Map_Default",
            "void Go(CtxContext<Ctx>& context);",
            "class Map_Running : public Map_Default",
            "void Stop(CtxContext<Ctx>& context);",
            "class Map\n{",
            "Map_Idle Idle;",
            "Map_Running Running;",
            "Map_Default Default;",
            "class CtxContext : public statemap::FSMContext, public Map",
            ": FSMContext(notifier, Map::Idle) {}",
            "throw statemap::StateUndefinedException();",
            "return dynamic_cast<CtxState&>(*_state);",
            "void Go()",
            "setTransition(\"Go\");",
            "getState().Go(*this);",
            "setTransition(nullptr);",
            "void Stop()",
        ],
    );
}

#[test]
fn test_turnstile_uses_parameters_and_hooks() {
    let (header, source) = generate(TURNSTILE);
    let source = &source.contents;
    let header = &header.contents;

    assert!(header.contains("#include <cstdio>"));
    assert!(header.contains("// Waiting for a coin.\nclass Main_Locked : public Main_Default"));
    assert!(header.contains("// A coin operated turnstile.\ntemplate<typename Derived>"));
    assert!(header.contains("void Entry(TurnstileContext<Turnstile>& context);"));
    assert!(header.contains("void Coin(int amount)"));
    assert!(header.contains("getState().Coin(*this, amount);"));

    ordered_positions(
        source,
        &[
            "#include \"Coin.h\"",
            "#include \"Turnstile.h\"",
            "#include \"Turnstile_sm.h\"",
        ],
    );
    ordered_positions(
        source,
        &[
            "void Main_Locked::Entry(TurnstileContext<Turnstile>& context)",
            "ctxt.lightOff();",
            "void Main_Locked::Coin(TurnstileContext<Turnstile>& context, int amount)",
            "if ((amount == 25) && ctxt.isAccepted(amount))",
            "context.setState(context.Unlocked);",
            "ctxt.unlock();",
            "ctxt.thankYou(amount);",
            "else",
            "ctxt.refund(amount);",
            "void Main_Locked::Pass(TurnstileContext<Turnstile>& context)",
            "ctxt.alarm();",
            "void Main_Unlocked::Exit(TurnstileContext<Turnstile>& context)",
        ],
    );
}

#[test]
fn test_nil_guard_does_not_change_state() {
    let (_, source) = generate("%class C %start M::S %map M { S { Ping() nil { pong(); } } }");
    let body = source
        .contents
        .split("void M_S::Ping(CContext<C>& context)")
        .nth(1)
        .expect("Ping body");
    let body = &body[..body.find("\n}\n").expect("end of body")];
    assert!(body.contains("ctxt.pong();"));
    assert!(!body.contains("setState"));
    assert!(!body.contains("Exit(context)"));
}

#[test]
fn test_conditional_guards_come_before_the_fallback() {
    let (_, source) = generate("%class C %start M::S %map M { S { T() B {} T() [cond] A {} } A {} B {} }");
    ordered_positions(
        &source.contents,
        &[
            "void M_S::T(CContext<C>& context)",
            "if (ctxt.cond)",
            "context.setState(context.A);",
            "else",
            "context.setState(context.B);",
        ],
    );
}

#[test]
fn test_unreachable_guards_are_dropped() {
    let (_, source) = generate("%class C %start M::S %map M { S { T() A {} T() B {} } A {} B {} }");
    assert!(source.contents.contains("context.setState(context.A);"));
    assert!(!source.contents.contains("context.setState(context.B);"));
    assert!(!source.contents.contains("if ("));
}

#[test]
fn test_default_state_falls_back_to_base_class() {
    let (header, source) =
        generate("%class C %start M::S %map M { S {} Default { T() [ok] S {} } }");
    assert!(header.contents.contains("class M_Default : public CState"));
    ordered_positions(
        &source.contents,
        &[
            "void M_Default::T(CContext<C>& context)",
            "if (ctxt.ok)",
            "else",
            "CState::T(context);",
        ],
    );
}

#[test]
fn test_void_return_type_generates_plain_methods() {
    let (header, source) =
        generate("%class C %start M::S %return void %map M { S { T() [ok] S {} } }");
    assert!(header.contents.contains("void T()"));
    assert!(!header.contents.contains("result"));
    assert!(!source.contents.contains("return void();"));
    assert!(!source.contents.contains("return M_Default::T"));
    assert!(source.contents.contains("M_Default::T(context);"));
}

#[test]
fn test_connection_return_type_and_namespaces() {
    let (header, source) = generate(CONNECTION);
    assert_eq!(header.file_name, "connection_sm.h");
    assert_eq!(source.file_name, "connection_sm.cpp");
    let header = &header.contents;
    let source = &source.contents;

    ordered_positions(
        header,
        &[
            "namespace net {",
            "namespace link {",
            "class Segment;",
            "class ConnectionFsm : public statemap::FSMContext, public Link",
            ": FSMContext(notifier, Link::Closed) {}",
            "bool Open(const char* host, unsigned short port)",
            "bool result = getState().Open(*this, host, port);",
            "return result;",
            "bool Open(const Address& address)",
            "} // namespace link",
            "} // namespace net",
        ],
    );
    assert!(header.contains("virtual bool Send(ConnectionFsm<Connection>& context, const Segment& segment);"));
    assert!(header.contains("Link_Closing Closing;"));

    ordered_positions(
        source,
        &[
            "bool ConnectionState::Close(ConnectionFsm<Connection>& context)",
            "Default(context);",
            "return bool();",
            "bool Link_Closed::Open(ConnectionFsm<Connection>& context, const char* host, unsigned short port)",
            "ctxt.connect(host, port);",
            "bool Link_Closed::Open(ConnectionFsm<Connection>& context, const Address& address)",
            "ctxt.connect(address);",
        ],
    );
    ordered_positions(
        source,
        &[
            "bool Link_Established::Send(ConnectionFsm<Connection>& context, const Segment& segment)",
            "if (ctxt.isWritable())",
            "ctxt.write(segment);",
            "else",
            "return Link_Default::Send(context, segment);",
            "return bool();",
        ],
    );
    ordered_positions(
        source,
        &[
            "bool Link_Opening::Opened(ConnectionFsm<Connection>& context)",
            "if (!ctxt.isBlocked())",
            "else if ((ctxt.retries == 0) || ctxt.isBlocked())",
            "ctxt.fail(\"blocked\");",
            "else",
            "return Link_Default::Opened(context);",
        ],
    );
}

#[test]
fn test_generated_chain_reflects_the_model() {
    let options = GenerateOptions {
        debug: true,
        ..GenerateOptions::default()
    };
    for (name, sample) in smc_parser::smc::testing::all() {
        let fsm = parse_str(sample).expect("Failed to parse");
        let map = fsm.map().expect("map");
        let (_, source) = generate_with(sample, &options);

        let mut derived: Vec<(String, usize)> = Vec::new();
        for line in source.contents.lines() {
            let line = line.trim();
            if line.starts_with("// <input>(") {
                let signature = line.split("): ").nth(1).expect("signature").to_string();
                derived.push((signature, 0));
            } else if line.starts_with("// Guard ") {
                derived.last_mut().expect("guard inside a transition").1 += 1;
            }
        }

        let default = map.states.iter().filter(|s| s.is_default());
        let others = map.states.iter().filter(|s| !s.is_default());
        let expected: Vec<(String, usize)> = default
            .chain(others)
            .flat_map(|state| state.transitions.iter())
            .map(|t| {
                let reachable = t.conditional_guards().count() + t.fallback_guard().map_or(0, |_| 1);
                (t.signature.to_string(), reachable)
            })
            .collect();
        assert_eq!(derived, expected, "{}", name);
    }
}

#[test]
fn test_custom_extensions_and_indent() {
    let options = GenerateOptions {
        indent: 2,
        header_extension: "hpp".to_string(),
        source_extension: "cc".to_string(),
        runtime_include: "statemap/statemap.h".to_string(),
        ..GenerateOptions::default()
    };
    let (header, source) = generate_with(MINIMAL, &options);
    assert_eq!(header.file_name, "Ctx_sm.hpp");
    assert_eq!(source.file_name, "Ctx_sm.cc");
    assert!(header.contents.contains("#include \"statemap/statemap.h\""));
    assert!(source.contents.contains("#include \"Ctx_sm.hpp\""));
    assert!(source.contents.contains("\n  Default(context);\n"));
}

#[test]
fn test_generation_errors() {
    let registry = BackendRegistry::with_defaults();
    let options = GenerateOptions::default();

    let fsm = parse_str("%class C %map M { S {} }").unwrap();
    assert_eq!(
        registry.generate(&fsm, "cpp", &options),
        Err(GenerateError::MissingDirective("%start".to_string()))
    );

    let fsm = parse_str("%class C %start M::Nope %map M { S {} }").unwrap();
    assert_eq!(
        registry.generate(&fsm, "cpp", &options),
        Err(GenerateError::UnknownState("M::Nope".to_string()))
    );

    assert_eq!(
        registry.generate(&fsm, "java", &options),
        Err(GenerateError::BackendNotFound("java".to_string()))
    );
}
