//! Integration tests for the parser.

use smc_parser::smc::model::{EndState, Expression, Fsm, Map, DEFAULT_STATE};
use smc_parser::smc::testing::{CONNECTION, MINIMAL, TURNSTILE};
use smc_parser::{parse_str, SyntaxError};

fn parse(source: &str) -> Fsm {
    parse_str(source).expect("Failed to parse")
}

fn only_map(fsm: &Fsm) -> &Map {
    assert_eq!(fsm.maps.len(), 1);
    &fsm.maps[0]
}

#[test]
fn test_end_to_end_scenario() {
    let fsm = parse(
        "%start Map::Idle\n%class Ctx\n%map Map {\n Idle {\n  Go() Running {}\n }\n Running {\n  Stop() [done] Idle {}\n }\n}",
    );
    let map = only_map(&fsm);
    assert_eq!(map.name, "Map");

    let names: Vec<&str> = map.states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Idle", "Running", DEFAULT_STATE]);

    let idle = map.state_named("Idle").expect("Idle");
    let running = map.state_named("Running").expect("Running");

    assert_eq!(idle.transitions.len(), 1);
    let go = &idle.transitions[0];
    assert_eq!(go.name(), "Go");
    assert!(go.parameters().is_empty());
    assert_eq!(go.guards.len(), 1);
    assert_eq!(go.guards[0].condition, None);
    assert_eq!(go.guards[0].end, EndState::State(running.id));

    assert_eq!(running.transitions.len(), 1);
    let stop = &running.transitions[0];
    assert_eq!(stop.name(), "Stop");
    assert_eq!(stop.guards.len(), 1);
    assert_eq!(stop.guards[0].condition, Some(Expression::variable("done")));
    assert_eq!(stop.guards[0].end, EndState::State(idle.id));

    assert!(!map.default_state().expect("default").declared);
}

#[test]
fn test_malformed_parameter_list() {
    let result = parse_str("%map Map { Idle { Go( } }");
    let err: SyntaxError = result.expect_err("must not produce a model");
    assert_eq!(err.expected.as_deref(), Some("parameter name or ')'"));
    assert_eq!(err.found.as_deref(), Some("'}'"));
    assert_eq!(err.line(), 1);
}

#[test]
fn test_unterminated_character_literal() {
    let err = parse_str("%class A\n'a").expect_err("must fail");
    assert!(
        err.message.starts_with("unterminated character literal"),
        "got: {}",
        err
    );
    assert_ne!(err.found.as_deref(), Some("end of input"));
    assert_eq!(err.line(), 2);
}

#[test]
fn test_same_signature_merges_guards() {
    let fsm = parse(
        "%class A %map M {\n\
           S {\n\
             T(x: int) [x == 1] A {}\n\
             T(y: int) [y == 2] B {}\n\
             T(x: long) nil {}\n\
           }\n\
           A {} B {}\n\
         }",
    );
    let map = only_map(&fsm);
    let state = map.state_named("S").expect("S");
    assert_eq!(state.transitions.len(), 2);
    assert_eq!(state.transitions[0].guards.len(), 2);
    assert_eq!(state.transitions[1].guards.len(), 1);

    let signatures: Vec<String> = map.signatures.iter().map(|s| s.to_string()).collect();
    assert_eq!(signatures, vec!["T(x: int)", "T(x: long)"]);
}

#[test]
fn test_forward_reference_resolves_to_declared_state() {
    let fsm = parse("%class A %map M { First { Go() Second {} } Second { Back() First {} } }");
    let map = only_map(&fsm);
    let second = map.state_named("Second").expect("Second");
    assert!(second.declared);
    assert_eq!(
        map.state_named("First").expect("First").transitions[0].guards[0].end,
        EndState::State(second.id)
    );
}

#[test]
fn test_undeclared_target_stays_a_placeholder() {
    let fsm = parse("%class A %map M { First { Go() Nowhere {} } }");
    let map = only_map(&fsm);
    let nowhere = map.state_named("Nowhere").expect("placeholder");
    assert!(!nowhere.declared);
    assert!(nowhere.transitions.is_empty());
    let undeclared: Vec<&str> = map.undeclared_states().map(|s| s.name.as_str()).collect();
    assert_eq!(undeclared, vec!["Nowhere"]);
}

#[test]
fn test_guards_keep_declaration_order() {
    let fsm = parse("%class A %map M { S { T() [cond] A {} T() B {} } A {} B {} }");
    let map = only_map(&fsm);
    let transition = &map.state_named("S").expect("S").transitions[0];
    assert_eq!(transition.guards.len(), 2);
    assert!(transition.guards[0].is_conditional());
    assert!(!transition.guards[1].is_conditional());
    assert_eq!(
        transition.fallback_guard().map(|g| g.end),
        Some(EndState::State(map.state_id("B").expect("B")))
    );
}

#[test]
fn test_samples_parse() {
    for (name, source) in smc_parser::smc::testing::all() {
        let fsm = parse_str(source).unwrap_or_else(|e| panic!("{} failed: {}", name, e));
        assert!(fsm.map().is_some(), "{} has no map", name);
    }
}

#[test]
fn test_turnstile_sample() {
    let fsm = parse(TURNSTILE);
    assert_eq!(fsm.start_state().as_deref(), Some("Main::Locked"));
    assert_eq!(fsm.header.as_deref(), Some("Turnstile.h"));
    assert_eq!(fsm.includes, vec!["Coin.h"]);
    assert_eq!(fsm.package_comment.as_deref(), Some("Gates"));
    assert_eq!(fsm.documentation.as_deref(), Some("A coin operated turnstile."));
    assert_eq!(fsm.raw_code.len(), 1);

    let map = only_map(&fsm);
    let locked = map.state_named("Locked").expect("Locked");
    assert_eq!(locked.documentation.as_deref(), Some("Waiting for a coin."));
    assert_eq!(locked.transitions[0].guards.len(), 2);
    assert_eq!(
        locked.transitions[0].guards[0]
            .condition
            .as_ref()
            .map(|c| c.to_string()),
        Some("((amount == 25) && isAccepted(amount))".to_string())
    );
    assert!(locked.entry.is_some());
    assert!(locked.exit.is_none());
}

#[test]
fn test_connection_sample() {
    let fsm = parse(CONNECTION);
    assert_eq!(fsm.fsm_file().as_deref(), Some("connection_sm"));
    assert_eq!(fsm.context_type().as_deref(), Some("ConnectionFsm<Connection>"));
    assert_eq!(fsm.packages, vec!["net", "link"]);
    assert_eq!(fsm.return_type.as_deref(), Some("bool"));

    let map = only_map(&fsm);
    let closed = map.state_named("Closed").expect("Closed");
    assert_eq!(closed.transitions.len(), 2, "Open is overloaded");

    let default = map.default_state().expect("Default");
    assert!(default.declared);
    let undeclared: Vec<&str> = map.undeclared_states().map(|s| s.name.as_str()).collect();
    assert_eq!(undeclared, vec!["Closing"]);
}

#[test]
fn test_minimal_sample_matches_scenario() {
    let fsm = parse(MINIMAL);
    assert_eq!(fsm.context_type().as_deref(), Some("CtxContext<Ctx>"));
    assert_eq!(fsm.fsm_file().as_deref(), Some("Ctx_sm"));
}

#[test]
fn test_error_display() {
    let err = parse_str("%class A\n%map M {\n S { T() [a < b] nil {} }\n}").expect_err("must fail");
    insta::assert_snapshot!(err.to_string(), @"syntax error: expected ']', found '<' at <input>(3)");
}
