//! # smc-parser
//!
//! Front end of the smc state machine compiler.
//!
//! File Layout
//!
//!     The crate follows the pipeline order. Each stage only depends on the stages above it:
//!
//!     src/smc
//!       ├── token      Token kinds, keyword and operator tables
//!       ├── lexing     Tokenizer over the logos scanner, preprocessor line markers, doc comments
//!       ├── model      The state machine model (FSM, maps, states, transitions, guards)
//!       ├── parsing    Recursive descent parser and the guard expression parser
//!       ├── loader     Source loading shortcuts used by the CLI and the tests
//!       └── testing    Sample sources shared by tests across the workspace
//!
//!     The contract is source text in, [`Fsm`](smc::model::Fsm) out. Code generation lives in
//!     the `smc-codegen` crate and only ever sees the finished model.

pub mod smc;

pub use smc::error::SyntaxError;
pub use smc::model::Fsm;
pub use smc::parsing::{parse_str, ParseOutcome, Parser};
