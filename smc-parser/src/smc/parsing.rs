//! Parsing
//!
//!     Recursive descent over the token stream with one token of lookahead. The grammar is
//!     small enough that every production is a method on [Parser]:
//!
//!         file        := header* '%map' IDENT map-body
//!         header      := directive | '%{' raw '%}'
//!         map-body    := '{' state* '}' | '%%' state* '%%'
//!         state       := IDENT (Entry actions | Exit actions)* '{' transition* '}'
//!         transition  := IDENT ('(' params ')')? ('[' condition ']')? end-state actions
//!         end-state   := 'nil' | IDENT | IDENT '::' IDENT
//!         actions     := '{' (IDENT '(' args ')' ';')* '}'
//!
//!     Guard conditions are parsed by a Pratt parser, see [expression](expression).
//!
//!     The first error stops parsing and no model is returned; there is no recovery.
//!
//! Early Exit
//!
//!     Just before the map body, after the header has settled the output names, the parser
//!     asks a [FreshnessCheck] whether generating again would be pointless. If it says so,
//!     [Parser::parse] returns [ParseOutcome::UpToDate] without reading the rest.

pub mod expression;
pub mod freshness;
pub mod parser;

pub use freshness::{AlwaysStale, FreshnessCheck};
pub use parser::Parser;

use crate::smc::error::SyntaxError;
use crate::smc::lexing::Tokenizer;
use crate::smc::model::Fsm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Model(Fsm),
    /// The freshness check reported the generated output as current
    UpToDate,
}

impl ParseOutcome {
    pub fn into_model(self) -> Option<Fsm> {
        match self {
            ParseOutcome::Model(fsm) => Some(fsm),
            ParseOutcome::UpToDate => None,
        }
    }
}

/// Parse a source string with no file context.
pub fn parse_str(source: &str) -> Result<Fsm, SyntaxError> {
    Parser::new(Tokenizer::new(source)).parse_model()
}
