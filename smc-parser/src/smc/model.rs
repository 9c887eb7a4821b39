//! Domain model
//!
//!     The in-memory form of a parsed state machine. The parser builds it, the code generators
//!     read it. Nothing in here knows about tokens or target languages.
//!
//! Structure
//!
//!         Fsm
//!         └── Map                    (exactly one per file)
//!             ├── State (arena)      addressed by StateId
//!             │   ├── Entry / Exit   optional action lists
//!             │   └── Transition     identified by (name, parameter types)
//!             │       └── Guard      optional condition, end state, actions
//!             │           └── Expression
//!             └── Signature list     every distinct transition signature, first seen first
//!
//!     States live in a `Vec` owned by their map and refer to each other through [StateId]
//!     indexes. A state named as a transition target before it is declared is created as a
//!     placeholder with `declared == false`; its own declaration later fills in the same slot,
//!     so every guard pointing at it stays valid. Iteration is always in arena order, which is
//!     the order states were first mentioned.
//!
//!     The whole model derives `Serialize` so a backend can dump it as data.

pub mod action;
pub mod expression;
pub mod fsm;
pub mod guard;
pub mod map;
pub mod state;
pub mod transition;
pub mod visitor;

pub use action::{Action, Argument};
pub use expression::{BinaryOp, Expression, Reference, UnaryOp};
pub use fsm::Fsm;
pub use guard::{EndState, Guard};
pub use map::{Map, DEFAULT_STATE};
pub use state::{State, StateId};
pub use transition::{Parameter, Signature, Transition};
pub use visitor::Visitor;
