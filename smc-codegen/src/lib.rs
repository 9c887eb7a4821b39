//! Code generation for smc state machines
//!
//!     This crate turns a parsed [Fsm](smc_parser::Fsm) into target files. Every target is a
//!     [Backend]; the [BackendRegistry] holds the known ones and the caller picks one by name
//!     for the whole run.
//!
//!     This is a pure lib: it renders artifacts into memory and never touches the filesystem,
//!     the environment or stdout. Writing files is the driver's job.
//!
//! Architecture
//!
//!     - Backend trait: uniform interface, model in, artifacts out
//!     - BackendRegistry: discovery and selection by name
//!     - Backends: one module per target
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── backend.rs              # Backend trait, Artifact, GenerateOptions
//!     ├── registry.rs             # BackendRegistry
//!     ├── backends
//!     │   ├── cpp                 # State pattern classes over the statemap runtime
//!     │   │   ├── mod.rs
//!     │   │   ├── names.rs        # Generated class and method names
//!     │   │   ├── expression.rs   # Guard conditions as C++ expressions
//!     │   │   ├── header.rs       # Declarations unit
//!     │   │   ├── source.rs       # Definitions unit
//!     │   │   └── writer.rs       # Indenting line writer
//!     │   ├── dot.rs              # Graphviz digraph
//!     │   └── json.rs             # The model as JSON
//!     └── lib.rs
//!
//! Output contract
//!
//!     A backend either returns every artifact or an error. It never returns a partial set, so
//!     the driver can render everything before it writes anything.
//!
//!     Artifact names derive from the machine's file base name (`%fsmfile`, or `<class>_sm`),
//!     which makes `%class` mandatory for every backend.

pub mod backend;
pub mod backends;
pub mod error;
pub mod registry;

pub use backend::{file_stem, Artifact, Backend, GenerateOptions};
pub use error::GenerateError;
pub use registry::BackendRegistry;
