//! Actions and their arguments
//!
//!     An action is a call on the context object, `name(arg, ...)`. Arguments are kept as the
//!     raw source text between the separating commas so any target-language expression can be
//!     passed through without the DSL understanding it.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Argument(String);

impl Argument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub line: usize,
}

impl Action {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>, line: usize) -> Self {
        Self {
            name: name.into(),
            arguments,
            line,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument)?;
        }
        f.write_str(")")
    }
}
