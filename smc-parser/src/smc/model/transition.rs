//! Transitions and signatures
//!
//!     A transition is identified by its name plus the ordered list of its parameter types.
//!     Parameter names do not take part in identity: `Go(a: int)` and `Go(b: int)` are the
//!     same transition, `Go(a: int)` and `Go(a: long)` are two overloads.

use super::guard::Guard;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.type_name.as_str())
    }

    /// Identity comparison: same name and same parameter types.
    pub fn same_as(&self, other: &Signature) -> bool {
        self.name == other.name && self.parameter_types().eq(other.parameter_types())
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name == name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub signature: Signature,
    /// Alternatives in declaration order
    pub guards: Vec<Guard>,
    pub line: usize,
    pub documentation: Option<String>,
}

impl Transition {
    pub fn new(signature: Signature, line: usize) -> Self {
        Self {
            signature,
            guards: Vec::new(),
            line,
            documentation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.signature.parameters
    }

    pub fn conditional_guards(&self) -> impl Iterator<Item = &Guard> {
        self.guards.iter().filter(|g| g.condition.is_some())
    }

    /// The first guard without a condition; it runs when no conditional guard matches.
    pub fn fallback_guard(&self) -> Option<&Guard> {
        self.guards.iter().find(|g| g.condition.is_none())
    }

    /// Unconditional guards after the first one. They can never run.
    pub fn unreachable_guards(&self) -> impl Iterator<Item = &Guard> {
        self.guards.iter().filter(|g| g.condition.is_none()).skip(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::model::{EndState, Expression};

    fn guard(condition: Option<&str>, line: usize) -> Guard {
        Guard {
            condition: condition.map(Expression::variable),
            end: EndState::Nil,
            actions: vec![],
            line,
        }
    }

    #[test]
    fn test_identity_ignores_parameter_names() {
        let a = Signature::new("Go", vec![Parameter::new("a", "int")]);
        let b = Signature::new("Go", vec![Parameter::new("b", "int")]);
        let c = Signature::new("Go", vec![Parameter::new("a", "long")]);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert!(!a.same_as(&Signature::new("Go", vec![])));
    }

    #[test]
    fn test_display() {
        let signature = Signature::new(
            "Transmit",
            vec![
                Parameter::new("data", "const char*"),
                Parameter::new("size", "int"),
            ],
        );
        assert_eq!(signature.to_string(), "Transmit(data: const char*, size: int)");
    }

    #[test]
    fn test_guard_partitions() {
        let mut transition = Transition::new(Signature::new("T", vec![]), 1);
        transition.guards = vec![
            guard(None, 1),
            guard(Some("a"), 2),
            guard(None, 3),
            guard(Some("b"), 4),
        ];

        let conditional: Vec<usize> = transition.conditional_guards().map(|g| g.line).collect();
        assert_eq!(conditional, vec![2, 4]);
        assert_eq!(transition.fallback_guard().map(|g| g.line), Some(1));
        let unreachable: Vec<usize> = transition.unreachable_guards().map(|g| g.line).collect();
        assert_eq!(unreachable, vec![3]);
    }
}
