//! Guard expressions
//!
//!     The operator set is deliberately small: logical not, equality, inequality and the three
//!     logical connectives. Operands are references: a context variable, a function call with
//!     raw-text arguments, or a literal.
//!
//! Binding Power
//!
//!     | Operator        | Left | Right | Associativity |
//!     |-----------------|------|-------|---------------|
//!     | `==` `!=`       | 3    | 4     | left          |
//!     | `&&` `||` `^`   | 2    | 1     | right         |
//!     | prefix `!`      | -    | 5     | -             |
//!
//!     Equality binds tighter than the connectives. The three connectives share one level, so
//!     `a && b || c` groups as `a && (b || c)`; conditions mixing them are expected to be
//!     parenthesized by the author.

use super::action::Argument;
use crate::smc::token::Operator;
use serde::Serialize;
use std::fmt;

/// Binding power of the operand of a prefix operator.
pub const PREFIX_BINDING_POWER: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Eq,
    Ne,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub fn from_operator(op: Operator) -> Option<BinaryOp> {
        match op {
            Operator::Equal => Some(BinaryOp::Eq),
            Operator::NotEqual => Some(BinaryOp::Ne),
            Operator::And => Some(BinaryOp::And),
            Operator::Or => Some(BinaryOp::Or),
            Operator::Caret => Some(BinaryOp::Xor),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Xor => "^",
        }
    }

    /// (left, right) binding power.
    pub fn binding_power(&self) -> (u8, u8) {
        match self {
            BinaryOp::Eq | BinaryOp::Ne => (3, 4),
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => (2, 1),
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    Variable(String),
    Function {
        name: String,
        arguments: Vec<Argument>,
    },
    /// Integer, character or string literal, quotes included
    Literal(String),
}

impl Reference {
    /// The referenced name, if this is not a literal.
    pub fn name(&self) -> Option<&str> {
        match self {
            Reference::Variable(name) | Reference::Function { name, .. } => Some(name),
            Reference::Literal(_) => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Variable(name) => f.write_str(name),
            Reference::Literal(text) => f.write_str(text),
            Reference::Function { name, arguments } => {
                write!(f, "{}(", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Reference(Reference),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Reference(Reference::Variable(name.into()))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Expression::Reference(Reference::Literal(text.into()))
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Every reference in the tree, left to right.
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Reference>) {
        match self {
            Expression::Reference(reference) => found.push(reference),
            Expression::Unary { operand, .. } => operand.collect_references(found),
            Expression::Binary { left, right, .. } => {
                left.collect_references(found);
                right.collect_references(found);
            }
        }
    }
}

/// Source-like rendering with every binary operation parenthesized.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Reference(reference) => write!(f, "{}", reference),
            Expression::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expression::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parenthesizes_binary_operations() {
        let expr = Expression::binary(
            BinaryOp::And,
            Expression::not(Expression::variable("busy")),
            Expression::binary(
                BinaryOp::Eq,
                Expression::variable("count"),
                Expression::literal("3"),
            ),
        );
        assert_eq!(expr.to_string(), "(!busy && (count == 3))");
    }

    #[test]
    fn test_references_in_order() {
        let expr = Expression::binary(
            BinaryOp::Ne,
            Expression::Reference(Reference::Function {
                name: "size".to_string(),
                arguments: vec![Argument::new("queue")],
            }),
            Expression::literal("0"),
        );
        let names: Vec<String> = expr.references().iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["size(queue)", "0"]);
    }

    #[test]
    fn test_binding_powers() {
        let (eq_left, eq_right) = BinaryOp::Eq.binding_power();
        let (and_left, and_right) = BinaryOp::And.binding_power();
        assert!(eq_left > and_left);
        assert!(eq_left < eq_right, "equality is left associative");
        assert!(and_left > and_right, "connectives are right associative");
        assert!(PREFIX_BINDING_POWER > eq_right);
    }

    #[test]
    fn test_from_operator() {
        assert_eq!(BinaryOp::from_operator(Operator::Caret), Some(BinaryOp::Xor));
        assert_eq!(BinaryOp::from_operator(Operator::Ampersand), None);
    }
}
