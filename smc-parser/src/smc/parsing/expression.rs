//! Guard condition parsing
//!
//!     A Pratt parser over the closed operator set of [BinaryOp] plus prefix `!`. Binding
//!     powers live on the operators themselves (see the model's expression module). Any token
//!     that is not one of those operators ends the expression, so `a < b` stops at `<` and
//!     the caller reports the missing `]`.
//!
//!     Operands:
//!
//!         ( condition )
//!         name                       context variable or transition parameter
//!         name(arg, ...)             function call, arguments kept as raw text
//!         ns::name                   qualified names are kept whole
//!         42  'c'  "s"  true  false  literals

use super::parser::Parser;
use crate::smc::error::SyntaxError;
use crate::smc::model::expression::PREFIX_BINDING_POWER;
use crate::smc::model::{BinaryOp, Expression, Reference};
use crate::smc::token::{Operator, Spanned, Token};

impl<'s> Parser<'s> {
    /// Parse the condition inside `[` `]`; the brackets are handled by the caller.
    pub(super) fn parse_condition(&mut self) -> Result<Expression, SyntaxError> {
        self.parse_binding(0, None)
    }

    /// `enclosing` is the logical connective whose right operand is being parsed, if any.
    fn parse_binding(
        &mut self,
        min_bp: u8,
        enclosing: Option<BinaryOp>,
    ) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_operand()?;

        loop {
            let (op, line) = match self.peek()? {
                Some(Spanned {
                    token: Token::Operator(op),
                    line,
                    ..
                }) => match BinaryOp::from_operator(*op) {
                    Some(op) => (op, *line),
                    None => break,
                },
                _ => break,
            };

            let (l_bp, r_bp) = op.binding_power();
            if l_bp < min_bp {
                break;
            }
            self.advance()?;

            if let Some(outer) = enclosing {
                if op.is_logical() && outer != op {
                    tracing::warn!(
                        line,
                        outer = outer.symbol(),
                        inner = op.symbol(),
                        "mixed logical operators without parentheses group to the right"
                    );
                }
            }

            let right = self.parse_binding(r_bp, op.is_logical().then_some(op))?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> Result<Expression, SyntaxError> {
        let token = self.expect_token("condition")?;
        match token.token {
            Token::Operator(Operator::Not) => {
                let operand = self.parse_binding(PREFIX_BINDING_POWER, None)?;
                Ok(Expression::not(operand))
            }
            Token::Operator(Operator::OpenParen) => {
                let inner = self.parse_binding(0, None)?;
                self.expect_operator(Operator::CloseParen)?;
                Ok(inner)
            }
            Token::Identifier(name) => self.parse_reference(name),
            Token::Integer(text) | Token::Character(text) | Token::String(text) => {
                Ok(Expression::literal(text))
            }
            _ => Err(self.unexpected(&token, "condition")),
        }
    }

    fn parse_reference(&mut self, mut name: String) -> Result<Expression, SyntaxError> {
        while self.eat_operator(Operator::DoubleColon)? {
            let (segment, _) = self.expect_identifier("name after '::'")?;
            name = format!("{}::{}", name, segment);
        }

        if name == "true" || name == "false" {
            return Ok(Expression::literal(name));
        }

        if self.eat_operator(Operator::OpenParen)? {
            let arguments = self.parse_arguments()?;
            return Ok(Expression::Reference(Reference::Function { name, arguments }));
        }

        Ok(Expression::variable(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::smc::error::SyntaxError;
    use crate::smc::model::Expression;
    use crate::smc::parsing::parse_str;
    use rstest::rstest;

    fn condition(text: &str) -> Result<Expression, SyntaxError> {
        let source = format!("%class A %map M {{ S {{ T() [{}] nil {{}} }} }}", text);
        let fsm = parse_str(&source)?;
        let guard = &fsm.maps[0].states[0].transitions[0].guards[0];
        Ok(guard.condition.clone().expect("guard has a condition"))
    }

    #[rstest]
    #[case("done", "done")]
    #[case("!done", "!done")]
    #[case("!(done)", "!done")]
    #[case("a == b", "(a == b)")]
    #[case("a != 'x'", "(a != 'x')")]
    #[case("a == b == c", "((a == b) == c)")]
    #[case("a && b == c", "(a && (b == c))")]
    #[case("a == b && c", "((a == b) && c)")]
    #[case("a && b && c", "(a && (b && c))")]
    #[case("a && b || c", "(a && (b || c))")]
    #[case("(a && b) || c", "((a && b) || c)")]
    #[case("!a && b", "(!a && b)")]
    #[case("!a == b", "(!a == b)")]
    #[case("!(a == b)", "!(a == b)")]
    #[case("a ^ b", "(a ^ b)")]
    #[case("count(x, f(y)) != 0", "(count(x, f(y)) != 0)")]
    #[case("Kind::Open == kind", "(Kind::Open == kind)")]
    #[case("flag == true", "(flag == true)")]
    #[case("name == \"idle\"", "(name == \"idle\")")]
    fn test_condition_grouping(#[case] text: &str, #[case] expected: &str) {
        let expr = condition(text).expect("condition should parse");
        assert_eq!(expr.to_string(), expected);
    }

    #[rstest]
    #[case("a < b", "']'", "'<'")]
    #[case("a &&", "condition", "']'")]
    #[case("(a", "')'", "']'")]
    #[case("", "condition", "']'")]
    fn test_condition_errors(#[case] text: &str, #[case] expected: &str, #[case] found: &str) {
        let err = condition(text).expect_err("condition should not parse");
        assert_eq!(err.expected.as_deref(), Some(expected));
        assert_eq!(err.found.as_deref(), Some(found));
    }
}
