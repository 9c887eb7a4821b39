//! Guard conditions as C++
//!
//!     Names resolve against the owning object through `ctxt.` unless they are parameters of
//!     the transition being generated, or already qualified with `::`. Literals and function
//!     arguments are copied as written. Every nested binary operation is parenthesized, so the
//!     C++ precedence rules never come into play.

use smc_parser::smc::model::{Expression, Reference, Signature};

/// Render a guard condition for use inside `if (...)`.
pub(crate) fn render_condition(condition: &Expression, signature: &Signature) -> String {
    match condition {
        Expression::Binary { op, left, right } => format!(
            "{} {} {}",
            render(left, signature),
            op.symbol(),
            render(right, signature)
        ),
        other => render(other, signature),
    }
}

fn render(expression: &Expression, signature: &Signature) -> String {
    match expression {
        Expression::Reference(reference) => render_reference(reference, signature),
        Expression::Unary { op, operand } => {
            format!("{}{}", op.symbol(), render(operand, signature))
        }
        Expression::Binary { op, left, right } => format!(
            "({} {} {})",
            render(left, signature),
            op.symbol(),
            render(right, signature)
        ),
    }
}

fn render_reference(reference: &Reference, signature: &Signature) -> String {
    match reference {
        Reference::Literal(text) => text.clone(),
        Reference::Variable(name) => qualify(name, signature),
        Reference::Function { name, arguments } => {
            let arguments: Vec<&str> = arguments.iter().map(|a| a.as_str()).collect();
            format!("{}({})", qualify(name, signature), arguments.join(", "))
        }
    }
}

fn qualify(name: &str, signature: &Signature) -> String {
    if signature.has_parameter(name) || name.contains("::") {
        name.to_string()
    } else {
        format!("ctxt.{}", name)
    }
}
