//! Field reference resolution.

use crate::expression::{EvalError, EvalResult, Literal, Node};
use crate::record::{NativeValue, Record};
use log::debug;

/// Normalize a native record value into a [`Literal`].
///
/// Every integer and float width is widened to `f64`, so integers beyond
/// 2^53 lose precision.
pub fn resolve_value(field: &str, value: NativeValue<'_>) -> EvalResult<Literal> {
    let literal = match value {
        NativeValue::String(s) => Literal::String(s.to_string()),
        NativeValue::Absent | NativeValue::Null => Literal::Null,
        NativeValue::Bool(b) => Literal::String(if b { "true" } else { "false" }.to_string()),
        NativeValue::Int32(n) => Literal::Number(f64::from(n)),
        NativeValue::Int64(n) => Literal::Number(n as f64),
        NativeValue::UInt32(n) => Literal::Number(f64::from(n)),
        NativeValue::UInt64(n) => Literal::Number(n as f64),
        NativeValue::Float32(n) => Literal::Number(f64::from(n)),
        NativeValue::Float64(n) => Literal::Number(n),
        NativeValue::Unsupported(rendered) => {
            return Err(EvalError::unsupported_value(field, rendered))
        }
    };
    Ok(literal)
}

/// Replace the field reference on the left of `node` with the literal the
/// record holds for it.
///
/// Returns a new node with the same operator and right operand; `node`
/// itself is left untouched.
pub fn resolve<R: Record + ?Sized>(node: &Node, record: &R) -> EvalResult<Node> {
    let field = node
        .left_node()
        .and_then(|ident| ident.left.as_str())
        .ok_or_else(|| EvalError::invariant(format!("{} without a field name", node.op)))?;

    let literal = resolve_value(field, record.lookup(field))?;
    debug!("resolved field {:?} to {:?}", field, literal);

    Ok(Node::new(
        node.op,
        literal.into_node().into(),
        node.right.clone(),
    ))
}
