//! Resolved operand values.
//!
//! After field resolution every comparison operand is one of a small closed
//! set of kinds. [`Literal`] is the owned form the resolver produces;
//! [`LiteralRef`] is the borrowed view the dispatcher classifies nodes into,
//! which also covers list literals.

use crate::expression::{Node, Operand, Operator};

/// A resolved scalar. Numbers are always `f64`; booleans have already been
/// turned into the strings `"true"` and `"false"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Null,
}

impl Literal {
    /// Build the literal node that stands in for a resolved field reference
    pub fn into_node(self) -> Node {
        match self {
            Literal::String(s) => Node::string(s),
            Literal::Number(n) => Node::number(n),
            Literal::Null => Node::null(),
        }
    }
}

/// Borrowed view of a literal node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralRef<'a> {
    String(&'a str),
    Number(f64),
    Null,
    List(&'a [Node]),
}

impl<'a> LiteralRef<'a> {
    /// Classify a node, or `None` when it is not a well-formed literal
    pub fn of(node: &'a Node) -> Option<Self> {
        match (node.op, &node.left, &node.right) {
            (Operator::String, Operand::String(s), _) => Some(LiteralRef::String(s)),
            (Operator::Number, Operand::Number(n), _) => Some(LiteralRef::Number(*n)),
            (Operator::Null, _, _) => Some(LiteralRef::Null),
            (Operator::Array, _, Operand::List(items)) => Some(LiteralRef::List(items)),
            (Operator::Array, _, Operand::None) => Some(LiteralRef::List(&[])),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralRef::String(_) => "string",
            LiteralRef::Number(_) => "number",
            LiteralRef::Null => "null",
            LiteralRef::List(_) => "list",
        }
    }
}
