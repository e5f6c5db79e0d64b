//! Expression AST definitions.
//!
//! Trees are produced by an external parser; the builders here exist so
//! callers and tests can assemble the same shapes by hand.
//!
//! Shapes the evaluator relies on:
//!
//! - field reference: `{func: $ident, left: "name"}`
//! - literals: `{func: $string, left: "text"}`, `{func: $number, left: 1.5}`,
//!   `{func: $null}`
//! - list literal: `{func: $array, right: [literal, ...]}`
//! - binary operators: `{func: $eq, left: node, right: node}`
//! - existence checks: `{func: $is, left: node}`

use crate::expression::Operator;
use serde::{Deserialize, Serialize};

/// One side of an expression node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    #[default]
    None,
    Node(Box<Node>),
    List(Vec<Node>),
    String(String),
    Number(f64),
}

impl Operand {
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Operand::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Operand::Node(Box::new(node))
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "func")]
    pub op: Operator,
    #[serde(default, skip_serializing_if = "Operand::is_none")]
    pub left: Operand,
    #[serde(default, skip_serializing_if = "Operand::is_none")]
    pub right: Operand,
}

impl Node {
    pub fn new(op: Operator, left: Operand, right: Operand) -> Self {
        Self { op, left, right }
    }

    /// Create a field reference
    pub fn ident(field: impl Into<String>) -> Self {
        Self::new(Operator::Ident, Operand::String(field.into()), Operand::None)
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Operator::String, Operand::String(value.into()), Operand::None)
    }

    /// Create a number literal
    pub fn number(value: f64) -> Self {
        Self::new(Operator::Number, Operand::Number(value), Operand::None)
    }

    /// Create a null literal
    pub fn null() -> Self {
        Self::new(Operator::Null, Operand::None, Operand::None)
    }

    /// Create a list literal
    pub fn array(items: Vec<Node>) -> Self {
        Self::new(Operator::Array, Operand::None, Operand::List(items))
    }

    /// Create a binary operation node
    pub fn binary(op: Operator, left: Node, right: Node) -> Self {
        Self::new(op, left.into(), right.into())
    }

    /// Create a unary operation node
    pub fn unary(op: Operator, operand: Node) -> Self {
        Self::new(op, operand.into(), Operand::None)
    }

    pub fn eq(left: Node, right: Node) -> Self {
        Self::binary(Operator::Eq, left, right)
    }

    pub fn ne(left: Node, right: Node) -> Self {
        Self::binary(Operator::Ne, left, right)
    }

    pub fn lt(left: Node, right: Node) -> Self {
        Self::binary(Operator::Lt, left, right)
    }

    pub fn lte(left: Node, right: Node) -> Self {
        Self::binary(Operator::Lte, left, right)
    }

    pub fn gt(left: Node, right: Node) -> Self {
        Self::binary(Operator::Gt, left, right)
    }

    pub fn gte(left: Node, right: Node) -> Self {
        Self::binary(Operator::Gte, left, right)
    }

    pub fn regex(left: Node, pattern: impl Into<String>) -> Self {
        Self::binary(Operator::Regex, left, Node::string(pattern))
    }

    pub fn not_regex(left: Node, pattern: impl Into<String>) -> Self {
        Self::binary(Operator::NotRegex, left, Node::string(pattern))
    }

    /// Create a half-open range check, `low <= left < high`
    pub fn between(left: Node, low: Node, high: Node) -> Self {
        Self::binary(Operator::Between, left, Node::array(vec![low, high]))
    }

    pub fn not_between(left: Node, low: Node, high: Node) -> Self {
        Self::binary(Operator::NotBetween, left, Node::array(vec![low, high]))
    }

    pub fn in_list(left: Node, items: Vec<Node>) -> Self {
        Self::binary(Operator::In, left, Node::array(items))
    }

    pub fn not_in_list(left: Node, items: Vec<Node>) -> Self {
        Self::binary(Operator::NotIn, left, Node::array(items))
    }

    pub fn is_null(operand: Node) -> Self {
        Self::unary(Operator::IsNull, operand)
    }

    pub fn is_not_null(operand: Node) -> Self {
        Self::unary(Operator::IsNotNull, operand)
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::binary(Operator::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::binary(Operator::Or, left, right)
    }

    pub fn left_node(&self) -> Option<&Node> {
        self.left.as_node()
    }

    pub fn right_node(&self) -> Option<&Node> {
        self.right.as_node()
    }

    /// Check if this node compares a field reference on its left side
    pub fn has_field_ref(&self) -> bool {
        self.left_node()
            .is_some_and(|left| left.op == Operator::Ident)
    }
}
