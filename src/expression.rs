//! Filter expression evaluation over dynamically typed records.
//!
//! This module provides:
//! - Expression AST representation, as produced by the query parser
//! - Field reference resolution into typed literals
//! - Comparison, regex, range and membership evaluation
//! - Logical combination and the recursive dispatcher tying it together

pub mod compare;
pub mod error;
pub mod eval;
pub mod expr;
pub mod literal;
pub mod operator;
pub mod pattern;
pub mod range;
pub mod resolve;

pub use error::{EvalError, EvalResult, Origin};
pub use eval::{evaluate, node_to_predicate, Evaluator, Predicate};
pub use expr::{Node, Operand};
pub use literal::{Literal, LiteralRef};
pub use operator::Operator;
pub use pattern::PatternCache;
