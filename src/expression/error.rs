//! Error types for expression evaluation.

use crate::expression::Operator;
use std::fmt;
use thiserror::Error;

/// Where an [`EvalError::UnexpectedLiteral`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A record field held a value of a kind that cannot be compared
    Record,
    /// No evaluation rule exists for the operator and operand kinds
    Operator,
    /// A node did not have the shape the parser guarantees
    Invariant,
}

/// Errors that can occur during expression evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unexpected literal: {literal}")]
    UnexpectedLiteral { literal: String, origin: Origin },

    #[error("invalid regular expression {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl EvalError {
    /// A record value that cannot be normalized, reported as `field[value]`
    pub fn unsupported_value(field: &str, value: impl fmt::Display) -> Self {
        EvalError::UnexpectedLiteral {
            literal: format!("{}[{}]", field, value),
            origin: Origin::Record,
        }
    }

    pub fn unexpected_operator(op: Operator) -> Self {
        EvalError::UnexpectedLiteral {
            literal: op.to_string(),
            origin: Origin::Operator,
        }
    }

    pub fn invariant(literal: impl Into<String>) -> Self {
        EvalError::UnexpectedLiteral {
            literal: literal.into(),
            origin: Origin::Invariant,
        }
    }

    /// Origin of an unexpected-literal error, `None` for other kinds
    pub fn origin(&self) -> Option<Origin> {
        match self {
            EvalError::UnexpectedLiteral { origin, .. } => Some(*origin),
            EvalError::InvalidPattern { .. } => None,
        }
    }
}

/// Result type for expression evaluation
pub type EvalResult<T> = Result<T, EvalError>;
