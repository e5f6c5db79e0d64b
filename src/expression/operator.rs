//! Operator tags carried by expression nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every tag an expression node can carry.
///
/// The serialized names are the parser's wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Operands
    #[serde(rename = "$ident")]
    Ident,
    #[serde(rename = "$string")]
    String,
    #[serde(rename = "$number")]
    Number,
    #[serde(rename = "$null")]
    Null,
    #[serde(rename = "$array")]
    Array,

    // Comparison
    #[serde(rename = "$eq")]
    Eq,
    #[serde(rename = "$ne")]
    Ne,
    #[serde(rename = "$lt")]
    Lt,
    #[serde(rename = "$lte")]
    Lte,
    #[serde(rename = "$gt")]
    Gt,
    #[serde(rename = "$gte")]
    Gte,
    #[serde(rename = "$regex")]
    Regex,
    #[serde(rename = "$nregex")]
    NotRegex,

    // Range and membership
    #[serde(rename = "$between")]
    Between,
    #[serde(rename = "$nbetween")]
    NotBetween,
    #[serde(rename = "$in")]
    In,
    #[serde(rename = "$nin")]
    NotIn,

    // NULL checks
    #[serde(rename = "$is")]
    IsNull,
    #[serde(rename = "$isnot")]
    IsNotNull,

    // Logical
    #[serde(rename = "$and")]
    And,
    #[serde(rename = "$or")]
    Or,
}

impl Operator {
    /// Scalar against scalar operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::Lt
                | Operator::Lte
                | Operator::Gt
                | Operator::Gte
                | Operator::Regex
                | Operator::NotRegex
        )
    }

    /// Scalar against list operators
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Operator::Between | Operator::NotBetween | Operator::In | Operator::NotIn
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// Get the wire tag for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Ident => "$ident",
            Operator::String => "$string",
            Operator::Number => "$number",
            Operator::Null => "$null",
            Operator::Array => "$array",
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Regex => "$regex",
            Operator::NotRegex => "$nregex",
            Operator::Between => "$between",
            Operator::NotBetween => "$nbetween",
            Operator::In => "$in",
            Operator::NotIn => "$nin",
            Operator::IsNull => "$is",
            Operator::IsNotNull => "$isnot",
            Operator::And => "$and",
            Operator::Or => "$or",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
