//! Scalar comparators for string/string and number/number operands.

use crate::expression::pattern::PatternCache;
use crate::expression::{EvalError, EvalResult, Operator};

/// Apply an ordering operator, `None` when `op` is not one
fn ordered<T: PartialOrd + ?Sized>(op: Operator, left: &T, right: &T) -> Option<bool> {
    match op {
        Operator::Eq => Some(left == right),
        Operator::Ne => Some(left != right),
        Operator::Lt => Some(left < right),
        Operator::Lte => Some(left <= right),
        Operator::Gt => Some(left > right),
        Operator::Gte => Some(left >= right),
        _ => None,
    }
}

/// Compare two strings. Ordering is byte-lexicographic; `$regex` tests
/// whether `left` contains a match for the pattern `right`.
pub fn compare_strings(
    op: Operator,
    left: &str,
    right: &str,
    patterns: &PatternCache,
) -> EvalResult<bool> {
    if let Some(result) = ordered(op, left, right) {
        return Ok(result);
    }

    match op {
        Operator::Regex => patterns.is_match(right, left),
        Operator::NotRegex => Ok(!patterns.is_match(right, left)?),
        _ => Err(EvalError::unexpected_operator(op)),
    }
}

/// Compare two numbers with IEEE semantics
pub fn compare_numbers(op: Operator, left: f64, right: f64) -> EvalResult<bool> {
    ordered(op, &left, &right).ok_or_else(|| EvalError::unexpected_operator(op))
}
