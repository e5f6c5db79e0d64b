//! Range and membership evaluators for scalar/list operands.
//!
//! `$between` is half-open: the lower bound is inclusive, the upper bound
//! exclusive. `$nbetween` is its exact complement.

use crate::expression::{EvalError, EvalResult, LiteralRef, Node, Operator};

/// Scalar kinds that can be checked against a list literal
trait RangeValue<'a>: PartialOrd + Copy {
    const KIND: &'static str;

    fn from_literal(literal: LiteralRef<'a>) -> Option<Self>;
}

impl<'a> RangeValue<'a> for &'a str {
    const KIND: &'static str = "string";

    fn from_literal(literal: LiteralRef<'a>) -> Option<Self> {
        match literal {
            LiteralRef::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> RangeValue<'a> for f64 {
    const KIND: &'static str = "number";

    fn from_literal(literal: LiteralRef<'a>) -> Option<Self> {
        match literal {
            LiteralRef::Number(n) => Some(n),
            _ => None,
        }
    }
}

pub fn string_range(op: Operator, left: &str, items: &[Node]) -> EvalResult<bool> {
    evaluate_range(op, left, items)
}

pub fn number_range(op: Operator, left: f64, items: &[Node]) -> EvalResult<bool> {
    evaluate_range(op, left, items)
}

fn evaluate_range<'a, T: RangeValue<'a>>(
    op: Operator,
    left: T,
    items: &'a [Node],
) -> EvalResult<bool> {
    if !op.is_range() {
        return Err(EvalError::unexpected_operator(op));
    }

    let values = items
        .iter()
        .map(|item| {
            LiteralRef::of(item)
                .and_then(T::from_literal)
                .ok_or_else(|| {
                    EvalError::invariant(format!("{} list element is not a {}", op, T::KIND))
                })
        })
        .collect::<EvalResult<Vec<T>>>()?;

    match op {
        Operator::Between => {
            let (low, high) = bounds(op, &values)?;
            Ok(left >= low && left < high)
        }
        Operator::NotBetween => {
            let (low, high) = bounds(op, &values)?;
            Ok(left < low || left >= high)
        }
        Operator::In => Ok(values.iter().any(|value| left == *value)),
        Operator::NotIn => Ok(values.iter().all(|value| left != *value)),
        _ => Err(EvalError::unexpected_operator(op)),
    }
}

fn bounds<T: Copy>(op: Operator, values: &[T]) -> EvalResult<(T, T)> {
    match values {
        [low, high, ..] => Ok((*low, *high)),
        _ => Err(EvalError::invariant(format!(
            "{} needs two bounds, got {}",
            op,
            values.len()
        ))),
    }
}
