//! Expression evaluation implementation.

use crate::expression::compare::{compare_numbers, compare_strings};
use crate::expression::pattern::PatternCache;
use crate::expression::range::{number_range, string_range};
use crate::expression::resolve::resolve;
use crate::expression::{EvalError, EvalResult, LiteralRef, Node, Operand, Operator};
use crate::record::Record;
use log::{trace, warn};

/// Evaluator for filter expressions.
///
/// Holds nothing but the compiled pattern cache, so one evaluator can be
/// shared across threads and reused for any number of records.
#[derive(Debug, Default)]
pub struct Evaluator {
    patterns: PatternCache,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patterns compiled by this evaluator so far
    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Decide whether `record` satisfies `node`
    pub fn evaluate<R: Record + ?Sized>(&self, node: &Node, record: &R) -> EvalResult<bool> {
        if node.has_field_ref() {
            let resolved = resolve(node, record)?;
            return self.evaluate(&resolved, record);
        }

        let Some(left) = node.left_node() else {
            return Err(EvalError::unexpected_operator(node.op));
        };

        match node.op {
            op if op.is_comparison() || op.is_range() => {
                self.evaluate_operands(op, left, &node.right)
            }
            Operator::IsNotNull => Ok(left.op != Operator::Null),
            Operator::IsNull => Ok(left.op == Operator::Null),
            Operator::And | Operator::Or => self.evaluate_logical(node, record),
            op => Err(EvalError::unexpected_operator(op)),
        }
    }

    /// Select the records that satisfy `node`, in order.
    ///
    /// Stops at the first record that fails to evaluate.
    pub fn filter<'r, R: Record>(&self, node: &Node, records: &'r [R]) -> EvalResult<Vec<&'r R>> {
        let mut matched = Vec::new();
        for record in records {
            if self.evaluate(node, record)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// Route a comparison, range or membership operator by operand kinds
    fn evaluate_operands(&self, op: Operator, left: &Node, right: &Operand) -> EvalResult<bool> {
        let left = LiteralRef::of(left);
        let right = right.as_node().and_then(LiteralRef::of);

        if let (Some(l), Some(r)) = (left, right) {
            trace!("{} on {} and {}", op, l.kind_name(), r.kind_name());
        }

        match (left, right) {
            // null never compares, whatever the operator or right operand
            (Some(LiteralRef::Null), _) => Ok(false),
            (Some(LiteralRef::String(l)), Some(LiteralRef::String(r))) => {
                compare_strings(op, l, r, &self.patterns)
            }
            (Some(LiteralRef::Number(l)), Some(LiteralRef::Number(r))) => compare_numbers(op, l, r),
            (Some(LiteralRef::String(l)), Some(LiteralRef::List(items))) => {
                string_range(op, l, items)
            }
            (Some(LiteralRef::Number(l)), Some(LiteralRef::List(items))) => {
                number_range(op, l, items)
            }
            _ => Err(EvalError::unexpected_operator(op)),
        }
    }

    /// Evaluate `$and`/`$or`.
    ///
    /// Both sides are always evaluated, right side first; there is no
    /// short-circuit. An error on the right side is returned before the left
    /// side runs.
    fn evaluate_logical<R: Record + ?Sized>(&self, node: &Node, record: &R) -> EvalResult<bool> {
        let (Some(left), Some(right)) = (node.left_node(), node.right_node()) else {
            return Err(EvalError::unexpected_operator(node.op));
        };

        let right = self.evaluate(right, record)?;
        let left = self.evaluate(left, record)?;

        match node.op {
            Operator::And => Ok(right && left),
            Operator::Or => Ok(right || left),
            op => Err(EvalError::unexpected_operator(op)),
        }
    }
}

/// Helper function to evaluate an expression against a single record
pub fn evaluate<R: Record + ?Sized>(node: &Node, record: &R) -> EvalResult<bool> {
    Evaluator::new().evaluate(node, record)
}

/// Type alias for predicate functions
pub type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync + 'static>;

/// Helper function to create a predicate function from an expression.
///
/// Evaluation errors are logged and count as no match.
pub fn node_to_predicate<R: Record + ?Sized + 'static>(node: Node) -> Predicate<R> {
    let evaluator = Evaluator::new();
    Box::new(move |record: &R| match evaluator.evaluate(&node, record) {
        Ok(matched) => matched,
        Err(e) => {
            warn!("filter evaluation failed: {}", e);
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Origin;
    use crate::record::{FieldValue, NativeValue};
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn record(entries: Vec<(&str, FieldValue)>) -> HashMap<String, FieldValue> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Record wrapper that remembers which fields were looked up, in order
    struct Recording<'a> {
        inner: &'a HashMap<String, FieldValue>,
        lookups: RefCell<Vec<String>>,
    }

    impl<'a> Recording<'a> {
        fn new(inner: &'a HashMap<String, FieldValue>) -> Self {
            Self {
                inner,
                lookups: RefCell::new(Vec::new()),
            }
        }
    }

    impl Record for Recording<'_> {
        fn lookup(&self, field: &str) -> NativeValue<'_> {
            self.lookups.borrow_mut().push(field.to_string());
            self.inner.lookup(field)
        }
    }

    #[test]
    fn test_field_comparisons() -> anyhow::Result<()> {
        let rec = record(vec![
            ("name", FieldValue::from("alice")),
            ("age", FieldValue::Int32(30)),
            ("active", FieldValue::Bool(true)),
        ]);
        let evaluator = Evaluator::new();

        let expr = Node::eq(Node::ident("name"), Node::string("alice"));
        assert!(evaluator.evaluate(&expr, &rec)?);

        let expr = Node::lt(Node::ident("name"), Node::string("bob"));
        assert!(evaluator.evaluate(&expr, &rec)?);

        let expr = Node::gte(Node::ident("age"), Node::number(30.0));
        assert!(evaluator.evaluate(&expr, &rec)?);

        let expr = Node::ne(Node::ident("age"), Node::number(30.0));
        assert!(!evaluator.evaluate(&expr, &rec)?);

        // booleans compare as strings
        let expr = Node::eq(Node::ident("active"), Node::string("true"));
        assert!(evaluator.evaluate(&expr, &rec)?);
        Ok(())
    }

    #[test]
    fn test_null_never_compares() -> anyhow::Result<()> {
        let rec = record(vec![("deleted", FieldValue::Null)]);
        let evaluator = Evaluator::new();

        for op in [
            Operator::Eq,
            Operator::Ne,
            Operator::Lt,
            Operator::Lte,
            Operator::Gt,
            Operator::Gte,
            Operator::Regex,
            Operator::NotRegex,
        ] {
            for field in ["deleted", "missing"] {
                let expr = Node::binary(op, Node::ident(field), Node::string("x"));
                assert!(!evaluator.evaluate(&expr, &rec)?, "{} on {}", op, field);
            }
        }

        for op in [
            Operator::Between,
            Operator::NotBetween,
            Operator::In,
            Operator::NotIn,
        ] {
            let list = Node::array(vec![Node::number(1.0), Node::number(2.0)]);
            let expr = Node::binary(op, Node::ident("missing"), list);
            assert!(!evaluator.evaluate(&expr, &rec)?, "{}", op);
        }
        Ok(())
    }

    #[test]
    fn test_existence_checks() -> anyhow::Result<()> {
        let rec = record(vec![
            ("name", FieldValue::from("alice")),
            ("age", FieldValue::UInt64(30)),
            ("active", FieldValue::Bool(false)),
            ("manager", FieldValue::Null),
        ]);
        let evaluator = Evaluator::new();

        for field in ["name", "age", "active"] {
            assert!(evaluator.evaluate(&Node::is_not_null(Node::ident(field)), &rec)?);
            assert!(!evaluator.evaluate(&Node::is_null(Node::ident(field)), &rec)?);
        }
        for field in ["manager", "missing"] {
            assert!(evaluator.evaluate(&Node::is_null(Node::ident(field)), &rec)?);
            assert!(!evaluator.evaluate(&Node::is_not_null(Node::ident(field)), &rec)?);
        }
        Ok(())
    }

    #[test]
    fn test_literal_operands() -> anyhow::Result<()> {
        let rec = record(vec![]);
        let evaluator = Evaluator::new();

        let expr = Node::regex(Node::string("hello"), "^h.*o$");
        assert!(evaluator.evaluate(&expr, &rec)?);

        let expr = Node::not_regex(Node::string("hello"), "^h.*o$");
        assert!(!evaluator.evaluate(&expr, &rec)?);

        let expr = Node::between(Node::number(5.0), Node::number(1.0), Node::number(5.0));
        assert!(!evaluator.evaluate(&expr, &rec)?);

        let expr = Node::between(Node::number(4.999), Node::number(1.0), Node::number(5.0));
        assert!(evaluator.evaluate(&expr, &rec)?);
        Ok(())
    }

    #[test]
    fn test_mismatched_operand_kinds() {
        let rec = record(vec![("age", FieldValue::Int32(30))]);
        let evaluator = Evaluator::new();

        let expr = Node::eq(Node::ident("age"), Node::string("30"));
        assert_eq!(
            evaluator.evaluate(&expr, &rec),
            Err(EvalError::unexpected_operator(Operator::Eq))
        );

        let expr = Node::in_list(Node::ident("age"), vec![Node::string("30")]);
        let err = evaluator.evaluate(&expr, &rec).unwrap_err();
        assert_eq!(err.origin(), Some(Origin::Invariant));

        let expr = Node::regex(Node::ident("age"), "3.*");
        assert_eq!(
            evaluator.evaluate(&expr, &rec),
            Err(EvalError::unexpected_operator(Operator::Regex))
        );
    }

    #[test]
    fn test_unexpected_node_shapes() {
        let rec = record(vec![]);
        let evaluator = Evaluator::new();

        // a bare literal is not an expression
        assert_eq!(
            evaluator.evaluate(&Node::string("x"), &rec),
            Err(EvalError::unexpected_operator(Operator::String))
        );

        // a literal tag in operator position
        let expr = Node::binary(Operator::Number, Node::number(1.0), Node::number(1.0));
        assert_eq!(
            evaluator.evaluate(&expr, &rec),
            Err(EvalError::unexpected_operator(Operator::Number))
        );

        // logical operator missing a side
        let expr = Node::unary(Operator::And, Node::eq(Node::number(1.0), Node::number(1.0)));
        assert_eq!(
            evaluator.evaluate(&expr, &rec),
            Err(EvalError::unexpected_operator(Operator::And))
        );
    }

    #[test]
    fn test_unsupported_record_value() {
        let rec = record(vec![(
            "tags",
            FieldValue::List(vec![FieldValue::from("a"), FieldValue::from("b")]),
        )]);

        let expr = Node::eq(Node::ident("tags"), Node::string("a"));
        let err = evaluate(&expr, &rec).unwrap_err();
        assert_eq!(err.to_string(), "unexpected literal: tags[[a b]]");
        assert_eq!(err.origin(), Some(Origin::Record));

        // even existence checks need a resolvable value
        assert!(evaluate(&Node::is_not_null(Node::ident("tags")), &rec).is_err());
    }

    #[test]
    fn test_logical_operators() -> anyhow::Result<()> {
        let rec = record(vec![("a", FieldValue::Int32(1)), ("b", FieldValue::Int32(2))]);
        let yes = || Node::eq(Node::ident("a"), Node::number(1.0));
        let no = || Node::eq(Node::ident("b"), Node::number(1.0));

        assert!(evaluate(&Node::and(yes(), yes()), &rec)?);
        assert!(!evaluate(&Node::and(yes(), no()), &rec)?);
        assert!(!evaluate(&Node::and(no(), yes()), &rec)?);
        assert!(evaluate(&Node::or(no(), yes()), &rec)?);
        assert!(evaluate(&Node::or(yes(), no()), &rec)?);
        assert!(!evaluate(&Node::or(no(), no()), &rec)?);
        Ok(())
    }

    #[test]
    fn test_logical_evaluates_both_sides_right_first() -> anyhow::Result<()> {
        let inner = record(vec![("a", FieldValue::Int32(1)), ("b", FieldValue::Int32(2))]);

        // the right side decides AND on its own, the left still runs
        let expr = Node::and(
            Node::eq(Node::ident("a"), Node::number(1.0)),
            Node::eq(Node::ident("b"), Node::number(0.0)),
        );
        let rec = Recording::new(&inner);
        assert!(!evaluate(&expr, &rec)?);
        assert_eq!(*rec.lookups.borrow(), vec!["b", "a"]);

        // the right side decides OR on its own, the left still runs
        let expr = Node::or(
            Node::eq(Node::ident("a"), Node::number(0.0)),
            Node::eq(Node::ident("b"), Node::number(2.0)),
        );
        let rec = Recording::new(&inner);
        assert!(evaluate(&expr, &rec)?);
        assert_eq!(*rec.lookups.borrow(), vec!["b", "a"]);
        Ok(())
    }

    #[test]
    fn test_logical_error_on_right_skips_left() {
        let inner = record(vec![
            ("a", FieldValue::Int32(1)),
            ("bad", FieldValue::List(vec![])),
        ]);
        let expr = Node::or(
            Node::eq(Node::ident("a"), Node::number(1.0)),
            Node::eq(Node::ident("bad"), Node::number(1.0)),
        );

        let rec = Recording::new(&inner);
        assert!(evaluate(&expr, &rec).is_err());
        assert_eq!(*rec.lookups.borrow(), vec!["bad"]);

        let expr = Node::and(
            Node::eq(Node::ident("bad"), Node::number(1.0)),
            Node::eq(Node::ident("a"), Node::number(1.0)),
        );
        let rec = Recording::new(&inner);
        assert!(evaluate(&expr, &rec).is_err());
        assert_eq!(*rec.lookups.borrow(), vec!["a", "bad"]);
    }

    #[test]
    fn test_resolution_does_not_touch_tree() -> anyhow::Result<()> {
        let rec = record(vec![("age", FieldValue::Int32(30))]);
        let expr = Node::and(
            Node::gt(Node::ident("age"), Node::number(18.0)),
            Node::is_not_null(Node::ident("age")),
        );
        let before = expr.clone();

        assert!(evaluate(&expr, &rec)?);
        assert_eq!(expr, before);
        Ok(())
    }

    #[test]
    fn test_pattern_cache_reuse() -> anyhow::Result<()> {
        let evaluator = Evaluator::new();
        let expr = Node::regex(Node::ident("name"), "^a");

        for name in ["alice", "adam", "bob"] {
            let rec = record(vec![("name", FieldValue::from(name))]);
            evaluator.evaluate(&expr, &rec)?;
        }
        assert_eq!(evaluator.patterns().len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_pattern() {
        let rec = record(vec![("name", FieldValue::from("alice"))]);
        let expr = Node::regex(Node::ident("name"), "a(");
        assert!(matches!(
            evaluate(&expr, &rec),
            Err(EvalError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_filter() -> anyhow::Result<()> {
        let records = vec![
            record(vec![("age", FieldValue::Int32(10))]),
            record(vec![("age", FieldValue::Int32(20))]),
            record(vec![]),
            record(vec![("age", FieldValue::Int32(30))]),
        ];
        let expr = Node::gte(Node::ident("age"), Node::number(20.0));

        let matched = Evaluator::new().filter(&expr, &records)?;
        assert_eq!(matched.len(), 2);
        assert!(std::ptr::eq(matched[0], &records[1]));
        assert!(std::ptr::eq(matched[1], &records[3]));
        Ok(())
    }

    #[test]
    fn test_filter_stops_at_error() {
        let records = vec![
            record(vec![("age", FieldValue::Int32(10))]),
            record(vec![("age", FieldValue::from("ten"))]),
        ];
        let expr = Node::gte(Node::ident("age"), Node::number(5.0));

        assert_eq!(
            Evaluator::new().filter(&expr, &records),
            Err(EvalError::unexpected_operator(Operator::Gte))
        );
    }

    #[test]
    fn test_node_to_predicate() {
        let predicate = node_to_predicate::<HashMap<String, FieldValue>>(Node::gt(
            Node::ident("age"),
            Node::number(5.0),
        ));

        assert!(predicate(&record(vec![("age", FieldValue::Int32(10))])));
        assert!(!predicate(&record(vec![("age", FieldValue::Int32(3))])));
        assert!(!predicate(&record(vec![])));

        // evaluation errors count as no match
        assert!(!predicate(&record(vec![("age", FieldValue::from("x"))])));
    }
}
