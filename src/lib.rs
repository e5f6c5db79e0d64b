pub mod expression;
pub mod record;

pub use expression::{evaluate, EvalError, EvalResult, Evaluator, Node, Operator};
pub use record::{FieldValue, NativeValue, Record};
