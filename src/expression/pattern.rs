//! Compiled regular expression cache.

use crate::expression::{EvalError, EvalResult};
use dashmap::DashMap;
use log::debug;
use regex::Regex;

/// Compiled patterns keyed by their source text.
///
/// Shared by every evaluation run through the same evaluator, including
/// evaluations running concurrently on other threads.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test whether `text` contains a match for `pattern`.
    ///
    /// Patterns that fail to compile are reported every time and never
    /// cached.
    pub fn is_match(&self, pattern: &str, text: &str) -> EvalResult<bool> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(regex.is_match(text));
        }

        let regex = Regex::new(pattern).map_err(|e| EvalError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        debug!("compiled pattern {:?}", pattern);

        let matched = regex.is_match(text);
        self.patterns.insert(pattern.to_string(), regex);
        Ok(matched)
    }

    /// Number of compiled patterns held
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
