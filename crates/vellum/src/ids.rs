//! Unique id generation for output elements.

use std::collections::HashMap;

/// Generates `prefix1`, `prefix2`, ... with one counter per prefix.
///
/// Counters only move forward, so an id handed out for an element that is
/// later dropped is never reused within one conversion.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counters: HashMap<String, usize>,
}

impl IdGenerator {
    /// Create a generator with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next id for `prefix`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}{counter}")
    }
}
