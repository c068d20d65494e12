//! Converter warnings, deduplicated.
//!
//! Used by the CSS utilities and the conversion engine to report input that
//! is tolerated but not faithfully reproduced (a radial gradient, per-corner
//! radii, ...). Messages go through the `log` facade at `warn` level; each
//! unique message is emitted once per process (or until [`clear_warnings`]).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (emits once per unique message)
///
/// # Example
/// ```
/// vellum_common::warning::warn_once("CSS", "radial-gradient() backgrounds are not converted");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        log::warn!(target: "vellum", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call between unrelated conversions)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
