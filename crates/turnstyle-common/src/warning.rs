//! Deduplicated warnings.
//!
//! Missing or malformed stored data is never an error in turnStyle, but it is
//! worth reporting once. The same message is only emitted the first time it is
//! seen; later occurrences are dropped until [`clear_warnings`] is called.
//! Output goes through the `log` facade so the host decides where it lands.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about skipped or malformed data (emitted once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Resolver", "page entry 'https://a.test' is not a list of style names");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_emit {
        log::warn!("[turnStyle {component}] {message}");
    }
}

/// Whether a warning with this component and message has been emitted.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when a new page context starts)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
