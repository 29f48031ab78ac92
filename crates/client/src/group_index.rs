use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Process-lifetime index of known group ids.
///
/// Not a cache of group contents: every read still requires a live fetch.
/// It only remembers which ids are worth fetching, because the backend has
/// no listing endpoint. Restarting the process loses all entries; callers
/// fall back to a configured seed set when empty.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert.
    pub fn add(&self, group_id: &str) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.insert(group_id.to_string());
        }
    }

    /// All known ids, in no defined order.
    pub fn list(&self) -> Vec<String> {
        self.ids
            .lock()
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_groups(&self) -> bool {
        self.ids.lock().map(|ids| !ids.is_empty()).unwrap_or(false)
    }

    pub fn clear(&self) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.clear();
        }
    }
}
