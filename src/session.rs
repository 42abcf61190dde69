use std::cell::RefCell;
use std::collections::HashMap;

/// The key the router persists its current URL under.
pub const SESSION_URL_KEY: &str = "mimir-router-url";

/// Key-value storage scoped to one run of the application.
///
/// The router writes the current URL here on every navigation so a reload
/// resumes at the last visited page. Backed by in-memory storage in the
/// observed design; a persistent backend turns it into cross-launch memory.
pub trait SessionStore {
    /// Returns the stored value for a key.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: String);
}

/// An in-memory session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SESSION_URL_KEY), None);

        store.set(SESSION_URL_KEY, "edit/a.mimir".into());
        store.set(SESSION_URL_KEY, "settings".into());
        assert_eq!(store.get(SESSION_URL_KEY), Some("settings".into()));
    }
}
