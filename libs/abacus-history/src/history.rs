//! The bounded, persisted history list.

use tracing::{debug, warn};

use crate::store::KvStore;

/// Store key the entry list is persisted under.
pub const HISTORY_STORAGE_KEY: &str = "calculator-history";

/// Maximum retained entries; the oldest fall off first.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Ordered calculation history, newest last, capped at
/// [`MAX_HISTORY_ITEMS`].
///
/// The persisted form is a JSON array of entry strings under
/// [`HISTORY_STORAGE_KEY`]. Every mutation rewrites the stored list.
#[derive(Debug)]
pub struct History<S> {
    store: S,
    entries: Vec<String>,
}

impl<S: KvStore> History<S> {
    /// Load history from the store.
    ///
    /// Missing, unreadable, or malformed stored data starts an empty
    /// history; persistence problems are never user-visible errors.
    pub fn load(store: S) -> Self {
        let entries = match store.get(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => cap(list),
                Err(err) => {
                    warn!(%err, "stored history is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read stored history, starting empty");
                Vec::new()
            }
        };
        debug!(entries = entries.len(), "history loaded");
        Self { store, entries }
    }

    /// Entries oldest-first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, evicting the oldest beyond the cap, and persist.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        if self.entries.len() > MAX_HISTORY_ITEMS {
            let excess = self.entries.len() - MAX_HISTORY_ITEMS;
            self.entries.drain(..excess);
        }
        self.save();
    }

    /// Drop all entries and the stored value.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.store.delete(HISTORY_STORAGE_KEY) {
            warn!(%err, "failed to clear stored history");
        }
    }

    fn save(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "failed to serialize history");
                return;
            }
        };
        if let Err(err) = self.store.set(HISTORY_STORAGE_KEY, &raw) {
            warn!(%err, "failed to persist history");
        }
    }
}

fn cap(mut list: Vec<String>) -> Vec<String> {
    if list.len() > MAX_HISTORY_ITEMS {
        list.drain(..list.len() - MAX_HISTORY_ITEMS);
    }
    list
}
