//! abacus-history - Bounded, persisted calculation history
//!
//! An ordered list of `"<expr> = <result>"` strings, newest last, capped at
//! [`MAX_HISTORY_ITEMS`]. Persistence goes through the [`KvStore`] trait,
//! an opaque string-keyed store with a file backend ([`FileStore`]) and an
//! in-memory backend ([`MemoryStore`]) for tests and ephemeral runs.
//!
//! Loading never fails: missing or malformed stored data starts an empty
//! history. Store failures on mutation are logged and swallowed, so a
//! persistence hiccup never interrupts a calculation.
//!
//! # Example
//!
//! ```rust
//! use abacus_history::{History, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut history = History::load(store.clone());
//! history.append("2 + 3 = 5");
//!
//! // Same backing store, fresh process: entries survive.
//! let reloaded = History::load(store);
//! assert_eq!(reloaded.entries(), ["2 + 3 = 5"]);
//! ```

pub mod error;
pub mod history;
pub mod store;

// Re-exports for convenience
pub use error::{HistoryError, Result};
pub use history::{History, HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS};
pub use store::{FileStore, KvStore, MemoryStore};
