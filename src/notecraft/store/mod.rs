//! # Storage Layer
//!
//! The sequencer never reaches into ambient storage. It works against the
//! [`SequenceStore`] trait, a tiny string-to-string key-value capability.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - All keys live in a single `store.json` object in the data directory
//!   - Every write rewrites the file
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Key Layout
//!
//! ```text
//! seq_<code>_<yyyy>_<mm>   -> "7"                       (last issued sequence)
//! docid_session            -> "CRG-EQ-2026-03-007"     (current session id)
//! ```
//!
//! The store is process-local and not transactional. Read-then-write sequences
//! are only correct with a single logical caller, which is the CLI's model.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Durable string key-value storage used by the identifier sequencer.
pub trait SequenceStore {
    /// Read a value, `None` when the key was never set (or was removed)
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys currently held, sorted
    fn keys(&self) -> Result<Vec<String>>;
}
