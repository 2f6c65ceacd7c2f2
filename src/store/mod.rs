//! Example stores: key to value-set mappings consumed by test runners
//!
//! # Layout
//!
//! Snapshots published by CI are directory trees in which every key owns
//! one directory and every value is one file inside it:
//!
//! ```text
//! <root>/<sha384(key)[..16]>/<sha384(value)[..16]>
//! ```
//!
//! [`DirectoryStore`] reads and writes that layout. [`ReadOnlyCache`] wraps a
//! store, populates its directory from the newest CI snapshot on first read,
//! and turns every write into a no-op.

pub mod directory;
pub mod readonly;

pub use directory::DirectoryStore;
pub use readonly::{FetchState, ReadOnlyCache};

use crate::error::SnapResult;

/// Key to value-set storage
pub trait ExampleStore {
    /// All values recorded for `key`; empty when the key is absent
    fn fetch(&self, key: &[u8]) -> SnapResult<Vec<Vec<u8>>>;

    /// Record `value` under `key`
    fn save(&self, key: &[u8], value: &[u8]) -> SnapResult<()>;

    /// Forget `value` under `key`
    fn delete(&self, key: &[u8], value: &[u8]) -> SnapResult<()>;
}
