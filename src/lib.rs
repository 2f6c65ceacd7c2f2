//! snapcache - read-only cache of CI-published example databases
//!
//! Resolves the newest snapshot a CI workflow published as an artifact,
//! extracts it into a local directory on first use and serves every later
//! lookup from that directory. Writes are accepted and discarded.
//!
//! ```rust,no_run
//! use snapcache::config::{CacheConfig, Credential, Settings};
//! use snapcache::store::ReadOnlyCache;
//!
//! let config = CacheConfig::new("acme", "widgets").with_credential(Credential::from_env());
//! let cache = ReadOnlyCache::github(config, &Settings::default().catalog);
//! let values = cache.read(b"some-test-key")?;
//! # Ok::<(), snapcache::SnapError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod ui;

pub use error::{SnapError, SnapResult};
