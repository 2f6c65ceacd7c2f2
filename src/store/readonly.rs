//! Read-only, lazily populated view over a CI snapshot
//!
//! Construction never touches the network. The first read resolves the
//! newest snapshot, extracts it into the cache directory and flips the
//! once-guard; every later read goes straight to the local store. Writes
//! and deletes are accepted and discarded.
//!
//! The guard is only set after a successful population, so a failed first
//! read is retried from scratch by the next one.
//!
//! Separate instances configured with the same cache directory each
//! populate it independently and do not coordinate with one another.

use super::{DirectoryStore, ExampleStore};
use crate::config::schema::CatalogSettings;
use crate::config::CacheConfig;
use crate::error::SnapResult;
use crate::snapshot::{self, ArtifactSource, GithubClient};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Once-guard state of a [`ReadOnlyCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// No snapshot has been pulled by this instance yet
    NotFetched,
    /// The snapshot has been extracted; reads are served locally
    Fetched,
}

/// Read-only pull-through cache over a local example store
pub struct ReadOnlyCache<S, D> {
    config: CacheConfig,
    source: S,
    store: D,
    state: Mutex<FetchState>,
}

impl ReadOnlyCache<GithubClient, DirectoryStore> {
    /// GitHub-backed cache serving from `config.cache_dir()`
    pub fn github(config: CacheConfig, catalog: &CatalogSettings) -> Self {
        let store = DirectoryStore::new(config.cache_dir());
        Self::new(config, GithubClient::new(catalog), store)
    }
}

impl<S: ArtifactSource, D: ExampleStore> ReadOnlyCache<S, D> {
    /// Compose a cache from its parts. Performs no I/O.
    pub fn new(config: CacheConfig, source: S, store: D) -> Self {
        Self {
            config,
            source,
            store,
            state: Mutex::new(FetchState::NotFetched),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Current once-guard state
    pub fn state(&self) -> FetchState {
        *self.lock_state()
    }

    pub fn is_fetched(&self) -> bool {
        self.state() == FetchState::Fetched
    }

    /// All values recorded for `key` in the resolved snapshot.
    ///
    /// The first call pulls the snapshot; failures surface unchanged and
    /// leave the instance unfetched.
    pub fn read(&self, key: &[u8]) -> SnapResult<Vec<Vec<u8>>> {
        self.ensure_fetched()?;
        self.store.fetch(key)
    }

    /// Discarded
    pub fn write(&self, _key: &[u8], _value: &[u8]) {
        debug!("Ignoring write to read-only cache {}", self);
    }

    /// Discarded
    pub fn remove(&self, _key: &[u8], _value: &[u8]) {
        debug!("Ignoring delete from read-only cache {}", self);
    }

    fn ensure_fetched(&self) -> SnapResult<()> {
        // Held across population so concurrent first reads wait for one pull.
        let mut state = self.lock_state();
        if *state == FetchState::Fetched {
            return Ok(());
        }

        info!(
            "Populating {} from {}/{}",
            self.config.cache_dir().display(),
            self.config.owner(),
            self.config.repository()
        );
        let descriptor = snapshot::resolve(&self.source, &self.config)?;
        snapshot::fetch_and_extract(
            &self.source,
            &descriptor,
            &self.config,
            self.config.cache_dir(),
        )?;

        *state = FetchState::Fetched;
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, FetchState> {
        // A panic mid-population leaves the state NotFetched, which is safe to reuse.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ArtifactSource, D: ExampleStore> ExampleStore for ReadOnlyCache<S, D> {
    fn fetch(&self, key: &[u8]) -> SnapResult<Vec<Vec<u8>>> {
        self.read(key)
    }

    fn save(&self, key: &[u8], value: &[u8]) -> SnapResult<()> {
        self.write(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8], value: &[u8]) -> SnapResult<()> {
        self.remove(key, value);
        Ok(())
    }
}

impl<S, D> fmt::Display for ReadOnlyCache<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReadOnlyCache(owner={}, repository={}, artifact_name={})",
            self.config.owner(),
            self.config.repository(),
            self.config.artifact_name()
        )
    }
}
