//! Remote snapshot resolution and retrieval
//!
//! A snapshot is a named, timestamped archive published by CI. Resolution
//! picks the most recent snapshot matching the configured name; fetching
//! streams that archive to a scoped temporary file and unpacks it into the
//! local cache directory.
//!
//! Network access goes through the [`ArtifactSource`] trait so that the
//! selection and extraction logic can be exercised without a live catalog.

pub mod fetch;
pub mod github;
pub mod resolve;

pub use fetch::fetch_and_extract;
pub use github::GithubClient;
pub use resolve::resolve;

use crate::config::CacheConfig;
use crate::error::SnapResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One remote artifact as listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDescriptor {
    /// Catalog identifier
    pub id: u64,
    /// Artifact name
    pub name: String,
    /// Creation time; entries without one order before all others
    pub created_at: Option<DateTime<Utc>>,
    /// Opaque handle used to download the archive bytes
    #[serde(rename = "archive_download_url")]
    pub download_ref: String,
    /// Archive size as reported by the catalog
    #[serde(default)]
    pub size_in_bytes: u64,
    /// Whether the catalog reports the archive as expired
    #[serde(default)]
    pub expired: bool,
}

/// Remote catalog capable of listing and downloading snapshots
pub trait ArtifactSource {
    /// List every catalog entry for the configured owner/repository.
    ///
    /// Implementations may pre-filter by name but callers must not rely on it.
    fn list(&self, config: &CacheConfig) -> SnapResult<Vec<SnapshotDescriptor>>;

    /// Stream the archive behind `snapshot` into `sink`, returning bytes written
    fn download(
        &self,
        snapshot: &SnapshotDescriptor,
        config: &CacheConfig,
        sink: &mut dyn Write,
    ) -> SnapResult<u64>;
}
