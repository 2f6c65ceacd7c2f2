//! Snapshot selection: newest catalog entry matching the artifact name

use super::{ArtifactSource, SnapshotDescriptor};
use crate::config::CacheConfig;
use crate::error::{SnapError, SnapResult};
use tracing::{debug, info};

/// Resolve the most recent snapshot named `config.artifact_name()`.
///
/// Entries are sorted ascending by creation time with a stable sort and the
/// last one wins, so among equal timestamps the entry listed last is chosen.
pub fn resolve(
    source: &impl ArtifactSource,
    config: &CacheConfig,
) -> SnapResult<SnapshotDescriptor> {
    let entries = source.list(config)?;
    debug!(
        "Catalog for {}/{} returned {} entries",
        config.owner(),
        config.repository(),
        entries.len()
    );

    let selected = select_latest(entries, config.artifact_name()).ok_or_else(|| {
        SnapError::NoMatchingSnapshot {
            owner: config.owner().to_string(),
            repository: config.repository().to_string(),
            artifact_name: config.artifact_name().to_string(),
        }
    })?;

    info!(
        "Resolved snapshot {} (id {}, created {})",
        selected.name,
        selected.id,
        selected
            .created_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    );
    Ok(selected)
}

fn select_latest(entries: Vec<SnapshotDescriptor>, name: &str) -> Option<SnapshotDescriptor> {
    let mut matching: Vec<_> = entries.into_iter().filter(|e| e.name == name).collect();
    matching.sort_by_key(|e| e.created_at);
    matching.pop()
}
