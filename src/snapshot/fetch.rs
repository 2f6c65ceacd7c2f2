//! Snapshot download and extraction

use super::{ArtifactSource, SnapshotDescriptor};
use crate::config::CacheConfig;
use crate::error::{SnapError, SnapResult};
use std::fs;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

/// Download `snapshot` and unpack it into `destination`.
///
/// The archive is streamed into a temporary file that is removed on every
/// exit path. Extraction is additive: existing files in `destination` are
/// overwritten when the archive contains them and left alone otherwise.
pub fn fetch_and_extract(
    source: &impl ArtifactSource,
    snapshot: &SnapshotDescriptor,
    config: &CacheConfig,
    destination: &Path,
) -> SnapResult<()> {
    fetch_and_extract_in(source, snapshot, config, destination, &std::env::temp_dir())
}

/// [`fetch_and_extract`] with the temporary archive placed in `scratch`
pub(crate) fn fetch_and_extract_in(
    source: &impl ArtifactSource,
    snapshot: &SnapshotDescriptor,
    config: &CacheConfig,
    destination: &Path,
    scratch: &Path,
) -> SnapResult<()> {
    let mut archive = tempfile::Builder::new()
        .prefix("snapcache-")
        .suffix(".zip")
        .tempfile_in(scratch)
        .map_err(|e| SnapError::extraction(scratch, e))?;
    let archive_path = archive.path().to_path_buf();
    debug!(
        "Downloading snapshot {} to {}",
        snapshot.name,
        archive_path.display()
    );

    let bytes = {
        let mut writer = BufWriter::new(archive.as_file_mut());
        // The only local I/O a source performs is writing into the archive
        let bytes = source
            .download(snapshot, config, &mut writer)
            .map_err(|e| match e {
                SnapError::Io { source: err, .. } => SnapError::extraction(&archive_path, err),
                other => other,
            })?;
        writer
            .flush()
            .map_err(|e| SnapError::extraction(&archive_path, e))?;
        bytes
    };
    debug!("Downloaded {} bytes", bytes);

    archive
        .as_file_mut()
        .rewind()
        .map_err(|e| SnapError::extraction(&archive_path, e))?;

    fs::create_dir_all(destination).map_err(|e| SnapError::extraction(destination, e))?;

    let mut zip = ZipArchive::new(archive.as_file())
        .map_err(|e| SnapError::extraction(destination, e))?;
    let members = zip.len();
    zip.extract(destination)
        .map_err(|e| SnapError::extraction(destination, e))?;

    info!(
        "Extracted {} entries from {} into {}",
        members,
        snapshot.name,
        destination.display()
    );
    Ok(())
}
