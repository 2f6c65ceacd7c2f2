//! Error types for snapcache
//!
//! All modules use `SnapResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snapcache operations
pub type SnapResult<T> = Result<T, SnapError>;

/// All errors that can occur in snapcache
#[derive(Error, Debug)]
pub enum SnapError {
    // Resolution errors
    #[error("Could not connect to the artifact catalog for {owner}/{repository}: {reason}")]
    CatalogUnavailable {
        owner: String,
        repository: String,
        reason: String,
    },

    #[error("Artifact catalog for {owner}/{repository} rejected the request (status {status}): {reason}")]
    CatalogRejected {
        owner: String,
        repository: String,
        status: u16,
        reason: String,
    },

    #[error("No snapshot named {artifact_name} found in {owner}/{repository}")]
    NoMatchingSnapshot {
        owner: String,
        repository: String,
        artifact_name: String,
    },

    // Fetch errors
    #[error("Could not connect to download snapshot {name}: {reason}")]
    DownloadUnavailable { name: String, reason: String },

    #[error("Download of snapshot {name} rejected (status {status})")]
    DownloadRejected { name: String, status: u16 },

    #[error("Failed to extract snapshot into {path}: {reason}")]
    ExtractionFailed { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input errors
    #[error("Invalid key {input:?}: {reason}")]
    InvalidKey { input: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SnapError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an extraction error for a destination directory
    pub fn extraction(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if the error originated on the remote side of the cache
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::CatalogUnavailable { .. }
                | Self::CatalogRejected { .. }
                | Self::DownloadUnavailable { .. }
                | Self::DownloadRejected { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CatalogUnavailable { .. } | Self::DownloadUnavailable { .. } => {
                Some("Check your network connection and the catalog api_url setting")
            }
            Self::CatalogRejected { status: 401 | 403, .. }
            | Self::DownloadRejected { status: 401 | 403, .. } => {
                Some("Set GH_TOKEN to a token with actions:read access")
            }
            Self::CatalogRejected { status: 404, .. } => {
                Some("Check that the repository exists and that the token can see it")
            }
            Self::NoMatchingSnapshot { .. } => {
                Some("Check the artifact name uploaded by your CI workflow (--artifact)")
            }
            _ => None,
        }
    }
}
