//! Per-instance cache target: which snapshot to pull and where to put it

use std::fmt;
use std::path::{Path, PathBuf};

/// Artifact name CI workflows upload the example database under
pub const DEFAULT_ARTIFACT_NAME: &str = "hypofuzz-example-db";

/// Environment variable holding the catalog bearer token
pub const TOKEN_ENV_VAR: &str = "GH_TOKEN";

/// Opaque bearer credential for the remote catalog
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, treating blank values as no credential
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Read the token from `GH_TOKEN`.
    ///
    /// Meant for the surrounding application; the cache itself never
    /// consults the environment.
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_ENV_VAR).ok().and_then(Self::new)
    }

    /// The raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Immutable configuration owned by one `ReadOnlyCache` instance
///
/// Unless pinned with [`CacheConfig::with_cache_dir`], the extraction
/// directory is `<root>/<owner>/<repository>/<artifact_name>`, so targets
/// never share a directory.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    owner: String,
    repository: String,
    artifact_name: String,
    cache_root: PathBuf,
    pinned_dir: Option<PathBuf>,
    cache_dir: PathBuf,
    credential: Option<Credential>,
}

impl CacheConfig {
    /// Target `owner/repository` with the default artifact name and cache root
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        let mut config = Self {
            owner: owner.into(),
            repository: repository.into(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
            cache_root: crate::config::schema::default_cache_root(),
            pinned_dir: None,
            cache_dir: PathBuf::new(),
            credential: None,
        };
        config.rescope();
        config
    }

    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self.rescope();
        self
    }

    /// Root under which the per-target directory is created
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = root.into();
        self.rescope();
        self
    }

    /// Extract into exactly `dir`, bypassing per-target scoping
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pinned_dir = Some(dir.into());
        self.rescope();
        self
    }

    fn rescope(&mut self) {
        self.cache_dir = match &self.pinned_dir {
            Some(dir) => dir.clone(),
            None => self
                .cache_root
                .join(&self.owner)
                .join(&self.repository)
                .join(&self.artifact_name),
        };
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    /// Directory the snapshot is extracted into and served from
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
