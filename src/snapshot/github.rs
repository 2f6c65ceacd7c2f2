//! GitHub Actions artifact catalog client

use super::{ArtifactSource, SnapshotDescriptor};
use crate::config::schema::CatalogSettings;
use crate::config::CacheConfig;
use crate::error::{SnapError, SnapResult};
use serde::Deserialize;
use std::io::{Read, Write};
use tracing::debug;
use ureq::typestate::WithoutBody;
use ureq::{Agent, RequestBuilder};

/// Page size requested from the catalog (the API maximum)
const PER_PAGE: usize = 100;

/// Copy buffer used while streaming archives
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
struct ArtifactPage {
    total_count: usize,
    artifacts: Vec<SnapshotDescriptor>,
}

/// Blocking client for the GitHub Actions artifacts API
pub struct GithubClient {
    agent: Agent,
    api_url: String,
    api_version: String,
    user_agent: String,
}

impl GithubClient {
    /// Create a client from catalog settings. Performs no network activity.
    pub fn new(settings: &CatalogSettings) -> Self {
        Self {
            agent: Agent::new_with_defaults(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
            user_agent: settings.user_agent.clone(),
        }
    }

    fn artifacts_url(&self, config: &CacheConfig) -> String {
        format!(
            "{}/repos/{}/{}/actions/artifacts",
            self.api_url,
            config.owner(),
            config.repository()
        )
    }

    fn request(&self, url: &str, config: &CacheConfig) -> RequestBuilder<WithoutBody> {
        let request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", self.api_version.as_str())
            .header("User-Agent", self.user_agent.as_str());

        match config.credential() {
            Some(credential) => {
                request.header("Authorization", format!("Bearer {}", credential.expose()))
            }
            None => request,
        }
    }

    fn list_page(&self, config: &CacheConfig, page: usize) -> SnapResult<ArtifactPage> {
        let unavailable = |reason: String| SnapError::CatalogUnavailable {
            owner: config.owner().to_string(),
            repository: config.repository().to_string(),
            reason,
        };
        let rejected = |status: u16, reason: String| SnapError::CatalogRejected {
            owner: config.owner().to_string(),
            repository: config.repository().to_string(),
            status,
            reason,
        };

        let url = self.artifacts_url(config);
        debug!("GET {} (page {})", url, page);

        let mut response = self
            .request(&url, config)
            .query("name", config.artifact_name())
            .query("per_page", PER_PAGE.to_string())
            .query("page", page.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => {
                    rejected(status, format!("HTTP status {}", status))
                }
                other => unavailable(other.to_string()),
            })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| unavailable(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| rejected(status, format!("unexpected catalog response: {}", e)))
    }
}

impl ArtifactSource for GithubClient {
    fn list(&self, config: &CacheConfig) -> SnapResult<Vec<SnapshotDescriptor>> {
        let mut entries = Vec::new();
        let mut page = 1;

        loop {
            let ArtifactPage {
                total_count,
                artifacts,
            } = self.list_page(config, page)?;
            let received = artifacts.len();
            entries.extend(artifacts);

            if received < PER_PAGE || entries.len() >= total_count {
                break;
            }
            page += 1;
        }

        Ok(entries)
    }

    fn download(
        &self,
        snapshot: &SnapshotDescriptor,
        config: &CacheConfig,
        sink: &mut dyn Write,
    ) -> SnapResult<u64> {
        let unavailable = |reason: String| SnapError::DownloadUnavailable {
            name: snapshot.name.clone(),
            reason,
        };

        debug!("GET {}", snapshot.download_ref);
        let mut response = self
            .request(&snapshot.download_ref, config)
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => SnapError::DownloadRejected {
                    name: snapshot.name.clone(),
                    status,
                },
                other => unavailable(other.to_string()),
            })?;

        let mut reader = response.body_mut().as_reader();
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(unavailable(e.to_string())),
            };
            sink.write_all(&buf[..n])
                .map_err(|e| SnapError::io("writing downloaded archive", e))?;
            total += n as u64;
        }

        Ok(total)
    }
}
