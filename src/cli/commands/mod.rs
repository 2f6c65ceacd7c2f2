//! CLI command implementations

pub mod config;
pub mod fetch;
pub mod read;
pub mod resolve;

pub use config::execute as config;
pub use fetch::execute as fetch;
pub use read::execute as read;
pub use resolve::execute as resolve;

use crate::cli::args::TargetArgs;
use crate::config::{CacheConfig, Credential, Settings};

/// Build the per-instance target from arguments, falling back to settings.
///
/// `--dir` pins the extraction directory; otherwise it is scoped per target
/// under `cache.directory`.
fn cache_config(target: &TargetArgs, settings: &Settings, token: Option<&str>) -> CacheConfig {
    let config = CacheConfig::new(&target.owner, &target.repo)
        .with_artifact_name(
            target
                .artifact
                .clone()
                .unwrap_or_else(|| settings.cache.artifact_name.clone()),
        )
        .with_cache_root(&settings.cache.directory)
        .with_credential(token.and_then(Credential::new));

    match &target.dir {
        Some(dir) => config.with_cache_dir(dir),
        None => config,
    }
}
