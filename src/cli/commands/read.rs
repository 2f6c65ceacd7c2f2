//! Read command - look up a key through the read-only cache

use super::cache_config;
use crate::cli::args::ReadArgs;
use crate::config::Settings;
use crate::error::{SnapError, SnapResult};
use crate::store::ReadOnlyCache;
use crate::ui::{self, UiContext};
use tracing::debug;

/// Execute the read command
pub fn execute(args: ReadArgs, settings: &Settings, token: Option<&str>) -> SnapResult<()> {
    let ctx = UiContext::detect();
    let key = parse_key(&args.key)?;
    let config = cache_config(&args.target, settings, token);

    let cache = ReadOnlyCache::github(config, &settings.catalog);
    debug!("Reading through {}", cache);
    let values = cache.read(&key)?;

    if values.is_empty() {
        ui::step_warn(&ctx, "No values recorded for key");
        return Ok(());
    }

    for value in &values {
        println!("{}", hex::encode(value));
    }
    ui::step_ok(&ctx, &format!("{} value(s)", values.len()));

    Ok(())
}

/// Decode a hex key, tolerating an optional `0x` prefix
fn parse_key(input: &str) -> SnapResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| SnapError::InvalidKey {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
