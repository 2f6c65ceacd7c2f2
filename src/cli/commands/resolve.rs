//! Resolve command - show the snapshot a read would pull

use super::cache_config;
use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::Settings;
use crate::error::SnapResult;
use crate::snapshot::{self, GithubClient, SnapshotDescriptor};
use crate::ui::{self, UiContext};

/// Execute the resolve command
pub fn execute(args: ResolveArgs, settings: &Settings, token: Option<&str>) -> SnapResult<()> {
    let config = cache_config(&args.target, settings, token);
    let client = GithubClient::new(&settings.catalog);
    let selected = snapshot::resolve(&client, &config)?;

    match args.format {
        OutputFormat::Text => print_text(&selected),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
    }

    Ok(())
}

fn print_text(selected: &SnapshotDescriptor) {
    let ctx = UiContext::detect();
    let created = selected
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    ui::section(&ctx, &selected.name);
    ui::key_value(&ctx, "id", &selected.id.to_string());
    ui::key_value(&ctx, "created", &created);
    ui::key_value(&ctx, "size", &format!("{} bytes", selected.size_in_bytes));
    ui::key_value(&ctx, "download", &selected.download_ref);
    if selected.expired {
        ui::step_warn_hint(&ctx, "Snapshot is expired", "downloads will be rejected");
    }
}
