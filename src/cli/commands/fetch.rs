//! Fetch command - populate the cache directory ahead of time

use super::cache_config;
use crate::cli::args::FetchArgs;
use crate::config::Settings;
use crate::error::SnapResult;
use crate::snapshot::{self, GithubClient};
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the fetch command
pub fn execute(args: FetchArgs, settings: &Settings, token: Option<&str>) -> SnapResult<()> {
    let ctx = UiContext::detect();
    let config = cache_config(&args.target, settings, token);
    let client = GithubClient::new(&settings.catalog);

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!(
        "Resolving {} in {}/{}...",
        config.artifact_name(),
        config.owner(),
        config.repository()
    ));

    let result = snapshot::resolve(&client, &config).and_then(|selected| {
        if selected.expired {
            ui::step_warn(&ctx, &format!("Snapshot {} is marked expired", selected.id));
        }
        snapshot::fetch_and_extract(&client, &selected, &config, config.cache_dir())
            .map(|()| selected)
    });

    match result {
        Ok(selected) => {
            spinner.stop(&format!("Fetched snapshot {}", selected.id));
            ui::step_ok_detail(
                &ctx,
                "Snapshot extracted",
                &config.cache_dir().display().to_string(),
            );
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Fetch failed");
            Err(e)
        }
    }
}
