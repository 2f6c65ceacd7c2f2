//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{ConfigManager, Settings};
use crate::error::SnapResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub fn execute(args: ConfigArgs, manager: &ConfigManager, settings: &Settings) -> SnapResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(settings)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force)?,
    }

    Ok(())
}

fn show_config(settings: &Settings) -> SnapResult<()> {
    println!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

fn init_config(manager: &ConfigManager, force: bool) -> SnapResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Settings::default())?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}
