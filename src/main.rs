//! snapcache CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use snapcache::cli::{Cli, Commands};
use snapcache::config::ConfigManager;
use snapcache::error::SnapResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> SnapResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("snapcache=warn"),
        1 => EnvFilter::new("snapcache=info"),
        _ => EnvFilter::new("snapcache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    debug!("Using config file {}", manager.path().display());
    let settings = manager.load()?;
    let token = cli.token.as_deref();

    match cli.command {
        Commands::Resolve(args) => snapcache::cli::commands::resolve(args, &settings, token),
        Commands::Fetch(args) => snapcache::cli::commands::fetch(args, &settings, token),
        Commands::Read(args) => snapcache::cli::commands::read(args, &settings, token),
        Commands::Config(args) => snapcache::cli::commands::config(args, &manager, &settings),
    }
}
