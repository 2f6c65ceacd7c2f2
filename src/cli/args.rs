//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// snapcache - read-only cache of CI-published example databases
///
/// Resolves the newest snapshot a CI workflow uploaded as an artifact,
/// extracts it locally and serves lookups from the extracted copy.
#[derive(Parser, Debug)]
#[command(name = "snapcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SNAPCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog bearer token (anonymous access when unset)
    #[arg(long, global = true, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the snapshot a read would pull
    Resolve(ResolveArgs),

    /// Download and extract the newest snapshot into the cache directory
    Fetch(FetchArgs),

    /// Look up the values recorded for a key
    Read(ReadArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Which snapshot to pull and where to put it
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Artifact name (defaults to cache.artifact_name)
    #[arg(short, long)]
    pub artifact: Option<String>,

    /// Extraction directory (defaults to <cache.directory>/<owner>/<repo>/<artifact>)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the read command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Key to look up, hex encoded
    pub key: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for the resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable fields
    Text,
    /// JSON output
    Json,
}
