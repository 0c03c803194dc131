//! Binary entry point for fairway.
//!
//! This binary provides the CLI interface for the fairway caching and
//! course-identity subsystem.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use fairway::cli::{cmd_hash, cmd_import, cmd_normalize, cmd_status};
use fairway::config::CacheConfig;
use fairway::observability::{self, InitOptions, LogFormat};
use std::path::PathBuf;
use std::process::ExitCode;

/// Fairway - caching and course-identity subsystem for the course catalog.
#[derive(Parser)]
#[command(name = "fairway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "FAIRWAY_CONFIG_PATH")]
    config: Option<String>,

    /// Log output format: text or json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Deduplicate a scraped course feed and report counts.
    Import {
        /// Path to a JSON feed of course candidates.
        feed: PathBuf,

        /// Owner id to record on created entries.
        #[arg(long)]
        owner: Option<u64>,

        /// Emit the processing summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the identity token for a name/address pair.
    Hash {
        /// Course name.
        name: String,

        /// Course address.
        address: String,

        /// Emit the token and normalized inputs as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized form of a free-text identifier.
    Normalize {
        /// Text to normalize.
        text: String,
    },

    /// Report cache tier state and shared-tier health.
    Status {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // Load .env before clap reads env-backed arguments.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    observability::init(InitOptions {
        verbose: cli.verbose,
        format: LogFormat::parse(&cli.log_format),
    });

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: CacheConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Import { feed, owner, json } => cmd_import(&feed, owner, json)?,
        Commands::Hash {
            name,
            address,
            json,
        } => cmd_hash(&name, &address, json)?,
        Commands::Normalize { text } => cmd_normalize(&text)?,
        Commands::Status { json } => cmd_status(config, json)?,
    }
    Ok(())
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> anyhow::Result<CacheConfig> {
    // An explicit path must exist; the default locations are optional.
    let config = if let Some(config_path) = path {
        CacheConfig::load_from_file(std::path::Path::new(config_path))?
    } else {
        CacheConfig::load_default()
    };

    Ok(config.apply_env())
}
