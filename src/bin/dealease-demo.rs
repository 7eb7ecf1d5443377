//! Command line front-end for the demo session store.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dealease_demo::config::Config;
use dealease_demo::{init, DensityTier, SessionStore};

#[derive(Parser)]
#[command(author, version, about = "DealEase demo data CLI", long_about = None)]
struct Cli {
    /// Path to the configuration file; defaults to `config.toml` in the
    /// working directory, then in the per-user config directory
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether demo mode is active
    Status,
    /// Activate demo mode with a fresh dataset
    Init {
        #[arg(long)]
        density: Option<DensityTier>,
        /// Anchor timestamps to the fixed canonical instant instead of now
        #[arg(long, default_value_t = false)]
        no_real_time: bool,
    },
    /// Regenerate the active dataset
    Reset,
    /// Leave demo mode and discard the dataset
    Exit,
    /// Write the session to a dated export file
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace the session with an export file
    Import { file: PathBuf },
    /// Print dashboard statistics as JSON
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = init(Some(&config_path.to_string_lossy())).context("failed to initialize")?;
    let store = SessionStore::from_config(&config).context("failed to open demo session store")?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            let session = store.session();
            let state = if session.is_active { "active" } else { "inactive" };
            println!("demo mode: {} (density: {})", state, session.settings.data_density);
        }
        Commands::Init { density, no_real_time } => {
            let mut settings = config.demo.settings_for(density.unwrap_or(config.demo.default_density));
            if no_real_time {
                settings.simulate_real_time = false;
            }
            store.init_with(settings)?;
            println!("demo mode activated at {} density", settings.data_density);
        }
        Commands::Reset => {
            store.reset()?;
            println!("demo data regenerated");
        }
        Commands::Exit => {
            store.exit()?;
            println!("demo mode exited");
        }
        Commands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.export.directory));
            let path = store.export_to_dir(&dir)?;
            println!("{}", path.display());
        }
        Commands::Import { file } => {
            store
                .import_from_file(&file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("imported (active: {})", store.is_active());
        }
        Commands::Stats => match store.stats() {
            Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
            None => println!("demo mode is inactive"),
        },
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    let local = PathBuf::from("config.toml");
    if local.exists() {
        return local;
    }
    Config::config_dir()
        .map(|dir| dir.join("config.toml"))
        .filter(|path| path.exists())
        .unwrap_or(local)
}
