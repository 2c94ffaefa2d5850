//! Main application entry point (server binary).
//!
//! A thin wrapper around the `linkstash` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All routes, stores and the notification pipeline live in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use linkstash::config::load_users_from_env;
use linkstash::initialization::init_logger_with;
use linkstash::{start_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), first from the
    // current directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let mut config = Config::parse();
    config.users = load_users_from_env();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = start_server(config).await {
        eprintln!("linkstash error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
