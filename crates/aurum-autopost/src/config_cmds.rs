//! The `init` command: write the starter config file.

use anyhow::{Context, Result};
use aurum_config::{paths, write_default_config};
use std::path::PathBuf;

pub fn handle_init(force: bool, path: Option<PathBuf>) -> Result<()> {
    let target = match path {
        Some(p) => p,
        None => paths::config_file().context("Could not determine the config directory")?,
    };
    write_default_config(&target, force)?;
    println!("Wrote config to {}", target.display());
    println!("Set TELEGRAM_TOKEN and TELEGRAM_CHAT_ID in the environment before posting.");
    Ok(())
}
