use anyhow::Result;
use clap::Parser;

mod cli;
mod config_cmds;
mod doctor;
mod post_cmd;
mod status_cmd;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let format = cli.format.clone();

    match cli.command {
        Commands::Post { dry_run, config } => {
            post_cmd::handle_post(dry_run, config.as_deref(), format).await?;
        }
        Commands::Status { config } => {
            status_cmd::handle_status(config.as_deref(), format)?;
        }
        Commands::Init { force, path } => {
            config_cmds::handle_init(force, path)?;
        }
        Commands::Doctor { config } => {
            let healthy = doctor::run_doctor(config.as_deref())?;
            if !healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
