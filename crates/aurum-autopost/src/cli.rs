use aurum_core::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aurum")]
#[command(about = "Aurum Bespoke autopost — scheduled social posts with daily rotation", version)]
pub struct Cli {
    /// Output format for command results
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose and deliver the next scheduled post
    Post {
        /// Decide what would be posted without building, sending, or
        /// recording anything
        #[arg(long)]
        dry_run: bool,

        /// Path to the config file (default: XDG config dir)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Show today's quota and rotation position
    Status {
        /// Path to the config file (default: XDG config dir)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Write the starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Write to this path instead of the XDG config dir
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Check ffmpeg, credentials, config, and state health
    Doctor {
        /// Path to the config file (default: XDG config dir)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}
