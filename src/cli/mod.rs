use clap::{Parser, Subcommand};

pub mod error;
pub mod handler;
pub mod output;

/// It's Fun Time! - a terminal gallery of random images
#[derive(Parser, Debug)]
#[command(name = "funtime")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override config directory path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<std::path::PathBuf>,

    /// Override the image API endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Enable verbose logging (TRACE level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one batch of random image URLs and print them
    Fetch {
        /// Number of images in the batch
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the settings file path
    Path,
    /// Write the effective configuration to the settings file
    Init,
}
