// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stolos")]
#[command(about = "Rolling deployment for managed container clusters")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stolos.yml configuration file
    Init {
        /// Cluster name to seed the template with
        #[arg(long)]
        cluster: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Register definitions, run one-off commands, and upsert services
    Deploy {
        /// Fully-qualified image reference to roll out
        #[arg(short, long)]
        image: Option<String>,

        /// Target destination (defined in config)
        #[arg(short, long)]
        destination: Option<String>,

        /// Override the wait-time budget, in seconds
        #[arg(long)]
        wait_time: Option<u64>,

        /// Minimal output for CI
        #[arg(short, long)]
        quiet: bool,

        /// JSON-lines output
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration
    Status,
}
