// ABOUTME: Entry point for the stolos CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::time::Duration;
use stolos::cluster::HttpClusterClient;
use stolos::config::{self, Config};
use stolos::error::{Error, Result};
use stolos::output::{Output, OutputMode};
use stolos::types::ImageRef;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured API endpoint.
const ENDPOINT_ENV: &str = "STOLOS_ENDPOINT";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { cluster, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, cluster.as_deref(), force)
        }
        Commands::Deploy {
            image,
            destination,
            wait_time,
            quiet,
            json,
        } => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;

            // Apply destination overrides if specified
            let mut config = if let Some(dest) = destination {
                config.for_destination(&dest)?
            } else {
                config
            };

            if let Some(seconds) = wait_time {
                config.wait_time = Duration::from_secs(seconds);
            }

            let image = image
                .as_deref()
                .map(ImageRef::parse)
                .transpose()
                .map_err(|e| Error::InvalidConfig(e.to_string()))?;

            let mode = if json {
                OutputMode::Json
            } else if quiet {
                OutputMode::Quiet
            } else {
                OutputMode::Normal
            };
            let output = Output::new(mode);

            let cluster_api = build_client(&config)?;
            stolos::commands::deploy(config, image, &cluster_api, output).await
        }
        Commands::Status => {
            let cwd = env::current_dir()?;
            Config::discover(&cwd).map(|config| {
                println!("Cluster: {}", config.cluster);
                println!("Wait time: {}s", config.wait_time.as_secs());
                println!("Task definitions: {}", config.task_definitions.len());
                for definition in config.task_definitions.iter() {
                    println!(
                        "  {} ({} container(s))",
                        definition.family,
                        definition.container_definitions.len()
                    );
                }
                println!("One-off commands: {}", config.one_off_commands.len());
                println!("Services: {}", config.services.len());
            })
        }
    }
}

/// Build the HTTP client from resolved configuration. The endpoint comes
/// from config or the environment; the token is optional.
fn build_client(config: &Config) -> Result<HttpClusterClient> {
    let endpoint = config
        .api
        .as_ref()
        .map(|a| a.endpoint.clone())
        .or_else(|| env::var(ENDPOINT_ENV).ok())
        .ok_or(Error::MissingEndpoint)?;

    let token = env::var(config.token_env()).ok();

    Ok(HttpClusterClient::new(&endpoint, token))
}
