//! Command-line interface for the `hydra` binary.

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::domain::models::ClientConfig;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LogGuard;
use crate::services::RestApi;

/// Client for JSON-LD/Hydra REST APIs
#[derive(Parser, Debug)]
#[command(name = "hydra", version, about)]
pub struct Cli {
    /// Configuration file (defaults to .hydra/config.yaml + .hydra/local.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured API root
    #[arg(long, global = true)]
    pub api_root: Option<String>,

    /// Print full JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a collection endpoint
    List {
        /// Endpoint path, e.g. /books
        endpoint: String,

        /// Query parameter as key=value (repeatable); without any the full set is fetched
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Fetch one entity by id below an endpoint
    Find {
        /// Endpoint path, e.g. /books
        endpoint: String,
        /// Id segment, e.g. 42
        id: String,
    },

    /// Resolve identifiers against the endpoint's full collection
    Resolve {
        /// Endpoint path, e.g. /books
        endpoint: String,
        /// Identifiers, e.g. /books/42
        #[arg(required = true)]
        iris: Vec<String>,
    },

    /// Delete an entity by identifier
    Delete {
        /// Endpoint path, e.g. /books
        endpoint: String,
        /// Identifier, e.g. /books/42
        iri: String,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

/// Load configuration for a CLI invocation.
pub fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(api_root) = &cli.api_root {
        config.api_root.clone_from(api_root);
        ConfigLoader::validate(&config)?;
    }
    Ok(config)
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _log_guard = LogGuard::init(&config.logging)?;
    let api = Arc::new(RestApi::from_config(&config).context("Failed to create API client")?);

    match cli.command {
        Commands::List { endpoint, params } => {
            commands::resource::handle_list(api, &endpoint, params, cli.json).await
        }
        Commands::Find { endpoint, id } => {
            commands::resource::handle_find(api, &endpoint, &id, cli.json).await
        }
        Commands::Resolve { endpoint, iris } => {
            commands::resource::handle_resolve(api, &endpoint, iris, cli.json).await
        }
        Commands::Delete { endpoint, iri } => {
            commands::resource::handle_delete(api, &endpoint, &iri).await
        }
    }
}

/// Print an error chain to stderr.
pub fn handle_error(err: &anyhow::Error) {
    eprintln!("Error: {err}");
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}
