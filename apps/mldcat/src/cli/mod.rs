//! # MLDCAT CLI Module
//!
//! This module implements the CLI interface for the metadata service.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `convert` - Print the MLDCAT-AP graph of a dataset
//! - `show` - Print a dataset record, canonical or legacy shape
//! - `validate` - Check a record file, or every record in the catalog
//! - `compare` - Compare the legacy API with this service, dataset by dataset

mod commands;

use clap::{Parser, Subcommand};
use mldcat::config::Config;
use mldcat_core::MldcatError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// MLDCAT - OpenML dataset metadata in MLDCAT-AP
///
/// Serves OpenML dataset metadata in the legacy shape, the canonical shape,
/// and as MLDCAT-AP JSON-LD graphs.
#[derive(Parser, Debug)]
#[command(name = "mldcat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog dump (overrides `[catalog] path`)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides `[server] host`)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides `[server] port`)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the MLDCAT-AP JSON-LD graph of a dataset
    Convert {
        /// Dataset id
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// API key of the caller, for private datasets
        #[arg(long)]
        api_key: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the example feature and quality
        #[arg(long)]
        no_placeholders: bool,
    },

    /// Print a dataset record
    Show {
        /// Dataset id
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// API key of the caller, for private datasets
        #[arg(long)]
        api_key: Option<String>,

        /// Print the legacy `data_set_description` shape
        #[arg(long)]
        legacy: bool,
    },

    /// Validate a record file, or the whole catalog when no file is given
    Validate {
        /// Record file (JSON)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// The record file uses the deprecated v1 shape
        #[arg(long)]
        v1: bool,
    },

    /// Compare legacy API responses with this service's
    Compare {
        /// Dataset ids: a range (`1-131`), a list (`1,2,61`) or a single id
        #[arg(short, long, default_value = "1-131")]
        ids: String,

        /// Legacy JSON API root (overrides `[legacy] url`)
        #[arg(long)]
        legacy_url: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MldcatError> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Convert {
            id,
            api_key,
            output,
            no_placeholders,
        }) => cmd_convert(
            &config,
            id,
            api_key.as_deref(),
            output.as_deref(),
            no_placeholders,
        ),
        Some(Commands::Show {
            id,
            api_key,
            legacy,
        }) => cmd_show(&config, id, api_key.as_deref(), legacy),
        Some(Commands::Validate { file, v1 }) => {
            cmd_validate(&config, file.as_deref(), v1, json_mode)
        }
        Some(Commands::Compare { ids, legacy_url }) => {
            if let Some(url) = legacy_url {
                config.legacy.url = url;
            }
            cmd_compare(&config, &ids, json_mode).await
        }
        None => cmd_status(&config, json_mode),
    }
}
