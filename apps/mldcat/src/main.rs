//! # MLDCAT - OpenML Dataset Metadata Server
//!
//! The main binary of the MLDCAT-AP metadata service.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for conversion, validation and legacy comparison
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      apps/mldcat (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐     │
//! │  │   CLI       │    │   HTTP API  │    │  Legacy compare  │     │
//! │  │  (clap)     │    │   (axum)    │    │    (reqwest)     │     │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘     │
//! │         │                  │                    │               │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │                    ┌───────────────┐                            │
//! │                    │  mldcat-core  │                            │
//! │                    │ (THE LOGIC)   │                            │
//! │                    └───────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! mldcat --config config.toml server --host 0.0.0.0 --port 8000
//!
//! # CLI operations
//! mldcat convert 61
//! mldcat show 61 --legacy
//! mldcat validate --file record.json
//! mldcat compare --ids 1-131
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // MLDCAT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MLDCAT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "mldcat=debug,mldcat_core=debug,tower_http=debug"
    } else {
        "mldcat=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && matches!(cli.command, Some(cli::Commands::Server { .. })) {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ███╗   ███╗██╗     ██████╗  ██████╗ █████╗ ████████╗
  ████╗ ████║██║     ██╔══██╗██╔════╝██╔══██╗╚══██╔══╝
  ██╔████╔██║██║     ██║  ██║██║     ███████║   ██║
  ██║╚██╔╝██║██║     ██║  ██║██║     ██╔══██║   ██║
  ██║ ╚═╝ ██║███████╗██████╔╝╚██████╗██║  ██║   ██║
  ╚═╝     ╚═╝╚══════╝╚═════╝  ╚═════╝╚═╝  ╚═╝   ╚═╝

  OpenML Dataset Metadata Server v{}

  Legacy • Canonical • MLDCAT-AP
"#,
        env!("CARGO_PKG_VERSION")
    );
}
