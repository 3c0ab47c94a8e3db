//! PWA host
//!
//! Serves a WebAssembly progressive web app, or exports it as static files.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::handler ──┬──▶ resources (files under /web/)
//!                     (request id,     (ETag, version, ├──▶ cache (app.js, worker, manifest)
//!                      trace, timeout)  dispatch)      ├──▶ proxy (fetch + cache)
//!                                                      └──▶ page (render)
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pwa_host::config::{load_config, HostConfig};
use pwa_host::export::generate_static_website;
use pwa_host::lifecycle::{build_handler, serve};
use pwa_host::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "pwa-host")]
#[command(about = "Serve or export a WebAssembly progressive web app", long_about = None)]
struct Cli {
    /// Configuration file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "pwa-host.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the app (default)
    Serve,
    /// Write the app as static files
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Extra page paths to render, on top of the configured routes
        #[arg(short, long = "page")]
        pages: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        HostConfig::default()
    };
    init_logging(&config.observability);

    tracing::info!(
        config = ?cli.config,
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "pwa-host v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let base_dir = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let handler = build_handler(&config, base_dir)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, handler).await?,
        Commands::Export { out, pages } => {
            let files = generate_static_website(&out, &handler, &pages).await?;
            tracing::info!(out = ?out, files = files.len(), "Export complete");
        }
    }

    Ok(())
}
