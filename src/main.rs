//! Service selector CLI.
//!
//! ```text
//! service-selector validate --config selector.toml
//! service-selector resolve  --config selector.toml --family clouddriver --source-app deck
//! service-selector watch    --config selector.toml
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use serde_json::json;

use service_selector::config::load_config;
use service_selector::config::watcher::ConfigWatcher;
use service_selector::observability::logging;
use service_selector::Gateway;

#[derive(Parser)]
#[command(name = "service-selector")]
#[command(about = "Resolve gateway backends from request attributes", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "selector.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration
    Validate,
    /// Print the backend selected for a request
    Resolve {
        /// Backend family, e.g. clouddriver
        #[arg(short, long)]
        family: String,
        #[arg(short, long)]
        source_app: Option<String>,
        #[arg(short, long)]
        destination_app: Option<String>,
        /// Print JSON instead of the bare URL
        #[arg(long)]
        json: bool,
    },
    /// Keep routers up to date with the configuration file until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.observability.log_level);

    match cli.command {
        Commands::Validate => {
            let gateway = Gateway::from_config(&config)?;
            println!("{}: ok", cli.config.display());
            for family in gateway.families() {
                let router = gateway.router(family)?;
                println!(
                    "  {} default={} dynamic={}",
                    family,
                    router.default_backend().base_url,
                    router.should_select()
                );
            }
        }
        Commands::Resolve {
            family,
            source_app,
            destination_app,
            json,
        } => {
            let gateway = Gateway::from_config(&config)?;
            let backend = gateway.route(&family, source_app.as_deref(), destination_app.as_deref())?;
            if json {
                let out = json!({
                    "family": backend.family,
                    "base_url": backend.base_url.as_str(),
                    "source_app": source_app,
                    "destination_app": destination_app,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", backend.base_url);
            }
        }
        Commands::Watch => watch(&cli.config, Gateway::from_config(&config)?).await?,
    }

    Ok(())
}

async fn watch(path: &Path, gateway: Gateway) -> Result<(), Box<dyn std::error::Error>> {
    let flags = gateway.flags().clone();
    let current = ArcSwap::from_pointee(gateway);

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(new_config) = updates.recv() => {
                match Gateway::with_flags(&new_config, flags.clone()) {
                    Ok(gateway) => {
                        current.store(Arc::new(gateway));
                        tracing::info!(families = current.load().families().count(), "Routers rebuilt");
                    }
                    Err(e) => tracing::error!(error = %e, "Failed to rebuild routers; keeping current ones"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
