use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use editorial_api::app::EditorialAggregator;
use editorial_api::config::Config;
use editorial_api::infra::{http_backends, in_memory::InMemoryBackend};
use editorial_api::transform::RenderSettings;
use editorial_api::{logging, observability};

#[derive(Parser)]
#[command(name = "editorial_api")]
#[command(about = "Resolve editorials into fully merged content documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one editorial and print the document as JSON
    Resolve {
        /// Editorial id
        id: String,
        /// Serve every backend from a JSON fixture file instead of HTTP
        #[arg(long)]
        fixtures: Option<PathBuf>,
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
    /// Load and validate the configuration
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();
    observability::init_metrics();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    match cli.command {
        Commands::CheckConfig => {
            info!("Configuration is valid");
            println!("✅ Configuration OK");
            println!("   Editorial service: {}", config.services.editorial_url);
            println!("   Legacy service:    {}", config.services.legacy_url);
            println!("   Image server:      {}", config.thumbor.server_url);
            if config.thumbor.secret.is_empty() {
                println!("⚠️  Thumbor secret is empty, image URLs are unsigned");
            }
        }
        Commands::Resolve { id, fixtures, pretty } => {
            let backends = match &fixtures {
                Some(path) => {
                    info!("Using fixtures from {}", path.display());
                    let backend = Arc::new(
                        InMemoryBackend::load(path).with_context(|| format!("loading fixtures {}", path.display()))?,
                    );
                    backend.backends()
                }
                None => http_backends(&config)?,
            };
            let settings = Arc::new(RenderSettings::from_config(&config));
            let aggregator = EditorialAggregator::new(backends, settings)?;

            let document = match aggregator.resolve_editorial(&id).await {
                Ok(document) => document,
                Err(e) => {
                    error!(editorial_id = %id, "Resolution failed: {}", e);
                    return Err(e.into());
                }
            };
            let json = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}
