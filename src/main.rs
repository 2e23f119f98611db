// Pantera - FURIA fan chat relay
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use pantera::config::{Settings, StaticContext};
use pantera::providers::{ChatModel, GeminiProvider};
use pantera::scrape::{self, DynamicStore, ScrapeTargets};
use pantera::server::{AppState, RelayServer};

const DEFAULT_LOG_FILTER: &str = "pantera=info,tower_http=info";

/// Chat relay that primes Gemini with FURIA team context
#[derive(Debug, Parser)]
#[command(name = "pantera", version, about)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Host to bind
    #[arg(long)]
    bind: Option<String>,

    /// Static context TOML file (overrides CONTEXT_PATH)
    #[arg(long)]
    context: Option<PathBuf>,

    /// Re-scrape interval in seconds, 0 to scrape only at startup (overrides SCRAPE_REFRESH_SECS)
    #[arg(long)]
    refresh_secs: Option<u64>,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(bind) = self.bind {
            settings.bind_host = bind;
        }
        if let Some(context) = self.context {
            settings.context_path = Some(context);
        }
        if let Some(secs) = self.refresh_secs {
            settings.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Seed the environment from .env when present
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // Configuration problems are fatal: log and exit non-zero via `?`.
    let mut settings = Settings::from_env().inspect_err(|e| tracing::error!("{}", e))?;
    cli.apply(&mut settings);
    tracing::debug!(?settings, "Settings loaded");

    let static_context = StaticContext::load(settings.context_path.as_deref())
        .inspect_err(|e| tracing::error!("{}", e))?;
    tracing::info!(
        instructions = static_context.instructions.len(),
        sites = static_context.sites.len(),
        teams = static_context.teams.len(),
        "Static context loaded"
    );

    let model: Arc<dyn ChatModel> = Arc::new(
        GeminiProvider::new(settings.api_key.clone())?.with_model(settings.model.clone()),
    );

    // Scrape in the background; requests before it finishes use placeholders.
    let dynamic = DynamicStore::new();
    let scrape_client = scrape::build_client().context("Failed to create scrape client")?;
    scrape::spawn_scrape_task(
        dynamic.clone(),
        scrape_client,
        ScrapeTargets {
            roster_url: settings.roster_url.clone(),
            results_url: settings.results_url.clone(),
        },
        settings.refresh_interval,
    );

    let state = AppState::new(Arc::new(static_context), dynamic, model);
    RelayServer::new(state, settings.bind_address()).serve().await
}
