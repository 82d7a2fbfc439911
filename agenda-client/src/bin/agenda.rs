//! `agenda` - print a calendar feed as JSON
//!
//! Fetches appointments, professionals and the caller's business, then
//! prints the events and widget options the calendar screen would render.

use anyhow::{Context, Result};
use clap::Parser;

use agenda_client::calendar::build_feed;
use agenda_client::{ClientConfig, connect_with_center, init_logger};

/// Agenda calendar feed
#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Print the calendar feed of the scheduling backend as JSON")]
#[command(version)]
struct Cli {
    /// API base URL (overrides AGENDA_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token; persisted when AGENDA_TOKEN_PATH is set
    #[arg(long, env = "AGENDA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Only show this professional's appointments and availability
    #[arg(short, long)]
    professional: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Log level or filter directive
    #[arg(long, env = "AGENDA_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level, cli.json_logs)?;

    let mut config = ClientConfig::from_env().context("invalid AGENDA_* configuration")?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }

    let (client, toasts) = connect_with_center(config)?;
    if let Some(token) = cli.token.as_deref() {
        client.session().set_token(Some(token))?;
    }

    let appointments = client
        .appointments
        .list()
        .await
        .context("failed to load appointments")?;
    let professionals = client
        .professionals
        .list()
        .await
        .context("failed to load professionals")?;
    let interval = match client.businesses.mine().await {
        Ok(business) => business.map(|b| b.appointment_interval_min),
        Err(e) => {
            tracing::warn!(error = %e, "Business settings unavailable, using default slots");
            None
        }
    };

    let selected = match cli.professional.as_deref() {
        Some(id) => Some(
            professionals
                .iter()
                .find(|p| p.id == id)
                .with_context(|| format!("unknown professional: {id}"))?,
        ),
        None => None,
    };

    let feed = build_feed(&appointments, selected, interval);
    println!("{}", serde_json::to_string_pretty(&feed)?);

    for toast in toasts.drain() {
        tracing::info!(level = ?toast.level, message = %toast.message, "Pending notification");
    }
    Ok(())
}
