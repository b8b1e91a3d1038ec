use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use m3u_combiner::{
    config::Config,
    services::PlaylistCombiner,
    utils::StandardHttpClient,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "m3u-combiner")]
#[command(version)]
#[command(about = "Combine remote M3U playlists into one grouped playlist with an EPG reference")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (defaults to $CONFIG_FILE or combiner.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Output playlist path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// EPG URL written to the playlist header (overrides config file)
    #[arg(long, value_name = "URL")]
    epg_url: Option<String>,

    /// Playlist source URL; repeat to replace the configured source list
    #[arg(short, long = "source", value_name = "URL")]
    sources: Vec<String>,

    /// Number of sources fetched concurrently
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_logging(cli: &Cli) {
    let log_filter = format!("m3u_combiner={}", cli.log_level);
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into()));

    match cli.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    info!("Starting M3U Combiner v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Configuration loaded from: {}", path);
            config
        }
        None => Config::load()?,
    };

    // Override config with CLI arguments
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(epg_url) = cli.epg_url {
        config.epg.url = epg_url;
    }
    if !cli.sources.is_empty() {
        config.sources = cli.sources;
    }
    if let Some(concurrency) = cli.concurrency {
        config.http.fetch_concurrency = concurrency;
    }

    config.validate()?;

    let client = StandardHttpClient::new(&config.http)?;
    let combiner = PlaylistCombiner::new(client, config);
    let report = combiner.run().await?;

    if report.has_failures() {
        warn!(
            "{} of {} sources were skipped:",
            report.sources_skipped.len(),
            report.sources_configured
        );
        for skipped in &report.sources_skipped {
            warn!("  {}: {}", skipped.url, skipped.reason);
        }
    }

    Ok(())
}
