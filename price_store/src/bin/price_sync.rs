//! Daily price-bar sync CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use market_feed::providers::{
    BarProvider, alpha_vantage::AlphaVantageProvider, fixed::FixedProvider,
};
use price_store::{config::AppConfig, db, pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "price-sync")]
#[command(about = "Fetch daily price bars and store them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Serve canned bars instead of calling the live API
    #[arg(long)]
    offline: bool,

    /// Override the configured symbol list (comma-separated)
    #[arg(long)]
    symbols: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once
    Run,

    /// Run the pipeline on a fixed interval until interrupted
    Daemon,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "price_sync={level},price_store={level},market_feed={level}",
                    level = cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let symbols = match &cli.symbols {
        Some(raw) => price_store::config::parse_symbols(raw)?,
        None => config.symbols.clone(),
    };

    db::run_migrations(&config.database_url).context("running migrations")?;
    let mut conn = db::connect(&config.database_url).context("opening database")?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let provider: Box<dyn BarProvider> = if cli.offline {
        tracing::info!("offline mode, serving canned bars");
        Box::new(FixedProvider::demo(&symbols, chrono::Utc::now().date_naive()))
    } else {
        Box::new(AlphaVantageProvider::new(
            config.client_config(),
            config.retry,
            config.recent_days,
        )?)
    };

    match cli.command {
        Commands::Run => {
            let summary = pipeline::run(provider.as_ref(), &mut conn, &symbols).await;
            summary.log_summary();
            if summary.all_failed() {
                anyhow::bail!("all {} symbols failed", summary.attempted);
            }
        }
        Commands::Daemon => {
            tracing::info!(
                interval_minutes = config.sync_interval.as_secs() / 60,
                "daemon mode"
            );
            let mut interval = tokio::time::interval(config.sync_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("shutdown signal received");
                        break;
                    }
                    _ = interval.tick() => {
                        let summary = pipeline::run(provider.as_ref(), &mut conn, &symbols).await;
                        summary.log_summary();
                    }
                }
            }
        }
    }

    Ok(())
}
