//! tickmarket CLI: serve the simulated exchange, or inspect the loaded series.
//!
//! Commands:
//! - `serve`: load every market, start the ticker, serve HTTP until Ctrl-C
//! - `inspect`: load every market and print a summary table

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use tickmarket_core::{MarketEngine, MarketState};
use tickmarket_server::{build_issuer, serve, AppConfig, AppState};

/// Exit status when market data cannot be loaded.
const LOAD_FAILURE_EXIT_CODE: i32 = 84;

#[derive(Parser)]
#[command(name = "tickmarket", about = "tickmarket: replayed-price trading exchange")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load market data and serve the HTTP API.
    Serve {
        /// Path to a TOML config file. Defaults apply if it does not exist.
        #[arg(long, default_value = "tickmarket.toml")]
        config: PathBuf,

        /// Bind host, overriding config and environment.
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding config and environment.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load market data and print one row per market.
    Inspect {
        /// Path to a TOML config file. Defaults apply if it does not exist.
        #[arg(long, default_value = "tickmarket.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, host, port } => run_serve(&config, host, port),
        Commands::Inspect { config } => run_inspect(&config),
    }
}

fn run_serve(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let issuer = build_issuer(&config.auth)?;
    let state = load_markets(&config);
    let engine = Arc::new(MarketEngine::new(Arc::new(state), config.engine.clone()));
    let ticker = engine
        .start_ticker(config.engine.tick_interval())
        .context("failed to start ticker")?;
    info!(
        issuer = issuer.name(),
        interval_secs = config.engine.tick_interval_secs,
        reset_policy = ?config.engine.reset_policy,
        "engine ready"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let bind_addr = config.server.bind_addr();
    let served = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;
        serve(listener, AppState::new(engine, issuer), shutdown_signal())
            .await
            .context("server error")
    });

    let ticks = ticker.stop();
    info!(ticks, "ticker stopped");
    served
}

fn run_inspect(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let state = load_markets(&config);

    println!();
    println!(
        "{:<8} {:>8} {:>14} {:>14}  Directory",
        "Market", "Length", "First", "Last"
    );
    println!("{}", "-".repeat(64));
    for series in state.iter() {
        let prices = series.prices();
        println!(
            "{:<8} {:>8} {:>14} {:>14}  {}",
            series.market().name(),
            prices.len(),
            format_price(prices.first()),
            format_price(prices.last()),
            config.markets.get(series.market()).display()
        );
    }
    println!();
    Ok(())
}

fn format_price(price: Option<&f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{p:.4}"))
}

/// Read the config file (or defaults), apply the environment, install logging.
fn load_config(path: &Path) -> Result<AppConfig> {
    let found = path.exists();
    let mut config = if found {
        AppConfig::from_file(path)?
    } else {
        AppConfig::default()
    };
    config.apply_env()?;
    init_tracing(&config.log_level);

    if found {
        info!(path = %path.display(), "config loaded");
    } else {
        warn!(path = %path.display(), "config file not found, using defaults");
    }
    Ok(config)
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Load every market or exit with the load-failure status.
fn load_markets(config: &AppConfig) -> MarketState {
    match MarketState::load(&config.markets, config.engine.file_order) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "market data failed to load");
            eprintln!("Error: {e}");
            std::process::exit(LOAD_FAILURE_EXIT_CODE);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
