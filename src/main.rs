use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use telemetry_aggregator::{
    AggregationService, AggregatorError, Config, TelemetryApiServer, TelemetryStore,
};
use tracing::{debug, error, trace};

/// Serve per-region latency and uptime summaries over HTTP
#[derive(Parser)]
#[command(name = "telemetry-aggregator")]
#[command(about = "Aggregate telemetry samples into per-region statistics", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Telemetry dataset (JSON array of records)
    #[arg(short = 'd', long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace,hyper=debug,tower=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 2)
        .init();

    debug!("Telemetry aggregator started with verbosity level: {}", cli.verbose);
    trace!("Resolved configuration: {:?}", config);

    if let Err(e) = run(config).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        let code = e
            .downcast_ref::<AggregatorError>()
            .map(AggregatorError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

/// File, then environment, then command line
fn resolve_config(cli: &Cli) -> Result<Config, AggregatorError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };

    config.merge_env_vars();

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dataset) = &cli.dataset {
        config.dataset.path = dataset.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run(config: Config) -> anyhow::Result<()> {
    let store = TelemetryStore::load(&config.dataset.path)
        .context("Telemetry dataset is required to start")?;

    let service = Arc::new(AggregationService::new(Arc::new(store)));
    TelemetryApiServer::new(service, config.server).start().await?;

    Ok(())
}
