//! health-monitor - periodic health probes for AI providers

#![allow(missing_docs)]

use clap::Parser;
use provider_health::{Config, HealthService, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "health-monitor", version, about)]
struct Args {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "HEALTH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "HEALTH_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // Initialize logging system
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    info!(
        providers = config.providers.len(),
        interval_secs = config.monitor.check_interval_secs,
        persistent = config.storage.is_persistent(),
        "Starting provider health monitor"
    );
    info!("API Endpoints:");
    info!("   GET  /health - Service liveness");
    info!("   GET  /health/providers - Provider health report");
    info!("   POST /health/providers/{{provider}}/check - On-demand check");
    info!("   POST /health/providers/{{provider}}/circuit/reset - Reset circuit breaker");
    info!("   POST /health/monitor/start | /health/monitor/stop");

    HealthService::new(config).await?.run().await
}
