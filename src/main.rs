//! waitfor-http Binary Entry Point
//!
//! Runs exactly one readiness check against one URL and reports the result
//! through the exit code. Polling and retries are left to whoever invokes it.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waitfor_http::{
    Context, Registry,
    config::{CheckConfig, parse_duration},
    resource::http,
};

/// waitfor-http - one-shot HTTP readiness check
#[derive(Parser, Debug)]
#[command(name = "waitfor-http", version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "WAITFOR_HTTP_CONFIG")]
    config: Option<String>,

    /// Time allowed for the check, e.g. 500ms, 10s (overrides config file)
    #[arg(short, long, env = "WAITFOR_HTTP_TIMEOUT", value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Target URL (overrides config file)
    #[arg(env = "WAITFOR_HTTP_URL")]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,waitfor_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => {
            tracing::debug!("Loading configuration from: {}", path);
            CheckConfig::load(path)?
        }
        None => CheckConfig::default(),
    };

    // CLI/env overrides (CLI > ENV > config file)
    if let Some(url) = cli.url {
        config.url = Some(url);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    config.validate()?;

    let url = config.url.unwrap_or_default();
    let registry = Registry::new([http::use_config()]);
    let ctx = Context::background().with_timeout(config.timeout);

    let canceler = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C signal, canceling check");
            canceler.cancel();
        }
    });

    tracing::info!(url = %url, timeout = ?config.timeout, "Checking readiness");

    match registry.test(&ctx, &url).await {
        Ok(()) => {
            tracing::info!(url = %url, "Resource is ready");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Resource is not ready");
            eprintln!("{url}: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
