//! Command-line harness for seeded combat scenarios.
//!
//! Events go to stdout as JSON lines; logs go to stderr (and optionally a file).
mod config;
mod scenario;

use anyhow::{Context, Result};
use config::{Scenario, SimConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match config.scenario {
        Scenario::Duel => scenario::duel(&config, &mut out),
        Scenario::Snapshot => scenario::snapshot(&config, &mut out),
    };
    result.with_context(|| format!("scenario {} failed", config.scenario))
}

/// Stderr logging, plus a file layer when `COMBAT_LOG_DIR` is set.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &SimConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, "combat-sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    tracing::info!("Log file: {}/combat-sim.log", dir.display());

    Ok(Some(guard))
}
