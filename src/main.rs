//! ipodesk - a terminal desk for IPOs, allotments and market tracking.
//!
//! Logs go to a daily rolling file in the data directory because the
//! terminal belongs to the UI.

use anyhow::Context;
use ipodesk::{App, Config, config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let log_dir = config::log_dir().context("could not locate the log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create {}", log_dir.display()))?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "ipodesk.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "ipodesk=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default().context("failed to load configuration")?;

    // Run the application
    let mut app = App::new(config)
        .await
        .context("failed to start the terminal UI")?;
    app.run().await.context("terminal UI exited with an error")?;

    Ok(())
}
