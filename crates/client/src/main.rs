//! Recall terminal client binary.
//!
//! Composition root: loads configuration, sets up file logging, starts the
//! runtime and hands its handle to the line-based frontend.
mod app;
mod board;
mod config;
mod logging;

use anyhow::Result;
use app::CliApp;
use config::ClientConfig;
use runtime::Runtime;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    let game = config.game();
    tracing::info!(
        "Timings: signal={:?} gap={:?} round_pause={:?}",
        game.signal_duration,
        game.signal_gap,
        game.round_pause
    );

    let runtime = Runtime::start(config.runtime.clone()).await?;
    let result = CliApp::new(runtime.handle(), config).run().await;

    runtime.shutdown().await?;
    result
}
