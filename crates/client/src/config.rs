//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::GameConfig;
use runtime::RuntimeConfig;

/// Configuration required to bootstrap the runtime and the terminal frontend.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// How long the game-over screen stays up before returning to the menu.
    pub game_over_delay: Duration,
    /// Session identifier used for the log directory.
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            game_over_delay: Duration::from_millis(Self::DEFAULT_GAME_OVER_MS),
            session_id: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_GAME_OVER_MS: u64 = 2000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RECALL_SIGNAL_MS` - How long each signal stays lit (default: 800)
    /// - `RECALL_GAP_MS` - Gap between signals (default: 100)
    /// - `RECALL_ROUND_PAUSE_MS` - Pause before the next round (default: 1000)
    /// - `RECALL_GAME_OVER_MS` - Game-over screen duration (default: 2000)
    /// - `RECALL_RECORD_FILE` - Record file path (default: platform data dir)
    /// - `RECALL_SEED` - Seed for reproducible sequences (default: random)
    /// - `RECALL_EVENT_BUFFER` - Event queue size per topic (default: 100)
    /// - `RECALL_SESSION_ID` - Log session identifier (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let game = &mut config.runtime.game_config;

        if let Some(ms) = read_env::<u64>("RECALL_SIGNAL_MS") {
            game.signal_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("RECALL_GAP_MS") {
            game.signal_gap = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("RECALL_ROUND_PAUSE_MS") {
            game.round_pause = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("RECALL_GAME_OVER_MS") {
            config.game_over_delay = Duration::from_millis(ms);
        }

        if let Some(capacity) = read_env::<usize>("RECALL_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        config.runtime.record_path = env::var("RECALL_RECORD_FILE").ok().map(PathBuf::from);
        config.runtime.seed = read_env::<u64>("RECALL_SEED");
        config.session_id = env::var("RECALL_SESSION_ID").ok();

        config
    }

    pub fn game(&self) -> &GameConfig {
        &self.runtime.game_config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
