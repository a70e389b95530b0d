use core::time::Duration;

/// Playback timing and other tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// How long each signal stays lit during playback.
    pub signal_duration: Duration,
    /// Dark gap after a signal goes off before the next one lights up.
    pub signal_gap: Duration,
    /// Pause between a correctly reproduced round and the next playback.
    pub round_pause: Duration,
}

impl GameConfig {
    // ===== runtime-tunable defaults (milliseconds) =====
    pub const DEFAULT_SIGNAL_MS: u64 = 800;
    pub const DEFAULT_GAP_MS: u64 = 100;
    pub const DEFAULT_ROUND_PAUSE_MS: u64 = 1000;

    pub fn new() -> Self {
        Self {
            signal_duration: Duration::from_millis(Self::DEFAULT_SIGNAL_MS),
            signal_gap: Duration::from_millis(Self::DEFAULT_GAP_MS),
            round_pause: Duration::from_millis(Self::DEFAULT_ROUND_PAUSE_MS),
        }
    }

    pub fn with_timings(signal_duration: Duration, signal_gap: Duration, round_pause: Duration) -> Self {
        Self {
            signal_duration,
            signal_gap,
            round_pause,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
