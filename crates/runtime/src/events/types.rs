//! Event types for different topics.

use game_core::{Epoch, Notification, Phase, Record, Signal};
use serde::{Deserialize, Serialize};

/// Game lifecycle and round progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { player: String, epoch: Epoch },
    PhaseChanged { from: Phase, to: Phase },
    RoundStarted { round: u32 },
    /// Playback finished; the player may start reproducing the sequence.
    AwaitingInput { round: u32 },
    InputAccepted { position: usize, remaining: usize },
    RoundCorrect { round: u32 },
    /// The player failed. Record events for this game precede this one.
    GameOver { player: String, final_score: u32 },
}

/// Signal lights during playback (high frequency, rendering only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    SignalShown {
        round: u32,
        index: usize,
        signal: Signal,
    },
    SignalHidden {
        round: u32,
        index: usize,
        signal: Signal,
    },
}

/// Best-score record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordEvent {
    /// A new high score replaced `previous` for this session.
    RecordUpdated { record: Record, previous: Record },

    /// Persisting the new record failed; the in-memory record still stands.
    RecordSaveFailed { record: Record, error: String },
}

impl From<Notification> for super::Event {
    fn from(notification: Notification) -> Self {
        use super::Event;

        match notification {
            Notification::GameStarted { player, epoch } => {
                Event::Game(GameEvent::GameStarted { player, epoch })
            }
            Notification::PhaseChanged { from, to } => {
                Event::Game(GameEvent::PhaseChanged { from, to })
            }
            Notification::RoundStarted { round } => Event::Game(GameEvent::RoundStarted { round }),
            Notification::SignalShown {
                round,
                index,
                signal,
            } => Event::Playback(PlaybackEvent::SignalShown {
                round,
                index,
                signal,
            }),
            Notification::SignalHidden {
                round,
                index,
                signal,
            } => Event::Playback(PlaybackEvent::SignalHidden {
                round,
                index,
                signal,
            }),
            Notification::AwaitingInput { round } => {
                Event::Game(GameEvent::AwaitingInput { round })
            }
            Notification::InputAccepted {
                position,
                remaining,
            } => Event::Game(GameEvent::InputAccepted {
                position,
                remaining,
            }),
            Notification::RoundCorrect { round } => Event::Game(GameEvent::RoundCorrect { round }),
            Notification::GameOver {
                player,
                final_score,
            } => Event::Game(GameEvent::GameOver {
                player,
                final_score,
            }),
        }
    }
}
