//! Outputs of an engine step: notifications and the next deferred continuation.

use core::time::Duration;

use crate::signal::Signal;
use crate::state::{Epoch, Phase};

/// Observable state changes, emitted in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    GameStarted {
        player: String,
        epoch: Epoch,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    RoundStarted {
        round: u32,
    },
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
    AwaitingInput {
        round: u32,
    },
    InputAccepted {
        position: usize,
        remaining: usize,
    },
    RoundCorrect {
        round: u32,
    },
    /// The player failed. `final_score` counts fully completed rounds.
    GameOver {
        player: String,
        final_score: u32,
    },
}

/// Deferred step to run once a timer elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    /// Turn off the signal at `index`.
    HideSignal { index: usize },
    /// Light the signal at `index`, or finish playback when `index` is past
    /// the end of the sequence.
    ShowSignal { index: usize },
    /// Start the next round after a correct reproduction.
    AdvanceRound,
}

/// A continuation tagged with the epoch it belongs to and its delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduled {
    pub epoch: Epoch,
    pub delay: Duration,
    pub continuation: Continuation,
}

/// Result of a successful engine step.
///
/// At most one continuation is pending per step, so a driver only ever keeps
/// a single timer alive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub notifications: Vec<Notification>,
    pub schedule: Option<Scheduled>,
}

impl Transition {
    pub(crate) fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Final score carried by a game-over notification, if this step ended the game.
    pub fn game_over_score(&self) -> Option<u32> {
        self.notifications.iter().find_map(|n| match n {
            Notification::GameOver { final_score, .. } => Some(*final_score),
            _ => None,
        })
    }
}
