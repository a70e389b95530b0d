//! Authoritative round state.
//!
//! Runtime layers clone or query this state but mutate it exclusively through
//! [`crate::engine::GameEngine`], which keeps the invariants below:
//!
//! - `round == sequence.len()`
//! - `input.len() <= sequence.len()`
mod phase;

pub use phase::Phase;

use crate::signal::Signal;

/// Generation token bumped by every new game.
///
/// Deferred continuations carry the epoch they were scheduled under and are
/// discarded when it no longer matches the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch(pub u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

impl core::fmt::Display for Epoch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical snapshot of the round state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) epoch: Epoch,
    pub(crate) round: u32,
    pub(crate) sequence: Vec<Signal>,
    pub(crate) input: Vec<Signal>,
    pub(crate) player: Option<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Number of rounds started in the current game.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn sequence(&self) -> &[Signal] {
        &self.sequence
    }

    /// The player's reproduction attempt for the current round.
    pub fn input(&self) -> &[Signal] {
        &self.input
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Lightweight summary for presentation layers that poll.
    pub fn status(&self) -> GameStatus {
        GameStatus {
            phase: self.phase,
            epoch: self.epoch,
            round: self.round,
            sequence_len: self.sequence.len(),
            input_len: self.input.len(),
            player: self.player.clone(),
        }
    }

    /// Clears the current game, keeping only the epoch.
    pub(crate) fn clear(&mut self) {
        self.sequence.clear();
        self.input.clear();
        self.round = 0;
        self.player = None;
    }

    pub(crate) fn invariants_hold(&self) -> bool {
        self.round as usize == self.sequence.len() && self.input.len() <= self.sequence.len()
    }
}

/// Read-only view of the round state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStatus {
    pub phase: Phase,
    pub epoch: Epoch,
    pub round: u32,
    pub sequence_len: usize,
    pub input_len: usize,
    pub player: Option<String>,
}
