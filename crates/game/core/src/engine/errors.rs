//! Error types for the round state machine.

use crate::state::Phase;

/// Operations exposed by the engine, used to label invalid-state errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    AdvanceRound,
    SubmitSignal,
    ShowSignal,
    HideSignal,
    ReturnToIdle,
}

/// Errors surfaced by [`super::GameEngine`].
///
/// Both variants are caller bugs or rejected input: the engine never mutates
/// state before returning one of them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("{operation} is not valid in phase {phase}")]
    InvalidState { operation: Operation, phase: Phase },

    #[error("player name must not be empty")]
    EmptyPlayerName,
}

impl EngineError {
    pub(crate) fn invalid(operation: Operation, phase: Phase) -> Self {
        Self::InvalidState { operation, phase }
    }
}
