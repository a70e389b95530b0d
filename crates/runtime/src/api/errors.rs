//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections and worker coordination failures so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::EngineError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected the operation (invalid phase or blank player name).
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Whether this error is an engine-level invalid-state rejection.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, RuntimeError::Engine(EngineError::InvalidState { .. }))
    }
}
