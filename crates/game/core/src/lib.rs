//! Deterministic round logic for the memory sequence game.
//!
//! `game-core` defines the canonical rules (signals, round state, best-score
//! record) and exposes pure APIs shared by the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`]; timing is
//! expressed as data ([`engine::Scheduled`]) so the crate never touches a
//! clock.
pub mod config;
pub mod engine;
pub mod record;
pub mod signal;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    Continuation, EngineError, GameEngine, Notification, Operation, Scheduled, Transition,
};
pub use record::Record;
pub use signal::{ScriptedSource, Signal, SignalSource};
pub use state::{Epoch, GameState, GameStatus, Phase};
