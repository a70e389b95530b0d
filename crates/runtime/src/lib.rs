//! Runtime orchestration for the memory sequence game.
//!
//! This crate wires the pure [`game_core`] state machine to a clock, an event
//! bus, and durable record storage. Consumers embed [`Runtime`] and drive the
//! game through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists the best-score record
//! - [`providers`] supplies the random signal generator
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameEvent, PlaybackEvent, RecordEvent, Topic};
pub use providers::RandomSource;
pub use repository::{
    FileRecordRepository, InMemoryRecordRepository, RecordRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
