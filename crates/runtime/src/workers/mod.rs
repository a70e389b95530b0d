//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the round state, its single pending timer, and
//! the session record.

mod simulation;

pub use simulation::{Command, SimulationWorker};
