//! Repository layer for data that outlives a game.
//!
//! The only durable data is the best-score record. Round state lives in the
//! simulation worker and is never persisted.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileRecordRepository;
pub use memory::InMemoryRecordRepository;
pub use traits::RecordRepository;
