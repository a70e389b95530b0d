//! Repository contract for the best-score record.

use game_core::Record;

use super::error::Result;

/// Durable storage for the single best-score record.
///
/// `load` is fail-soft: missing, unreadable, or malformed storage yields
/// [`Record::empty`] so a corrupt file never blocks gameplay. `save` replaces
/// the stored record and reports storage failures to the caller.
pub trait RecordRepository: Send + Sync {
    /// Load the persisted record, or an empty one if none can be read.
    fn load(&self) -> Record;

    /// Overwrite the persisted record.
    fn save(&self, record: &Record) -> Result<()>;
}
