//! In-memory RecordRepository implementation for tests and ephemeral sessions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use game_core::Record;

use crate::repository::{RecordRepository, RepositoryError, Result};

/// Keeps the record in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// runtime and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordRepository {
    record: Arc<RwLock<Record>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRecordRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an already persisted record.
    pub fn with_record(record: Record) -> Self {
        Self {
            record: Arc::new(RwLock::new(record)),
            saves: Arc::default(),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn load(&self) -> Record {
        match self.record.read() {
            Ok(record) => record.clone(),
            Err(_) => {
                tracing::warn!("In-memory record lock poisoned, using empty record");
                Record::empty()
            }
        }
    }

    fn save(&self, record: &Record) -> Result<()> {
        let mut current = self
            .record
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *current = record.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
