//! File-based RecordRepository implementation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use game_core::Record;

use crate::repository::{RecordRepository, RepositoryError, Result};

/// JSON file holding the best-score record.
///
/// # File Format
///
/// A single object with two fields:
///
/// ```json
/// {"name":"Ana","score":7}
/// ```
///
/// Writes go to a sibling `.tmp` file first and are renamed over the target,
/// so readers never observe a half-written record.
#[derive(Clone, Debug)]
pub struct FileRecordRepository {
    path: PathBuf,
}

impl FileRecordRepository {
    pub const FILE_NAME: &'static str = "record.json";

    /// Create a repository backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a repository in the platform data directory.
    ///
    /// - macOS: `~/Library/Application Support/recall/record.json`
    /// - Linux: `~/.local/share/recall/record.json` (or `$XDG_DATA_HOME/recall`)
    /// - Windows: `%APPDATA%\recall\data\record.json`
    /// - Fallback: `./record.json`
    pub fn default_location() -> Self {
        let dir = directories::ProjectDirs::from("", "", "recall")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Record>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(RepositoryError::Io(error)),
        };

        let record =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        Ok(Some(record))
    }
}

impl RecordRepository for FileRecordRepository {
    fn load(&self) -> Record {
        match self.read() {
            Ok(Some(record)) => {
                tracing::debug!(
                    "Loaded record {}:{} from {}",
                    record.name,
                    record.score,
                    self.path.display()
                );
                record
            }
            Ok(None) => {
                tracing::debug!("No record file at {}", self.path.display());
                Record::empty()
            }
            Err(error) => {
                tracing::warn!(
                    "Ignoring unreadable record file {}: {}",
                    self.path.display(),
                    error
                );
                Record::empty()
            }
        }
    }

    fn save(&self, record: &Record) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec(record).map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved record {}:{} to {}",
            record.name,
            record.score,
            self.path.display()
        );

        Ok(())
    }
}
