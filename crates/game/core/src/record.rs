//! The best-score record.

/// Best score ever achieved on this installation and the name of its owner.
///
/// The persisted form is a JSON object with exactly two fields, `name` and
/// `score`. An empty record (blank name, score 0) stands in for missing or
/// unreadable storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub name: String,
    pub score: u32,
}

impl Record {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// The record used when nothing has been persisted yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.score == 0
    }

    /// Whether `score` strictly beats this record.
    pub fn is_beaten_by(&self, score: u32) -> bool {
        score > self.score
    }
}
