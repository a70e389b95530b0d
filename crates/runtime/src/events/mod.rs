//! Topic-based event bus for runtime events.
//!
//! Engine notifications are converted into typed events and published to
//! specific topics; consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameEvent, PlaybackEvent, RecordEvent};
