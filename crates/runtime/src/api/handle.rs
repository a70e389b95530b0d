//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the game or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameState, GameStatus, Record, Signal};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a new game for `player`, cancelling any game in progress.
    ///
    /// Returns once round 1 has started; playback continues in the background.
    pub async fn start_game(&self, player: impl Into<String>) -> Result<()> {
        let player = player.into();
        self.request(|reply| Command::StartGame { player, reply })
            .await?
    }

    /// Submit one signal while the runtime awaits input.
    ///
    /// A wrong signal ends the game normally (see `GameEvent::GameOver`);
    /// submitting outside `AwaitingInput` is an invalid-state error.
    pub async fn submit_signal(&self, signal: Signal) -> Result<()> {
        self.request(|reply| Command::SubmitSignal { signal, reply })
            .await?
    }

    /// Leave a finished game.
    pub async fn return_to_idle(&self) -> Result<()> {
        self.request(|reply| Command::ReturnToIdle { reply }).await?
    }

    /// Current best-score record for this session.
    pub async fn record(&self) -> Result<Record> {
        self.request(|reply| Command::QueryRecord { reply }).await
    }

    /// Phase and counters of the running game.
    pub async fn status(&self) -> Result<GameStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    /// Query the full round state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Game` - Game lifecycle, phases, input feedback
    /// - `Topic::Playback` - Signal on/off during playback
    /// - `Topic::Record` - Best-score record changes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut playback = handle.subscribe(Topic::Playback);
    /// while let Ok(event) = playback.recv().await {
    ///     // Light up the board
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
