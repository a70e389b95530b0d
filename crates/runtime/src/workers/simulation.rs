//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives
//! [`game_core::GameEngine`], turns scheduled continuations into timers, and
//! publishes events to the [`EventBus`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use game_core::{
    EngineError, GameConfig, GameEngine, GameState, GameStatus, Notification, Record, Scheduled,
    Signal, SignalSource, Transition,
};

use crate::api::Result;
use crate::events::{Event, EventBus, RecordEvent};
use crate::repository::RecordRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Start a new game, cancelling whatever was running.
    StartGame {
        player: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Submit one player signal.
    SubmitSignal {
        signal: Signal,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Leave a finished game.
    ReturnToIdle { reply: oneshot::Sender<Result<()>> },
    /// Query the session's best-score record.
    QueryRecord { reply: oneshot::Sender<Record> },
    /// Query a status summary (read-only).
    QueryStatus { reply: oneshot::Sender<GameStatus> },
    /// Query the full round state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes gameplay commands and timer continuations.
///
/// Commands and timers are handled one at a time on this task, so the state
/// never sees concurrent mutation. At most one timer is pending; every fired
/// continuation is checked against the current epoch by the engine.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    source: Box<dyn SignalSource + Send>,
    records: Arc<dyn RecordRepository>,
    /// Best record seen this session, kept even when persisting it failed.
    record: Record,
    command_rx: mpsc::Receiver<Command>,
    timer_tx: mpsc::UnboundedSender<Scheduled>,
    timer_rx: mpsc::UnboundedReceiver<Scheduled>,
    pending_timer: Option<JoinHandle<()>>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker, loading the persisted record.
    pub fn new(
        config: GameConfig,
        source: Box<dyn SignalSource + Send>,
        records: Arc<dyn RecordRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let record = records.load();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        info!(
            "SimulationWorker initialized with record {:?}:{}",
            record.name, record.score
        );

        Self {
            state: GameState::new(),
            config,
            source,
            records,
            record,
            command_rx,
            timer_tx,
            timer_rx,
            pending_timer: None,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(fired) = self.timer_rx.recv() => {
                    self.handle_timer(fired);
                }
            }
        }

        self.cancel_timer();
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartGame { player, reply } => {
                let result = self.start_game(&player);
                if reply.send(result).is_err() {
                    debug!("StartGame reply channel closed (caller dropped)");
                }
            }
            Command::SubmitSignal { signal, reply } => {
                let result = self.submit_signal(signal);
                if reply.send(result).is_err() {
                    debug!("SubmitSignal reply channel closed (caller dropped)");
                }
            }
            Command::ReturnToIdle { reply } => {
                let result = self.return_to_idle();
                if reply.send(result).is_err() {
                    debug!("ReturnToIdle reply channel closed (caller dropped)");
                }
            }
            Command::QueryRecord { reply } => {
                let record = self.refresh_record().clone();
                if reply.send(record).is_err() {
                    debug!("QueryRecord reply channel closed (caller dropped)");
                }
            }
            Command::QueryStatus { reply } => {
                if reply.send(self.state.status()).is_err() {
                    debug!("QueryStatus reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn start_game(&mut self, player: &str) -> Result<()> {
        let transition = GameEngine::new(&mut self.state, &self.config)
            .start_game(player, self.source.as_mut())
            .inspect_err(|e| warn!("StartGame rejected: {}", e))?;

        info!(
            "Game {} started for {:?}",
            self.state.epoch(),
            self.state.player().unwrap_or_default()
        );

        self.apply(transition);
        Ok(())
    }

    fn submit_signal(&mut self, signal: Signal) -> Result<()> {
        let transition = GameEngine::new(&mut self.state, &self.config)
            .submit_signal(signal)
            .inspect_err(|e| warn!("SubmitSignal({}) rejected: {}", signal, e))?;

        if transition.game_over_score().is_none() {
            debug!(
                "Accepted {} at position {} of round {}",
                signal,
                self.state.input().len() - 1,
                self.state.round()
            );
        }

        self.apply(transition);
        Ok(())
    }

    fn return_to_idle(&mut self) -> Result<()> {
        let transition = GameEngine::new(&mut self.state, &self.config)
            .return_to_idle()
            .inspect_err(|e| warn!("ReturnToIdle rejected: {}", e))?;

        self.cancel_timer();
        self.apply(transition);
        Ok(())
    }

    fn handle_timer(&mut self, fired: Scheduled) {
        // A stale timer may still arrive after its abort; only a current one
        // owns the pending slot.
        if fired.epoch == self.state.epoch() {
            self.pending_timer = None;
        }

        let result = GameEngine::new(&mut self.state, &self.config)
            .resume(fired, self.source.as_mut());

        match result {
            Ok(Some(transition)) => self.apply(transition),
            Ok(None) => debug!(
                "Discarding stale {:?} from epoch {} (current {})",
                fired.continuation,
                fired.epoch,
                self.state.epoch()
            ),
            Err(EngineError::InvalidState { operation, phase }) => error!(
                "Continuation {} fired in phase {} for the current epoch; round state is inconsistent",
                operation, phase
            ),
            Err(e) => error!("Continuation {:?} failed: {}", fired.continuation, e),
        }
    }

    /// Publishes the transition's notifications in order and arms its timer.
    fn apply(&mut self, transition: Transition) {
        for notification in transition.notifications {
            if let Notification::GameOver {
                player,
                final_score,
            } = &notification
            {
                info!("Game over for {:?} with score {}", player, final_score);
                self.finalize_game(player, *final_score);
            }
            self.event_bus.publish(Event::from(notification));
        }

        if let Some(scheduled) = transition.schedule {
            self.arm_timer(scheduled);
        }
    }

    /// Reconciles the session record with the store.
    ///
    /// The stored record wins only when it is strictly higher, so a record
    /// whose save failed stays in effect.
    fn refresh_record(&mut self) -> &Record {
        let stored = self.records.load();
        if stored.score > self.record.score {
            debug!(
                "Store holds a higher record {:?}:{} than the session ({})",
                stored.name, stored.score, self.record.score
            );
            self.record = stored;
        }
        &self.record
    }

    /// Updates and persists the record when `final_score` beats it.
    ///
    /// A failed save is reported as an event and the in-memory record is kept.
    fn finalize_game(&mut self, player: &str, final_score: u32) {
        if !self.refresh_record().is_beaten_by(final_score) {
            return;
        }

        let record = Record::new(player, final_score);
        let previous = std::mem::replace(&mut self.record, record.clone());
        let saved = self.records.save(&record);

        self.event_bus
            .publish(Event::Record(RecordEvent::RecordUpdated {
                record: record.clone(),
                previous,
            }));

        match saved {
            Ok(()) => info!("New record {}:{} saved", record.name, record.score),
            Err(e) => {
                warn!(
                    "Failed to persist record {}:{}: {}",
                    record.name, record.score, e
                );
                self.event_bus
                    .publish(Event::Record(RecordEvent::RecordSaveFailed {
                        record,
                        error: e.to_string(),
                    }));
            }
        }
    }

    fn arm_timer(&mut self, scheduled: Scheduled) {
        self.cancel_timer();

        let timer_tx = self.timer_tx.clone();
        self.pending_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(scheduled.delay).await;
            // Worker gone means the runtime shut down; nothing to resume.
            let _ = timer_tx.send(scheduled);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending_timer.take() {
            timer.abort();
        }
    }
}
