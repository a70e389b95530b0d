//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{GameConfig, SignalSource};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::providers::RandomSource;
use crate::repository::{FileRecordRepository, RecordRepository};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Record file location (default: platform data directory)
    pub record_path: Option<PathBuf>,
    /// Seed for the signal generator (default: OS entropy)
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            record_path: None,
            seed: None,
        }
    }
}

/// Main runtime that orchestrates the game
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime with default providers from `config`.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone has
    /// been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    records: Option<Arc<dyn RecordRepository>>,
    source: Option<Box<dyn SignalSource + Send>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            records: None,
            source: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override playback timing only
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Set the record repository (default: file at `record_path`)
    pub fn record_repository(mut self, records: impl RecordRepository + 'static) -> Self {
        self.records = Some(Arc::new(records));
        self
    }

    /// Set the signal source (default: [`RandomSource`] using `seed`)
    pub fn signal_source(mut self, source: impl SignalSource + Send + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;

        let records = self.records.unwrap_or_else(|| {
            let repository = match &config.record_path {
                Some(path) => FileRecordRepository::new(path),
                None => FileRecordRepository::default_location(),
            };
            tracing::info!("Record file: {}", repository.path().display());
            Arc::new(repository)
        });

        let source = self
            .source
            .unwrap_or_else(|| Box::new(RandomSource::with_seed(config.seed)));

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SimulationWorker::new(
            config.game_config,
            source,
            records,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
