//! Line-based terminal frontend: menu, name prompt, board, record screen.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use game_core::EngineError;
use runtime::{Event, GameEvent, RuntimeError, RuntimeHandle, Topic};

use crate::board;
use crate::config::ClientConfig;

type Input = Lines<BufReader<Stdin>>;

/// Subscriptions held for the length of one game.
struct Topics {
    game: broadcast::Receiver<Event>,
    playback: broadcast::Receiver<Event>,
    records: broadcast::Receiver<Event>,
}

impl Topics {
    fn subscribe(handle: &RuntimeHandle) -> Self {
        Self {
            game: handle.subscribe(Topic::Game),
            playback: handle.subscribe(Topic::Playback),
            records: handle.subscribe(Topic::Record),
        }
    }

    /// Next event from any topic. Game events go first when several are
    /// queued, so a round header prints before its first signal.
    async fn next_event(&mut self) -> Option<Event> {
        loop {
            let received = tokio::select! {
                biased;

                event = self.game.recv() => event,
                event = self.playback.recv() => event,
                event = self.records.recv() => event,
            };
            match received {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Frontend lagged behind by {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

enum MenuChoice {
    Start,
    Record,
    Quit,
}

pub struct CliApp {
    handle: RuntimeHandle,
    config: ClientConfig,
    input: Input,
}

impl CliApp {
    pub fn new(handle: RuntimeHandle, config: ClientConfig) -> Self {
        Self {
            handle,
            config,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            println!();
            println!("=== Recall ===");
            println!("  1) start game");
            println!("  2) record");
            println!("  3) quit");

            let Some(line) = self.input.next_line().await? else {
                break;
            };

            match parse_menu(&line) {
                Some(MenuChoice::Start) => self.name_prompt().await?,
                Some(MenuChoice::Record) => {
                    let record = self.handle.record().await?;
                    println!("{}", board::render_record(&record));
                }
                Some(MenuChoice::Quit) => break,
                None => println!("Choose 1, 2 or 3."),
            }
        }

        tracing::info!("Client exiting");
        Ok(())
    }

    async fn name_prompt(&mut self) -> Result<()> {
        println!("Enter your name:");
        let Some(name) = self.input.next_line().await? else {
            return Ok(());
        };

        // Subscribe before starting so round 1 playback is not missed.
        let topics = Topics::subscribe(&self.handle);

        match self.handle.start_game(name).await {
            Ok(()) => {}
            Err(RuntimeError::Engine(EngineError::EmptyPlayerName)) => {
                println!("The name must not be empty.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        self.play(topics).await
    }

    async fn play(&mut self, mut topics: Topics) -> Result<()> {
        loop {
            tokio::select! {
                biased;

                event = topics.next_event() => match event {
                    Some(Event::Game(event)) => {
                        if let Some(line) = board::render_game(&event) {
                            println!("{line}");
                        }
                        if matches!(event, GameEvent::GameOver { .. }) {
                            break;
                        }
                    }
                    Some(Event::Playback(event)) => {
                        if let Some(line) = board::render_playback(&event) {
                            println!("{line}");
                        }
                    }
                    Some(Event::Record(event)) => {
                        println!("{}", board::render_record_event(&event));
                    }
                    None => return Ok(()),
                },
                line = self.input.next_line() => match line? {
                    Some(line) => self.submit_line(&line).await?,
                    None => return Ok(()),
                },
            }
        }

        // Record events for the game precede game over; show any still queued.
        while let Ok(event) = topics.records.try_recv() {
            if let Event::Record(event) = event {
                println!("{}", board::render_record_event(&event));
            }
        }

        tokio::time::sleep(self.config.game_over_delay).await;
        self.handle.return_to_idle().await?;
        Ok(())
    }

    async fn submit_line(&self, line: &str) -> Result<()> {
        let signals = match board::parse_signals(line) {
            Ok(signals) => signals,
            Err(message) => {
                println!("{message}");
                return Ok(());
            }
        };

        for signal in signals {
            match self.handle.submit_signal(signal).await {
                Ok(()) => {}
                Err(RuntimeError::Engine(EngineError::InvalidState { phase, .. })) => {
                    println!("{}", board::render_rejected(phase));
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn parse_menu(line: &str) -> Option<MenuChoice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "s" | "start" => Some(MenuChoice::Start),
        "2" | "r" | "record" => Some(MenuChoice::Record),
        "3" | "q" | "quit" | "exit" => Some(MenuChoice::Quit),
        _ => None,
    }
}
