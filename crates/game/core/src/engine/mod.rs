//! Round state machine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! operation validates the current phase before touching state, applies the
//! transition, and returns a [`Transition`] describing what happened and which
//! deferred [`Continuation`] (if any) the driver has to schedule next.
//!
//! The engine has no clock. Delays are expressed as [`Scheduled`] values that
//! the driver turns into timers and feeds back through [`GameEngine::resume`].

mod errors;
mod playback;
mod transition;

pub use errors::{EngineError, Operation};
pub use transition::{Continuation, Notification, Scheduled, Transition};

use crate::config::GameConfig;
use crate::signal::{Signal, SignalSource};
use crate::state::{GameState, Phase};

/// Game engine that drives a borrowed [`GameState`] through its phases.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state.
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Starts a fresh game for `player` and immediately begins round 1.
    ///
    /// Legal from every phase. Restarting bumps the epoch, which invalidates
    /// any continuation still pending from the previous game.
    pub fn start_game<S>(&mut self, player: &str, source: &mut S) -> Result<Transition, EngineError>
    where
        S: SignalSource + ?Sized,
    {
        let player = player.trim();
        if player.is_empty() {
            return Err(EngineError::EmptyPlayerName);
        }

        let mut transition = Transition::default();

        self.state.epoch = self.state.epoch.next();
        self.state.clear();
        self.state.player = Some(player.to_owned());
        self.set_phase(Phase::Idle, &mut transition);
        transition.push(Notification::GameStarted {
            player: player.to_owned(),
            epoch: self.state.epoch,
        });

        self.advance_round_into(source, &mut transition)?;
        Ok(transition)
    }

    /// Appends one signal and starts playing the sequence back.
    ///
    /// Valid from `Idle` once a player is registered, or from `RoundComplete`.
    pub fn advance_round<S>(&mut self, source: &mut S) -> Result<Transition, EngineError>
    where
        S: SignalSource + ?Sized,
    {
        let mut transition = Transition::default();
        self.advance_round_into(source, &mut transition)?;
        Ok(transition)
    }

    fn advance_round_into<S>(
        &mut self,
        source: &mut S,
        transition: &mut Transition,
    ) -> Result<(), EngineError>
    where
        S: SignalSource + ?Sized,
    {
        let phase = self.state.phase;
        let ready = match phase {
            Phase::Idle => self.state.player.is_some(),
            Phase::RoundComplete => true,
            _ => false,
        };
        if !ready {
            return Err(EngineError::invalid(Operation::AdvanceRound, phase));
        }

        self.state.input.clear();
        self.state.round += 1;
        self.state.sequence.push(source.next_signal());

        self.set_phase(Phase::PlayingBack, transition);
        transition.push(Notification::RoundStarted {
            round: self.state.round,
        });
        self.show_signal(0, transition);

        debug_assert!(self.state.invariants_hold());
        Ok(())
    }

    /// Records one player signal and checks it against the sequence.
    ///
    /// A mismatch ends the game; that is a normal outcome carried by a
    /// [`Notification::GameOver`], not an error.
    pub fn submit_signal(&mut self, signal: Signal) -> Result<Transition, EngineError> {
        let phase = self.state.phase;
        if !phase.accepts_input() {
            return Err(EngineError::invalid(Operation::SubmitSignal, phase));
        }

        let mut transition = Transition::default();
        let position = self.state.input.len();
        // AwaitingInput implies input.len() < sequence.len().
        let expected = self.state.sequence[position];
        self.state.input.push(signal);

        if signal != expected {
            self.finish_game(&mut transition);
        } else if self.state.input.len() < self.state.sequence.len() {
            transition.push(Notification::InputAccepted {
                position,
                remaining: self.state.sequence.len() - self.state.input.len(),
            });
        } else {
            self.set_phase(Phase::RoundComplete, &mut transition);
            transition.push(Notification::RoundCorrect {
                round: self.state.round,
            });
            transition.schedule = Some(self.schedule(
                self.config.round_pause,
                Continuation::AdvanceRound,
            ));
        }

        debug_assert!(self.state.invariants_hold());
        Ok(transition)
    }

    /// Leaves a finished game and returns to `Idle`.
    pub fn return_to_idle(&mut self) -> Result<Transition, EngineError> {
        let phase = self.state.phase;
        if phase != Phase::GameOver {
            return Err(EngineError::invalid(Operation::ReturnToIdle, phase));
        }

        let mut transition = Transition::default();
        self.state.epoch = self.state.epoch.next();
        self.state.clear();
        self.set_phase(Phase::Idle, &mut transition);
        Ok(transition)
    }

    fn finish_game(&mut self, transition: &mut Transition) {
        // The counter was bumped when the failed round started.
        let final_score = self.state.round.saturating_sub(1);
        self.set_phase(Phase::GameOver, transition);
        transition.push(Notification::GameOver {
            player: self.state.player.clone().unwrap_or_default(),
            final_score,
        });
    }

    fn set_phase(&mut self, to: Phase, transition: &mut Transition) {
        let from = self.state.phase;
        if from != to {
            self.state.phase = to;
            transition.push(Notification::PhaseChanged { from, to });
        }
    }

    fn schedule(&self, delay: core::time::Duration, continuation: Continuation) -> Scheduled {
        Scheduled {
            epoch: self.state.epoch,
            delay,
            continuation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ScriptedSource;
    use crate::state::Epoch;
    use core::time::Duration;

    use Signal::{Blue, Green, Red, Yellow};

    fn config() -> GameConfig {
        GameConfig::default()
    }

    /// Runs pending continuations until the engine waits for input, returning
    /// every notification emitted along the way.
    fn drain(
        engine: &mut GameEngine<'_>,
        source: &mut ScriptedSource,
        mut transition: Transition,
    ) -> Vec<Notification> {
        let mut notes = std::mem::take(&mut transition.notifications);
        while let Some(next) = transition.schedule {
            if engine.state().phase() != Phase::PlayingBack {
                break;
            }
            transition = engine
                .resume(next, source)
                .expect("resume should succeed")
                .expect("continuation should be current");
            notes.append(&mut transition.notifications);
        }
        notes
    }

    fn complete_round(engine: &mut GameEngine<'_>) -> Transition {
        let sequence = engine.state().sequence().to_vec();
        let mut last = Transition::default();
        for signal in sequence {
            last = engine.submit_signal(signal).unwrap();
        }
        last
    }

    #[test]
    fn start_game_begins_round_one() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red]);

        let transition = engine.start_game("  Ana ", &mut source).unwrap();

        assert_eq!(engine.state().round(), 1);
        assert_eq!(engine.state().sequence(), &[Red]);
        assert_eq!(engine.state().player(), Some("Ana"));
        assert_eq!(engine.state().phase(), Phase::PlayingBack);
        assert_eq!(engine.state().epoch(), Epoch(1));
        assert_eq!(
            transition.notifications,
            vec![
                Notification::GameStarted {
                    player: "Ana".into(),
                    epoch: Epoch(1)
                },
                Notification::PhaseChanged {
                    from: Phase::Idle,
                    to: Phase::PlayingBack
                },
                Notification::RoundStarted { round: 1 },
                Notification::SignalShown {
                    round: 1,
                    index: 0,
                    signal: Red
                },
            ]
        );
        assert_eq!(
            transition.schedule,
            Some(Scheduled {
                epoch: Epoch(1),
                delay: Duration::from_millis(800),
                continuation: Continuation::HideSignal { index: 0 },
            })
        );
    }

    #[test]
    fn empty_player_name_is_rejected_without_mutation() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::default();

        assert_eq!(
            engine.start_game("", &mut source),
            Err(EngineError::EmptyPlayerName)
        );
        assert_eq!(
            engine.start_game("   ", &mut source),
            Err(EngineError::EmptyPlayerName)
        );

        assert_eq!(*engine.state(), GameState::new());
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn playback_alternates_on_and_off_in_sequence_order() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red, Blue, Blue]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);
        complete_round(&mut engine);
        let second = engine
            .resume(
                Scheduled {
                    epoch: engine.state().epoch(),
                    delay: config.round_pause,
                    continuation: Continuation::AdvanceRound,
                },
                &mut source,
            )
            .unwrap()
            .unwrap();
        let notes = drain(&mut engine, &mut source, second);

        let lights: Vec<_> = notes
            .iter()
            .filter_map(|n| match n {
                Notification::SignalShown { index, signal, .. } => Some(("on", *index, *signal)),
                Notification::SignalHidden { index, signal, .. } => Some(("off", *index, *signal)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lights,
            vec![
                ("on", 0, Red),
                ("off", 0, Red),
                ("on", 1, Blue),
                ("off", 1, Blue),
            ]
        );
        assert_eq!(
            notes.last(),
            Some(&Notification::AwaitingInput { round: 2 })
        );
        assert_eq!(engine.state().phase(), Phase::AwaitingInput);
    }

    #[test]
    fn playback_delays_follow_config() {
        let mut state = GameState::new();
        let config = GameConfig::with_timings(
            Duration::from_millis(30),
            Duration::from_millis(5),
            Duration::from_millis(70),
        );
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Green]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        let hide = start.schedule.unwrap();
        assert_eq!(hide.delay, Duration::from_millis(30));

        let after_hide = engine.resume(hide, &mut source).unwrap().unwrap();
        let show_next = after_hide.schedule.unwrap();
        assert_eq!(show_next.delay, Duration::from_millis(5));
        assert_eq!(show_next.continuation, Continuation::ShowSignal { index: 1 });

        let finished = engine.resume(show_next, &mut source).unwrap().unwrap();
        assert!(finished.schedule.is_none());
        assert_eq!(engine.state().phase(), Phase::AwaitingInput);

        let correct = engine.submit_signal(Green).unwrap();
        let pause = correct.schedule.unwrap();
        assert_eq!(pause.delay, Duration::from_millis(70));
        assert_eq!(pause.continuation, Continuation::AdvanceRound);
    }

    #[test]
    fn round_counter_matches_advance_calls() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Yellow, Red, Green, Blue, Blue]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);

        let mut previous = engine.state().sequence().to_vec();
        for n in 2..=5u32 {
            complete_round(&mut engine);
            assert_eq!(engine.state().phase(), Phase::RoundComplete);

            let next = engine.advance_round(&mut source).unwrap();
            assert_eq!(engine.state().round(), n);
            assert_eq!(engine.state().sequence().len(), n as usize);
            assert!(engine.state().sequence().starts_with(&previous));
            assert!(engine.state().input().is_empty());

            drain(&mut engine, &mut source, next);
            previous = engine.state().sequence().to_vec();
        }
    }

    #[test]
    fn partial_input_is_accepted() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red, Blue]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);
        complete_round(&mut engine);
        let next = engine.advance_round(&mut source).unwrap();
        drain(&mut engine, &mut source, next);

        let transition = engine.submit_signal(Red).unwrap();
        assert_eq!(
            transition.notifications,
            vec![Notification::InputAccepted {
                position: 0,
                remaining: 1
            }]
        );
        assert!(transition.schedule.is_none());
        assert_eq!(transition.game_over_score(), None);
        assert_eq!(engine.state().phase(), Phase::AwaitingInput);
        assert_eq!(engine.state().input(), &[Red]);
    }

    #[test]
    fn ana_scenario_scores_one() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red, Blue]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);
        let correct = engine.submit_signal(Red).unwrap();
        assert!(correct
            .notifications
            .contains(&Notification::RoundCorrect { round: 1 }));
        assert_eq!(correct.game_over_score(), None);

        let next = engine.advance_round(&mut source).unwrap();
        drain(&mut engine, &mut source, next);
        assert_eq!(engine.state().sequence(), &[Red, Blue]);

        engine.submit_signal(Red).unwrap();
        let failed = engine.submit_signal(Green).unwrap();

        assert_eq!(failed.game_over_score(), Some(1));
        assert_eq!(
            failed.notifications.last(),
            Some(&Notification::GameOver {
                player: "Ana".into(),
                final_score: 1
            })
        );
        assert!(failed.schedule.is_none());
        assert_eq!(engine.state().phase(), Phase::GameOver);
        assert_eq!(
            engine.submit_signal(Red),
            Err(EngineError::InvalidState {
                operation: Operation::SubmitSignal,
                phase: Phase::GameOver
            })
        );
    }

    #[test]
    fn final_score_counts_completed_rounds_for_any_failure_position() {
        for completed in 0..4u32 {
            let failing_round = completed as usize + 1;
            for fail_at in 0..failing_round {
                let mut state = GameState::new();
                let config = config();
                let mut engine = GameEngine::new(&mut state, &config);
                let mut source = ScriptedSource::new([Blue]);

                let start = engine.start_game("Ana", &mut source).unwrap();
                drain(&mut engine, &mut source, start);
                for _ in 0..completed {
                    complete_round(&mut engine);
                    let next = engine.advance_round(&mut source).unwrap();
                    drain(&mut engine, &mut source, next);
                }

                for _ in 0..fail_at {
                    engine.submit_signal(Blue).unwrap();
                }
                let failed = engine.submit_signal(Yellow).unwrap();
                assert_eq!(failed.game_over_score(), Some(completed));
            }
        }
    }

    #[test]
    fn input_is_rejected_during_playback() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red, Green, Blue]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);
        for _ in 0..2 {
            complete_round(&mut engine);
            let next = engine.advance_round(&mut source).unwrap();
            if engine.state().round() < 3 {
                drain(&mut engine, &mut source, next);
            }
        }

        assert_eq!(engine.state().round(), 3);
        assert_eq!(engine.state().phase(), Phase::PlayingBack);
        assert_eq!(
            engine.submit_signal(Red),
            Err(EngineError::InvalidState {
                operation: Operation::SubmitSignal,
                phase: Phase::PlayingBack
            })
        );
        assert!(engine.state().input().is_empty());
    }

    #[test]
    fn advance_round_requires_a_legal_phase() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::default();

        assert_eq!(
            engine.advance_round(&mut source),
            Err(EngineError::InvalidState {
                operation: Operation::AdvanceRound,
                phase: Phase::Idle
            })
        );

        engine.start_game("Ana", &mut source).unwrap();
        assert_eq!(
            engine.advance_round(&mut source),
            Err(EngineError::InvalidState {
                operation: Operation::AdvanceRound,
                phase: Phase::PlayingBack
            })
        );
        assert_eq!(engine.state().round(), 1);
    }

    #[test]
    fn restart_resets_everything_and_invalidates_old_continuations() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red, Green, Yellow]);

        let first = engine.start_game("Ana", &mut source).unwrap();
        let stale = first.schedule.unwrap();

        let restarted = engine.start_game("Bo", &mut source).unwrap();
        assert_eq!(engine.state().round(), 1);
        assert_eq!(engine.state().sequence(), &[Green]);
        assert_eq!(engine.state().player(), Some("Bo"));
        assert_eq!(engine.state().epoch(), Epoch(2));

        assert_eq!(engine.resume(stale, &mut source), Ok(None));
        assert_eq!(engine.state().phase(), Phase::PlayingBack);

        let current = restarted.schedule.unwrap();
        assert!(engine.resume(current, &mut source).unwrap().is_some());
    }

    #[test]
    fn return_to_idle_only_after_game_over() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red]);

        assert!(engine.return_to_idle().is_err());

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);
        engine.submit_signal(Blue).unwrap();

        let transition = engine.return_to_idle().unwrap();
        assert_eq!(
            transition.notifications,
            vec![Notification::PhaseChanged {
                from: Phase::GameOver,
                to: Phase::Idle
            }]
        );
        assert_eq!(engine.state().phase(), Phase::Idle);
        assert_eq!(engine.state().round(), 0);
        assert_eq!(engine.state().player(), None);
        assert!(engine.advance_round(&mut source).is_err());
    }

    #[test]
    fn status_reflects_state() {
        let mut state = GameState::new();
        let config = config();
        let mut engine = GameEngine::new(&mut state, &config);
        let mut source = ScriptedSource::new([Red]);

        let start = engine.start_game("Ana", &mut source).unwrap();
        drain(&mut engine, &mut source, start);

        let status = engine.state().status();
        assert_eq!(status.phase, Phase::AwaitingInput);
        assert_eq!(status.round, 1);
        assert_eq!(status.sequence_len, 1);
        assert_eq!(status.input_len, 0);
        assert_eq!(status.player.as_deref(), Some("Ana"));
    }
}
