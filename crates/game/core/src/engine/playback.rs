use crate::signal::SignalSource;
use crate::state::Phase;

use super::{Continuation, EngineError, GameEngine, Notification, Operation, Scheduled, Transition};

/// Timed playback and deferred continuations.
impl<'a> GameEngine<'a> {
    /// Applies a continuation whose timer has elapsed.
    ///
    /// Returns `Ok(None)` when the continuation belongs to an earlier epoch;
    /// stale continuations never touch the state.
    pub fn resume<S>(
        &mut self,
        scheduled: Scheduled,
        source: &mut S,
    ) -> Result<Option<Transition>, EngineError>
    where
        S: SignalSource + ?Sized,
    {
        if scheduled.epoch != self.state.epoch {
            return Ok(None);
        }

        let transition = match scheduled.continuation {
            Continuation::HideSignal { index } => self.hide_signal(index)?,
            Continuation::ShowSignal { index } => {
                self.expect_playback(Operation::ShowSignal)?;
                let mut transition = Transition::default();
                if index < self.state.sequence.len() {
                    self.show_signal(index, &mut transition);
                } else {
                    self.finish_playback(&mut transition);
                }
                transition
            }
            Continuation::AdvanceRound => self.advance_round(source)?,
        };

        Ok(Some(transition))
    }

    /// Lights the signal at `index` and schedules it to go dark.
    pub(super) fn show_signal(&mut self, index: usize, transition: &mut Transition) {
        let signal = self.state.sequence[index];
        transition.push(Notification::SignalShown {
            round: self.state.round,
            index,
            signal,
        });
        transition.schedule = Some(self.schedule(
            self.config.signal_duration,
            Continuation::HideSignal { index },
        ));
    }

    fn hide_signal(&mut self, index: usize) -> Result<Transition, EngineError> {
        self.expect_playback(Operation::HideSignal)?;
        let phase = self.state.phase;
        let signal = *self
            .state
            .sequence
            .get(index)
            .ok_or(EngineError::invalid(Operation::HideSignal, phase))?;

        let mut transition = Transition::default();
        transition.push(Notification::SignalHidden {
            round: self.state.round,
            index,
            signal,
        });
        transition.schedule = Some(self.schedule(
            self.config.signal_gap,
            Continuation::ShowSignal { index: index + 1 },
        ));
        Ok(transition)
    }

    fn finish_playback(&mut self, transition: &mut Transition) {
        self.set_phase(Phase::AwaitingInput, transition);
        transition.push(Notification::AwaitingInput {
            round: self.state.round,
        });
    }

    fn expect_playback(&self, operation: Operation) -> Result<(), EngineError> {
        match self.state.phase {
            Phase::PlayingBack => Ok(()),
            phase => Err(EngineError::invalid(operation, phase)),
        }
    }
}
