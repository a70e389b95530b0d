/// Phase of the round state machine. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// No game in progress.
    #[default]
    Idle,
    /// The sequence is being shown; input is rejected.
    PlayingBack,
    /// Waiting for the player to reproduce the sequence.
    AwaitingInput,
    /// The round was reproduced correctly; the next round is pending.
    RoundComplete,
    /// The player made a mistake. Terminal until a new game starts.
    GameOver,
}

impl Phase {
    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::AwaitingInput)
    }
}
