//! The four colored signals and the sources that generate them.

/// One of the four distinguishable symbols the player has to reproduce.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Signal {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Signal {
    /// All signals in board order (row-major, two per row).
    pub const ALL: [Signal; 4] = [Signal::Red, Signal::Green, Signal::Blue, Signal::Yellow];

    /// Maps an arbitrary index onto a signal, wrapping around the board.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Single-letter key used by text frontends.
    pub const fn key(self) -> char {
        match self {
            Signal::Red => 'r',
            Signal::Green => 'g',
            Signal::Blue => 'b',
            Signal::Yellow => 'y',
        }
    }

    /// Parses either the full color name or its key letter.
    pub fn parse_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(signal) = input.parse::<Signal>() {
            return Some(signal);
        }

        let mut chars = input.chars();
        let key = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|signal| signal.key() == key)
    }
}

/// Supplies the signal appended to the sequence at the start of every round.
///
/// Implementations must return independent draws with replacement: repeats are
/// allowed and expected.
pub trait SignalSource {
    fn next_signal(&mut self) -> Signal;
}

impl<F> SignalSource for F
where
    F: FnMut() -> Signal,
{
    fn next_signal(&mut self) -> Signal {
        self()
    }
}

/// Replays a fixed script of signals, cycling once it is exhausted.
///
/// Used for deterministic tests and replays. An empty script cycles through
/// [`Signal::ALL`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    script: Vec<Signal>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Signal>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of signals handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl SignalSource for ScriptedSource {
    fn next_signal(&mut self) -> Signal {
        let signal = if self.script.is_empty() {
            Signal::from_index(self.cursor)
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        signal
    }
}
