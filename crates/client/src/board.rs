//! Text rendering of runtime events and parsing of typed signals.

use game_core::{Phase, Record, Signal};
use runtime::{GameEvent, PlaybackEvent, RecordEvent};

pub fn signal_label(signal: Signal) -> String {
    format!("[{}] {}", signal.key(), signal.as_ref().to_uppercase())
}

/// Line to print for a game event, if it is worth showing.
pub fn render_game(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::GameStarted { player, .. } => format!("Good luck, {player}!"),
        GameEvent::RoundStarted { round } => format!("── Round {round} ──"),
        GameEvent::AwaitingInput { round } => {
            format!("Your turn! Repeat {round} signal(s), e.g. `r g b y`.")
        }
        GameEvent::InputAccepted { remaining, .. } => format!("ok ({remaining} to go)"),
        GameEvent::RoundCorrect { .. } => "Correct!".to_owned(),
        GameEvent::GameOver { final_score, .. } => {
            format!("Wrong! Game over. Rounds completed: {final_score}")
        }
        GameEvent::PhaseChanged { .. } => return None,
    };
    Some(line)
}

pub fn render_playback(event: &PlaybackEvent) -> Option<String> {
    match event {
        PlaybackEvent::SignalShown { index, signal, .. } => {
            Some(format!("  {:>2}. {}", index + 1, signal_label(*signal)))
        }
        PlaybackEvent::SignalHidden { .. } => None,
    }
}

pub fn render_record_event(event: &RecordEvent) -> String {
    match event {
        RecordEvent::RecordUpdated { record, .. } => {
            format!("New record! {}: {} round(s)", record.name, record.score)
        }
        RecordEvent::RecordSaveFailed { error, .. } => {
            format!("(the record could not be saved: {error})")
        }
    }
}

pub fn render_record(record: &Record) -> String {
    if record.is_empty() {
        "Record: nobody has played yet.".to_owned()
    } else {
        format!("Record: {}: {} round(s)", record.name, record.score)
    }
}

pub fn render_rejected(phase: Phase) -> &'static str {
    match phase {
        Phase::PlayingBack => "Wait until the sequence has been shown.",
        Phase::RoundComplete => "Get ready for the next round.",
        _ => "Input is not accepted right now.",
    }
}

/// Parses a line of signals: names or key letters, separated by spaces or
/// commas. A token of several key letters (`rgb`) expands to one signal each.
pub fn parse_signals(line: &str) -> Result<Vec<Signal>, String> {
    let mut signals = Vec::new();

    for token in line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if let Some(signal) = Signal::parse_input(token) {
            signals.push(signal);
            continue;
        }

        let expanded: Option<Vec<Signal>> = token
            .chars()
            .map(|c| Signal::parse_input(c.encode_utf8(&mut [0; 4])))
            .collect();
        match expanded {
            Some(mut keys) => signals.append(&mut keys),
            None => return Err(format!("unknown signal `{token}`")),
        }
    }

    Ok(signals)
}
