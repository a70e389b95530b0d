//! Signal providers backing [`game_core::SignalSource`].

mod random;

pub use random::RandomSource;
