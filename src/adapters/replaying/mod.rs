//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod runner;

pub use clock::ReplayingClock;
pub use runner::ReplayingCommandRunner;
