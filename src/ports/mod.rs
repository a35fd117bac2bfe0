//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (processes, time, filesystem). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod runner;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use runner::{CommandResult, CommandRunner, CommandSpec};
