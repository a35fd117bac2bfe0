//! System clock.

use chrono::{DateTime, SubsecRound, Utc};

use crate::ports::clock::Clock;

/// Reads the system clock, truncated to whole seconds.
///
/// Commit messages and licence years never need more, and recorded
/// cassettes stay readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }
}
