//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Hands back recorded times in the order they were read.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a replaying clock over `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let Interaction { seq, output, .. } =
            self.replayer.lock().expect("replayer lock poisoned").next_interaction("clock", "now");
        serde_json::from_value(output)
            .unwrap_or_else(|e| panic!("clock::now seq={seq}: bad recorded time: {e}"))
    }
}
