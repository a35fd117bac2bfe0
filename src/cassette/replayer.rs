//! Serves recorded interactions back in order.

use std::collections::{BTreeMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette as one queue per `(port, method)` pair.
///
/// Ports are independent: a clock read between two commands does not shift
/// the runner's position. Within a pair, interactions come back in `seq`
/// order and each is handed out exactly once.
pub struct CassetteReplayer {
    queues: BTreeMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Builds the queues from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut interactions = cassette.interactions.clone();
        interactions.sort_by_key(|i| i.seq);

        let mut queues: BTreeMap<(String, String), VecDeque<Interaction>> = BTreeMap::new();
        for interaction in interactions {
            let key = (interaction.port.clone(), interaction.method.clone());
            queues.entry(key).or_default().push_back(interaction);
        }
        Self { queues }
    }

    /// Interactions not yet handed out, across every port.
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Takes the next interaction for `port` and `method`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette never recorded the pair, listing the pairs
    /// it does have, or when every recorded interaction for the pair has
    /// already been consumed.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let known: Vec<String> = self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
        let Some(queue) = self.queues.get_mut(&(port.to_string(), method.to_string())) else {
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}. \
                 Recorded pairs: [{}]",
                known.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!("Cassette exhausted: every {port}::{method} interaction has been consumed")
        })
    }
}
