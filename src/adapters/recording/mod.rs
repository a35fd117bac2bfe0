//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod runner;

pub use clock::RecordingClock;
pub use runner::RecordingCommandRunner;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Appends one interaction to a port's cassette.
///
/// A value that cannot be serialized is stored as a marker string and
/// logged; the live call it describes has already happened and its result
/// is still returned to the caller.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let to_json = |value: serde_json::Result<serde_json::Value>| {
        value.unwrap_or_else(|e| {
            tracing::warn!(port, method, error = %e, "interaction not serializable");
            serde_json::Value::String(format!("<unserializable: {e}>"))
        })
    };
    let input = to_json(serde_json::to_value(input));
    let output = to_json(serde_json::to_value(output));

    recorder.lock().expect("recorder lock poisoned").record(port, method, input, output);
}
