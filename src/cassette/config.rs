//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::{Error, Result};

/// Per-port cassette file paths. Each port can optionally have its own
/// cassette file for replay. Ports without a cassette path will panic
/// if called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the runner port cassette file.
    pub runner: Option<PathBuf>,
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the runner port.
    pub runner: Option<CassetteReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`. Any port called
    /// during replay will panic because no cassette is loaded.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Picks up `runner.cassette.yaml` and `clock.cassette.yaml` from a
    /// recording session directory, skipping whichever is absent.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.is_file().then_some(path)
        };
        Self { runner: existing("runner"), clock: existing("clock") }
    }

    /// Read and parse a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<Cassette> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Cassette(format!("failed to read cassette file {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            Error::Cassette(format!("failed to parse cassette file {}: {e}", path.display()))
        })
    }

    /// Load a single cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<CassetteReplayer> {
        Self::load_cassette(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers> {
        Ok(PortReplayers {
            runner: self.runner.as_deref().map(Self::load_port_cassette).transpose()?,
            clock: self.clock.as_deref().map(Self::load_port_cassette).transpose()?,
        })
    }
}
