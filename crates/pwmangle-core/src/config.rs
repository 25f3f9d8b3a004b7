//! Configuration types for rule loading and guess generation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Limits applied by the guess driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConfig {
    /// Maximum number of candidates emitted per target
    pub max_guesses: usize,
    /// Shortest candidate kept (in characters)
    pub min_len: usize,
    /// Longest candidate kept (in characters)
    pub max_len: usize,
    /// Number of shortest seeds that rules are applied to
    pub max_seeds: usize,
    /// Seeds shorter than this are not mutated
    pub min_seed_len: usize,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            max_guesses: 10_000,
            min_len: 6,
            max_len: 20,
            max_seeds: 10,
            min_seed_len: 4,
        }
    }
}

impl GuessConfig {
    /// Check that the length window and caps are usable
    pub fn validate(&self) -> Result<()> {
        if self.min_len > self.max_len {
            return Err(Error::Config(format!(
                "min_len ({}) exceeds max_len ({})",
                self.min_len, self.max_len
            )));
        }
        if self.max_guesses == 0 {
            return Err(Error::Config("max_guesses must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Returns true if a candidate of `len` characters is inside the window
    pub fn accepts_len(&self, len: usize) -> bool {
        (self.min_len..=self.max_len).contains(&len)
    }
}

/// Command line tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rule file loaded when none is given on the command line
    pub rule_file: PathBuf,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    /// Guess driver limits
    pub guess: GuessConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rule_file: PathBuf::from("Unicorn3k.rule"),
            json_logs: false,
            guess: GuessConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: CliConfig = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.guess.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
