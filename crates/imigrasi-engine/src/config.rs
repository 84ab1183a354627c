//! Round configuration.
//!
//! A [`RoundConfig`] can be built in code or loaded from a JSON file. Every
//! field has a default, so `{}` is a valid configuration:
//!
//! ```
//! use imigrasi_engine::config::RoundConfig;
//!
//! let config = RoundConfig::from_json_str(r#"{ "seed": 42, "mix_policy": "distinct_sets" }"#).unwrap();
//! assert_eq!(config.batch_size, 6);
//! assert_eq!(config.seed, Some(42));
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use imigrasi_audit::mixer::MixPolicy;
use imigrasi_docs::random::DeskRng;
use imigrasi_docs::reference::ReferenceTables;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Number of travellers in a round.
pub const DEFAULT_BATCH_SIZE: usize = 6;

/// Time the player has per document, in milliseconds.
pub const DEFAULT_TIME_LIMIT_MS: u64 = 30_000;

// ---------------------------------------------------------------------------
// RoundConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Number of document sets generated for the round. Must be positive.
    pub batch_size: usize,
    /// Seed for the round's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Countdown per document in milliseconds. Must be positive.
    pub time_limit_ms: u64,
    pub mix_policy: MixPolicy,
    /// JSON file with custom reference tables. `None` uses the bundled ones.
    pub tables_path: Option<PathBuf>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            mix_policy: MixPolicy::default(),
            tables_path: None,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batch_size == 0 {
            return Err(EngineError::InvalidConfig {
                field: "batch_size",
                reason: "must be at least 1",
            });
        }
        if self.time_limit_ms == 0 {
            return Err(EngineError::InvalidConfig {
                field: "time_limit_ms",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json).map_err(|e| EngineError::ConfigParse {
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read round config {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("invalid round config {}", path.display()))
    }

    /// The reference tables this round draws from.
    pub fn tables(&self) -> Result<ReferenceTables, EngineError> {
        match &self.tables_path {
            None => Ok(ReferenceTables::builtin()),
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|source| EngineError::TablesIo {
                        path: path.clone(),
                        source,
                    })?;
                Ok(ReferenceTables::from_json_str(&text)?)
            }
        }
    }

    /// A fresh random source for the round.
    pub fn rng(&self) -> DeskRng {
        match self.seed {
            Some(seed) => DeskRng::seeded(seed),
            None => DeskRng::from_entropy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = RoundConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RoundConfig::default());
        assert_eq!(config.batch_size, 6);
        assert_eq!(config.time_limit_ms, 30_000);
        assert_eq!(config.mix_policy, MixPolicy::WithReplacement);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = RoundConfig::from_json_str(r#"{ "batch_size": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfig {
                field: "batch_size",
                ..
            }
        ));
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        let config = RoundConfig {
            time_limit_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig {
                field: "time_limit_ms",
                ..
            })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RoundConfig::from_json_str(r#"{ "batch_size": "six" }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse { .. }));
    }

    #[test]
    fn same_seed_same_stream() {
        let config = RoundConfig {
            seed: Some(9),
            ..Default::default()
        };
        let mut a = config.rng();
        let mut b = config.rng();
        assert_eq!(a.alphanumeric(16), b.alphanumeric(16));
    }

    #[test]
    fn missing_tables_file_is_an_io_error() {
        let config = RoundConfig {
            tables_path: Some(PathBuf::from("/nonexistent/imigrasi/tables.json")),
            ..Default::default()
        };
        let err = config.tables().unwrap_err();
        assert!(matches!(err, EngineError::TablesIo { .. }));
    }

    #[test]
    fn load_reports_the_path() {
        let err = RoundConfig::load(Path::new("/nonexistent/imigrasi/round.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/imigrasi/round.json"));
    }
}
