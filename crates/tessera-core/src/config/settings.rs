//! Concrete configuration types

use super::traits::{ConfigValidation, TesseraConfigSource};
use super::validation::ConfigValidator;
use crate::TesseraError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix of environment variables read by [`TesseraConfig::merge_with_env`]
pub const ENV_PREFIX: &str = "TESSERA_";

/// Upper bound for any collaborator timeout (one hour)
const MAX_TIMEOUT_MS: u64 = 3_600_000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Record verification behaviour
    pub verification: RecordConfig,
    /// Collaborator deadlines
    pub timeouts: TimeoutConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Record verification behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Before resolving the owner's ciphertext, require the fingerprint the
    /// ledger stores for the record to equal the one the record was opened
    /// with. Plaintext is always verified against the latter either way.
    pub cross_check_ledger_fingerprint: bool,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            cross_check_ledger_fingerprint: true,
        }
    }
}

/// Deadlines applied by the timeout wrappers in `tessera-effects`.
/// `None` disables the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-call ledger deadline in milliseconds
    pub ledger_ms: Option<u64>,
    /// Per-call resolver deadline in milliseconds
    pub resolver_ms: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            ledger_ms: Some(10_000),
            resolver_ms: Some(30_000),
        }
    }
}

impl TimeoutConfig {
    /// Ledger deadline
    pub fn ledger_timeout(&self) -> Option<Duration> {
        self.ledger_ms.map(Duration::from_millis)
    }

    /// Resolver deadline
    pub fn resolver_timeout(&self) -> Option<Duration> {
        self.resolver_ms.map(Duration::from_millis)
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info,tessera_record=debug`
    pub filter: String,
    /// Colourise output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, TesseraError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TesseraError::config(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<Option<u64>, TesseraError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    value
        .parse::<u64>()
        .map(Some)
        .map_err(|e| TesseraError::config(format!("{key}: {e}")))
}

impl TesseraConfigSource for TesseraConfig {
    fn load_from_file(path: &Path) -> Result<Self, TesseraError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TesseraError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), TesseraError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "LOG" => self.logging.filter = value,
                "LOG_ANSI" => self.logging.ansi = parse_bool(&key, &value)?,
                "LEDGER_TIMEOUT_MS" => self.timeouts.ledger_ms = parse_timeout(&key, &value)?,
                "RESOLVER_TIMEOUT_MS" => {
                    self.timeouts.resolver_ms = parse_timeout(&key, &value)?;
                }
                "CROSS_CHECK" => {
                    self.verification.cross_check_ledger_fingerprint = parse_bool(&key, &value)?;
                }
                _ => tracing::debug!(variable = %key, "Ignoring unknown configuration variable"),
            }
        }
        Ok(())
    }
}

impl ConfigValidation for TesseraConfig {
    fn validate(&self) -> Result<(), TesseraError> {
        let mut timeouts = ConfigValidator::with_prefix("timeouts");
        if let Some(ms) = self.timeouts.ledger_ms {
            timeouts.range("ledger_ms", ms, Some(1), Some(MAX_TIMEOUT_MS));
        }
        if let Some(ms) = self.timeouts.resolver_ms {
            timeouts.range("resolver_ms", ms, Some(1), Some(MAX_TIMEOUT_MS));
        }

        let mut logging = ConfigValidator::with_prefix("logging");
        logging.required("filter", &self.logging.filter);

        let mut validator = ConfigValidator::new();
        validator.merge(timeouts);
        validator.merge(logging);
        validator.finish()
    }
}
