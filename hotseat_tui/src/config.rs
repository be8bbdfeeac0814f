//! Client configuration management.
//!
//! Consolidates every environment variable read into one validated value,
//! built once in `main` and handed to the session.

use std::path::PathBuf;
use std::time::Duration;

pub const REVEAL_DELAY_VAR: &str = "HOTSEAT_REVEAL_DELAY_MS";
pub const SEED_VAR: &str = "HOTSEAT_SEED";
pub const LOG_FILE_VAR: &str = "HOTSEAT_LOG_FILE";

/// Per-card reveal delay when nothing is configured.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Time each newly dealt board card stays alone on screen
    pub reveal_delay: Duration,
    /// Seed for a reproducible deck; a fresh OS-seeded deck otherwise
    pub seed: Option<u64>,
    /// Where to write logs; no logging otherwise
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            reveal_delay: DEFAULT_REVEAL_DELAY,
            seed: None,
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to a malformed value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value if set.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to a malformed value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reveal_delay = parse_var::<u64, _>(&lookup, REVEAL_DELAY_VAR, "a number of milliseconds")?
            .map_or(DEFAULT_REVEAL_DELAY, Duration::from_millis);
        let seed = parse_var(&lookup, SEED_VAR, "an unsigned 64-bit integer")?;
        let log_file = match lookup(LOG_FILE_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    var: LOG_FILE_VAR.to_string(),
                    reason: "Must not be empty".to_string(),
                });
            }
            path => path.map(PathBuf::from),
        };

        Ok(Self {
            reveal_delay,
            seed,
            log_file,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse an optional environment variable
fn parse_var<T, F>(lookup: &F, key: &str, expected: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Expected {expected}, got '{value}'"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.reveal_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_all_vars() {
        let config = load(&[
            (REVEAL_DELAY_VAR, "250"),
            (SEED_VAR, "42"),
            (LOG_FILE_VAR, "/tmp/hotseat.log"),
        ])
        .unwrap();
        assert_eq!(config.reveal_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/hotseat.log")));
    }

    #[test]
    fn test_zero_delay_is_allowed() {
        let config = load(&[(REVEAL_DELAY_VAR, "0")]).unwrap();
        assert_eq!(config.reveal_delay, Duration::ZERO);
    }

    #[test]
    fn test_bad_delay() {
        let err = load(&[(REVEAL_DELAY_VAR, "soon")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(REVEAL_DELAY_VAR));
        assert!(msg.contains("soon"));
    }

    #[test]
    fn test_bad_seed() {
        assert!(load(&[(SEED_VAR, "-1")]).is_err());
    }

    #[test]
    fn test_empty_log_file() {
        assert!(load(&[(LOG_FILE_VAR, " ")]).is_err());
    }
}
