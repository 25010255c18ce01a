//! Session configuration
//!
//! Configuration is a plain structure handed to constructors; nothing in the
//! crate reads process-global state at use time. `from_env` is the one place
//! environment variables are consulted, and malformed values there are fatal.

use std::env;
use std::path::PathBuf;

use crate::error::TrainError;
use crate::wait::GESTURE_WAIT_MIN_LONG_MS;

/// Environment variable naming the gesture catalog file
pub const ENV_GESTURE_DEF: &str = "GESTURE_DEF";
/// Environment variable naming the participant id
pub const ENV_PID: &str = "PID";
/// Environment variable for the randomized-interval upper bound (ms)
pub const ENV_MAX_WAIT_TIME: &str = "GESTURE_MAX_WAIT_TIME";

/// Default participant id when none is configured
pub const DEFAULT_PID: &str = "P0";
/// Default number of repetitions per gesture
pub const DEFAULT_REPETITIONS: u32 = 3;

/// Settings for one training session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path to the gesture catalog file
    pub gesture_def: PathBuf,
    /// Participant identifier
    pub pid: String,
    /// Exclusive upper bound for randomized trial intervals, in milliseconds
    pub max_wait_ms: u64,
    /// Times each catalog label is prompted
    pub repetitions: u32,
    /// Whether to interleave rest pauses between prompts
    pub show_rest: bool,
}

impl SessionConfig {
    /// Build a configuration with defaults for everything but the two
    /// required values
    pub fn new(gesture_def: impl Into<PathBuf>, max_wait_ms: u64) -> Result<Self, TrainError> {
        let config = Self {
            gesture_def: gesture_def.into(),
            pid: DEFAULT_PID.to_string(),
            max_wait_ms,
            repetitions: DEFAULT_REPETITIONS,
            show_rest: true,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from the environment; parse failures are fatal
    pub fn from_env() -> Result<Self, TrainError> {
        let gesture_def = env::var(ENV_GESTURE_DEF)
            .map_err(|_| TrainError::MissingConfig(ENV_GESTURE_DEF.to_string()))?;
        let max_wait_raw = env::var(ENV_MAX_WAIT_TIME)
            .map_err(|_| TrainError::MissingConfig(ENV_MAX_WAIT_TIME.to_string()))?;
        let max_wait_ms = parse_max_wait(&max_wait_raw)?;
        let pid = env::var(ENV_PID).unwrap_or_else(|_| DEFAULT_PID.to_string());

        let config = Self {
            gesture_def: PathBuf::from(gesture_def),
            pid,
            max_wait_ms,
            repetitions: DEFAULT_REPETITIONS,
            show_rest: true,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = pid.into();
        self
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_show_rest(mut self, show_rest: bool) -> Self {
        self.show_rest = show_rest;
        self
    }

    /// Re-check invariants after builder-style changes
    pub fn validate(&self) -> Result<(), TrainError> {
        if self.max_wait_ms <= GESTURE_WAIT_MIN_LONG_MS {
            return Err(TrainError::InvalidConfig {
                key: ENV_MAX_WAIT_TIME.to_string(),
                reason: format!(
                    "must exceed the {GESTURE_WAIT_MIN_LONG_MS} ms trial minimum, got {}",
                    self.max_wait_ms
                ),
            });
        }
        if self.repetitions == 0 {
            return Err(TrainError::InvalidConfig {
                key: "repetitions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_max_wait(raw: &str) -> Result<u64, TrainError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| TrainError::InvalidConfig {
            key: ENV_MAX_WAIT_TIME.to_string(),
            reason: format!("\"{raw}\" is not a valid millisecond count: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let config = SessionConfig::new("gestures.csv", 5000).unwrap();
        assert_eq!(config.pid, DEFAULT_PID);
        assert_eq!(config.repetitions, DEFAULT_REPETITIONS);
        assert!(config.show_rest);
    }

    #[test]
    fn builder_overrides() {
        let config = SessionConfig::new("gestures.csv", 5000)
            .unwrap()
            .with_pid("P7")
            .with_repetitions(5)
            .with_show_rest(false);
        assert_eq!(config.pid, "P7");
        assert_eq!(config.repetitions, 5);
        assert!(!config.show_rest);
    }

    #[test]
    fn max_wait_must_exceed_trial_minimum() {
        let err = SessionConfig::new("gestures.csv", 3000).unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_repetitions_rejected() {
        let err = SessionConfig::new("gestures.csv", 5000)
            .unwrap()
            .with_repetitions(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_max_wait_is_fatal() {
        let err = parse_max_wait("fast").unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig { .. }));
        assert!(parse_max_wait(" 6000 ").is_ok());
    }
}
