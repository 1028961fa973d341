use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const COPS_CHECK_ENV: &str = "SCAPEGOAT_COPS_CHECK_MS";
pub const FRAME_CHECK_ENV: &str = "SCAPEGOAT_FRAME_CHECK_MS";

/// Real-time delays before a paused game is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionDelays {
    pub cops_check: Duration,
    pub frame_check: Duration,
}

impl Default for ResolutionDelays {
    fn default() -> Self {
        Self {
            cops_check: Duration::from_millis(3_000),
            frame_check: Duration::from_millis(6_000),
        }
    }
}

impl ResolutionDelays {
    /// Both delays set to `delay`; handy for tests and the simulator.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            cops_check: delay,
            frame_check: delay,
        }
    }

    /// Read overrides from the environment; unset variables keep defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            cops_check: millis_var(COPS_CHECK_ENV)?.unwrap_or(defaults.cops_check),
            frame_check: millis_var(FRAME_CHECK_ENV)?.unwrap_or(defaults.frame_check),
        })
    }
}

fn millis_var(name: &str) -> Result<Option<Duration>, AppError> {
    match env::var(name) {
        Ok(raw) => parse_millis(name, &raw).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::config(format!("{name}: {e}"))),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration, AppError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| AppError::config(format!("{name} must be milliseconds, got '{raw}': {e}")))
}
