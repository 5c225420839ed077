use std::time::Duration;

use tracing::warn;

/// Environment variable overriding the debounce delay, in milliseconds.
pub const DEBOUNCE_MS_ENV: &str = "BREACH_DEBOUNCE_MS";

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period after the last `schedule` before a lookup is issued.
    pub delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { delay: DEFAULT_DELAY }
    }
}

impl PipelineConfig {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Default configuration with the delay taken from `BREACH_DEBOUNCE_MS` when it
    /// is set to a valid number of milliseconds.
    pub fn from_env() -> Self {
        match std::env::var(DEBOUNCE_MS_ENV) {
            Ok(value) => Self::from_millis_str(&value).unwrap_or_else(|| {
                warn!(value = %value, "ignoring invalid {DEBOUNCE_MS_ENV}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn from_millis_str(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(|ms| Self::with_delay(Duration::from_millis(ms)))
    }
}
