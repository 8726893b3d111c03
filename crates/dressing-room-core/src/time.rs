//! Simulated time.
//!
//! Every duration the simulation reasons about is expressed in simulated
//! minutes. A [`TimeScale`] fixes how much wall-clock time one simulated
//! minute takes, which lets the same scenario run in real time for a demo
//! or in milliseconds under test.

use crate::error::ConfigError;
use std::time::Duration;

/// Mapping between simulated minutes and wall-clock durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeScale {
    minute: Duration,
}

impl TimeScale {
    /// One simulated minute takes one real minute.
    pub const REAL_TIME: TimeScale = TimeScale {
        minute: Duration::from_secs(60),
    };

    /// Creates a time scale where one simulated minute lasts `minute`.
    ///
    /// Returns [`ConfigError::ZeroTimeScale`] for a zero duration.
    pub fn new(minute: Duration) -> Result<Self, ConfigError> {
        if minute.is_zero() {
            return Err(ConfigError::ZeroTimeScale);
        }
        Ok(Self { minute })
    }

    /// Creates a time scale from a number of wall-clock milliseconds per
    /// simulated minute.
    pub fn from_millis_per_minute(millis: u64) -> Result<Self, ConfigError> {
        Self::new(Duration::from_millis(millis))
    }

    /// Wall-clock duration of one simulated minute.
    pub fn minute(&self) -> Duration {
        self.minute
    }

    /// Converts a wall-clock duration into simulated minutes.
    pub fn to_minutes(&self, duration: Duration) -> f64 {
        duration.as_secs_f64() / self.minute.as_secs_f64()
    }

    /// Converts simulated minutes into a wall-clock duration.
    ///
    /// Negative, non-finite or overflowing inputs saturate to zero.
    pub fn from_minutes(&self, minutes: f64) -> Duration {
        Duration::try_from_secs_f64(self.minute.as_secs_f64() * minutes).unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::REAL_TIME
    }
}
