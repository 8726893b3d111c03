//! Configuration errors shared across the simulator crates.

/// Errors produced when a configuration builder is given values the
/// simulation cannot run with.
///
/// These are reported before any scenario starts, so a rejected
/// configuration never leaves a half-run scenario behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The pool must contain at least one room.
    #[error("room count must be at least 1, got {rooms}")]
    InvalidRoomCount {
        /// The rejected room count.
        rooms: usize,
    },

    /// A simulated minute cannot map to a zero-length wall-clock duration.
    #[error("a simulated minute must span a non-zero duration")]
    ZeroTimeScale,

    /// A fixed try-on time was not a positive, finite number of minutes.
    #[error("try-on time must be a positive, finite number of minutes, got {minutes}")]
    InvalidTryOnTime {
        /// The rejected duration in simulated minutes.
        minutes: f64,
    },

    /// A uniform try-on range had non-positive, non-finite or inverted bounds.
    #[error("invalid try-on time range: {min} to {max} minutes")]
    InvalidTryOnRange {
        /// Lower bound in simulated minutes.
        min: f64,
        /// Upper bound in simulated minutes.
        max: f64,
    },
}
