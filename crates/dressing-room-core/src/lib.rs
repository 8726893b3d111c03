//! Core infrastructure for the dressing room simulator.
//!
//! This crate provides shared functionality used by the pool and simulation crates:
//! - Activity event system with static and dynamic subscriptions
//! - A line-serialized writer sink for console output
//! - Simulated time scaling (simulated minutes to wall-clock durations)
//! - Configuration errors shared by every builder

pub mod error;
pub mod events;
pub mod time;

pub use error::ConfigError;
pub use events::{
    ActivityEvent, BoxedEventListener, EventListener, EventListeners, FnListener, ListenerId,
    WriterListener,
};
pub use time::TimeScale;
