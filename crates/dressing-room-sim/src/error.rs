//! Error types for customers and scenarios.

use dressing_room_core::ConfigError;
use dressing_room_pool::RoomsError;

/// Errors a single customer can hit while using the dressing rooms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerError {
    /// The customer could not get a room.
    #[error(transparent)]
    Rooms(#[from] RoomsError),
}

/// Errors that fail a whole scenario.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// The scenario configuration was rejected before anything ran.
    #[error("invalid scenario configuration: {0}")]
    Config(#[from] ConfigError),

    /// A customer returned an error.
    #[error("customer {customer_id} failed: {source}")]
    CustomerFailed {
        /// The failing customer with the lowest id.
        customer_id: u64,
        /// What went wrong.
        source: CustomerError,
    },

    /// A customer's task panicked or was cancelled.
    #[error("customer {customer_id} panicked: {message}")]
    CustomerPanicked {
        /// The failing customer with the lowest id.
        customer_id: u64,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl SimulationError {
    /// Returns the customer whose failure aborted the scenario, if any.
    pub fn customer_id(&self) -> Option<u64> {
        match self {
            SimulationError::Config(_) => None,
            SimulationError::CustomerFailed { customer_id, .. }
            | SimulationError::CustomerPanicked { customer_id, .. } => Some(*customer_id),
        }
    }
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
