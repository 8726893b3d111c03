//! Error types for the dressing room pool.

/// Errors that can occur when requesting a room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomsError {
    /// The pool was closed before or while the customer was waiting.
    #[error("dressing rooms '{name}' are closed")]
    Closed {
        /// Name of the closed pool.
        name: String,
    },
}

/// Result type for pool operations.
pub type Result<T> = std::result::Result<T, RoomsError>;
