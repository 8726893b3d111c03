//! Storage for scenario results.

use crate::scenario::ScenarioResult;
use std::sync::{Mutex, PoisonError};

/// Append-only store of scenario results.
///
/// Implementations must accept concurrent `add` calls and return results
/// in insertion order.
pub trait ScenarioResultRepository: Send + Sync {
    /// Appends a result.
    fn add(&self, result: ScenarioResult);

    /// Returns a copy of every stored result, in insertion order.
    fn all(&self) -> Vec<ScenarioResult>;
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryScenarioResultRepository {
    results: Mutex<Vec<ScenarioResult>>,
}

impl InMemoryScenarioResultRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScenarioResultRepository for InMemoryScenarioResultRepository {
    fn add(&self, result: ScenarioResult) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    fn all(&self) -> Vec<ScenarioResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
