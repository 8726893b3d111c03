//! Running scenarios and querying their stored results.

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::repository::ScenarioResultRepository;
use crate::scenario::{Scenario, ScenarioResult};
use std::sync::Arc;

/// Runs scenarios and records their results in a repository.
///
/// The service holds no simulation state of its own. Every run is built
/// from a template configuration, so listeners, time scale and try-on
/// settings are shared by all runs while room and customer counts vary.
pub struct SimulationService<R: ScenarioResultRepository + ?Sized> {
    repository: Arc<R>,
    template: ScenarioConfig,
}

impl<R: ScenarioResultRepository + ?Sized> SimulationService<R> {
    /// Creates a service using the default scenario settings.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_template(repository, ScenarioConfig::default())
    }

    /// Creates a service whose runs start from `template`.
    pub fn with_template(repository: Arc<R>, template: ScenarioConfig) -> Self {
        Self {
            repository,
            template,
        }
    }

    /// Template every run is derived from.
    pub fn template(&self) -> &ScenarioConfig {
        &self.template
    }

    /// Runs a scenario with the given size, stores and returns its result.
    pub async fn run_and_store(&self, rooms: usize, customers: usize) -> Result<ScenarioResult> {
        let config = self.template.with_size(rooms, customers)?;
        self.run_config_and_store(config).await
    }

    /// Like [`SimulationService::run_and_store`], naming the scenario.
    pub async fn run_named_and_store(
        &self,
        name: impl Into<String>,
        rooms: usize,
        customers: usize,
    ) -> Result<ScenarioResult> {
        let config = self.template.with_size(rooms, customers)?.with_name(name);
        self.run_config_and_store(config).await
    }

    /// Runs a scenario from an explicit configuration and stores its result.
    ///
    /// A failed scenario stores nothing.
    pub async fn run_config_and_store(&self, config: ScenarioConfig) -> Result<ScenarioResult> {
        let result = Scenario::new(config).execute().await?;
        self.repository.add(result.clone());
        Ok(result)
    }

    /// Every stored result in insertion order.
    pub fn all_results(&self) -> Vec<ScenarioResult> {
        self.repository.all()
    }

    /// The stored result with the lowest `key`.
    ///
    /// Ties go to the earliest stored result. Returns `None` when nothing
    /// has been stored.
    pub fn best_by<F>(&self, key: F) -> Option<ScenarioResult>
    where
        F: Fn(&ScenarioResult) -> f64,
    {
        self.repository
            .all()
            .into_iter()
            .reduce(|best, candidate| {
                if key(&candidate).total_cmp(&key(&best)).is_lt() {
                    candidate
                } else {
                    best
                }
            })
    }

    /// The stored result with the lowest average wait time.
    pub fn optimal_by_wait_time(&self) -> Option<ScenarioResult> {
        self.best_by(|result| result.avg_wait_time_minutes)
    }
}
