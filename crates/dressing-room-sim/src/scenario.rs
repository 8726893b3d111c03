//! Scenario execution and aggregation.

use crate::config::ScenarioConfig;
use crate::customer::{Customer, CustomerIdGenerator, CustomerOutcome};
use crate::error::{CustomerError, Result, SimulationError};
use dressing_room_core::TimeScale;
use dressing_room_pool::DressingRooms;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::{Id, JoinError, JoinSet};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_histogram, histogram};
#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// Aggregate statistics of one scenario execution.
///
/// Averages over an empty customer set are reported as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// Number of rooms.
    pub rooms: usize,
    /// Number of customers.
    pub customers: usize,
    /// Wall-clock duration of the whole scenario.
    pub elapsed: Duration,
    /// The same duration in simulated minutes.
    pub elapsed_minutes: f64,
    /// Mean number of items per customer.
    pub avg_items: f64,
    /// Mean simulated minutes a customer spent in a room.
    pub avg_room_time_minutes: f64,
    /// Mean simulated minutes a customer waited for a room.
    pub avg_wait_time_minutes: f64,
}

impl ScenarioResult {
    /// Aggregates customer outcomes.
    pub fn from_outcomes(
        name: impl Into<String>,
        rooms: usize,
        elapsed: Duration,
        time_scale: TimeScale,
        outcomes: &[CustomerOutcome],
    ) -> Self {
        Self {
            name: name.into(),
            rooms,
            customers: outcomes.len(),
            elapsed,
            elapsed_minutes: time_scale.to_minutes(elapsed),
            avg_items: mean(outcomes.iter().map(|o| o.items as f64)),
            avg_room_time_minutes: mean(outcomes.iter().map(|o| o.room_minutes)),
            avg_wait_time_minutes: mean(outcomes.iter().map(|o| o.wait_minutes)),
        }
    }

    /// Result of a scenario without customers.
    pub fn empty(name: impl Into<String>, rooms: usize) -> Self {
        Self::from_outcomes(name, rooms, Duration::ZERO, TimeScale::default(), &[])
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// A scenario result together with every customer's outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    /// Aggregate statistics.
    pub result: ScenarioResult,
    /// Per-customer outcomes ordered by customer id.
    pub customers: Vec<CustomerOutcome>,
    /// Highest number of rooms occupied at once during the run.
    pub peak_occupancy: usize,
}

/// One simulation run with a fixed number of rooms and customers.
///
/// Each execution builds a fresh pool and a fresh id generator, so runs are
/// independent of one another and customers are numbered from 1 every time.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: ScenarioConfig,
}

impl Scenario {
    /// Creates a scenario from a validated configuration.
    pub fn new(config: ScenarioConfig) -> Self {
        #[cfg(feature = "metrics")]
        {
            METRICS_INIT.call_once(|| {
                describe_counter!("scenario_runs_total", "Total number of completed scenarios");
                describe_counter!(
                    "scenario_failures_total",
                    "Total number of scenarios aborted by a customer failure"
                );
                describe_histogram!(
                    "scenario_duration_seconds",
                    "Wall-clock duration of completed scenarios"
                );
            });
        }
        Self { config }
    }

    /// Configuration this scenario runs with.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Runs every customer to completion and aggregates the outcome.
    ///
    /// Must be called from within a tokio runtime. Fails if any customer
    /// fails; no partial result is produced. Dropping the returned future
    /// aborts every customer still running and frees their rooms.
    pub async fn execute(&self) -> Result<ScenarioResult> {
        self.execute_detailed().await.map(|report| report.result)
    }

    /// Like [`Scenario::execute`], also returning each customer's outcome.
    pub async fn execute_detailed(&self) -> Result<ScenarioReport> {
        let config = &self.config;
        let ids = CustomerIdGenerator::new();
        let started = tokio::time::Instant::now();

        #[cfg(feature = "tracing")]
        tracing::info!(
            scenario = %config.name,
            rooms = config.rooms,
            customers = config.customers,
            "scenario started"
        );

        let rooms = DressingRooms::builder()
            .rooms(config.rooms)
            .name(config.name.clone())
            .time_scale(config.time_scale)
            .event_listeners(config.room_listeners.clone())
            .build()?;

        let customers: Vec<Customer> = (0..config.customers)
            .map(|_| {
                let id = ids.next_id();
                Customer::builder(id)
                    .items_opt(config.items_per_customer)
                    .rng(config.rng_for(id))
                    .try_on_time(config.try_on_time)
                    .time_scale(config.time_scale)
                    .source_name(config.name.clone())
                    .event_listeners(config.customer_listeners.clone())
                    .build()
            })
            .collect();

        let mut tasks = CustomerTasks::new();
        for customer in customers {
            tasks.spawn(customer.id(), customer.run(rooms.clone()));
        }

        let outcomes = match tasks.join_all().await {
            Ok(outcomes) => outcomes,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(scenario = %config.name, error = %err, "scenario failed");

                #[cfg(feature = "metrics")]
                counter!("scenario_failures_total", "scenario" => config.name.clone()).increment(1);

                return Err(err);
            }
        };

        let elapsed = started.elapsed();
        let result = ScenarioResult::from_outcomes(
            config.name.clone(),
            config.rooms,
            elapsed,
            config.time_scale,
            &outcomes,
        );

        #[cfg(feature = "tracing")]
        tracing::info!(
            scenario = %config.name,
            elapsed_minutes = result.elapsed_minutes,
            avg_wait_minutes = result.avg_wait_time_minutes,
            "scenario finished"
        );

        #[cfg(feature = "metrics")]
        {
            counter!("scenario_runs_total", "scenario" => config.name.clone()).increment(1);
            histogram!("scenario_duration_seconds", "scenario" => config.name.clone())
                .record(elapsed.as_secs_f64());
        }

        Ok(ScenarioReport {
            result,
            customers: outcomes,
            peak_occupancy: rooms.peak_occupancy(),
        })
    }
}

type CustomerResult = std::result::Result<CustomerOutcome, CustomerError>;

/// Customer tasks spawned for one execution.
///
/// Dropping the set aborts every task still running, so customers never
/// outlive the execution that spawned them.
struct CustomerTasks {
    tasks: JoinSet<(u64, CustomerResult)>,
    ids: HashMap<Id, u64>,
}

impl CustomerTasks {
    fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            ids: HashMap::new(),
        }
    }

    fn spawn<F>(&mut self, customer_id: u64, task: F)
    where
        F: Future<Output = CustomerResult> + Send + 'static,
    {
        let handle = self
            .tasks
            .spawn(async move { (customer_id, task.await) });
        self.ids.insert(handle.id(), customer_id);
    }

    /// Awaits every customer task and returns the outcomes in id order.
    ///
    /// Every task is driven to completion even after a failure. The failure
    /// of the lowest customer id is reported.
    async fn join_all(mut self) -> Result<Vec<CustomerOutcome>> {
        let mut outcomes = Vec::with_capacity(self.ids.len());
        let mut first_error: Option<SimulationError> = None;

        while let Some(joined) = self.tasks.join_next().await {
            let error = match joined {
                Ok((_, Ok(outcome))) => {
                    outcomes.push(outcome);
                    continue;
                }
                Ok((customer_id, Err(source))) => SimulationError::CustomerFailed {
                    customer_id,
                    source,
                },
                Err(join_error) => SimulationError::CustomerPanicked {
                    customer_id: self.ids.get(&join_error.id()).copied().unwrap_or_default(),
                    message: panic_message(join_error),
                },
            };

            #[cfg(feature = "tracing")]
            tracing::warn!(customer_id = error.customer_id(), error = %error, "customer failed");

            let lowest = match &first_error {
                Some(current) => error.customer_id() < current.customer_id(),
                None => true,
            };
            if lowest {
                first_error = Some(error);
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }
        outcomes.sort_by_key(|outcome| outcome.id);
        Ok(outcomes)
    }
}

fn panic_message(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
