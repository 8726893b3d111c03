//! Customers competing for a small pool of dressing rooms.
//!
//! A [`Scenario`] spawns one tokio task per [`Customer`] against a fresh
//! [`DressingRooms`](dressing_room_pool::DressingRooms) pool, waits for all
//! of them and aggregates wait time, room time and item counts into a
//! [`ScenarioResult`]. The [`SimulationService`] runs scenarios, stores
//! their results and picks the configuration with the lowest average wait.
//!
//! # Example
//!
//! ```rust,no_run
//! use dressing_room_core::TimeScale;
//! use dressing_room_sim::{InMemoryScenarioResultRepository, ScenarioConfig, SimulationService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), dressing_room_sim::SimulationError> {
//! let template = ScenarioConfig::builder()
//!     .time_scale(TimeScale::from_millis_per_minute(10)?)
//!     .build()?;
//!
//! let repo = Arc::new(InMemoryScenarioResultRepository::new());
//! let service = SimulationService::with_template(repo, template);
//!
//! service.run_and_store(3, 10).await?;
//! service.run_and_store(5, 20).await?;
//!
//! if let Some(best) = service.optimal_by_wait_time() {
//!     println!("best: {} rooms, {:.1} minutes average wait", best.rooms, best.avg_wait_time_minutes);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Reproducible runs
//!
//! Seeding a scenario fixes every customer's item count and try-on times:
//!
//! ```rust
//! use dressing_room_sim::{ScenarioConfig, TryOnTime};
//!
//! let config = ScenarioConfig::builder()
//!     .rooms(1)
//!     .customers(3)
//!     .items_per_customer(1)
//!     .try_on_time(TryOnTime::fixed(2.0).unwrap())
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! # drop(config);
//! ```

pub mod config;
pub mod customer;
pub mod error;
pub mod events;
pub mod repository;
pub mod scenario;
pub mod service;

pub use config::{ScenarioConfig, ScenarioConfigBuilder};
pub use customer::{
    clamp_items, Customer, CustomerBuilder, CustomerIdGenerator, CustomerOutcome, TryOnTime,
    MAX_ITEMS,
};
pub use error::{CustomerError, Result, SimulationError};
pub use events::CustomerEvent;
pub use repository::{InMemoryScenarioResultRepository, ScenarioResultRepository};
pub use scenario::{Scenario, ScenarioReport, ScenarioResult};
pub use service::SimulationService;
