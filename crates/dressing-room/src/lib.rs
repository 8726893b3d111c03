//! Dressing room contention simulator.
//!
//! Customers bring a handful of items into a store with a few dressing
//! rooms. Each scenario fixes the number of rooms and customers, runs every
//! customer concurrently and reports how long they waited and how long they
//! spent trying things on. Comparing scenarios shows which room count keeps
//! the average wait lowest.
//!
//! This crate re-exports the building blocks:
//!
//! - [`core`]: activity events, the console sink and simulated time
//! - [`pool`]: the bounded [`DressingRooms`](pool::DressingRooms) gate
//! - [`sim`]: customers, scenarios and the [`SimulationService`](sim::SimulationService)
//! - [`report`]: plain-text rendering of scenario results
//!
//! # Example
//!
//! ```rust,no_run
//! use dressing_room::core::{TimeScale, WriterListener};
//! use dressing_room::sim::{InMemoryScenarioResultRepository, ScenarioConfig, SimulationService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let template = ScenarioConfig::builder()
//!     .time_scale(TimeScale::from_millis_per_minute(50)?)
//!     .activity_listener(WriterListener::stdout())
//!     .build()?;
//!
//! let service = SimulationService::with_template(
//!     Arc::new(InMemoryScenarioResultRepository::new()),
//!     template,
//! );
//! let result = service.run_and_store(3, 10).await?;
//! println!("{}", dressing_room::report::format_result(&result));
//! # Ok(())
//! # }
//! ```

pub mod report;

pub use dressing_room_core as core;
pub use dressing_room_pool as pool;
pub use dressing_room_sim as sim;
