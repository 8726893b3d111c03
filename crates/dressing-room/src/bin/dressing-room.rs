//! Runs the stock scenarios and reports the optimal room count.
//!
//! Run with `cargo run -p dressing-room`.
//!
//! `DRESSING_ROOM_MINUTE_MS` sets how many milliseconds of wall-clock time
//! one simulated minute takes (default 60000). `RUST_LOG` controls tracing
//! output, which goes to stderr so it never mixes with the activity log.

use dressing_room::core::{TimeScale, WriterListener};
use dressing_room::report;
use dressing_room::sim::{InMemoryScenarioResultRepository, ScenarioConfig, SimulationService};
use std::io::Write;
use std::sync::{Arc, PoisonError};
use tracing_subscriber::EnvFilter;

const MINUTE_MS_VAR: &str = "DRESSING_ROOM_MINUTE_MS";
const DEFAULT_MINUTE_MS: u64 = 60_000;

const SCENARIOS: [(&str, usize, usize); 3] = [
    ("Scenario 1: 3 Rooms, 10 Customers", 3, 10),
    ("Scenario 2: 5 Rooms, 20 Customers", 5, 20),
    ("Scenario 3: 4 Rooms, 20 Customers", 4, 20),
];

fn minute_ms() -> Result<u64, String> {
    match std::env::var(MINUTE_MS_VAR) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("{MINUTE_MS_VAR} must be a positive integer, got {value:?}")),
        Err(_) => Ok(DEFAULT_MINUTE_MS),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let time_scale = TimeScale::from_millis_per_minute(minute_ms()?)?;
    let console = WriterListener::stdout();
    let out = console.writer();
    let print = |text: &str| {
        let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    };

    let template = ScenarioConfig::builder()
        .time_scale(time_scale)
        .activity_listener(console.clone())
        .build()?;
    let service = SimulationService::with_template(
        Arc::new(InMemoryScenarioResultRepository::new()),
        template,
    );

    print("\n\nClothing Store Dressing Room Simulator");

    for (title, rooms, customers) in SCENARIOS {
        print(&format!(
            "\n\n--------------------Executing {title}--------------------\n"
        ));
        let result = service.run_named_and_store(title, rooms, customers).await?;
        print(&format!("\n{}", report::format_finished(&result)));
    }

    print("\n\n\nSimulation Complete.\n\n");

    match service.optimal_by_wait_time() {
        Some(optimal) => print(&report::format_optimal(&optimal)),
        None => print("No scenarios were run."),
    }

    Ok(())
}
