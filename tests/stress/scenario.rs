//! Scenario stress tests

use dressing_room_core::TimeScale;
use dressing_room_sim::{
    InMemoryScenarioResultRepository, Scenario, ScenarioConfig, SimulationService,
};
use std::sync::Arc;

/// Test: one very large scenario on paused time
#[tokio::test(start_paused = true)]
#[ignore]
async fn stress_large_scenario() {
    let config = ScenarioConfig::builder()
        .rooms(25)
        .customers(5_000)
        .time_scale(TimeScale::from_millis_per_minute(10).unwrap())
        .seed(7)
        .build()
        .unwrap();

    let report = Scenario::new(config).execute_detailed().await.unwrap();

    assert_eq!(report.customers.len(), 5_000);
    assert!(report.peak_occupancy <= 25);
    assert!(report.result.avg_wait_time_minutes > 0.0);
}

/// Test: hundreds of stored runs and the optimal query over them
#[tokio::test(start_paused = true)]
#[ignore]
async fn stress_many_stored_runs() {
    let template = ScenarioConfig::builder()
        .time_scale(TimeScale::from_millis_per_minute(10).unwrap())
        .build()
        .unwrap();
    let repo = Arc::new(InMemoryScenarioResultRepository::new());
    let service = SimulationService::with_template(Arc::clone(&repo), template);

    for run in 0..300usize {
        service.run_and_store(1 + run % 10, 20).await.unwrap();
    }

    assert_eq!(repo.len(), 300);
    let optimal = service.optimal_by_wait_time().unwrap();
    assert!(service
        .all_results()
        .iter()
        .all(|r| r.avg_wait_time_minutes >= optimal.avg_wait_time_minutes));
}
