use super::fast_time;
use dressing_room_core::ActivityEvent;
use dressing_room_pool::RoomEvent;
use dressing_room_sim::{CustomerEvent, MAX_ITEMS, Scenario, ScenarioConfig, TryOnTime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// As many rooms as customers: nobody waits
#[tokio::test(start_paused = true)]
async fn enough_rooms_means_no_waiting() {
    let config = ScenarioConfig::builder()
        .rooms(5)
        .customers(5)
        .time_scale(fast_time())
        .seed(1)
        .build()
        .unwrap();

    let report = Scenario::new(config).execute_detailed().await.unwrap();

    assert_eq!(report.result.avg_wait_time_minutes, 0.0);
    assert!(report.customers.iter().all(|c| c.wait.is_zero()));
    assert_eq!(report.result.customers, 5);
}

/// One room serializes every customer
#[tokio::test(start_paused = true)]
async fn single_room_serializes_customers() {
    let config = ScenarioConfig::builder()
        .rooms(1)
        .customers(3)
        .items_per_customer(1)
        .try_on_time(TryOnTime::fixed(2.0).unwrap())
        .time_scale(fast_time())
        .build()
        .unwrap();

    let report = Scenario::new(config).execute_detailed().await.unwrap();

    assert!(report.result.elapsed_minutes >= 6.0 - 1e-9);
    assert_eq!(report.peak_occupancy, 1);
    let waited = report.customers.iter().filter(|c| c.wait_minutes > 0.0).count();
    assert!(waited >= 2, "only {waited} customers waited");
    assert_eq!(report.result.avg_items, 1.0);
    assert!((report.result.avg_room_time_minutes - 2.0).abs() < 0.05);
}

/// Aggregates agree with the per-customer outcomes
#[tokio::test(start_paused = true)]
async fn averages_match_outcomes() {
    let config = ScenarioConfig::builder()
        .rooms(2)
        .customers(8)
        .time_scale(fast_time())
        .seed(99)
        .build()
        .unwrap();

    let report = Scenario::new(config).execute_detailed().await.unwrap();
    let n = report.customers.len() as f64;

    let items: f64 = report.customers.iter().map(|c| c.items as f64).sum();
    let wait: f64 = report.customers.iter().map(|c| c.wait_minutes).sum();
    let room: f64 = report.customers.iter().map(|c| c.room_minutes).sum();

    assert!((report.result.avg_items - items / n).abs() < 1e-9);
    assert!((report.result.avg_wait_time_minutes - wait / n).abs() < 1e-9);
    assert!((report.result.avg_room_time_minutes - room / n).abs() < 1e-9);
    assert!(report.peak_occupancy <= 2);
    for customer in &report.customers {
        assert!((1..=MAX_ITEMS).contains(&customer.items));
        // Each item takes between 1.0 and 3.0 minutes
        assert!(customer.room_minutes >= customer.items as f64 - 0.05);
        assert!(customer.room_minutes <= 3.0 * customer.items as f64 + 0.05);
    }
}

/// Requested item counts are clamped into range
#[tokio::test(start_paused = true)]
async fn item_count_is_clamped() {
    let config = ScenarioConfig::builder()
        .rooms(2)
        .customers(2)
        .items_per_customer(40)
        .try_on_time(TryOnTime::fixed(1.0).unwrap())
        .time_scale(fast_time())
        .build()
        .unwrap();

    let result = Scenario::new(config).execute().await.unwrap();
    assert_eq!(result.avg_items, MAX_ITEMS as f64);
}

/// Customer ids restart at 1 for every execution
#[tokio::test(start_paused = true)]
async fn ids_restart_each_run() {
    let config = ScenarioConfig::builder()
        .rooms(2)
        .customers(4)
        .time_scale(fast_time())
        .build()
        .unwrap();
    let scenario = Scenario::new(config);

    for _ in 0..2 {
        let report = scenario.execute_detailed().await.unwrap();
        let ids: Vec<u64> = report.customers.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}

/// Zero customers completes immediately with zero averages
#[tokio::test(start_paused = true)]
async fn empty_scenario() {
    let config = ScenarioConfig::builder()
        .rooms(3)
        .customers(0)
        .time_scale(fast_time())
        .build()
        .unwrap();

    let result = Scenario::new(config).execute().await.unwrap();

    assert_eq!(result.customers, 0);
    assert_eq!(result.avg_items, 0.0);
    assert_eq!(result.avg_wait_time_minutes, 0.0);
    assert_eq!(result.avg_room_time_minutes, 0.0);
}

/// Seeded runs draw the same items and try-on times
#[tokio::test(start_paused = true)]
async fn seeded_runs_repeat() {
    let config = ScenarioConfig::builder()
        .rooms(4)
        .customers(6)
        .time_scale(fast_time())
        .seed(2024)
        .build()
        .unwrap();
    let scenario = Scenario::new(config);

    let first = scenario.execute_detailed().await.unwrap();
    let second = scenario.execute_detailed().await.unwrap();

    let items = |r: &dressing_room_sim::ScenarioReport| {
        r.customers.iter().map(|c| c.items).collect::<Vec<_>>()
    };
    assert_eq!(items(&first), items(&second));
}

/// Each customer announces every item and then finishes
#[tokio::test(start_paused = true)]
async fn customer_activity_is_reported() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);

    let config = ScenarioConfig::builder()
        .rooms(1)
        .customers(1)
        .items_per_customer(2)
        .try_on_time(TryOnTime::fixed(1.5).unwrap())
        .time_scale(fast_time())
        .on_customer_activity(move |event: &CustomerEvent| {
            s.lock().unwrap().push(event.message());
        })
        .build()
        .unwrap();

    Scenario::new(config).execute().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], "Customer 1 is trying on item 1/2. (Est. 1.5 minutes)");
    assert_eq!(seen[1], "Customer 1 is trying on item 2/2. (Est. 1.5 minutes)");
    assert!(seen[2].starts_with("Customer 1 has finished trying on 2 items in 3.0"));
}

/// Customers stop once an abandoned run is dropped
#[tokio::test(start_paused = true)]
async fn dropped_run_stops_its_customers() {
    let room_events = Arc::new(AtomicUsize::new(0));
    let customer_events = Arc::new(AtomicUsize::new(0));
    let r = Arc::clone(&room_events);
    let c = Arc::clone(&customer_events);

    let config = ScenarioConfig::builder()
        .rooms(1)
        .customers(5)
        .items_per_customer(1)
        .try_on_time(TryOnTime::fixed(1.0).unwrap())
        .time_scale(fast_time())
        .on_room_activity(move |_: &RoomEvent| {
            r.fetch_add(1, Ordering::SeqCst);
        })
        .on_customer_activity(move |_: &CustomerEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();
    let scenario = Scenario::new(config);

    let outcome = timeout(Duration::from_millis(150), scenario.execute()).await;
    assert!(outcome.is_err());

    // Let the aborted tasks drop their rooms
    sleep(Duration::from_millis(10)).await;
    let rooms_at_cancel = room_events.load(Ordering::SeqCst);
    let customers_at_cancel = customer_events.load(Ordering::SeqCst);

    sleep(Duration::from_secs(5)).await;

    assert_eq!(room_events.load(Ordering::SeqCst), rooms_at_cancel);
    assert_eq!(customer_events.load(Ordering::SeqCst), customers_at_cancel);
    // Only the first two customers ever got a room
    assert!(rooms_at_cancel <= 4, "room events after cancel: {rooms_at_cancel}");
}
