//! Dressing room pool stress tests

use dressing_room_pool::DressingRooms;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Test: ten thousand customers through ten rooms
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn stress_many_customers_few_rooms() {
    let rooms = DressingRooms::with_rooms(10).unwrap();
    let inside = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();
    let handles: Vec<_> = (1..=10_000u64)
        .map(|id| {
            let rooms = rooms.clone();
            let inside = Arc::clone(&inside);
            let max_seen = Arc::clone(&max_seen);
            tokio::spawn(async move {
                let permit = rooms.acquire(id).await.unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                inside.fetch_sub(1, Ordering::SeqCst);
                permit.release();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    let elapsed = start.elapsed();

    println!("10000 customers through 10 rooms in {:?}", elapsed);
    assert!(max_seen.load(Ordering::SeqCst) <= 10);
    assert_eq!(rooms.occupied(), 0);
    assert_eq!(rooms.available(), 10);
    assert!(elapsed < Duration::from_secs(30));
}

/// Test: closing the pool while thousands are waiting
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn stress_close_under_load() {
    let rooms = DressingRooms::with_rooms(2).unwrap();
    let failed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (1..=5_000u64)
        .map(|id| {
            let rooms = rooms.clone();
            let failed = Arc::clone(&failed);
            tokio::spawn(async move {
                match rooms.acquire(id).await {
                    Ok(permit) => {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                        permit.release();
                    }
                    Err(_) => {
                        failed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(20)).await;
    rooms.close();

    for handle in handles {
        handle.await.unwrap();
    }

    println!("{} customers turned away", failed.load(Ordering::SeqCst));
    assert_eq!(rooms.occupied(), 0);
}
