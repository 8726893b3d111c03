//! Property tests for the dressing room pool.
//!
//! Invariants tested:
//! - Occupied rooms never exceed capacity
//! - Every customer is eventually admitted (no deadlock)
//! - All rooms are free once every customer has left

use dressing_room_pool::DressingRooms;
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Runtime;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: the pool never admits more customers than it has rooms
    #[test]
    fn occupancy_bounded_by_capacity(
        capacity in 1usize..=8,
        customers in 0usize..=40,
        hold_ms in 1u64..=5,
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let rooms = DressingRooms::with_rooms(capacity).unwrap();
            let inside = Arc::new(AtomicUsize::new(0));
            let max_seen = Arc::new(AtomicUsize::new(0));

            let handles: Vec<_> = (1..=customers as u64)
                .map(|id| {
                    let rooms = rooms.clone();
                    let inside = Arc::clone(&inside);
                    let max_seen = Arc::clone(&max_seen);
                    tokio::spawn(async move {
                        let permit = rooms.acquire(id).await.unwrap();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(hold_ms)).await;
                        inside.fetch_sub(1, Ordering::SeqCst);
                        permit.release();
                    })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap();
            }

            let observed = max_seen.load(Ordering::SeqCst);
            prop_assert!(
                observed <= capacity,
                "Observed {} customers inside but only {} rooms",
                observed,
                capacity
            );
            prop_assert!(rooms.peak_occupancy() <= capacity);
            prop_assert_eq!(rooms.occupied(), 0);
            prop_assert_eq!(rooms.available(), capacity);

            Ok(())
        })?;
    }
}
