use dressing_room_core::{ConfigError, TimeScale};
use dressing_room_pool::{DressingRooms, RoomsError};
use std::time::Duration;
use tokio::time::sleep;

#[test]
fn zero_rooms_is_rejected() {
    let err = DressingRooms::with_rooms(0).unwrap_err();
    assert_eq!(err, ConfigError::InvalidRoomCount { rooms: 0 });
}

/// A free room is entered without any wait
#[tokio::test]
async fn free_room_has_zero_wait() {
    let rooms = DressingRooms::with_rooms(2).unwrap();

    let permit = rooms.acquire(1).await.unwrap();
    assert_eq!(permit.wait(), Duration::ZERO);
    assert_eq!(permit.customer_id(), 1);
    assert_eq!(rooms.occupied(), 1);
}

/// A waiting customer's wait covers the time until the room is released
#[tokio::test(start_paused = true)]
async fn wait_spans_until_release() {
    let rooms = DressingRooms::builder()
        .rooms(1)
        .time_scale(TimeScale::from_millis_per_minute(100).unwrap())
        .build()
        .unwrap();

    let held = rooms.acquire(1).await.unwrap();
    let waiter = {
        let rooms = rooms.clone();
        tokio::spawn(async move { rooms.acquire(2).await })
    };

    sleep(Duration::from_millis(250)).await;
    held.release();

    let permit = waiter.await.unwrap().unwrap();
    assert!(permit.wait() >= Duration::from_millis(250));
    assert!(permit.wait() < Duration::from_millis(300));
}

/// Dropping a permit returns the room just like releasing it
#[tokio::test]
async fn dropped_permit_frees_room() {
    let rooms = DressingRooms::with_rooms(1).unwrap();

    {
        let _permit = rooms.acquire(1).await.unwrap();
        assert_eq!(rooms.available(), 0);
    }

    assert_eq!(rooms.available(), 1);
    assert_eq!(rooms.occupied(), 0);
}

/// Closing wakes waiters with an error but leaves held rooms alone
#[tokio::test(start_paused = true)]
async fn close_fails_waiters() {
    let rooms = DressingRooms::builder()
        .rooms(1)
        .name("closing")
        .build()
        .unwrap();

    let held = rooms.acquire(1).await.unwrap();
    let waiter = {
        let rooms = rooms.clone();
        tokio::spawn(async move { rooms.acquire(2).await.map(|p| p.customer_id()) })
    };
    sleep(Duration::from_millis(1)).await;

    rooms.close();
    assert!(rooms.is_closed());

    let err = waiter.await.unwrap().unwrap_err();
    assert_eq!(
        err,
        RoomsError::Closed {
            name: "closing".to_string()
        }
    );
    assert_eq!(held.customer_id(), 1);
    assert!(rooms.acquire(3).await.is_err());
}
