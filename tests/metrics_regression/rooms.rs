//! Dressing room pool metrics regression tests

use super::helpers::*;
use dressing_room_pool::DressingRooms;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn room_metrics_are_recorded() {
    init_recorder();

    let rooms = DressingRooms::builder()
        .rooms(2)
        .name("metrics-rooms")
        .build()
        .unwrap();

    rooms.acquire(1).await.unwrap().release();

    assert_counter_exists("dressing_rooms_admissions_total");
    assert_counter_exists("dressing_rooms_releases_total");
    assert_gauge_exists("dressing_rooms_occupied");
    assert_histogram_exists("dressing_rooms_wait_duration_seconds");
}

#[tokio::test]
#[serial]
async fn room_metrics_are_labelled_by_pool_name() {
    init_recorder();

    let rooms = DressingRooms::builder()
        .rooms(1)
        .name("labelled-rooms")
        .build()
        .unwrap();

    drop(rooms.acquire(1).await.unwrap());

    assert_metric_has_label("dressing_rooms_admissions_total", "rooms", "labelled-rooms");
    assert_metric_has_label("dressing_rooms_releases_total", "rooms", "labelled-rooms");
    assert_metric_has_label("dressing_rooms_occupied", "rooms", "labelled-rooms");
}
