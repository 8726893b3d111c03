//! Event types for the dressing room pool.

use dressing_room_core::events::ActivityEvent;
use std::time::{Duration, Instant};

/// Events emitted by the dressing room pool.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// A customer was admitted to a room.
    RoomEntered {
        /// Name of the pool instance.
        pool_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Customer that entered.
        customer_id: u64,
        /// Wall-clock time spent waiting for the room.
        wait: Duration,
        /// The same wait expressed in simulated minutes.
        wait_minutes: f64,
        /// Rooms occupied after this admission.
        occupied_rooms: usize,
    },
    /// A customer released a room.
    RoomLeft {
        /// Name of the pool instance.
        pool_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Customer that left.
        customer_id: u64,
        /// Rooms still occupied after this release.
        occupied_rooms: usize,
    },
}

impl RoomEvent {
    /// Returns the customer this event concerns.
    pub fn customer_id(&self) -> u64 {
        match self {
            RoomEvent::RoomEntered { customer_id, .. } | RoomEvent::RoomLeft { customer_id, .. } => {
                *customer_id
            }
        }
    }
}

impl ActivityEvent for RoomEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::RoomEntered { .. } => "room_entered",
            RoomEvent::RoomLeft { .. } => "room_left",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            RoomEvent::RoomEntered { timestamp, .. } | RoomEvent::RoomLeft { timestamp, .. } => {
                *timestamp
            }
        }
    }

    fn source_name(&self) -> &str {
        match self {
            RoomEvent::RoomEntered { pool_name, .. } | RoomEvent::RoomLeft { pool_name, .. } => {
                pool_name
            }
        }
    }

    fn message(&self) -> String {
        match self {
            RoomEvent::RoomEntered {
                customer_id,
                wait,
                wait_minutes,
                ..
            } => {
                if wait.is_zero() {
                    format!("Customer {customer_id} entered a dressing room.")
                } else {
                    format!(
                        "Customer {customer_id} entered a dressing room. Wait time: {wait_minutes:.1} minutes."
                    )
                }
            }
            RoomEvent::RoomLeft { customer_id, .. } => {
                format!("Customer {customer_id} left the dressing room.")
            }
        }
    }
}
