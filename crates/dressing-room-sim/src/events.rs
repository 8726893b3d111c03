//! Event types for customer activity.

use dressing_room_core::events::ActivityEvent;
use std::time::{Duration, Instant};

/// Events emitted by customers while they use a dressing room.
#[derive(Debug, Clone)]
pub enum CustomerEvent {
    /// A customer started trying on an item.
    TryingOnItem {
        /// Name of the scenario the customer belongs to.
        source_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Customer trying the item on.
        customer_id: u64,
        /// One-based index of the item.
        item: usize,
        /// Number of items the customer brought.
        total_items: usize,
        /// Estimated try-on time in simulated minutes.
        estimate_minutes: f64,
    },
    /// A customer finished every item and is about to leave the room.
    Finished {
        /// Name of the scenario the customer belongs to.
        source_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Customer that finished.
        customer_id: u64,
        /// Number of items tried on.
        items: usize,
        /// Wall-clock time spent in the room.
        room_time: Duration,
        /// The same room time in simulated minutes.
        room_minutes: f64,
    },
}

impl CustomerEvent {
    /// Returns the customer this event concerns.
    pub fn customer_id(&self) -> u64 {
        match self {
            CustomerEvent::TryingOnItem { customer_id, .. }
            | CustomerEvent::Finished { customer_id, .. } => *customer_id,
        }
    }
}

impl ActivityEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::TryingOnItem { .. } => "item_started",
            CustomerEvent::Finished { .. } => "customer_finished",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            CustomerEvent::TryingOnItem { timestamp, .. }
            | CustomerEvent::Finished { timestamp, .. } => *timestamp,
        }
    }

    fn source_name(&self) -> &str {
        match self {
            CustomerEvent::TryingOnItem { source_name, .. }
            | CustomerEvent::Finished { source_name, .. } => source_name,
        }
    }

    fn message(&self) -> String {
        match self {
            CustomerEvent::TryingOnItem {
                customer_id,
                item,
                total_items,
                estimate_minutes,
                ..
            } => format!(
                "Customer {customer_id} is trying on item {item}/{total_items}. (Est. {estimate_minutes:.1} minutes)"
            ),
            CustomerEvent::Finished {
                customer_id,
                items,
                room_minutes,
                ..
            } => format!(
                "Customer {customer_id} has finished trying on {items} items in {room_minutes:.1} minutes."
            ),
        }
    }
}
