//! Configuration for the dressing room pool.

use crate::events::RoomEvent;
use crate::rooms::DressingRooms;
use dressing_room_core::events::{EventListener, EventListeners, FnListener};
use dressing_room_core::{ConfigError, TimeScale};
use std::time::Duration;

/// Configuration for a dressing room pool.
#[derive(Clone, Debug)]
pub struct DressingRoomsConfig {
    /// Number of rooms that can be occupied at once.
    pub(crate) rooms: usize,
    /// Name of this pool instance.
    pub(crate) name: String,
    /// Mapping used to report waits in simulated minutes.
    pub(crate) time_scale: TimeScale,
    /// Event listeners.
    pub(crate) event_listeners: EventListeners<RoomEvent>,
}

impl DressingRoomsConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> DressingRoomsConfigBuilder {
        DressingRoomsConfigBuilder::new()
    }
}

/// Builder for dressing room pool configuration.
pub struct DressingRoomsConfigBuilder {
    rooms: usize,
    name: String,
    time_scale: TimeScale,
    event_listeners: EventListeners<RoomEvent>,
}

impl DressingRoomsConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            rooms: 3,
            name: "dressing-rooms".to_string(),
            time_scale: TimeScale::default(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the number of rooms.
    ///
    /// Must be at least 1.
    /// Default: 3
    pub fn rooms(mut self, rooms: usize) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the name of this pool instance.
    ///
    /// Default: "dressing-rooms"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the time scale used to express waits in simulated minutes.
    ///
    /// Default: one simulated minute per real minute
    pub fn time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Uses an existing listener collection for room events.
    ///
    /// Subscriptions made on `listeners` afterwards are seen by the pool.
    pub fn event_listeners(mut self, listeners: EventListeners<RoomEvent>) -> Self {
        self.event_listeners = listeners;
        self
    }

    /// Registers a listener for every room event.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: EventListener<RoomEvent> + 'static,
    {
        self.event_listeners.add(listener);
        self
    }

    /// Registers a callback for every room event.
    ///
    /// # Example
    /// ```rust
    /// use dressing_room_core::ActivityEvent;
    /// use dressing_room_pool::DressingRoomsConfig;
    ///
    /// let rooms = DressingRoomsConfig::builder()
    ///     .rooms(2)
    ///     .on_room_activity(|event| println!("{}", event.message()))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(rooms.capacity(), 2);
    /// ```
    pub fn on_room_activity<F>(mut self, f: F) -> Self
    where
        F: Fn(&RoomEvent) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(f));
        self
    }

    /// Registers a callback when a customer is admitted to a room.
    ///
    /// # Callback Signature
    /// `Fn(u64, Duration)` - Called with the customer id and the wall-clock time
    /// the customer waited. The wait is zero when a room was free at request time.
    pub fn on_room_entered<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RoomEvent::RoomEntered {
                customer_id, wait, ..
            } = event
            {
                f(*customer_id, *wait);
            }
        }));
        self
    }

    /// Registers a callback when a customer releases a room.
    ///
    /// # Callback Signature
    /// `Fn(u64)` - Called with the id of the customer that left.
    pub fn on_room_left<F>(mut self, f: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let RoomEvent::RoomLeft { customer_id, .. } = event {
                f(*customer_id);
            }
        }));
        self
    }

    /// Validates the configuration and builds the pool.
    pub fn build(self) -> Result<DressingRooms, ConfigError> {
        if self.rooms == 0 {
            return Err(ConfigError::InvalidRoomCount { rooms: self.rooms });
        }
        let config = DressingRoomsConfig {
            rooms: self.rooms,
            name: self.name,
            time_scale: self.time_scale,
            event_listeners: self.event_listeners,
        };
        Ok(DressingRooms::new(config))
    }
}

impl Default for DressingRoomsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
