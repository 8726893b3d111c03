//! Configuration for scenarios.

use crate::customer::TryOnTime;
use crate::events::CustomerEvent;
use dressing_room_core::events::{EventListener, EventListeners, FnListener};
use dressing_room_core::{ConfigError, TimeScale};
use dressing_room_pool::RoomEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Configuration for a scenario.
///
/// Listener collections are shared handles: every scenario built from a
/// clone of this configuration reports to the same subscribers.
#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub(crate) name: String,
    pub(crate) rooms: usize,
    pub(crate) customers: usize,
    pub(crate) items_per_customer: Option<usize>,
    pub(crate) try_on_time: TryOnTime,
    pub(crate) time_scale: TimeScale,
    pub(crate) seed: Option<u64>,
    pub(crate) room_listeners: EventListeners<RoomEvent>,
    pub(crate) customer_listeners: EventListeners<CustomerEvent>,
}

impl ScenarioConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::new()
    }

    /// Returns a copy with a different pool size and customer count.
    pub fn with_size(&self, rooms: usize, customers: usize) -> Result<Self, ConfigError> {
        if rooms == 0 {
            return Err(ConfigError::InvalidRoomCount { rooms });
        }
        Ok(Self {
            rooms,
            customers,
            ..self.clone()
        })
    }

    /// Returns a copy with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rooms.
    pub fn rooms(&self) -> usize {
        self.rooms
    }

    /// Number of customers.
    pub fn customers(&self) -> usize {
        self.customers
    }

    /// Simulated time scale.
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    /// Listeners receiving room events.
    pub fn room_listeners(&self) -> &EventListeners<RoomEvent> {
        &self.room_listeners
    }

    /// Listeners receiving customer events.
    pub fn customer_listeners(&self) -> &EventListeners<CustomerEvent> {
        &self.customer_listeners
    }

    /// Random generator for one customer.
    ///
    /// Seeded runs derive an independent stream per customer id.
    pub(crate) fn rng_for(&self, customer_id: u64) -> StdRng {
        match self.seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed ^ customer_id.wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfigBuilder::new().into_config()
    }
}

/// Builder for scenario configuration.
pub struct ScenarioConfigBuilder {
    name: String,
    rooms: usize,
    customers: usize,
    items_per_customer: Option<usize>,
    try_on_time: TryOnTime,
    time_scale: TimeScale,
    seed: Option<u64>,
    room_listeners: EventListeners<RoomEvent>,
    customer_listeners: EventListeners<CustomerEvent>,
}

impl ScenarioConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            name: "scenario".to_string(),
            rooms: 3,
            customers: 10,
            items_per_customer: None,
            try_on_time: TryOnTime::default(),
            time_scale: TimeScale::default(),
            seed: None,
            room_listeners: EventListeners::new(),
            customer_listeners: EventListeners::new(),
        }
    }

    /// Sets the scenario name, also used as the pool name.
    ///
    /// Default: "scenario"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the number of rooms.
    ///
    /// Must be at least 1.
    /// Default: 3
    pub fn rooms(mut self, rooms: usize) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the number of customers.
    ///
    /// Zero is allowed and produces an empty result.
    /// Default: 10
    pub fn customers(mut self, customers: usize) -> Self {
        self.customers = customers;
        self
    }

    /// Gives every customer the same number of items, clamped into
    /// `1..=MAX_ITEMS`.
    ///
    /// Default: each customer draws its own count
    pub fn items_per_customer(mut self, items: usize) -> Self {
        self.items_per_customer = Some(items);
        self
    }

    /// Sets how long each item takes to try on.
    ///
    /// Default: uniform between 1.0 and 3.0 minutes
    pub fn try_on_time(mut self, try_on_time: TryOnTime) -> Self {
        self.try_on_time = try_on_time;
        self
    }

    /// Sets how much wall-clock time a simulated minute takes.
    ///
    /// Default: one real minute
    pub fn time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Seeds every customer's random generator for reproducible demand and
    /// try-on times.
    ///
    /// Default: seeded from the operating system
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Uses an existing listener collection for room events.
    pub fn room_listeners(mut self, listeners: EventListeners<RoomEvent>) -> Self {
        self.room_listeners = listeners;
        self
    }

    /// Uses an existing listener collection for customer events.
    pub fn customer_listeners(mut self, listeners: EventListeners<CustomerEvent>) -> Self {
        self.customer_listeners = listeners;
        self
    }

    /// Registers a callback for room events.
    pub fn on_room_activity<F>(mut self, f: F) -> Self
    where
        F: Fn(&RoomEvent) + Send + Sync + 'static,
    {
        self.room_listeners.add(FnListener::new(f));
        self
    }

    /// Registers a callback for customer events.
    pub fn on_customer_activity<F>(mut self, f: F) -> Self
    where
        F: Fn(&CustomerEvent) + Send + Sync + 'static,
    {
        self.customer_listeners.add(FnListener::new(f));
        self
    }

    /// Registers one listener on both the room and customer channels.
    ///
    /// # Example
    /// ```rust
    /// use dressing_room_core::WriterListener;
    /// use dressing_room_sim::ScenarioConfig;
    ///
    /// let config = ScenarioConfig::builder()
    ///     .activity_listener(WriterListener::stdout())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.room_listeners().len(), 1);
    /// assert_eq!(config.customer_listeners().len(), 1);
    /// ```
    pub fn activity_listener<L>(mut self, listener: L) -> Self
    where
        L: EventListener<RoomEvent> + EventListener<CustomerEvent> + Clone + 'static,
    {
        self.room_listeners.add(listener.clone());
        self.customer_listeners.add(listener);
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<ScenarioConfig, ConfigError> {
        if self.rooms == 0 {
            return Err(ConfigError::InvalidRoomCount { rooms: self.rooms });
        }
        Ok(self.into_config())
    }

    fn into_config(self) -> ScenarioConfig {
        ScenarioConfig {
            name: self.name,
            rooms: self.rooms,
            customers: self.customers,
            items_per_customer: self.items_per_customer,
            try_on_time: self.try_on_time,
            time_scale: self.time_scale,
            seed: self.seed,
            room_listeners: self.room_listeners,
            customer_listeners: self.customer_listeners,
        }
    }
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
