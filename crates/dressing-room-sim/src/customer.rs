//! Customers and the try-on routine they run while holding a room.

use crate::error::CustomerError;
use crate::events::CustomerEvent;
use dressing_room_core::events::EventListeners;
use dressing_room_core::{ConfigError, TimeScale};
use dressing_room_pool::DressingRooms;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Most items a customer may bring into a room.
pub const MAX_ITEMS: usize = 6;

/// Clamps a requested item count into `1..=MAX_ITEMS`.
pub fn clamp_items(items: usize) -> usize {
    items.clamp(1, MAX_ITEMS)
}

/// Hands out customer ids starting at 1.
///
/// Each scenario execution owns its own generator, so numbering restarts
/// for every run and concurrent runs never interfere.
#[derive(Debug, Default)]
pub struct CustomerIdGenerator {
    issued: AtomicU64,
}

impl CustomerIdGenerator {
    /// Creates a generator whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id.
    pub fn next_id(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Restarts numbering at 1.
    pub fn reset(&self) {
        self.issued.store(0, Ordering::SeqCst);
    }

    /// Number of ids handed out since creation or the last reset.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TryOnKind {
    Uniform { min: f64, max: f64 },
    Fixed(f64),
}

/// How long trying on one item takes, in simulated minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TryOnTime(TryOnKind);

impl TryOnTime {
    /// Uniform over tenths of a minute between `min` and `max` inclusive.
    pub fn uniform(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidTryOnRange { min, max });
        }
        Ok(Self(TryOnKind::Uniform { min, max }))
    }

    /// Every item takes exactly `minutes`.
    pub fn fixed(minutes: f64) -> Result<Self, ConfigError> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(ConfigError::InvalidTryOnTime { minutes });
        }
        Ok(Self(TryOnKind::Fixed(minutes)))
    }

    /// Draws one try-on time.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.0 {
            TryOnKind::Fixed(minutes) => minutes,
            TryOnKind::Uniform { min, max } => {
                let low = (min * 10.0).ceil() as u64;
                let high = (max * 10.0).floor() as u64;
                if low > high {
                    return min;
                }
                rng.random_range(low..=high) as f64 / 10.0
            }
        }
    }
}

impl Default for TryOnTime {
    /// Between 1.0 and 3.0 minutes per item.
    fn default() -> Self {
        Self(TryOnKind::Uniform { min: 1.0, max: 3.0 })
    }
}

/// What a customer measured during its visit.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerOutcome {
    /// Customer id.
    pub id: u64,
    /// Items tried on.
    pub items: usize,
    /// Wall-clock time spent waiting for a room.
    pub wait: Duration,
    /// Wall-clock time spent in the room.
    pub room_time: Duration,
    /// Wait in simulated minutes.
    pub wait_minutes: f64,
    /// Room time in simulated minutes.
    pub room_minutes: f64,
}

/// A simulated customer.
///
/// A customer waits for a room, tries on each of its items in turn while
/// holding the room, and releases the room when done.
pub struct Customer {
    id: u64,
    items: usize,
    rng: StdRng,
    try_on_time: TryOnTime,
    time_scale: TimeScale,
    source_name: String,
    event_listeners: EventListeners<CustomerEvent>,
}

impl Customer {
    /// Creates a builder for the customer with the given id.
    pub fn builder(id: u64) -> CustomerBuilder {
        CustomerBuilder::new(id)
    }

    /// Customer id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of items this customer will try on.
    pub fn items(&self) -> usize {
        self.items
    }

    /// Waits for a room, tries on every item, then releases the room.
    ///
    /// The room is held for the whole item sequence. Each item suspends the
    /// task with a timer only, so other customers keep making progress.
    pub async fn run(mut self, rooms: DressingRooms) -> Result<CustomerOutcome, CustomerError> {
        let permit = rooms.acquire(self.id).await?;
        let wait = permit.wait();

        let entered = tokio::time::Instant::now();
        for item in 1..=self.items {
            let estimate_minutes = self.try_on_time.sample(&mut self.rng);
            self.event_listeners.emit(&CustomerEvent::TryingOnItem {
                source_name: self.source_name.clone(),
                timestamp: Instant::now(),
                customer_id: self.id,
                item,
                total_items: self.items,
                estimate_minutes,
            });
            tokio::time::sleep(self.time_scale.from_minutes(estimate_minutes)).await;
        }
        let room_time = entered.elapsed();
        let room_minutes = self.time_scale.to_minutes(room_time);

        self.event_listeners.emit(&CustomerEvent::Finished {
            source_name: self.source_name.clone(),
            timestamp: Instant::now(),
            customer_id: self.id,
            items: self.items,
            room_time,
            room_minutes,
        });

        permit.release();

        Ok(CustomerOutcome {
            id: self.id,
            items: self.items,
            wait,
            room_time,
            wait_minutes: self.time_scale.to_minutes(wait),
            room_minutes,
        })
    }
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("try_on_time", &self.try_on_time)
            .finish()
    }
}

/// Builder for [`Customer`].
pub struct CustomerBuilder {
    id: u64,
    items: Option<usize>,
    rng: Option<StdRng>,
    try_on_time: TryOnTime,
    time_scale: TimeScale,
    source_name: String,
    event_listeners: EventListeners<CustomerEvent>,
}

impl CustomerBuilder {
    /// Creates a builder with default values.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            items: None,
            rng: None,
            try_on_time: TryOnTime::default(),
            time_scale: TimeScale::default(),
            source_name: "scenario".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the number of items, clamped into `1..=MAX_ITEMS`.
    ///
    /// Default: drawn uniformly from `1..=MAX_ITEMS`
    pub fn items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }

    /// Sets the item count when `Some`, or leaves it random when `None`.
    pub fn items_opt(mut self, items: Option<usize>) -> Self {
        self.items = items;
        self
    }

    /// Seeds the customer's random generator.
    ///
    /// Default: seeded from the operating system
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Uses the given random generator.
    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Sets how long each item takes.
    ///
    /// Default: uniform between 1.0 and 3.0 minutes
    pub fn try_on_time(mut self, try_on_time: TryOnTime) -> Self {
        self.try_on_time = try_on_time;
        self
    }

    /// Sets the simulated time scale.
    ///
    /// Default: real time
    pub fn time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Sets the name reported as the source of this customer's events.
    ///
    /// Default: "scenario"
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Sets the listeners that receive this customer's events.
    pub fn event_listeners(mut self, listeners: EventListeners<CustomerEvent>) -> Self {
        self.event_listeners = listeners;
        self
    }

    /// Builds the customer, drawing the item count if none was given.
    pub fn build(self) -> Customer {
        let mut rng = self.rng.unwrap_or_else(StdRng::from_os_rng);
        let items = match self.items {
            Some(items) => clamp_items(items),
            None => rng.random_range(1..=MAX_ITEMS),
        };
        Customer {
            id: self.id,
            items,
            rng,
            try_on_time: self.try_on_time,
            time_scale: self.time_scale,
            source_name: self.source_name,
            event_listeners: self.event_listeners,
        }
    }
}
