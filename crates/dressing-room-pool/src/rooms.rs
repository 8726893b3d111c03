//! Dressing room pool implementation.

use crate::config::{DressingRoomsConfig, DressingRoomsConfigBuilder};
use crate::error::{Result, RoomsError};
use crate::events::RoomEvent;
use dressing_room_core::TimeScale;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

struct Inner {
    semaphore: Arc<Semaphore>,
    config: DressingRoomsConfig,
    occupied: AtomicUsize,
    peak: AtomicUsize,
}

/// A fixed number of dressing rooms shared by concurrent customers.
///
/// The pool is a counting gate: at most `capacity` customers hold a
/// [`RoomPermit`] at any moment. Waiting customers are suspended without
/// blocking the runtime and are admitted as rooms are released. No
/// admission order is promised.
///
/// Cloning yields another handle onto the same rooms.
#[derive(Clone)]
pub struct DressingRooms {
    inner: Arc<Inner>,
}

impl DressingRooms {
    /// Creates a new builder for configuring a pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use dressing_room_pool::DressingRooms;
    ///
    /// let rooms = DressingRooms::builder()
    ///     .rooms(4)
    ///     .name("fitting-area")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(rooms.available(), 4);
    /// ```
    pub fn builder() -> DressingRoomsConfigBuilder {
        #[cfg(feature = "metrics")]
        {
            METRICS_INIT.call_once(|| {
                describe_counter!(
                    "dressing_rooms_admissions_total",
                    "Total number of customers admitted to a room"
                );
                describe_counter!(
                    "dressing_rooms_releases_total",
                    "Total number of rooms released"
                );
                describe_gauge!("dressing_rooms_occupied", "Current number of occupied rooms");
                describe_histogram!(
                    "dressing_rooms_wait_duration_seconds",
                    "Time customers spent waiting for a room"
                );
            });
        }
        DressingRoomsConfigBuilder::new()
    }

    /// Creates a pool with `rooms` rooms and default settings.
    pub fn with_rooms(rooms: usize) -> std::result::Result<Self, dressing_room_core::ConfigError> {
        Self::builder().rooms(rooms).build()
    }

    pub(crate) fn new(config: DressingRoomsConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.rooms));
        Self {
            inner: Arc::new(Inner {
                semaphore,
                config,
                occupied: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }),
        }
    }

    /// Waits for a free room and admits `customer_id` to it.
    ///
    /// The wait is measured from the moment of the request. A customer that
    /// finds a room free is admitted with a wait of exactly zero.
    ///
    /// Returns [`RoomsError::Closed`] if the pool is closed.
    pub async fn acquire(&self, customer_id: u64) -> Result<RoomPermit> {
        let requested = tokio::time::Instant::now();
        let semaphore = Arc::clone(&self.inner.semaphore);

        let (permit, wait) = match Arc::clone(&semaphore).try_acquire_owned() {
            Ok(permit) => (permit, Duration::ZERO),
            Err(TryAcquireError::NoPermits) => {
                let permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| self.closed_error())?;
                (permit, requested.elapsed())
            }
            Err(TryAcquireError::Closed) => return Err(self.closed_error()),
        };

        let occupied = self.inner.occupied.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak.fetch_max(occupied, Ordering::SeqCst);

        let config = &self.inner.config;
        let event = RoomEvent::RoomEntered {
            pool_name: config.name.clone(),
            timestamp: Instant::now(),
            customer_id,
            wait,
            wait_minutes: config.time_scale.to_minutes(wait),
            occupied_rooms: occupied,
        };
        config.event_listeners.emit(&event);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rooms = %config.name,
            customer_id,
            wait_ms = wait.as_millis() as u64,
            occupied,
            "customer admitted to dressing room"
        );

        #[cfg(feature = "metrics")]
        {
            counter!("dressing_rooms_admissions_total", "rooms" => config.name.clone())
                .increment(1);
            gauge!("dressing_rooms_occupied", "rooms" => config.name.clone()).set(occupied as f64);
            histogram!("dressing_rooms_wait_duration_seconds", "rooms" => config.name.clone())
                .record(wait.as_secs_f64());
        }

        Ok(RoomPermit {
            permit: Some(permit),
            customer_id,
            wait,
            rooms: Arc::clone(&self.inner),
        })
    }

    /// Closes the pool.
    ///
    /// Customers currently waiting, and every later request, fail with
    /// [`RoomsError::Closed`]. Rooms already held stay valid until released.
    pub fn close(&self) {
        self.inner.semaphore.close();

        #[cfg(feature = "tracing")]
        tracing::warn!(rooms = %self.inner.config.name, "dressing rooms closed");
    }

    /// Returns true if the pool has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.semaphore.is_closed()
    }

    /// Total number of rooms.
    pub fn capacity(&self) -> usize {
        self.inner.config.rooms
    }

    /// Number of rooms currently free.
    pub fn available(&self) -> usize {
        self.inner.semaphore.available_permits()
    }

    /// Number of rooms currently held by customers.
    pub fn occupied(&self) -> usize {
        self.inner.occupied.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously occupied rooms since construction.
    pub fn peak_occupancy(&self) -> usize {
        self.inner.peak.load(Ordering::SeqCst)
    }

    /// Name of this pool instance.
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    /// Time scale used to report waits.
    pub fn time_scale(&self) -> TimeScale {
        self.inner.config.time_scale
    }

    fn closed_error(&self) -> RoomsError {
        RoomsError::Closed {
            name: self.inner.config.name.clone(),
        }
    }
}

impl std::fmt::Debug for DressingRooms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DressingRooms")
            .field("name", &self.inner.config.name)
            .field("capacity", &self.capacity())
            .field("occupied", &self.occupied())
            .finish()
    }
}

/// A held dressing room.
///
/// Obtained from [`DressingRooms::acquire`]. The room is returned to the
/// pool by [`RoomPermit::release`] or when the permit is dropped, and a
/// release event is emitted either way.
#[must_use = "dropping a RoomPermit releases the room immediately"]
pub struct RoomPermit {
    permit: Option<OwnedSemaphorePermit>,
    customer_id: u64,
    wait: Duration,
    rooms: Arc<Inner>,
}

impl RoomPermit {
    /// Customer holding this room.
    pub fn customer_id(&self) -> u64 {
        self.customer_id
    }

    /// Wall-clock time the customer waited before admission.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Returns the room to the pool.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for RoomPermit {
    fn drop(&mut self) {
        let Some(permit) = self.permit.take() else {
            return;
        };
        let occupied = self.rooms.occupied.fetch_sub(1, Ordering::SeqCst) - 1;
        drop(permit);

        let config = &self.rooms.config;
        let event = RoomEvent::RoomLeft {
            pool_name: config.name.clone(),
            timestamp: Instant::now(),
            customer_id: self.customer_id,
            occupied_rooms: occupied,
        };
        config.event_listeners.emit(&event);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rooms = %config.name,
            customer_id = self.customer_id,
            occupied,
            "customer left dressing room"
        );

        #[cfg(feature = "metrics")]
        {
            counter!("dressing_rooms_releases_total", "rooms" => config.name.clone()).increment(1);
            gauge!("dressing_rooms_occupied", "rooms" => config.name.clone()).set(occupied as f64);
        }
    }
}

impl std::fmt::Debug for RoomPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomPermit")
            .field("customer_id", &self.customer_id)
            .field("wait", &self.wait)
            .finish()
    }
}
