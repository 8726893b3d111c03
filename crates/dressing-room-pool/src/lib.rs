//! A bounded pool of dressing rooms.
//!
//! [`DressingRooms`] is a counting admission gate built on a tokio
//! semaphore. Customers call [`DressingRooms::acquire`] and suspend until a
//! room is free; the returned [`RoomPermit`] holds the room until it is
//! released or dropped. The pool never lets more than its capacity of
//! customers hold a room at once.
//!
//! # Basic Example
//!
//! ```rust
//! use dressing_room_pool::DressingRooms;
//!
//! # async fn example() {
//! let rooms = DressingRooms::builder()
//!     .rooms(3)
//!     .name("fitting-area")
//!     .build()
//!     .unwrap();
//!
//! let permit = rooms.acquire(1).await.unwrap();
//! // try things on...
//! permit.release();
//! # }
//! ```
//!
//! # Example with Event Listeners
//!
//! ```rust
//! use dressing_room_core::ActivityEvent;
//! use dressing_room_pool::DressingRooms;
//!
//! let rooms = DressingRooms::builder()
//!     .rooms(2)
//!     .on_room_entered(|customer, wait| {
//!         println!("customer {} admitted after {:?}", customer, wait);
//!     })
//!     .on_room_activity(|event| println!("{}", event.message()))
//!     .build()
//!     .unwrap();
//! ```
//!
//! # Dynamic Subscriptions
//!
//! Listener collections are shared handles, so consumers can attach and
//! detach while customers are being served:
//!
//! ```rust
//! use dressing_room_core::{EventListeners, FnListener};
//! use dressing_room_pool::{DressingRooms, RoomEvent};
//!
//! let listeners: EventListeners<RoomEvent> = EventListeners::new();
//! let rooms = DressingRooms::builder()
//!     .event_listeners(listeners.clone())
//!     .build()
//!     .unwrap();
//!
//! let id = listeners.subscribe(FnListener::new(|_: &RoomEvent| {}));
//! listeners.unsubscribe(id);
//! # drop(rooms);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod rooms;

pub use config::{DressingRoomsConfig, DressingRoomsConfigBuilder};
pub use error::{Result, RoomsError};
pub use events::RoomEvent;
pub use rooms::{DressingRooms, RoomPermit};
