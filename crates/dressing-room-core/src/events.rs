//! Event system for simulation activity.
//!
//! Rooms and customers both report what they are doing through events. Each
//! event carries structured fields for programmatic consumers and renders a
//! human-readable [`ActivityEvent::message`] for console sinks.
//!
//! Listener collections are shared: cloning an [`EventListeners`] yields a
//! handle onto the same subscription list, so consumers can subscribe and
//! unsubscribe while a simulation is running.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

/// Trait for events emitted by the simulation.
pub trait ActivityEvent: Send + Sync + fmt::Debug {
    /// Returns the type of event (e.g., "room_entered", "item_started").
    fn event_type(&self) -> &'static str;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Instant;

    /// Returns the name of the component instance that emitted this event.
    fn source_name(&self) -> &str;

    /// Renders the event as a single human-readable line.
    fn message(&self) -> String;
}

/// Trait for listening to activity events.
pub trait EventListener<E: ActivityEvent>: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &E);
}

/// Type alias for boxed event listeners.
pub type BoxedEventListener<E> = Arc<dyn EventListener<E>>;

/// Handle returned by [`EventListeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registry<E: ActivityEvent> {
    next_id: u64,
    listeners: Vec<(ListenerId, BoxedEventListener<E>)>,
}

/// A shared collection of event listeners.
pub struct EventListeners<E: ActivityEvent> {
    registry: Arc<RwLock<Registry<E>>>,
}

impl<E: ActivityEvent> EventListeners<E> {
    /// Creates a new empty event listener collection.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Adds a listener to the collection.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        self.subscribe(listener);
    }

    /// Subscribes a listener and returns a handle for removing it later.
    ///
    /// The subscription is visible through every clone of this collection.
    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: EventListener<E> + 'static,
    {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a previously subscribed listener.
    ///
    /// Returns `false` if the listener was already removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    /// Emits an event to all registered listeners.
    ///
    /// Listeners are called outside the registry lock, so a listener may
    /// subscribe or unsubscribe from within its own callback. If a listener
    /// panics, the panic is caught and the remaining listeners will still
    /// be called.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<BoxedEventListener<E>> = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));
        }
    }

    /// Returns true if there are no listeners.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of listeners.
    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

impl<E: ActivityEvent> Clone for EventListeners<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: ActivityEvent> Default for EventListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ActivityEvent> fmt::Debug for EventListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// A simple function-based event listener.
pub struct FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    f: F,
    _phantom: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Creates a new function-based listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<E, F>
where
    E: ActivityEvent,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }
}

/// A listener that writes each event's message as one line to a shared writer.
///
/// Concurrent customers emit events from many tasks at once. The writer is
/// locked for the duration of a single line, so messages never interleave.
/// Clones share the writer, which lets room and customer channels feed the
/// same console without mixing their output.
pub struct WriterListener<W: Write + Send> {
    writer: Arc<Mutex<W>>,
}

impl<W: Write + Send> WriterListener<W> {
    /// Creates a listener writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Returns a handle onto the underlying writer.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.writer)
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

impl WriterListener<io::Stdout> {
    /// Creates a listener writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Clone for WriterListener<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<E, W> EventListener<E> for WriterListener<W>
where
    E: ActivityEvent,
    W: Write + Send,
{
    fn on_event(&self, event: &E) {
        // A failing sink must not stall the simulation.
        let _ = self.write_line(&event.message());
    }
}
