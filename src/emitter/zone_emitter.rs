//! ZoneEmitter: an event emitter whose listeners run in the context that was
//! ambient when they were registered.
//!
//! Snapshot-on-emit semantics mean:
//!   - A listener removed *during* emission is still called in that round.
//!   - A `once` entry fires at most once, even when a nested emit reaches it
//!     before the outer round does.
//!   - A listener added *during* emission is NOT called until the next emit.
//!
//! Panics inside a listener propagate to the caller and stop the round. The
//! registry restores the caller's context while the panic unwinds.
//!
//! All methods take `&self` (interior mutability via `parking_lot::Mutex`).
//! The lock is never held while a listener runs, so listeners may register,
//! remove, or emit on the same emitter.

use std::sync::atomic::Ordering;

use parking_lot::Mutex;

use crate::registry::{ContextRegistry, Zones};

use super::listener::Listener;
use super::store::ListenerStore;

#[derive(Clone, Copy)]
enum Placement {
    Back,
    Front,
}

/// Context-capturing event emitter.
///
/// `T` is the event payload type and `R` the registry consulted for the
/// ambient context. Registration methods return `&Self` so calls chain:
///
/// ```
/// use zone_emitter::{Listener, ZoneEmitter};
///
/// let emitter: ZoneEmitter<u32> = ZoneEmitter::new();
/// let a = Listener::new(|n: &u32| assert_eq!(*n, 7));
/// let b = Listener::new(|_: &u32| {});
/// emitter.on("tick", &a).prepend_listener("tick", &b);
/// assert_eq!(emitter.listeners("tick"), vec![b, a]);
/// assert!(emitter.emit("tick", &7));
/// ```
pub struct ZoneEmitter<T, R: ContextRegistry = Zones> {
    registry: R,
    store: Mutex<ListenerStore<T, R::Context>>,
}

impl<T> ZoneEmitter<T> {
    /// Create an emitter backed by the thread-local zone stack.
    pub fn new() -> Self {
        Self::with_registry(Zones)
    }
}

impl<T> Default for ZoneEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R: ContextRegistry> ZoneEmitter<T, R> {
    /// Create an emitter that captures contexts from `registry`.
    pub fn with_registry(registry: R) -> Self {
        Self {
            registry,
            store: Mutex::new(ListenerStore::new()),
        }
    }

    /// The registry this emitter captures and rebinds contexts with.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Append `listener` to `event`, bound to the current context.
    pub fn on(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.register(event, listener, Placement::Back, false)
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.on(event, listener)
    }

    /// Insert `listener` at the front of `event`, bound to the current context.
    pub fn prepend_listener(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.register(event, listener, Placement::Front, false)
    }

    /// Like [`on`](Self::on), but the entry is removed right before its
    /// first invocation.
    pub fn once(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.register(event, listener, Placement::Back, true)
    }

    /// [`prepend_listener`](Self::prepend_listener) for a one-shot entry.
    pub fn prepend_once_listener(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.register(event, listener, Placement::Front, true)
    }

    fn register(
        &self,
        event: &str,
        listener: &Listener<T>,
        placement: Placement,
        once: bool,
    ) -> &Self {
        let context = self.registry.current();
        let entry_id = {
            let mut store = self.store.lock();
            match placement {
                Placement::Back => store.append(event, listener, context, once),
                Placement::Front => store.prepend(event, listener, context, once),
            }
        };
        tracing::trace!(
            event,
            entry_id,
            once,
            front = matches!(placement, Placement::Front),
            "registered listener"
        );
        self
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Remove the first registration of `listener` for `event`.
    ///
    /// Does nothing if `listener` is not registered (safe to call repeatedly).
    pub fn remove_listener(&self, event: &str, listener: &Listener<T>) -> &Self {
        let removed = self.store.lock().remove_first(event, listener);
        if let Some(entry_id) = removed {
            tracing::trace!(event, entry_id, "removed listener");
        }
        self
    }

    /// Alias of [`remove_listener`](Self::remove_listener).
    pub fn off(&self, event: &str, listener: &Listener<T>) -> &Self {
        self.remove_listener(event, listener)
    }

    /// Remove every listener of `event`, or of all events for `None`.
    pub fn remove_all_listeners(&self, event: Option<&str>) -> &Self {
        self.store.lock().clear(event);
        tracing::trace!(event = event.unwrap_or("*"), "removed all listeners");
        self
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// The callbacks registered for `event`, in dispatch order. Empty for
    /// unknown events.
    pub fn listeners(&self, event: &str) -> Vec<Listener<T>> {
        self.store.lock().listeners(event)
    }

    /// Number of entries registered for `event`, duplicates included.
    pub fn listener_count(&self, event: &str) -> usize {
        self.store.lock().len(event)
    }

    /// Events with at least one listener, sorted by name.
    pub fn event_names(&self) -> Vec<String> {
        self.store.lock().event_names()
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Call every listener of `event` with `payload`, each inside the context
    /// it was registered in. Returns `false` if there were no listeners.
    pub fn emit(&self, event: &str, payload: &T) -> bool {
        // Snapshot under the lock; the guard is dropped at the end of the
        // statement so listeners can re-enter the emitter.
        let snapshot = self.store.lock().snapshot(event);
        if snapshot.is_empty() {
            return false;
        }
        tracing::trace!(event, listeners = snapshot.len(), "emitting");

        for entry in snapshot {
            if entry.once {
                self.store.lock().remove_entry(event, entry.id);
                // A nested emit may already have fired this entry.
                if entry.fired.swap(true, Ordering::AcqRel) {
                    continue;
                }
            }
            self.registry.run(&entry.context, || entry.original.call(payload));
        }
        true
    }
}
