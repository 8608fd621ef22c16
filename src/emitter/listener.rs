use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Closure type for event listeners.
pub type ListenerFn<T> = dyn Fn(&T) + Send + Sync;

/// A listener ID unique within one emitter's store.
pub type EntryId = u64;

/// Cloneable handle to a listener callback.
///
/// Identity is the allocation: clones of one `Listener` are equal and can be
/// used to remove each other, while two `Listener::new` calls never compare
/// equal even when built from the same closure.
pub struct Listener<T> {
    callback: Arc<ListenerFn<T>>,
}

impl<T> Listener<T> {
    /// Wrap `callback` in a new handle with its own identity.
    pub fn new(callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback directly, in whatever context is ambient.
    pub fn call(&self, payload: &T) {
        (self.callback)(payload)
    }

    /// Whether both handles share one allocation, i.e. are the same listener.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.callback), Arc::as_ptr(&other.callback))
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Listener<T> {}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

// ============================================================================
// ListenerEntry
// ============================================================================

/// One registration: the caller's callback plus the context captured when it
/// was registered. Entries are never edited in place.
pub(crate) struct ListenerEntry<T, C> {
    pub(crate) id: EntryId,
    pub(crate) original: Listener<T>,
    pub(crate) context: C,
    pub(crate) once: bool,
    /// Shared by every snapshot copy; set by the first dispatch of a `once`
    /// entry so nested emits cannot fire it again.
    pub(crate) fired: Arc<AtomicBool>,
}

impl<T, C: Clone> Clone for ListenerEntry<T, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            original: self.original.clone(),
            context: self.context.clone(),
            once: self.once,
            fired: Arc::clone(&self.fired),
        }
    }
}
