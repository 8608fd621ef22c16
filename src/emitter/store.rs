//! ListenerStore: per-event ordered listener entries.
//!
//! The store is plain data; locking and context capture live in
//! [`ZoneEmitter`](super::ZoneEmitter). A sequence that becomes empty is
//! dropped from the map, so `event_names` only reports live events.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::listener::{EntryId, Listener, ListenerEntry};

pub(crate) struct ListenerStore<T, C> {
    events: BTreeMap<String, Vec<ListenerEntry<T, C>>>,
    next_id: EntryId,
}

impl<T, C: Clone> ListenerStore<T, C> {
    pub(crate) fn new() -> Self {
        Self {
            events: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn entry(&mut self, original: &Listener<T>, context: C, once: bool) -> ListenerEntry<T, C> {
        let id = self.next_id;
        self.next_id += 1;
        ListenerEntry {
            id,
            original: original.clone(),
            context,
            once,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn append(
        &mut self,
        event: &str,
        original: &Listener<T>,
        context: C,
        once: bool,
    ) -> EntryId {
        let entry = self.entry(original, context, once);
        let id = entry.id;
        self.events.entry(event.to_string()).or_default().push(entry);
        id
    }

    pub(crate) fn prepend(
        &mut self,
        event: &str,
        original: &Listener<T>,
        context: C,
        once: bool,
    ) -> EntryId {
        let entry = self.entry(original, context, once);
        let id = entry.id;
        self.events
            .entry(event.to_string())
            .or_default()
            .insert(0, entry);
        id
    }

    /// Remove the first entry whose callback is `original`.
    pub(crate) fn remove_first(&mut self, event: &str, original: &Listener<T>) -> Option<EntryId> {
        self.remove_where(event, |entry| entry.original.ptr_eq(original))
    }

    /// Remove the entry with `id`. Returns `false` if it is already gone.
    pub(crate) fn remove_entry(&mut self, event: &str, id: EntryId) -> bool {
        self.remove_where(event, |entry| entry.id == id).is_some()
    }

    fn remove_where(
        &mut self,
        event: &str,
        matches: impl Fn(&ListenerEntry<T, C>) -> bool,
    ) -> Option<EntryId> {
        let entries = self.events.get_mut(event)?;
        let index = entries.iter().position(matches)?;
        let removed = entries.remove(index);
        if entries.is_empty() {
            self.events.remove(event);
        }
        Some(removed.id)
    }

    /// Clear one event, or every event when `event` is `None`.
    pub(crate) fn clear(&mut self, event: Option<&str>) {
        match event {
            Some(event) => {
                self.events.remove(event);
            }
            None => self.events.clear(),
        }
    }

    /// Copy of the event's entries, taken before dispatch.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<ListenerEntry<T, C>> {
        self.events.get(event).cloned().unwrap_or_default()
    }

    pub(crate) fn listeners(&self, event: &str) -> Vec<Listener<T>> {
        self.events
            .get(event)
            .map(|entries| entries.iter().map(|e| e.original.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn len(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    pub(crate) fn event_names(&self) -> Vec<String> {
        self.events.keys().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
