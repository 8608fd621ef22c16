//! Context-capturing event emission.
//!
//! # Modules
//!
//! - [`listener`]: [`Listener<T>`] handles, compared by identity.
//! - `store`: per-event ordered entries with snapshot support.
//! - [`zone_emitter`]: [`ZoneEmitter<T, R>`].

pub mod listener;
mod store;
pub mod zone_emitter;

pub use listener::{EntryId, Listener, ListenerFn};
pub use zone_emitter::ZoneEmitter;
