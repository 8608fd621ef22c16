//! The context seam between emitters and whatever tracks ambient context.
//!
//! [`ZoneEmitter`](crate::ZoneEmitter) never touches ambient state itself; it
//! asks a [`ContextRegistry`] what is current when a listener is registered
//! and asks it to run the listener "as" that context on emission.

use crate::zone::Zone;

/// Source of ambient execution context.
pub trait ContextRegistry {
    /// Opaque context handle. Compared only by identity, never mutated.
    type Context: Clone + Send + Sync + 'static;

    /// The context ambient for the caller. Must have no side effects.
    fn current(&self) -> Self::Context;

    /// Run `f` with `context` ambient and return its result.
    ///
    /// Implementations must restore the previously ambient context before
    /// returning and while a panic from `f` unwinds through them.
    fn run<R>(&self, context: &Self::Context, f: impl FnOnce() -> R) -> R;
}

/// [`ContextRegistry`] backed by the thread-local [`Zone`] stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zones;

impl ContextRegistry for Zones {
    type Context = Zone;

    fn current(&self) -> Zone {
        Zone::current()
    }

    fn run<R>(&self, context: &Zone, f: impl FnOnce() -> R) -> R {
        context.run(f)
    }
}
