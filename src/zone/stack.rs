//! Per-thread ambient zone stack.
//!
//! The stack is only ever grown through [`enter`], which hands back a
//! [`ZoneGuard`]. Dropping the guard truncates the stack to the depth it had
//! before the push, so the previous zone becomes ambient again on every exit
//! path, including unwinding out of a panicking callback.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::Zone;

thread_local! {
    static ROOT: Zone = Zone::new_root();
    static STACK: RefCell<Vec<Zone>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn root() -> Zone {
    ROOT.with(Zone::clone)
}

pub(crate) fn current() -> Zone {
    STACK
        .with(|stack| stack.borrow().last().cloned())
        .unwrap_or_else(root)
}

pub(crate) fn depth() -> usize {
    STACK.with(|stack| stack.borrow().len())
}

pub(crate) fn enter(zone: Zone) -> ZoneGuard {
    let depth = STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let depth = stack.len();
        stack.push(zone);
        depth
    });
    ZoneGuard {
        depth,
        _not_send: PhantomData,
    }
}

/// Keeps a zone ambient on the current thread until dropped.
///
/// Returned by [`Zone::enter`]. The guard is `!Send`: it must be dropped on
/// the thread whose stack it pushed onto.
#[must_use = "the zone is only ambient while the guard is alive"]
pub struct ZoneGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl std::fmt::Debug for ZoneGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneGuard").field("depth", &self.depth).finish()
    }
}

impl Drop for ZoneGuard {
    fn drop(&mut self) {
        // `try_with`: the guard may outlive the stack during thread teardown.
        let _ = STACK.try_with(|stack| {
            if let Ok(mut stack) = stack.try_borrow_mut() {
                stack.truncate(self.depth);
            }
        });
    }
}
