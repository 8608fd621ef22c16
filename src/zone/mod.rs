//! Zones: named execution contexts with a per-thread ambient stack.
//!
//! # Overview
//!
//! A [`Zone`] is an immutable, identity-compared handle. Every thread starts
//! in its own root zone; [`Zone::fork`] derives children and [`Zone::run`]
//! makes a zone ambient for the duration of a closure.
//!
//! ```
//! use zone_emitter::{Zone, ZoneSpec};
//!
//! let a = Zone::current().fork(ZoneSpec::named("A")).unwrap();
//! a.run(|| assert_eq!(Zone::current(), a));
//! assert!(Zone::current().is_root());
//! ```
//!
//! # Modules
//!
//! - [`spec`]: [`ZoneSpec`] fork options.
//! - `stack`: the thread-local stack and its [`ZoneGuard`].

pub mod spec;
mod stack;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, ZoneError};

pub use spec::ZoneSpec;
pub use stack::ZoneGuard;

static NEXT_ZONE_ID: AtomicU64 = AtomicU64::new(1);

const ROOT_NAME: &str = "<root>";

/// Process-unique zone identifier, mostly useful in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(u64);

impl ZoneId {
    fn next() -> Self {
        Self(NEXT_ZONE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Zone
// ============================================================================

struct ZoneInner {
    id: ZoneId,
    name: String,
    parent: Option<Zone>,
    properties: Map<String, Value>,
}

/// A named execution context.
///
/// Cloning is cheap and preserves identity: two `Zone`s compare equal only
/// when they are clones of the same fork.
#[derive(Clone)]
pub struct Zone {
    inner: Arc<ZoneInner>,
}

impl Zone {
    fn new_root() -> Self {
        Self {
            inner: Arc::new(ZoneInner {
                id: ZoneId::next(),
                name: ROOT_NAME.to_string(),
                parent: None,
                properties: Map::new(),
            }),
        }
    }

    /// The root zone of the calling thread.
    pub fn root() -> Zone {
        stack::root()
    }

    /// The zone that is ambient on the calling thread.
    pub fn current() -> Zone {
        stack::current()
    }

    pub fn id(&self) -> ZoneId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parent(&self) -> Option<&Zone> {
        self.inner.parent.as_ref()
    }

    /// Whether this zone has no parent.
    ///
    /// True for the root of *any* thread: a root captured on one thread and
    /// entered on another still reports `true` there, although it is not that
    /// thread's [`Zone::root`].
    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Derive a child zone from `spec`.
    ///
    /// Fails with [`ZoneError::InvalidName`] when the name is blank.
    pub fn fork(&self, spec: ZoneSpec) -> Result<Zone> {
        if spec.name.trim().is_empty() {
            return Err(ZoneError::InvalidName(spec.name));
        }
        let child = Zone {
            inner: Arc::new(ZoneInner {
                id: ZoneId::next(),
                name: spec.name,
                parent: Some(self.clone()),
                properties: spec.properties,
            }),
        };
        tracing::debug!(
            parent = %self.name(),
            zone = %child.name(),
            id = %child.id(),
            "forked zone"
        );
        Ok(child)
    }

    /// Look up a property on this zone or the nearest ancestor defining it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut zone = Some(self);
        while let Some(z) = zone {
            if let Some(value) = z.inner.properties.get(key) {
                return Some(value);
            }
            zone = z.parent();
        }
        None
    }

    /// [`get`](Self::get), decoded into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(|source| ZoneError::Property {
                zone: self.name().to_string(),
                key: key.to_string(),
                source,
            })
    }

    /// Make this zone ambient until the returned guard is dropped.
    pub fn enter(&self) -> ZoneGuard {
        stack::enter(self.clone())
    }

    /// Run `f` with this zone ambient, restoring the previous zone afterwards
    /// (also when `f` panics).
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }

    /// Bind `f` to this zone: every call of the returned closure runs inside
    /// it, whatever zone the caller is in.
    pub fn wrap<F, R>(&self, f: F) -> impl Fn() -> R + Send + Sync + 'static
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let zone = self.clone();
        move || zone.run(&f)
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Zone {}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("name", &self.inner.name)
            .field("id", &self.inner.id)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
