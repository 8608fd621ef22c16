//! Event emitters whose listeners always run in the context they were
//! registered in.
//!
//! A [`ZoneEmitter`] captures the ambient context (by default the current
//! [`Zone`]) on every registration and rebinds it around every invocation,
//! while otherwise behaving like a conventional event emitter.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use zone_emitter::{Listener, Zone, ZoneEmitter, ZoneSpec};
//!
//! let a = Zone::current().fork(ZoneSpec::named("A")).unwrap();
//! let b = Zone::current().fork(ZoneSpec::named("B")).unwrap();
//! let emitter: ZoneEmitter<&str> = ZoneEmitter::new();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! let listener = Listener::new(move |v: &&str| {
//!     log.lock().unwrap().push(format!("{}:{v}", Zone::current().name()));
//! });
//!
//! a.run(|| emitter.on("test", &listener));
//! b.run(|| emitter.emit("test", &"value"));
//! assert_eq!(*seen.lock().unwrap(), vec!["A:value"]);
//! ```

pub mod emitter;
pub mod error;
pub mod registry;
pub mod zone;

pub use emitter::{Listener, ZoneEmitter};
pub use error::{Result, ZoneError};
pub use registry::{ContextRegistry, Zones};
pub use zone::{Zone, ZoneGuard, ZoneId, ZoneSpec};
