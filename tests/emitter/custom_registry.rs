//! The emitter works against any `ContextRegistry`, not only zones.

use std::cell::RefCell;
use std::rc::Rc;

use zone_emitter::{ContextRegistry, Listener, ZoneEmitter};

/// Registry whose contexts are plain labels held on a shared stack.
#[derive(Clone, Default)]
struct LabelRegistry {
    stack: Rc<RefCell<Vec<&'static str>>>,
    runs: Rc<RefCell<Vec<&'static str>>>,
}

impl LabelRegistry {
    fn enter<R>(&self, label: &'static str, f: impl FnOnce() -> R) -> R {
        self.run(&label, f)
    }
}

struct Pop(Rc<RefCell<Vec<&'static str>>>);

impl Drop for Pop {
    fn drop(&mut self) {
        self.0.borrow_mut().pop();
    }
}

impl ContextRegistry for LabelRegistry {
    type Context = &'static str;

    fn current(&self) -> &'static str {
        self.stack.borrow().last().copied().unwrap_or("none")
    }

    fn run<R>(&self, context: &&'static str, f: impl FnOnce() -> R) -> R {
        self.runs.borrow_mut().push(*context);
        self.stack.borrow_mut().push(*context);
        let _pop = Pop(Rc::clone(&self.stack));
        f()
    }
}

#[test]
fn captures_registry_context_at_registration() {
    let registry = LabelRegistry::default();
    let emitter = ZoneEmitter::with_registry(registry.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));

    // Listener callbacks must be Send + Sync, so the registry's own run log
    // is what gets checked rather than anything captured by the closure.
    let listener = Listener::new(|_: &u8| {});

    registry.enter("first", || emitter.on("evt", &listener));
    registry.enter("second", || emitter.prepend_listener("evt", &listener));
    registry.enter("emitter", || {
        assert!(emitter.emit("evt", &0));
        seen.borrow_mut().push(emitter.registry().current());
    });

    // `enter` records its own run before the emitter dispatches; the
    // prepended entry runs first.
    assert_eq!(
        *registry.runs.borrow(),
        vec!["first", "second", "emitter", "second", "first"]
    );
    assert_eq!(*seen.borrow(), vec!["emitter"]);
    assert!(registry.stack.borrow().is_empty());
}

#[test]
fn each_entry_runs_in_its_captured_context_in_order() {
    let registry = LabelRegistry::default();
    let emitter = ZoneEmitter::with_registry(registry.clone());
    let listener = Listener::new(|_: &u8| {});

    registry.enter("a", || emitter.on("evt", &listener));
    registry.enter("b", || emitter.on("evt", &listener));
    emitter.once("evt", &listener);
    registry.runs.borrow_mut().clear();

    emitter.emit("evt", &1);
    assert_eq!(*registry.runs.borrow(), vec!["a", "b", "none"]);

    registry.runs.borrow_mut().clear();
    emitter.emit("evt", &2);
    assert_eq!(*registry.runs.borrow(), vec!["a", "b"]);
}

#[test]
fn no_registry_runs_without_listeners() {
    let registry = LabelRegistry::default();
    let emitter: ZoneEmitter<u8, LabelRegistry> = ZoneEmitter::with_registry(registry.clone());

    assert!(!emitter.emit("evt", &1));
    assert!(registry.runs.borrow().is_empty());
}
