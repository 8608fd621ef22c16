use std::sync::{Arc, Mutex};

use zone_emitter::{Listener, Zone, ZoneEmitter, ZoneSpec};

/// Helper: create a shared call-log that listeners append to.
fn make_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn named(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Listener<()> {
    let log = Arc::clone(log);
    Listener::new(move |_: &()| log.lock().unwrap().push(name.to_string()))
}

#[test]
fn returns_all_listeners_for_an_event() {
    let a = Zone::current().fork(ZoneSpec::named("A")).unwrap();
    let b = Zone::current().fork(ZoneSpec::named("B")).unwrap();
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let log = make_log();
    let expect_a = named(&log, "a");
    let should_not_run = named(&log, "never");

    a.run(|| emitter.on("test", &expect_a));
    b.run(|| emitter.on("test", &should_not_run));

    assert_eq!(emitter.listeners("test"), vec![expect_a, should_not_run]);
}

#[test]
fn returns_empty_list_when_an_event_has_no_listeners() {
    let a = Zone::current().fork(ZoneSpec::named("A")).unwrap();
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();

    a.run(|| {
        assert!(emitter.listeners("test").is_empty());
        assert_eq!(emitter.listener_count("test"), 0);
    });
}

#[test]
fn emit_without_listeners_returns_false() {
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    assert!(!emitter.emit("unregistered-event", &()));
}

#[test]
fn prepends_listener_by_order() {
    let a = Zone::current().fork(ZoneSpec::named("A")).unwrap();
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let log = make_log();
    let listener_a = named(&log, "A");
    let listener_b = named(&log, "B");

    a.run(|| {
        emitter.on("test", &listener_a);
        emitter.on("test", &listener_b);
        assert_eq!(emitter.listeners("test"), vec![listener_a.clone(), listener_b.clone()]);
        emitter.emit("test", &());
        assert_eq!(*log.lock().unwrap(), vec!["A", "B"]);
        log.lock().unwrap().clear();

        emitter.remove_all_listeners(Some("test"));

        emitter.on("test", &listener_a);
        emitter.prepend_listener("test", &listener_b);
        assert_eq!(emitter.listeners("test"), vec![listener_b.clone(), listener_a.clone()]);
        emitter.emit("test", &());
        assert_eq!(*log.lock().unwrap(), vec!["B", "A"]);
    });
}

#[test]
fn prepend_goes_before_everything_already_registered() {
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let log = make_log();
    let a = named(&log, "A");
    let b = named(&log, "B");
    let c = named(&log, "C");

    emitter.on("test", &a).on("test", &b).prepend_listener("test", &c);

    assert_eq!(emitter.listeners("test"), vec![c, a, b]);
    emitter.emit("test", &());
    assert_eq!(*log.lock().unwrap(), vec!["C", "A", "B"]);
}

#[test]
fn duplicate_registrations_fire_once_each() {
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let log = make_log();
    let a = named(&log, "A");

    emitter.on("test", &a).on("test", &a);

    assert_eq!(emitter.listener_count("test"), 2);
    emitter.emit("test", &());
    assert_eq!(*log.lock().unwrap(), vec!["A", "A"]);
}

#[test]
fn events_are_independent() {
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let log = make_log();
    let a = named(&log, "A");
    let b = named(&log, "B");

    emitter.on("first", &a).on("second", &b);
    emitter.emit("second", &());

    assert_eq!(*log.lock().unwrap(), vec!["B"]);
    assert_eq!(emitter.event_names(), vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn distinct_handles_of_the_same_closure_are_different_listeners() {
    let emitter: ZoneEmitter<()> = ZoneEmitter::new();
    let noop = |_: &()| {};
    let first = Listener::new(noop);
    let second = Listener::new(noop);

    emitter.on("test", &first);

    assert_ne!(first, second);
    assert_eq!(emitter.listeners("test"), vec![first]);
}
