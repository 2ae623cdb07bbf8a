use super::*;
use crate::guard::panic_log;
use parking_lot::Mutex;
use std::sync::Arc;

#[test]
fn emitting_an_unknown_name_is_a_no_op() {
    let events = Events::<&'static str, i32>::new();
    events.emit(&"missing", &1);
}

#[test]
fn names_are_isolated() {
    let events = Events::<&'static str, String>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let seen = Arc::clone(&seen);
        events.subscribe("x", move |p: &String| seen.lock().push(p.clone()));
    }

    events.emit(&"y", &"ignored".to_string());
    assert!(seen.lock().is_empty());

    events.emit(&"x", &"delivered".to_string());
    assert_eq!(*seen.lock(), ["delivered"]);
}

#[test]
fn channels_are_created_lazily_and_retained() {
    let events = Events::<&'static str, i32>::new();
    let count = Arc::new(Mutex::new(0));

    let token = {
        let count = Arc::clone(&count);
        events.subscribe("tick", move |n| *count.lock() += n)
    };
    events.emit(&"tick", &2);

    token.unsubscribe();
    events.emit(&"tick", &3);
    assert_eq!(*count.lock(), 2);

    // The empty channel is retained and picked back up by a new subscriber.
    let _token = {
        let count = Arc::clone(&count);
        events.subscribe("tick", move |n| *count.lock() += n)
    };
    events.emit(&"tick", &5);
    assert_eq!(*count.lock(), 7);
}

#[test]
fn per_name_order_is_registration_order() {
    let events = Events::<&'static str, i32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second"] {
        let seen = Arc::clone(&seen);
        events.subscribe("n", move |v| seen.lock().push(format!("{tag}:{v}")));
    }

    events.emit(&"n", &9);
    assert_eq!(*seen.lock(), ["first:9", "second:9"]);
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Name {
    Lifecycle,
    Io,
}

enum Signal {
    Connected(u32),
    Data(Vec<u8>),
}

#[test]
fn enum_keys_give_a_fixed_name_set() {
    let events = Events::<Name, Signal>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let seen = Arc::clone(&seen);
        events.subscribe(Name::Lifecycle, move |signal| {
            if let Signal::Connected(id) = signal {
                seen.lock().push(*id);
            }
        });
    }

    events.emit(&Name::Lifecycle, &Signal::Connected(7));
    events.emit(&Name::Io, &Signal::Data(vec![1]));
    assert_eq!(*seen.lock(), [7]);
}

#[test]
fn listeners_may_reenter_the_registry() {
    let events = Arc::new(Events::<&'static str, i32>::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let registry = Arc::clone(&events);
        let seen = Arc::clone(&seen);
        events.subscribe("seed", move |n| {
            let seen = Arc::clone(&seen);
            registry.subscribe("grown", move |m| seen.lock().push(*m));
            registry.emit(&"grown", &(n * 2));
        });
    }

    events.emit(&"seed", &4);
    assert_eq!(*seen.lock(), [8]);
}

#[test]
fn guarded_emission_reaches_every_listener() {
    let events = Events::<&'static str, i32>::new();
    let (sink, mut log) = panic_log();
    let seen = Arc::new(Mutex::new(Vec::new()));

    events.subscribe("n", |_| panic!("boom"));
    {
        let seen = Arc::clone(&seen);
        events.subscribe("n", move |v| seen.lock().push(*v));
    }

    events.emit_guarded(&"n", &1, &sink);
    assert_eq!(*seen.lock(), [1]);
    assert_eq!(log.drain().len(), 1);
}
