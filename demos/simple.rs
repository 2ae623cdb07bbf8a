use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use evoke::{panic_log, Events};

evoke::declare! {
    /// Player lifecycle events
    pub events PlayerEvents {
        spawned(String);
        scored(u32);
    }
}

fn main() {
    // Fixed name set, one payload type per name.
    let player = PlayerEvents::new();

    let token = player
        .spawned()
        .subscribe(|name| println!("spawned: {name}"));
    player.spawned().emit(&"alice".to_string());
    token.unsubscribe();
    player.spawned().emit(&"bob".to_string()); // no listeners left, dropped

    let total = Arc::new(AtomicU32::new(0));
    {
        let total = Arc::clone(&total);
        player.scored().subscribe(move |points| {
            total.fetch_add(*points, Ordering::Relaxed);
        });
    }
    player.scored().emit(&10);
    player.scored().emit(&5);
    println!("total score: {}", total.load(Ordering::Relaxed));

    // Open name set via the runtime registry, with guarded delivery.
    let bus = Events::<&'static str, String>::new();
    bus.subscribe("chat", |line| println!("chat: {line}"));
    bus.subscribe("chat", |_| panic!("misbehaving listener"));
    bus.subscribe("chat", |line| println!("chat again: {line}"));

    let (sink, mut log) = panic_log();
    bus.emit_guarded(&"chat", &"hello".to_string(), &sink);
    for captured in log.drain() {
        println!("captured: {captured:?}");
    }
}
