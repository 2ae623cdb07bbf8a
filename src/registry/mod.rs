//! # Named-channel registry
//!
//! [`Events<K, T>`] maps event names to lazily-created [`Event`] channels,
//! giving callers an addressable multi-event namespace while reusing the
//! single-channel subscription machinery unchanged. An enum key type pins the
//! name set down at compile time; a tagged-union payload type lets each name
//! carry its own shape of data.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;

use crate::event::{Event, Subscription};
use crate::guard::PanicSink;

#[cfg(test)]
mod test;

/// Registry of independent named channels sharing one payload type
///
/// Channels are created on first subscription and never removed: a name once
/// used keeps its (possibly empty) channel for the registry's lifetime. The
/// registry lock is released before any listener runs, so listeners may call
/// back into the registry.
pub struct Events<K, T> {
    channels: Mutex<HashMap<K, Event<T>>>,
}

impl<K: Eq + Hash, T: 'static> Events<K, T> {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Registers `callback` under `name`, creating the channel if needed
    ///
    /// The returned token is the channel's own [`Subscription`], unchanged.
    pub fn subscribe(
        &self,
        name: K,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription {
        let event = self
            .channels
            .lock()
            .entry(name)
            .or_insert_with(Event::new)
            .clone();
        event.subscribe(callback)
    }

    /// Delivers `payload` to the listeners registered under `name`
    ///
    /// A name nobody has ever subscribed under is a silent no-op. Listeners
    /// under other names are never invoked.
    pub fn emit(&self, name: &K, payload: &T) {
        let event = self.channels.lock().get(name).cloned();
        if let Some(event) = event {
            event.emit(payload);
        }
    }

    /// Like [`emit`](Self::emit), with per-listener panic isolation via
    /// [`Event::emit_guarded`]
    pub fn emit_guarded(&self, name: &K, payload: &T, sink: &PanicSink) {
        let event = self.channels.lock().get(name).cloned();
        if let Some(event) = event {
            event.emit_guarded(payload, sink);
        }
    }
}

impl<K: Eq + Hash, T: 'static> Default for Events<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
