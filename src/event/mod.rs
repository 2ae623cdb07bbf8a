//! # Single-channel events
//!
//! [`Event<T>`] is the foundational primitive: one independent stream of `T`
//! payloads with its own listener sequence. Emission walks a snapshot of the
//! sequence captured at entry, so listeners may freely subscribe, unsubscribe
//! or emit recursively from inside their own invocation.

use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::guard::{safe_call, PanicSink};

mod subscription;


pub use subscription::*;

/// Listener callable registered on an [`Event`]
pub type Callback<T> = dyn Fn(&T) + Send + Sync;

struct Registration<T> {
    id: u64,
    callback: Arc<Callback<T>>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

pub(crate) struct Channel<T> {
    // The shared Vec is the copy-on-write mechanism: an in-progress emission
    // keeps a clone of the Arc alive as its snapshot, so make_mut redirects
    // any mutation into a fresh vector the snapshot never observes.
    registrations: Mutex<Arc<Vec<Registration<T>>>>,
    next_id: AtomicU64,
}

impl<T> Channel<T> {
    fn snapshot(&self) -> Arc<Vec<Registration<T>>> {
        Arc::clone(&*self.registrations.lock())
    }

    pub(crate) fn remove(&self, id: u64) {
        let mut registrations = self.registrations.lock();
        if let Some(at) = registrations.iter().position(|r| r.id == id) {
            Arc::make_mut(&mut *registrations).remove(at);
        }
    }
}

/// Handle to one independent stream of `T` payloads
///
/// Cloning yields another handle to the same channel. Listeners run
/// synchronously on the emitting caller's stack, in registration order.
pub struct Event<T> {
    channel: Arc<Channel<T>>,
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<T: 'static> Event<T> {
    /// Creates a fresh channel with no listeners
    pub fn new() -> Self {
        Self {
            channel: Arc::new(Channel {
                registrations: Mutex::new(Arc::new(Vec::new())),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Appends `callback` to the listener sequence
    ///
    /// Every call creates an independent registration, even for behaviorally
    /// identical callbacks; the returned [`Subscription`] revokes exactly this
    /// one. A registration made while an emission is in progress is not
    /// invoked by that emission.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.channel.next_id.fetch_add(1, Ordering::Relaxed);
        let mut registrations = self.channel.registrations.lock();
        Arc::make_mut(&mut *registrations).push(Registration {
            id,
            callback: Arc::new(callback),
        });
        drop(registrations);
        Subscription::new(&self.channel, id)
    }

    /// Delivers `payload` to every listener registered at this instant
    ///
    /// Listeners run in registration order, exactly once each, regardless of
    /// any mutation they trigger mid-walk. With no listeners the payload is
    /// silently dropped. A panicking listener unwinds out of `emit`, skipping
    /// the rest of the snapshot; use [`emit_guarded`](Self::emit_guarded) for
    /// delivery isolation.
    pub fn emit(&self, payload: &T) {
        let snapshot = self.channel.snapshot();
        for registration in snapshot.iter() {
            (registration.callback)(payload);
        }
    }

    /// Like [`emit`](Self::emit), but each listener is invoked through
    /// [`safe_call`], so one panicking listener cannot prevent delivery to
    /// the listeners after it. Captured panics arrive on the sink's
    /// [`PanicLog`](crate::guard::PanicLog).
    pub fn emit_guarded(&self, payload: &T, sink: &PanicSink) {
        let snapshot = self.channel.snapshot();
        for registration in snapshot.iter() {
            let _ = safe_call(sink, || (registration.callback)(payload));
        }
    }
}

impl<T: 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}
