//! # Guarded listener invocation
//!
//! A panicking listener must not prevent delivery to the listeners after it,
//! and must not unwind through the emitting caller. [`safe_call`] catches the
//! panic and defers it through a channel: the emitter keeps walking, and the
//! host drains the [`PanicLog`] whenever it chooses to surface failures.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};


/// A panic captured from a listener
pub struct ListenerPanic {
    cause: Box<dyn Any + Send + 'static>,
}

impl ListenerPanic {
    /// The panic message, when the payload carries one
    pub fn message(&self) -> Option<&str> {
        if let Some(message) = self.cause.downcast_ref::<&'static str>() {
            Some(message)
        } else if let Some(message) = self.cause.downcast_ref::<String>() {
            Some(message)
        } else {
            None
        }
    }

    /// The raw panic payload
    pub fn into_cause(self) -> Box<dyn Any + Send + 'static> {
        self.cause
    }

    /// Resumes unwinding with the captured payload on the caller's stack
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.cause)
    }
}

impl fmt::Debug for ListenerPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "ListenerPanic({message:?})"),
            None => f.write_str("ListenerPanic(..)"),
        }
    }
}

/// Where [`safe_call`] sends captured panics
///
/// Cheap to clone; every clone feeds the same [`PanicLog`].
#[derive(Clone)]
pub struct PanicSink {
    sender: UnboundedSender<ListenerPanic>,
}

/// The receiving end of [`panic_log`]
pub struct PanicLog {
    receiver: UnboundedReceiver<ListenerPanic>,
}

/// Creates a sink/log pair for deferred listener failures
pub fn panic_log() -> (PanicSink, PanicLog) {
    let (sender, receiver) = unbounded_channel();
    (PanicSink { sender }, PanicLog { receiver })
}

impl PanicLog {
    /// Receives the next captured panic
    ///
    /// Returns `None` once every [`PanicSink`] clone has been dropped.
    pub async fn recv(&mut self) -> Option<ListenerPanic> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv)
    pub fn try_recv(&mut self) -> Option<ListenerPanic> {
        self.receiver.try_recv().ok()
    }

    /// Drains every panic captured so far
    pub fn drain(&mut self) -> Vec<ListenerPanic> {
        let mut drained = Vec::new();
        while let Some(captured) = self.try_recv() {
            drained.push(captured);
        }
        drained
    }
}

/// Invokes `f`, deferring a panic to `sink` instead of unwinding the caller
///
/// Returns `None` when `f` panicked. If the paired [`PanicLog`] has been
/// dropped the capture has nowhere to go, and the panic is resumed inline
/// rather than discarded.
pub fn safe_call<R>(sink: &PanicSink, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(cause) => {
            if let Err(unsent) = sink.sender.send(ListenerPanic { cause }) {
                panic::resume_unwind(unsent.0.cause);
            }
            None
        }
    }
}
