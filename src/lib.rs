#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_panics_doc)]

//! Synchronous in-process event subscription library
//!
//! One part of a program registers interest in future occurrences of an
//! event; another part announces the occurrence to every listener registered
//! at that moment. Delivery is synchronous, in-memory and single-process:
//! listeners run inline on the emitting caller's stack, in registration
//! order, and may themselves subscribe, unsubscribe or emit while an
//! emission is in progress.
//!
//! - [`Event<T>`](event::Event) — one independent channel of `T` payloads
//! - [`Events<K, T>`](registry::Events) — named channels, created lazily
//! - [`guard`] — panic isolation so one failing listener cannot stop delivery
//! - [`declare!`] — a fixed, typed name set as a generated struct

pub mod event;
pub mod guard;
pub mod registry;

pub use event::{Callback, Event, Subscription};
pub use guard::{panic_log, safe_call, ListenerPanic, PanicLog, PanicSink};
pub use registry::Events;

#[doc(hidden)]
pub use doc_comment::doc_comment as __doc_comment;

/// Declare structs of named [Event](crate::Event) channels
///
/// Each declared name becomes a private channel field plus an accessor method
/// of the same name, so the name set is fixed at compile time and every name
/// carries its own payload type.
///
/// ## Syntax
///
/// `<attrs>? <visibility>? events <name> { <event>(<payload type>); ... }`
///
/// ## Example
///
/// ```rust
/// use std::sync::{
///     atomic::{AtomicU32, Ordering},
///     Arc,
/// };
///
/// evoke::declare! {
///     /// Session lifecycle events
///     pub events SessionEvents {
///         connected(u32);
///         renamed(String);
///     }
/// }
///
/// let events = SessionEvents::new();
/// let hits = Arc::new(AtomicU32::new(0));
/// let counter = Arc::clone(&hits);
/// let token = events.connected().subscribe(move |id| {
///     counter.fetch_add(*id, Ordering::Relaxed);
/// });
///
/// events.connected().emit(&3);
/// events.renamed().emit(&"observer".to_string());
/// assert_eq!(hits.load(Ordering::Relaxed), 3);
///
/// token.unsubscribe();
/// events.connected().emit(&4);
/// assert_eq!(hits.load(Ordering::Relaxed), 3);
/// ```
#[macro_export]
macro_rules! declare {
    () => {};

    (
        $(#[$attr:meta])*
        $v:vis events $name:ident {
            $( $event:ident ($payload:ty); )*
        }
        $($next:tt)*
    ) => {
        $(#[$attr])*
        $v struct $name {
            $( $event: $crate::Event<$payload>, )*
        }

        impl $name {
            $crate::__doc_comment! {
                concat!("Creates a `", stringify!($name), "` with every channel empty"),
                $v fn new() -> Self {
                    Self {
                        $( $event: $crate::Event::new(), )*
                    }
                }
            }

            $(
                $crate::__doc_comment! {
                    concat!(
                        "The `", stringify!($event),
                        "` channel, carrying `", stringify!($payload), "` payloads",
                    ),
                    $v fn $event(&self) -> &$crate::Event<$payload> {
                        &self.$event
                    }
                }
            )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        $crate::declare!($($next)*);
    };
}
