use super::Channel;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

pub(crate) trait Revoke: Send + Sync {
    fn revoke(&self, id: u64);
}

impl<T: 'static> Revoke for Channel<T> {
    fn revoke(&self, id: u64) {
        self.remove(id);
    }
}

/// Revocation token for one registration on an [`Event`](super::Event)
///
/// The token is bound to the exact registration that produced it, so two
/// subscriptions of the same callback revoke independently. Dropping the
/// token does *not* unsubscribe; the listener stays registered for the
/// channel's lifetime.
pub struct Subscription {
    id: u64,
    live: AtomicBool,
    channel: Weak<dyn Revoke>,
}

impl Subscription {
    pub(crate) fn new<T: 'static>(channel: &Arc<Channel<T>>, id: u64) -> Self {
        let weak: Weak<Channel<T>> = Arc::downgrade(channel);
        let channel: Weak<dyn Revoke> = weak;
        Self {
            id,
            live: AtomicBool::new(true),
            channel,
        }
    }

    /// Removes the registration this token was created for
    ///
    /// Idempotent: the first call removes exactly one registration, every
    /// later call is a no-op. Never touches another registration, even a
    /// duplicate of the same callback. Removing a listener mid-emission does
    /// not affect the snapshot currently being walked; only future emissions
    /// are prevented.
    pub fn unsubscribe(&self) {
        if !self.live.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(channel) = self.channel.upgrade() {
            channel.revoke(self.id);
        }
    }
}
