//! Payload-free change notifications.
//!
//! Services own a [`Notifier`] and call [`Notifier::notify`] after each state
//! change. Subscribers are expected to re-read whatever they render; the
//! notification carries no diff.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn()>;

/// Single-threaded observer list.
///
/// Dispatch is synchronous and iterates over a snapshot of the subscribers,
/// so a callback may read the owning service, subscribe, or unsubscribe
/// without invalidating the loop.
#[derive(Default)]
pub struct Notifier {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback)>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.borrow_mut();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    /// Calls every current subscriber once, in subscription order.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        tracing::trace!(subscribers = snapshot.len(), "broadcasting change");
        for cb in snapshot {
            cb();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.len())
            .finish_non_exhaustive()
    }
}
