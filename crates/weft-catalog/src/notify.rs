// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change-notification plumbing shared by the inventory and CSS registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle returned by a subscription; pass back to unsubscribe.
pub type SubscriptionId = u64;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A set of change subscribers notified synchronously, in subscription order.
pub(crate) struct SubscriberSet<T> {
    subscribers: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T> SubscriberSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn subscribe(
        &self,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut subscribers = self.subscribers.lock().expect("subscriber set poisoned");
        subscribers.push((id, Arc::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock().expect("subscriber set poisoned");
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub(crate) fn notify(&self, change: &T) {
        // Snapshot so a callback can subscribe/unsubscribe without deadlock.
        let snapshot: Vec<Callback<T>> = {
            let subscribers = self.subscribers.lock().expect("subscriber set poisoned");
            subscribers.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for callback in snapshot {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn subscribers_fire_in_subscription_order() {
        let set: SubscriberSet<&str> = SubscriberSet::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b"] {
            let order = order.clone();
            set.subscribe(move |_| order.lock().unwrap().push(tag));
        }
        set.notify(&"change");
        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let set: SubscriberSet<u32> = SubscriberSet::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let id = {
            let hits = hits.clone();
            set.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        set.notify(&1);
        assert!(set.unsubscribe(id));
        assert!(!set.unsubscribe(id));
        set.notify(&2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
