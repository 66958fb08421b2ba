//! State-change callbacks with unsubscribe handles.
//!
//! Delivery works on a snapshot of the registered callbacks taken before the
//! first call, with the list lock released. A callback may therefore drop its
//! own [`Subscription`] (or anyone else's) while it is running; removals take
//! effect from the next delivery on.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

pub struct Observers<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Registers `callback`. It stays registered until the returned handle is
    /// unsubscribed or dropped.
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self.registry.lock().callbacks.iter().map(|(_, cb)| cb.clone()).collect();
        for callback in snapshot {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.lock().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Observers::subscribe`].
pub struct Subscription<T> {
    id: u64,
    registry: Weak<Mutex<Registry<T>>>,
}

impl<T> Subscription<T> {
    /// Same as dropping the handle.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unsubscribed_callbacks_are_not_called() {
        let observers = Observers::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let subscription = observers.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        observers.notify(&1);
        subscription.unsubscribe();
        observers.notify(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn callback_can_unsubscribe_itself_during_delivery() {
        let observers = Observers::<u32>::new();
        let slot: Arc<Mutex<Option<Subscription<u32>>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(AtomicUsize::new(0));

        let inner_slot = slot.clone();
        let counter = calls.clone();
        let subscription = observers.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            inner_slot.lock().take();
        });
        *slot.lock() = Some(subscription);

        observers.notify(&1);
        observers.notify(&2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(observers.is_empty());
    }
}
