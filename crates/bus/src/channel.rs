//! Broadcast channel with serialized FIFO dispatch.
//!
//! A channel queues published values and drains them one at a time: the
//! publisher that finds the channel idle becomes the dispatcher and delivers
//! queued values to every subscriber in subscription order. Publishing from
//! inside a callback enqueues without recursion, so callbacks may freely
//! publish to their own channel. At most one dispatcher runs per channel at
//! any time, which keeps subscriber callbacks serialized — state mutated only
//! inside callbacks of one channel needs no extra locking.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    callback: Callback<T>,
}

struct State<T> {
    subscribers: Vec<Entry<T>>,
    queue: VecDeque<T>,
    dispatching: bool,
    next_id: u64,
}

struct Shared<T> {
    name: String,
    state: Mutex<State<T>>,
}

/// A named, typed, multi-subscriber broadcast stream. Cheap to clone; all
/// clones refer to the same stream.
pub struct Channel<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Send + 'static> Channel<T> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.to_owned(),
                state: Mutex::new(State {
                    subscribers: Vec::new(),
                    queue: VecDeque::new(),
                    dispatching: false,
                    next_id: 0,
                }),
            }),
        }
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Register a callback for every published value. The callback runs on
    /// whichever thread is dispatching the channel, never reentrantly with
    /// itself. Dropping the returned subscription unregisters it.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut state = self.shared.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push(Entry {
                id,
                callback: Arc::new(callback),
            });
            id
        };

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.state.lock().subscribers.retain(|entry| entry.id != id);
            }
        })
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// Broadcast a value to all subscribers. Values are delivered in publish
    /// order; the call drains the queue unless another dispatch is already
    /// running, in which case the value is left for the active dispatcher.
    pub fn publish(&self, value: T) {
        let mut state = self.shared.state.lock();
        state.queue.push_back(value);

        if state.dispatching {
            return;
        }
        state.dispatching = true;

        while let Some(value) = state.queue.pop_front() {
            // Snapshot subscribers and release the lock while callbacks run,
            // so callbacks may publish or (un)subscribe without deadlocking.
            let callbacks: Vec<Callback<T>> = state
                .subscribers
                .iter()
                .map(|entry| entry.callback.clone())
                .collect();
            drop(state);

            for callback in callbacks {
                callback(&value);
            }

            state = self.shared.state.lock();
        }

        state.dispatching = false;
    }
}

/// Token owning one channel subscription; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Explicitly release the subscription (equivalent to dropping).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
