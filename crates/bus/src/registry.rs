//! Channel registry — explicit owner of all named channels.
//!
//! The registry replaces ambient global channel lookup: it is constructed
//! once and shared by reference (or `Arc`) with every component that needs
//! channel access. Channel identity is the (name, payload type) pair; the
//! same name with two different payload types yields two distinct channels.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::channel::Channel;

/// Owns every named channel in the process.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: Mutex<HashMap<(String, TypeId), Box<dyn Any + Send + Sync>>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the channel with the given name and payload type.
    /// Repeated calls return handles to the same channel.
    pub fn channel<T: Send + Sync + 'static>(&self, name: &str) -> Channel<T> {
        let mut channels = self.channels.lock();
        let key = (name.to_owned(), TypeId::of::<T>());

        if let Some(existing) = channels.get(&key) {
            return existing
                .downcast_ref::<Channel<T>>()
                .expect("registry entry matches its TypeId key")
                .clone();
        }

        debug!(channel = name, "Creating channel");
        let channel = Channel::<T>::new(name);
        channels.insert(key, Box::new(channel.clone()));
        channel
    }

    /// Number of channels created so far.
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }
}
