//! `nl-bus` — Named broadcast channels and the posted-event loop for the
//! NFC Lab capture engine.
//!
//! Command, status, frame, and signal streams between the orchestrator and
//! task workers all flow over named typed channels owned by an explicit
//! [`ChannelRegistry`]:
//!
//! - **Registry**: `channel::<T>(name)` gets or creates; identity is the
//!   (name, payload type) pair and repeated lookups return the same channel
//! - **Channels**: multi-subscriber broadcast, per-channel FIFO, one
//!   callback runs to completion before the next value is delivered
//! - **Subscriptions**: released deterministically on drop
//! - **Event loop**: three-lane priority queue for events posted to the UI
//!   thread; high-priority values always drain first
//!
//! # Example
//!
//! ```
//! use nl_bus::ChannelRegistry;
//!
//! let registry = ChannelRegistry::new();
//! let channel = registry.channel::<u32>("radio.signal.raw");
//!
//! let _sub = channel.subscribe(|value| println!("got {value}"));
//! channel.publish(42);
//! ```

pub mod channel;
pub mod event_loop;
pub mod registry;

pub use channel::{Channel, Subscription};
pub use event_loop::{event_loop, EventLoop, EventPoster};
pub use registry::ChannelRegistry;
