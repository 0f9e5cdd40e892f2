//! UI-facing event surface.
//!
//! The orchestrator republishes normalized task status, decoded frames, and
//! signal buffers through an [`EventSink`]. Frames post at high priority and
//! signal buffers at low priority so that protocol events are never starved
//! behind bulk waveform data; status posts in between.

use serde_json::Value;

use crate::frame::RawFrame;
use crate::signal::SignalBuffer;

/// Delivery priority of a posted event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

/// Event posted to the UI layer.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// Normalized logic device status.
    LogicDeviceStatus(Value),
    /// Normalized logic decoder status.
    LogicDecoderStatus(Value),
    /// Normalized radio device status.
    RadioDeviceStatus(Value),
    /// Normalized radio decoder status.
    RadioDecoderStatus(Value),
    /// Normalized spectrum task status.
    FourierStatus(Value),
    /// Normalized recorder/storage status.
    StorageStatus(Value),
    /// A decoded protocol frame.
    StreamFrame(RawFrame),
    /// A block of samples for waveform display.
    SignalBuffer(SignalBuffer),
}

/// Posting primitive provided by the application shell. Implementations must
/// be callable from worker threads; ordering within a priority level is
/// expected to be FIFO.
pub trait EventSink: Send + Sync {
    fn post(&self, event: AppEvent, priority: Priority);
}
