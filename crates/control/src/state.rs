//! Mutable orchestrator state.
//!
//! All fields are mutated from channel callbacks and control dispatch; the
//! lock is held only while reading or writing fields, never across a
//! channel publish.

use serde_json::{Map, Value};

use nl_common::CapabilityFilter;

/// Per-subsystem enablement, device identity, and forwarding caches.
#[derive(Default)]
pub(crate) struct ControlState {
    /// Recording target remembered by the last Start, cleared when absent.
    pub storage_path: Option<String>,

    /// Device names as last reported; empty until a device attaches.
    pub logic_device_name: String,
    pub radio_device_name: String,

    /// Device types derived from the name's scheme prefix.
    pub logic_device_type: Option<String>,
    pub radio_device_type: Option<String>,

    /// Device enablement, from the latest status snapshot.
    pub logic_device_enabled: bool,
    pub radio_device_enabled: bool,

    /// Decoder enablement, from the latest status snapshot.
    pub logic_decoder_enabled: bool,
    pub radio_decoder_enabled: bool,

    /// Last streamTime/sampleRate forwarded to each decoder, for dedup.
    pub last_logic_forward: Option<Map<String, Value>>,
    pub last_radio_forward: Option<Map<String, Value>>,

    /// Device-type allowlist from the startup event; `None` admits all.
    pub device_filter: Option<CapabilityFilter>,
}

impl ControlState {
    /// Whether a newly derived device type passes the allowlist.
    pub fn device_allowed(&self, device_type: Option<&str>) -> bool {
        match (&self.device_filter, device_type) {
            (Some(filter), Some(device_type)) => filter.allows(device_type),
            _ => true,
        }
    }
}
