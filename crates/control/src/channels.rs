//! The orchestrator's channel set.
//!
//! Every stream between the orchestrator and the task workers has a fixed
//! name. All channels are created up front when the orchestrator is built;
//! task workers attach to the same registry and look the channels up by the
//! constants in [`names`].

use nl_bus::{Channel, ChannelRegistry};
use nl_common::{Command, RawFrame, SignalBuffer, StatusEvent};

/// Channel names shared between the orchestrator and task workers.
pub mod names {
    // status streams (task -> orchestrator)
    pub const LOGIC_DECODER_STATUS: &str = "logic.decoder.status";
    pub const LOGIC_DEVICE_STATUS: &str = "logic.receiver.status";
    pub const RADIO_DECODER_STATUS: &str = "radio.decoder.status";
    pub const RADIO_DEVICE_STATUS: &str = "radio.receiver.status";
    pub const FOURIER_STATUS: &str = "fourier.status";
    pub const RECORDER_STATUS: &str = "recorder.status";
    pub const STORAGE_STATUS: &str = "storage.status";

    // command streams (orchestrator -> task)
    pub const LOGIC_DECODER_COMMAND: &str = "logic.decoder.command";
    pub const LOGIC_DEVICE_COMMAND: &str = "logic.receiver.command";
    pub const RADIO_DECODER_COMMAND: &str = "radio.decoder.command";
    pub const RADIO_DEVICE_COMMAND: &str = "radio.receiver.command";
    pub const FOURIER_COMMAND: &str = "fourier.command";
    pub const RECORDER_COMMAND: &str = "recorder.command";
    pub const STORAGE_COMMAND: &str = "storage.command";

    // decoded frame streams (task -> orchestrator)
    pub const LOGIC_DECODER_FRAME: &str = "logic.decoder.frame";
    pub const RADIO_DECODER_FRAME: &str = "radio.decoder.frame";
    pub const STORAGE_FRAME: &str = "storage.frame";

    // signal streams (task -> orchestrator)
    pub const ADAPTIVE_SIGNAL: &str = "adaptive.signal";
    pub const STORAGE_SIGNAL: &str = "storage.signal";
}

/// Handles to every channel the orchestrator uses.
pub struct ControlChannels {
    // status
    pub logic_decoder_status: Channel<StatusEvent>,
    pub logic_device_status: Channel<StatusEvent>,
    pub radio_decoder_status: Channel<StatusEvent>,
    pub radio_device_status: Channel<StatusEvent>,
    pub fourier_status: Channel<StatusEvent>,
    pub recorder_status: Channel<StatusEvent>,
    pub storage_status: Channel<StatusEvent>,

    // commands
    pub logic_decoder_command: Channel<Command>,
    pub logic_device_command: Channel<Command>,
    pub radio_decoder_command: Channel<Command>,
    pub radio_device_command: Channel<Command>,
    pub fourier_command: Channel<Command>,
    pub recorder_command: Channel<Command>,
    pub storage_command: Channel<Command>,

    // frames
    pub logic_decoder_frame: Channel<RawFrame>,
    pub radio_decoder_frame: Channel<RawFrame>,
    pub storage_frame: Channel<RawFrame>,

    // signals
    pub adaptive_signal: Channel<SignalBuffer>,
    pub storage_signal: Channel<SignalBuffer>,
}

impl ControlChannels {
    /// Look up (or create) every channel in the registry.
    pub fn create(registry: &ChannelRegistry) -> Self {
        Self {
            logic_decoder_status: registry.channel(names::LOGIC_DECODER_STATUS),
            logic_device_status: registry.channel(names::LOGIC_DEVICE_STATUS),
            radio_decoder_status: registry.channel(names::RADIO_DECODER_STATUS),
            radio_device_status: registry.channel(names::RADIO_DEVICE_STATUS),
            fourier_status: registry.channel(names::FOURIER_STATUS),
            recorder_status: registry.channel(names::RECORDER_STATUS),
            storage_status: registry.channel(names::STORAGE_STATUS),

            logic_decoder_command: registry.channel(names::LOGIC_DECODER_COMMAND),
            logic_device_command: registry.channel(names::LOGIC_DEVICE_COMMAND),
            radio_decoder_command: registry.channel(names::RADIO_DECODER_COMMAND),
            radio_device_command: registry.channel(names::RADIO_DEVICE_COMMAND),
            fourier_command: registry.channel(names::FOURIER_COMMAND),
            recorder_command: registry.channel(names::RECORDER_COMMAND),
            storage_command: registry.channel(names::STORAGE_COMMAND),

            logic_decoder_frame: registry.channel(names::LOGIC_DECODER_FRAME),
            radio_decoder_frame: registry.channel(names::RADIO_DECODER_FRAME),
            storage_frame: registry.channel(names::STORAGE_FRAME),

            adaptive_signal: registry.channel(names::ADAPTIVE_SIGNAL),
            storage_signal: registry.channel(names::STORAGE_SIGNAL),
        }
    }
}
