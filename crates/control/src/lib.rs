//! `nl-control` — Decoder control orchestrator for the NFC Lab capture engine.
//!
//! The orchestrator sits between the UI layer and the task workers
//! (acquisition devices, protocol decoders, recorder, trace storage,
//! spectrum). It owns the full named-channel set, translates control events
//! into ordered command sequences, tracks per-subsystem enablement and
//! device identity, persists configuration, and republishes normalized
//! status/frames/signals to the UI sink:
//!
//! - **Channels**: `ControlChannels` and the names in [`channels::names`]
//! - **Dispatch**: `Orchestrator::handle` — sparse-merge Configure payloads,
//!   the Start diamond (storage → recorder → decoder/device chains), stop/
//!   pause/resume fan-out, file read/write routing
//! - **Status**: hot-plug re-initialization, clock forwarding with dedup,
//!   default device table in [`defaults`]
//! - **Probing**: WAV channel count in [`probe`] decides the decoder route
//!
//! Task workers are external: they subscribe to their command channel and
//! publish status/frame/signal events back through the same registry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nl_bus::{event_loop, ChannelRegistry};
//! use nl_common::{AppEvent, ControlEvent, StartParams, SystemStartup};
//! use nl_control::{ControlOptions, Orchestrator};
//! use nl_settings::SettingsStore;
//!
//! let registry = ChannelRegistry::new();
//! let (poster, _events) = event_loop::<AppEvent>();
//!
//! let control = Orchestrator::new(
//!     &registry,
//!     SettingsStore::new(),
//!     Arc::new(poster),
//!     ControlOptions::default(),
//! );
//!
//! control.system_startup(&SystemStartup {
//!     features: Some("logic|radio".into()),
//!     devices: None,
//! });
//!
//! control.handle(&ControlEvent::Start(StartParams::default()));
//! ```

pub mod channels;
pub mod config;
pub mod defaults;
pub mod orchestrator;
pub mod probe;

mod state;
mod status;
mod tasks;

pub use channels::{names, ControlChannels};
pub use config::{
    fourier_config, logic_decoder_config, logic_device_config, radio_decoder_config,
    radio_device_config, write_file_command,
};
pub use defaults::default_device_config;
pub use orchestrator::{ControlOptions, Orchestrator};
pub use probe::{wav_channel_count, ProbeError};
