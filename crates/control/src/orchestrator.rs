//! Decoder control orchestrator.
//!
//! The orchestrator owns every command/status/frame/signal channel handle,
//! translates control events from the UI into ordered task-command
//! sequences, tracks subsystem enablement, and republishes normalized
//! status to the UI sink. It holds no locks across channel publishes and
//! never blocks waiting for a task: sequencing is continuation-based, with
//! each step registered as the completion of the previous command.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use nl_bus::{ChannelRegistry, Subscription};
use nl_common::{
    AppEvent, Capability, CapabilityFilter, ControlEvent, EventSink, Priority, ReadFileParams,
    Responder, StartParams, SystemStartup, WriteFileParams,
};
use nl_settings::SettingsStore;

use crate::channels::ControlChannels;
use crate::config;
use crate::defaults::default_device_config;
use crate::probe;
use crate::state::ControlState;

/// Paths the orchestrator hands to tasks during initialization.
#[derive(Clone, Debug)]
pub struct ControlOptions {
    /// Working directory offered to the storage task.
    pub temp_path: PathBuf,
    /// Firmware directory offered to the logic device task.
    pub firmware_path: PathBuf,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            temp_path: std::env::temp_dir(),
            firmware_path: PathBuf::from("firmware"),
        }
    }
}

/// The control orchestrator. Construct once, deliver the startup event,
/// then feed it control events; dropping it releases every subscription.
pub struct Orchestrator {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) me: Weak<Inner>,
    pub(crate) channels: ControlChannels,
    pub(crate) defaults: Map<String, Value>,
    pub(crate) options: ControlOptions,
    pub(crate) settings: Mutex<SettingsStore>,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) state: Mutex<ControlState>,
    pub(crate) subscriptions: Mutex<Vec<Subscription>>,
}

impl Orchestrator {
    /// Create the orchestrator and all of its channels in the registry.
    /// Subscriptions are not taken until [`system_startup`](Self::system_startup).
    pub fn new(
        registry: &ChannelRegistry,
        settings: SettingsStore,
        sink: Arc<dyn EventSink>,
        options: ControlOptions,
    ) -> Self {
        let inner = Arc::new_cyclic(|me| Inner {
            me: me.clone(),
            channels: ControlChannels::create(registry),
            defaults: default_device_config(),
            options,
            settings: Mutex::new(settings),
            sink,
            state: Mutex::new(ControlState::default()),
            subscriptions: Mutex::new(Vec::new()),
        });

        Self { inner }
    }

    /// Subscribe to every status/frame/signal stream and run the
    /// capability-gated subsystem initialization. Idempotent: a repeated
    /// startup event never double-subscribes.
    pub fn system_startup(&self, startup: &SystemStartup) {
        info!("startup decoder control");

        self.inner.subscribe_streams();

        {
            let mut state = self.inner.state.lock();
            state.device_filter = startup.devices.as_deref().map(CapabilityFilter::new);
        }

        if let Some(pattern) = startup.features.as_deref() {
            let features = CapabilityFilter::new(pattern);

            if features.allows_capability(Capability::LogicDevice) {
                self.inner.logic_device_initialize();
            }

            if features.allows_capability(Capability::LogicDecode) {
                self.inner.logic_decoder_initialize();
            }

            if features.allows_capability(Capability::RadioDevice) {
                self.inner.radio_device_initialize();
            }

            if features.allows_capability(Capability::RadioDecode) {
                self.inner.radio_decoder_initialize();
            }

            if features.allows_capability(Capability::RadioSpectrum) {
                self.inner.fourier_initialize();
            }
        }

        self.inner.storage_initialize();
    }

    /// Release every stream subscription.
    pub fn system_shutdown(&self) {
        info!("shutdown decoder control");
        self.inner.subscriptions.lock().clear();
    }

    /// Dispatch one control event.
    pub fn handle(&self, event: &ControlEvent) {
        match event {
            ControlEvent::Start(params) => self.inner.do_start(params),
            ControlEvent::Stop => self.inner.do_stop(),
            ControlEvent::Pause => self.inner.do_pause(),
            ControlEvent::Resume => self.inner.do_resume(),
            ControlEvent::Clear => self.inner.do_clear(),
            ControlEvent::ReadFile(params) => self.inner.do_read_file(params),
            ControlEvent::WriteFile(params) => self.inner.do_write_file(params),
            ControlEvent::LogicDeviceConfig(params) => {
                info!("configure logic device");
                if let Some(config) = config::logic_device_config(params) {
                    self.inner.logic_device_configure(config);
                }
            }
            ControlEvent::LogicDecoderConfig(params) => {
                info!("configure logic decoder");
                if let Some(config) = config::logic_decoder_config(params) {
                    self.inner.logic_decoder_configure(config);
                }
            }
            ControlEvent::RadioDeviceConfig(params) => {
                info!("configure radio device");
                if let Some(config) = config::radio_device_config(params) {
                    self.inner.radio_device_configure(config);
                }
            }
            ControlEvent::RadioDecoderConfig(params) => {
                info!("configure radio decoder");
                if let Some(config) = config::radio_decoder_config(params) {
                    self.inner.radio_decoder_configure(config);
                }
            }
            ControlEvent::FourierConfig(params) => {
                if let Some(config) = config::fourier_config(params) {
                    self.inner.task_fourier_config(config, Responder::none());
                }
            }
        }
    }
}

impl Inner {
    /// Strong handle for continuation closures.
    fn arc(&self) -> Arc<Inner> {
        self.me.upgrade().expect("orchestrator is alive during dispatch")
    }

    fn subscribe_streams(&self) {
        let mut subscriptions = self.subscriptions.lock();
        if !subscriptions.is_empty() {
            debug!("streams already subscribed");
            return;
        }

        // Status handlers run orchestrator logic; each captures a weak
        // handle so subscriptions never keep the orchestrator alive.
        macro_rules! on {
            ($channel:ident, |$inner:ident, $value:ident| $body:expr) => {{
                let me = self.me.clone();
                self.channels.$channel.subscribe(move |$value| {
                    if let Some($inner) = me.upgrade() {
                        $body
                    }
                })
            }};
        }

        subscriptions.push(on!(logic_device_status, |inner, ev| {
            inner.logic_device_status_change(ev)
        }));
        subscriptions.push(on!(logic_decoder_status, |inner, ev| {
            inner.logic_decoder_status_change(ev)
        }));
        subscriptions.push(on!(radio_device_status, |inner, ev| {
            inner.radio_device_status_change(ev)
        }));
        subscriptions.push(on!(radio_decoder_status, |inner, ev| {
            inner.radio_decoder_status_change(ev)
        }));
        subscriptions.push(on!(fourier_status, |inner, ev| {
            inner.fourier_status_change(ev)
        }));
        subscriptions.push(on!(recorder_status, |inner, ev| {
            inner.recorder_status_change(ev)
        }));
        subscriptions.push(on!(storage_status, |inner, ev| {
            inner.storage_status_change(ev)
        }));

        // Decoded frames go to the UI at high priority so protocol events
        // are never starved behind waveform volume.
        subscriptions.push(on!(logic_decoder_frame, |inner, frame| {
            inner.sink.post(AppEvent::StreamFrame(frame.clone()), Priority::High)
        }));
        subscriptions.push(on!(radio_decoder_frame, |inner, frame| {
            inner.sink.post(AppEvent::StreamFrame(frame.clone()), Priority::High)
        }));
        subscriptions.push(on!(storage_frame, |inner, frame| {
            inner.sink.post(AppEvent::StreamFrame(frame.clone()), Priority::High)
        }));

        // Signal buffers are bulk data; low priority.
        subscriptions.push(on!(adaptive_signal, |inner, buffer| {
            inner.sink.post(AppEvent::SignalBuffer(buffer.clone()), Priority::Low)
        }));
        subscriptions.push(on!(storage_signal, |inner, buffer| {
            inner.sink.post(AppEvent::SignalBuffer(buffer.clone()), Priority::Low)
        }));
    }

    /// Start sequencing: clear the storage buffer, optionally begin a
    /// recording, then bring up the decoder/device chains.
    fn do_start(&self, params: &StartParams) {
        info!("start decoder and receiver tasks");

        self.state.lock().storage_path = params.storage_path.clone();

        if let Some(path) = params.storage_path.clone() {
            let inner = self.arc();
            self.task_storage_clear(Responder::on_complete(move || {
                let command = json!({ "storagePath": path });
                let next = inner.clone();
                inner.task_recorder_write(
                    command,
                    Responder::on_complete(move || next.start_decoders()),
                );
            }));
        } else {
            let inner = self.arc();
            self.task_storage_clear(Responder::on_complete(move || inner.start_decoders()));
        }
    }

    /// Bring up each subsystem whose device is present: decoder first, then
    /// the device once the decoder settles. A decoder rejection must not
    /// block acquisition, so the device starts on either outcome.
    fn start_decoders(&self) {
        let (logic_ready, logic_decode, radio_ready, radio_decode) = {
            let state = self.state.lock();
            (
                state.logic_device_enabled && state.logic_device_type.is_some(),
                state.logic_decoder_enabled,
                state.radio_device_enabled && state.radio_device_type.is_some(),
                state.radio_decoder_enabled,
            )
        };

        if logic_ready {
            if logic_decode {
                let inner = self.arc();
                self.task_logic_decoder_start(Responder::always(move || {
                    inner.task_logic_device_start(Responder::none())
                }));
            } else {
                self.task_logic_device_start(Responder::none());
            }
        }

        if radio_ready {
            if radio_decode {
                let inner = self.arc();
                self.task_radio_decoder_start(Responder::always(move || {
                    inner.task_radio_device_start(Responder::none())
                }));
            } else {
                self.task_radio_device_start(Responder::none());
            }
        }
    }

    /// Best-effort fan-out; no ordering between subsystems.
    fn do_stop(&self) {
        info!("stop decoder and receiver tasks");

        let (logic, radio, recording) = {
            let state = self.state.lock();
            (
                state.logic_device_type.is_some(),
                state.radio_device_type.is_some(),
                state.storage_path.is_some(),
            )
        };

        if logic {
            self.task_logic_device_stop(Responder::none());
        }

        if radio {
            self.task_radio_device_stop(Responder::none());
        }

        if recording {
            self.task_recorder_stop(Responder::none());
        }
    }

    fn do_pause(&self) {
        info!("pause decoder and receiver tasks");

        let (logic, radio) = {
            let state = self.state.lock();
            (
                state.logic_device_type.is_some(),
                state.radio_device_type.is_some(),
            )
        };

        if logic {
            self.task_logic_device_pause(Responder::none());
        }

        if radio {
            self.task_radio_device_pause(Responder::none());
        }
    }

    fn do_resume(&self) {
        info!("resume decoder and receiver tasks");

        let (logic, radio) = {
            let state = self.state.lock();
            (
                state.logic_device_type.is_some(),
                state.radio_device_type.is_some(),
            )
        };

        if logic {
            self.task_logic_device_resume(Responder::none());
        }

        if radio {
            self.task_radio_device_resume(Responder::none());
        }
    }

    fn do_clear(&self) {
        info!("clear capture buffers");
        self.task_storage_clear(Responder::none());
    }

    /// Route a file to the right task chain by extension; WAV captures are
    /// probed for channel count to pick the decoder.
    fn do_read_file(&self, params: &ReadFileParams) {
        let path = Path::new(&params.file_name);
        let command = json!({ "fileName": params.file_name });

        match path.extension().and_then(|e| e.to_str()) {
            Some("trz") => {
                let inner = self.arc();
                self.task_storage_clear(Responder::on_complete(move || {
                    inner.task_storage_read(command, Responder::none());
                }));
            }
            Some("wav") => {
                let channels = match probe::wav_channel_count(path) {
                    Ok(channels) => channels,
                    Err(e) => {
                        warn!(file = %params.file_name, error = %e, "unable to open file");
                        return;
                    }
                };

                let (logic_decode, radio_decode) = {
                    let state = self.state.lock();
                    (state.logic_decoder_enabled, state.radio_decoder_enabled)
                };

                // Three or more channels is a logic-analyzer capture.
                if channels >= 3 {
                    if logic_decode {
                        let inner = self.arc();
                        self.task_logic_decoder_start(Responder::on_complete(move || {
                            inner.task_recorder_read(command, Responder::none());
                        }));
                    } else {
                        self.task_recorder_read(command, Responder::none());
                    }
                } else if radio_decode {
                    let inner = self.arc();
                    self.task_radio_decoder_start(Responder::on_complete(move || {
                        inner.task_recorder_read(command, Responder::none());
                    }));
                } else {
                    self.task_recorder_read(command, Responder::none());
                }
            }
            _ => {
                debug!(file = %params.file_name, "unsupported file extension");
            }
        }
    }

    fn do_write_file(&self, params: &WriteFileParams) {
        if !params.file_name.ends_with(".trz") {
            debug!(file = %params.file_name, "unsupported file extension");
            return;
        }

        self.task_storage_write(config::write_file_command(params), Responder::none());
    }
}
