//! Status normalization and subsystem initialization.
//!
//! One handler per status stream. Device handlers detect hot-plug by name
//! change and re-run initialization (persisted config merged over the
//! default table, then a Configure command); on steady-state updates they
//! forward `streamTime`/`sampleRate` to the paired decoder, deduplicated
//! against the last forwarded pair, and republish the snapshot to the UI.
//! All failures are absorbed here: a malformed payload or unknown device
//! type is logged and skipped, never propagated.

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use nl_common::{
    device_type_of, AppEvent, OperatingState, Priority, Responder, StatusEvent, TaskStatus,
};
use nl_settings::{read_config, save_config};

use crate::orchestrator::Inner;

/// What a device status update asks the orchestrator to do, decided under
/// the state lock and executed after it is released.
enum DeviceAction {
    /// New device name seen: run initialization.
    Initialize,
    /// Device filtered out by the allowlist: ignore it.
    Ignored,
    /// Steady state: forward the deduplicated clock fields, then republish.
    Forward(Option<Value>),
}

impl Inner {
    // --- logic device ------------------------------------------------------

    pub(crate) fn logic_device_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        let action = {
            let mut state = self.state.lock();

            if let Some(op) = status.state() {
                state.logic_device_enabled = op != OperatingState::Disabled;
            }

            if state.logic_device_name != status.name() {
                state.logic_device_name = status.name().to_owned();
                state.logic_device_type = device_type_of(status.name()).map(str::to_owned);

                if state.device_allowed(state.logic_device_type.as_deref()) {
                    DeviceAction::Initialize
                } else {
                    state.logic_device_type = None;
                    DeviceAction::Ignored
                }
            } else {
                let forward = clock_fields(&status);
                let fresh = !forward.is_empty()
                    && state.last_logic_forward.as_ref() != Some(&forward);
                if fresh {
                    state.last_logic_forward = Some(forward.clone());
                    DeviceAction::Forward(Some(Value::Object(forward)))
                } else {
                    DeviceAction::Forward(None)
                }
            }
        };

        match action {
            DeviceAction::Initialize => self.logic_device_initialize(),
            DeviceAction::Ignored => {
                info!(device = status.name(), "logic device not in allowlist, ignored");
            }
            DeviceAction::Forward(config) => {
                if let Some(config) = config {
                    self.task_logic_decoder_config(config, Responder::none());
                }
                self.sink
                    .post(AppEvent::LogicDeviceStatus(status.into_value()), Priority::Normal);
            }
        }
    }

    /// Merge persisted settings over the default table for the current
    /// device type and send the result as the device configuration.
    pub(crate) fn logic_device_initialize(&self) {
        let device_type = self.state.lock().logic_device_type.clone();

        let mut command = Map::new();

        if let Some(device_type) = device_type {
            let Some(defaults) = self.defaults.get(&device_type).and_then(Value::as_object)
            else {
                warn!(device_type = %device_type, "unable to configure logic, unknown device type");
                return;
            };

            let stored = {
                let settings = self.settings.lock();
                read_config(&settings, &format!("device.{device_type}"))
            };
            let stored = stored.as_object().cloned().unwrap_or_default();

            for (key, default_value) in defaults {
                let value = stored.get(key).cloned().unwrap_or_else(|| default_value.clone());
                command.insert(key.clone(), value);
            }
        }

        if !command.contains_key("enabled") {
            command.insert("enabled".to_owned(), Value::Bool(true));
        }

        if !command.contains_key("firmwarePath") {
            command.insert(
                "firmwarePath".to_owned(),
                self.options.firmware_path.display().to_string().into(),
            );
        }

        self.task_logic_device_config(Value::Object(command), Responder::none());
    }

    /// Apply a sparse UI update: send it to the device and persist it under
    /// the device type's settings group.
    pub(crate) fn logic_device_configure(&self, config: Value) {
        self.task_logic_device_config(config.clone(), Responder::none());

        let device_type = self.state.lock().logic_device_type.clone();
        if let Some(device_type) = device_type {
            self.persist(&config, &format!("device.{device_type}"));
        }
    }

    // --- logic decoder -----------------------------------------------------

    pub(crate) fn logic_decoder_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        if let Some(op) = status.state() {
            self.state.lock().logic_decoder_enabled = op != OperatingState::Disabled;
        }

        self.sink
            .post(AppEvent::LogicDecoderStatus(status.into_value()), Priority::Normal);
    }

    pub(crate) fn logic_decoder_initialize(&self) {
        let mut config = {
            let settings = self.settings.lock();
            read_config(&settings, "decoder.logic")
        };

        let fields = config.as_object_mut().expect("read_config yields an object");
        if !fields.contains_key("enabled") {
            fields.insert("enabled".to_owned(), Value::Bool(true));
        }

        self.task_logic_decoder_config(config, Responder::none());
    }

    pub(crate) fn logic_decoder_configure(&self, config: Value) {
        self.task_logic_decoder_config(config.clone(), Responder::none());
        self.persist(&config, "decoder.logic");
    }

    // --- radio device ------------------------------------------------------

    pub(crate) fn radio_device_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        let action = {
            let mut state = self.state.lock();

            if let Some(op) = status.state() {
                state.radio_device_enabled = op != OperatingState::Disabled;
            }

            if state.radio_device_name != status.name() {
                state.radio_device_name = status.name().to_owned();
                state.radio_device_type = device_type_of(status.name()).map(str::to_owned);

                if state.device_allowed(state.radio_device_type.as_deref()) {
                    DeviceAction::Initialize
                } else {
                    state.radio_device_type = None;
                    DeviceAction::Ignored
                }
            } else {
                let forward = clock_fields(&status);
                let fresh = !forward.is_empty()
                    && state.last_radio_forward.as_ref() != Some(&forward);
                if fresh {
                    state.last_radio_forward = Some(forward.clone());
                    DeviceAction::Forward(Some(Value::Object(forward)))
                } else {
                    DeviceAction::Forward(None)
                }
            }
        };

        match action {
            DeviceAction::Initialize => self.radio_device_initialize(),
            DeviceAction::Ignored => {
                info!(device = status.name(), "radio device not in allowlist, ignored");
            }
            DeviceAction::Forward(config) => {
                if let Some(config) = config {
                    self.task_radio_decoder_config(config, Responder::none());
                }
                self.sink
                    .post(AppEvent::RadioDeviceStatus(status.into_value()), Priority::Normal);
            }
        }
    }

    pub(crate) fn radio_device_initialize(&self) {
        let device_type = self.state.lock().radio_device_type.clone();

        let mut command = Map::new();

        if let Some(device_type) = device_type {
            let Some(defaults) = self.defaults.get(&device_type).and_then(Value::as_object)
            else {
                warn!(device_type = %device_type, "unable to configure radio, unknown device type");
                return;
            };

            let stored = {
                let settings = self.settings.lock();
                read_config(&settings, &format!("device.{device_type}"))
            };
            let stored = stored.as_object().cloned().unwrap_or_default();

            for (key, default_value) in defaults {
                let value = stored.get(key).cloned().unwrap_or_else(|| default_value.clone());
                command.insert(key.clone(), value);
            }
        }

        if !command.contains_key("enabled") {
            command.insert("enabled".to_owned(), Value::Bool(true));
        }

        self.task_radio_device_config(Value::Object(command), Responder::none());
    }

    pub(crate) fn radio_device_configure(&self, config: Value) {
        self.task_radio_device_config(config.clone(), Responder::none());

        let device_type = self.state.lock().radio_device_type.clone();
        if let Some(device_type) = device_type {
            self.persist(&config, &format!("device.{device_type}"));
        }
    }

    // --- radio decoder -----------------------------------------------------

    pub(crate) fn radio_decoder_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        if let Some(op) = status.state() {
            self.state.lock().radio_decoder_enabled = op != OperatingState::Disabled;
        }

        self.sink
            .post(AppEvent::RadioDecoderStatus(status.into_value()), Priority::Normal);
    }

    pub(crate) fn radio_decoder_initialize(&self) {
        let mut config = {
            let settings = self.settings.lock();
            read_config(&settings, "decoder.radio")
        };

        let fields = config.as_object_mut().expect("read_config yields an object");
        if !fields.contains_key("enabled") {
            fields.insert("enabled".to_owned(), Value::Bool(true));
        }

        self.task_radio_decoder_config(config, Responder::none());
    }

    pub(crate) fn radio_decoder_configure(&self, config: Value) {
        self.task_radio_decoder_config(config.clone(), Responder::none());
        self.persist(&config, "decoder.radio");
    }

    // --- spectrum ----------------------------------------------------------

    pub(crate) fn fourier_initialize(&self) {
        self.task_fourier_config(json!({ "enabled": true }), Responder::none());
    }

    pub(crate) fn fourier_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        self.sink
            .post(AppEvent::FourierStatus(status.into_value()), Priority::Normal);
    }

    // --- recorder / storage ------------------------------------------------

    pub(crate) fn recorder_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        self.sink.post(
            AppEvent::StorageStatus(status.clone().into_value()),
            Priority::Normal,
        );

        // Keep both decoder clocks aligned with the recording position.
        if let Some(stream_time) = status.stream_time() {
            self.task_logic_decoder_config(json!({ "streamTime": stream_time }), Responder::none());
            self.task_radio_decoder_config(json!({ "streamTime": stream_time }), Responder::none());
        }
    }

    pub(crate) fn storage_status_change(&self, event: &StatusEvent) {
        let Some(status) = TaskStatus::from_event(event) else {
            return;
        };

        self.sink
            .post(AppEvent::StorageStatus(status.into_value()), Priority::Normal);
    }

    pub(crate) fn storage_initialize(&self) {
        let config = json!({ "tempPath": self.options.temp_path.display().to_string() });
        self.task_storage_config(config, Responder::none());
    }

    // --- helpers -----------------------------------------------------------

    /// Persist a sparse configuration object and flush the settings file
    /// when one backs the store.
    fn persist(&self, config: &Value, group: &str) {
        let mut settings = self.settings.lock();
        save_config(&mut settings, config, group);

        if settings.has_backing_file() {
            if let Err(e) = settings.save() {
                warn!(group, error = %e, "failed to persist settings");
            }
        }
    }
}

/// The clock fields forwarded from a device to its paired decoder.
fn clock_fields(status: &TaskStatus) -> Map<String, Value> {
    let mut forward = Map::new();
    if let Some(stream_time) = status.stream_time() {
        forward.insert("streamTime".to_owned(), stream_time.into());
    }
    if let Some(sample_rate) = status.sample_rate() {
        forward.insert("sampleRate".to_owned(), sample_rate.into());
    }
    forward
}
