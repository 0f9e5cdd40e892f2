//! Control events — requests from the UI layer to the orchestrator.
//!
//! Each command carries a parameter struct whose optional fields are
//! `Option<T>`. Only fields the UI explicitly set are `Some`, and only those
//! reach the Configure payload sent to a task; everything else is left
//! untouched downstream. Defaults for required-with-fallback values (such as
//! the write range bounds) are applied at dispatch time.

use serde::{Deserialize, Serialize};

/// System startup notification, delivered once after the application shell
/// has finished bootstrapping.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStartup {
    /// Allowlist pattern for subsystem capabilities. `None` disables all
    /// optional subsystems.
    pub features: Option<String>,
    /// Allowlist pattern for device types. `None` admits every device.
    pub devices: Option<String>,
}

/// Control request issued by the UI layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlEvent {
    /// Begin acquisition and decoding.
    Start(StartParams),
    /// Stop every active subsystem, best effort.
    Stop,
    /// Pause acquisition devices.
    Pause,
    /// Resume acquisition devices.
    Resume,
    /// Clear captured data buffers.
    Clear,
    /// Load frames or samples from a file.
    ReadFile(ReadFileParams),
    /// Persist captured frames to a trace file.
    WriteFile(WriteFileParams),
    /// Reconfigure the logic analyzer device.
    LogicDeviceConfig(LogicDeviceParams),
    /// Reconfigure the logic protocol decoder.
    LogicDecoderConfig(LogicDecoderParams),
    /// Reconfigure the radio receiver device.
    RadioDeviceConfig(RadioDeviceParams),
    /// Reconfigure the radio protocol decoder.
    RadioDecoderConfig(RadioDecoderParams),
    /// Reconfigure the spectrum analysis task.
    FourierConfig(FourierParams),
}

/// Parameters for [`ControlEvent::Start`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartParams {
    /// When set, raw signal capture is also recorded to this path.
    pub storage_path: Option<String>,
}

/// Parameters for [`ControlEvent::ReadFile`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileParams {
    pub file_name: String,
}

/// Parameters for [`ControlEvent::WriteFile`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileParams {
    pub file_name: String,
    /// Range start in seconds; 0 when absent.
    pub time_start: Option<f64>,
    /// Range end in seconds; 0 when absent.
    pub time_end: Option<f64>,
    pub sample_rate: Option<u32>,
}

/// Parameters for [`ControlEvent::LogicDeviceConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogicDeviceParams {
    pub enabled: Option<bool>,
}

/// Parameters for [`ControlEvent::LogicDecoderConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogicDecoderParams {
    pub enabled: Option<bool>,
    pub sample_rate: Option<i64>,
    pub stream_time: Option<i64>,
    pub debug_enabled: Option<bool>,
    pub iso7816: Iso7816Params,
}

/// ISO 7816 protocol options of the logic decoder.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Iso7816Params {
    pub enabled: Option<bool>,
}

impl Iso7816Params {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
    }
}

/// Parameters for [`ControlEvent::RadioDeviceConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioDeviceParams {
    pub enabled: Option<bool>,
    pub center_freq: Option<i64>,
    pub sample_rate: Option<i64>,
    pub gain_mode: Option<i64>,
    pub gain_value: Option<i64>,
    pub mixer_agc: Option<i64>,
    pub tuner_agc: Option<i64>,
    pub bias_tee: Option<i64>,
    pub direct_sampling: Option<i64>,
}

/// Parameters for [`ControlEvent::RadioDecoderConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioDecoderParams {
    pub enabled: Option<bool>,
    pub sample_rate: Option<i64>,
    pub stream_time: Option<i64>,
    pub debug_enabled: Option<bool>,
    pub power_level_threshold: Option<f32>,
    pub nfca: ProtocolParams,
    pub nfcb: ProtocolParams,
    pub nfcf: ProtocolParams,
    pub nfcv: ProtocolParams,
}

/// Per-protocol options of the radio decoder.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolParams {
    pub enabled: Option<bool>,
    pub correlation_threshold: Option<f32>,
    pub minimum_modulation_deep: Option<f32>,
    pub maximum_modulation_deep: Option<f32>,
}

impl ProtocolParams {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.correlation_threshold.is_none()
            && self.minimum_modulation_deep.is_none()
            && self.maximum_modulation_deep.is_none()
    }
}

/// Parameters for [`ControlEvent::FourierConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FourierParams {
    pub enabled: Option<bool>,
}
