//! Sparse configuration builders.
//!
//! Configure commands are monotonic partial updates: the payload contains
//! exactly the fields the UI set on the control event, so settings the user
//! did not touch are never clobbered downstream. Builders return `None`
//! when no field was set, and no command is sent at all.

use serde_json::{Map, Value};

use nl_common::{
    FourierParams, Iso7816Params, LogicDecoderParams, LogicDeviceParams, ProtocolParams,
    RadioDecoderParams, RadioDeviceParams, WriteFileParams,
};

fn put<T: Into<Value>>(config: &mut Map<String, Value>, key: &str, field: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = field {
        config.insert(key.to_owned(), value.clone().into());
    }
}

fn non_empty(config: Map<String, Value>) -> Option<Value> {
    if config.is_empty() {
        None
    } else {
        Some(Value::Object(config))
    }
}

/// Payload for a logic device Configure, when any field is set.
pub fn logic_device_config(params: &LogicDeviceParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    non_empty(config)
}

/// Payload for a logic decoder Configure, when any field is set.
pub fn logic_decoder_config(params: &LogicDecoderParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    put(&mut config, "sampleRate", &params.sample_rate);
    put(&mut config, "streamTime", &params.stream_time);
    put(&mut config, "debugEnabled", &params.debug_enabled);

    if let Some(iso7816) = iso7816_config(&params.iso7816) {
        let mut protocol = Map::new();
        protocol.insert("iso7816".to_owned(), iso7816);
        config.insert("protocol".to_owned(), Value::Object(protocol));
    }

    non_empty(config)
}

fn iso7816_config(params: &Iso7816Params) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    non_empty(config)
}

/// Payload for a radio device Configure, when any field is set.
pub fn radio_device_config(params: &RadioDeviceParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    put(&mut config, "centerFreq", &params.center_freq);
    put(&mut config, "sampleRate", &params.sample_rate);
    put(&mut config, "gainMode", &params.gain_mode);
    put(&mut config, "gainValue", &params.gain_value);
    put(&mut config, "mixerAgc", &params.mixer_agc);
    put(&mut config, "tunerAgc", &params.tuner_agc);
    put(&mut config, "biasTee", &params.bias_tee);
    put(&mut config, "directSampling", &params.direct_sampling);
    non_empty(config)
}

/// Payload for a radio decoder Configure, when any field is set.
pub fn radio_decoder_config(params: &RadioDecoderParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    put(&mut config, "sampleRate", &params.sample_rate);
    put(&mut config, "streamTime", &params.stream_time);
    put(&mut config, "debugEnabled", &params.debug_enabled);
    put(&mut config, "powerLevelThreshold", &params.power_level_threshold);

    let mut protocol = Map::new();
    for (name, proto) in [
        ("nfca", &params.nfca),
        ("nfcb", &params.nfcb),
        ("nfcf", &params.nfcf),
        ("nfcv", &params.nfcv),
    ] {
        if let Some(fields) = protocol_config(proto) {
            protocol.insert(name.to_owned(), fields);
        }
    }
    if !protocol.is_empty() {
        config.insert("protocol".to_owned(), Value::Object(protocol));
    }

    non_empty(config)
}

fn protocol_config(params: &ProtocolParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    put(&mut config, "correlationThreshold", &params.correlation_threshold);
    put(&mut config, "minimumModulationDeep", &params.minimum_modulation_deep);
    put(&mut config, "maximumModulationDeep", &params.maximum_modulation_deep);
    non_empty(config)
}

/// Payload for a spectrum task Configure, when any field is set.
pub fn fourier_config(params: &FourierParams) -> Option<Value> {
    let mut config = Map::new();
    put(&mut config, "enabled", &params.enabled);
    non_empty(config)
}

/// Payload for a trace Write command. Range bounds default to zero; the
/// sample rate is included only when the UI supplied one.
pub fn write_file_command(params: &WriteFileParams) -> Value {
    let mut command = Map::new();
    command.insert("fileName".to_owned(), params.file_name.clone().into());
    command.insert(
        "timeStart".to_owned(),
        params.time_start.unwrap_or(0.0).into(),
    );
    command.insert("timeEnd".to_owned(), params.time_end.unwrap_or(0.0).into());
    put(&mut command, "sampleRate", &params.sample_rate);
    Value::Object(command)
}
