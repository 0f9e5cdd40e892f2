//! Default parameter sets per device type.
//!
//! When a device attaches for the first time its type selects one of these
//! entries; persisted settings override defaults key by key. A device type
//! with no entry here is left unconfigured until settings provide values.

use serde_json::{json, Map, Value};

/// Default configuration table keyed by device type.
pub fn default_device_config() -> Map<String, Value> {
    let table = json!({
        "radio.airspy": {
            "enabled": true,
            "centerFreq": 40680000,
            "sampleRate": 10000000,
            "gainMode": 1,      // linearity
            "gainValue": 4,     // 4db
            "mixerAgc": 0,
            "tunerAgc": 0,
            "biasTee": 0,
            "directSampling": 0,
        },
        "radio.hydrasdr": {
            "enabled": true,
            "centerFreq": 40680000,
            "sampleRate": 10000000,
            "gainMode": 1,      // linearity
            "gainValue": 4,     // 4db
            "mixerAgc": 0,
            "tunerAgc": 0,
            "biasTee": 0,
            "directSampling": 0,
        },
        "radio.rtlsdr": {
            "enabled": true,
            "centerFreq": 27120000,
            "sampleRate": 3200000,
            "gainMode": 1,      // manual
            "gainValue": 77,    // 7.7db
            "mixerAgc": 0,
            "tunerAgc": 0,
            "biasTee": 0,
            "directSampling": 0,
        },
        "radio.miri": {
            "enabled": true,
            "centerFreq": 13560000,
            "sampleRate": 10000000,
            "gainMode": 1,      // manual
            "gainValue": 0,     // 0db
            "mixerAgc": 0,
            "tunerAgc": 0,
            "biasTee": 0,
            "directSampling": 0,
        },
        "logic.dslogic": {
            "enabled": true,
            "sampleRate": 10000000,
            "vThreshold": 1.0,
            "channels": [0, 2, 3],
        },
    });

    match table {
        Value::Object(map) => map,
        _ => unreachable!("table literal is an object"),
    }
}
