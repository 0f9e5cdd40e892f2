//! Device identity helpers.
//!
//! Device names follow a scheme-like convention, `<type>://<address>`, e.g.
//! `radio.airspy://0x1a2b` or `logic.dslogic://usb-2-7`. The type prefix
//! selects the default-configuration entry and driver for the device.

/// Extract the device type from a device name: the text before the first
/// `://`. Returns `None` when the separator is missing or the prefix is
/// empty.
pub fn device_type_of(name: &str) -> Option<&str> {
    match name.split_once("://") {
        Some(("", _)) => None,
        Some((scheme, _)) => Some(scheme),
        None => None,
    }
}
