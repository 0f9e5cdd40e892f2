//! Decoded protocol frames — output of decoder tasks, input to views.

use std::ops::Deref;
use std::sync::Arc;

/// Technology the frame was decoded from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrameTech {
    #[default]
    None,
    NfcA,
    NfcB,
    NfcF,
    NfcV,
    Iso7816,
}

impl FrameTech {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::NfcA => "NfcA",
            Self::NfcB => "NfcB",
            Self::NfcF => "NfcF",
            Self::NfcV => "NfcV",
            Self::Iso7816 => "ISO7816",
        }
    }
}

/// Kind of event the frame represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Field switched off (radio only).
    CarrierOff,
    /// Field switched on (radio only).
    CarrierOn,
    /// Reader-to-card frame.
    Poll,
    /// Card-to-reader frame.
    Listen,
    /// Answer-to-reset (ISO 7816).
    Atr,
    /// Interface-device request (ISO 7816).
    Request,
    /// Card response (ISO 7816).
    Response,
    /// Combined request/response exchange (ISO 7816).
    Exchange,
}

/// Protocol phase the frame belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FramePhase {
    #[default]
    Carrier,
    Selection,
    Application,
}

/// Frame quality/shape flags, OR-combined in [`RawFrame::flags`].
pub mod flags {
    pub const SHORT_FRAME: u32 = 0x01;
    pub const ENCRYPTED: u32 = 0x02;
    pub const TRUNCATED: u32 = 0x08;
    pub const PARITY_ERROR: u32 = 0x10;
    pub const CRC_ERROR: u32 = 0x20;
    pub const SYNC_ERROR: u32 = 0x40;
}

/// A decoded protocol frame with its position in the sample stream.
///
/// The payload is shared; cloning a frame is cheap and forwarding it across
/// channels never copies the data.
#[derive(Clone, Debug)]
pub struct RawFrame {
    /// Decoded technology.
    pub tech: FrameTech,
    /// Event kind.
    pub kind: FrameType,
    /// Protocol phase.
    pub phase: FramePhase,
    /// OR-combined [`flags`].
    pub flags: u32,
    /// Data rate in bits per second, 0 when not applicable.
    pub rate: u32,
    /// First sample of the frame in the capture stream.
    pub sample_start: u64,
    /// One past the last sample of the frame.
    pub sample_end: u64,
    /// Frame start in seconds from capture begin.
    pub time_start: f64,
    /// Frame end in seconds from capture begin.
    pub time_end: f64,
    /// Decoded payload bytes.
    data: Arc<[u8]>,
}

impl RawFrame {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tech: FrameTech,
        kind: FrameType,
        phase: FramePhase,
        rate: u32,
        sample_start: u64,
        sample_end: u64,
        time_start: f64,
        time_end: f64,
        data: Vec<u8>,
    ) -> Self {
        Self {
            tech,
            kind,
            phase,
            flags: 0,
            rate,
            sample_start,
            sample_end,
            time_start,
            time_end,
            data: data.into(),
        }
    }

    /// Set quality flags, builder style.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Whether all given flags are set.
    pub fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags == flags
    }

    /// Payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Frame duration in seconds.
    pub fn duration(&self) -> f64 {
        self.time_end - self.time_start
    }
}

impl Deref for RawFrame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}
