//! Sample buffers — output of acquisition devices, input to decoders and
//! waveform views.

use std::sync::Arc;

/// Buffer content kind, reported by the producing task.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Raw interleaved samples from an acquisition device.
    #[default]
    Raw,
    /// Envelope/absolute value samples produced for display.
    Adaptive,
    /// Spectrum bins from the Fourier task.
    Spectrum,
}

/// An immutable block of f32 samples with its position in the stream.
///
/// Samples are shared; cloning is cheap and forwarding across channels never
/// copies the data.
#[derive(Clone, Debug)]
pub struct SignalBuffer {
    /// Sample rate of the stream in Hz.
    pub sample_rate: u32,
    /// Absolute offset of the first sample in the stream.
    pub offset: u64,
    /// Decimation applied by the producer.
    pub decimation: u32,
    /// Samples per logical element (2 for I/Q pairs).
    pub stride: u32,
    /// Interleaved channel count.
    pub interleave: u32,
    /// Producer-assigned buffer id.
    pub id: u32,
    /// Content kind.
    pub kind: SignalKind,
    data: Arc<[f32]>,
}

impl SignalBuffer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data: Vec<f32>,
        sample_rate: u32,
        offset: u64,
        decimation: u32,
        stride: u32,
        interleave: u32,
        id: u32,
        kind: SignalKind,
    ) -> Self {
        Self {
            sample_rate,
            offset,
            decimation,
            stride,
            interleave,
            id,
            kind,
            data: data.into(),
        }
    }

    /// All samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Number of raw f32 values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of logical elements (`len / stride`).
    pub fn elements(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride as usize
        }
    }

    /// Duration covered by this buffer in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.elements() as f64 * self.decimation.max(1) as f64 / self.sample_rate as f64
        }
    }
}
