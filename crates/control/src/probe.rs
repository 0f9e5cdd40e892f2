//! Capture-file probing.
//!
//! Reading a `.wav` capture requires knowing which decoder to route it to
//! before any task starts: three or more channels means a logic-analyzer
//! capture, one or two means a radio capture. Only the stream parameters
//! are read here; sample decoding is the recorder task's job.

use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

/// Errors raised while probing a capture file.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("unable to open file: {0}")]
    FileOpen(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("no audio track in file")]
    NoAudioTrack,

    #[error("no channel description in file")]
    NoChannels,
}

/// Number of channels in a WAV capture file.
pub fn wav_channel_count(path: &Path) -> Result<usize, ProbeError> {
    let file = File::open(path)
        .map_err(|e| ProbeError::FileOpen(format!("{}: {e}", path.display())))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| ProbeError::UnsupportedFormat(e.to_string()))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(ProbeError::NoAudioTrack)?;

    let channels = track
        .codec_params
        .channels
        .ok_or(ProbeError::NoChannels)?
        .count();

    debug!(path = %path.display(), channels, "Probed capture file");
    Ok(channels)
}
