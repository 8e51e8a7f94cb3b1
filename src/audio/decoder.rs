// src/audio/decoder.rs

use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use crate::audio::types::{AudioClip, AudioInfo};
use crate::error::{AudioError, Result};

/// Decode raw audio bytes to planar PCM samples in memory
///
/// Container probing and codec work are delegated to symphonia, so this
/// accepts anything the enabled codecs understand: MP3, FLAC, WAV, OGG
/// Vorbis, AAC, and more. Bytes that are not a recognized audio format
/// fail with a `DecodeFailed` error.
///
/// # Arguments
/// * `bytes` - The complete raw file contents
/// * `extension_hint` - Optional file extension (e.g. "mp3") to guide probing
///
/// # Returns
/// An [`AudioClip`] holding all decoded samples, one vector per channel
pub fn decode_audio_bytes(bytes: Vec<u8>, extension_hint: Option<&str>) -> Result<AudioClip> {
    let source: Box<dyn MediaSource> = Box::new(Cursor::new(bytes));
    let mss = MediaSourceStream::new(source, Default::default());

    // Create a hint to help symphonia detect the format
    let mut hint = Hint::new();
    if let Some(extension) = extension_hint {
        hint.with_extension(extension);
    }

    // Probe the media source to detect format
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::DecodeFailed(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Find the default audio track (skip video/subtitle tracks)
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::DecodeFailed("No audio track found".to_string()))?;

    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AudioError::DecodeFailed("Sample rate not found".to_string()))?;

    // Create decoder for this track
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::DecodeFailed(format!("Failed to create decoder: {}", e)))?;

    // Channel count comes from the first decoded buffer, so tracks whose
    // metadata omits it (some MP3s) need no special case.
    let mut channels: Vec<Vec<f32>> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(_) => break, // End of stream
        };

        // Skip packets from other tracks (e.g., video, album art)
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| AudioError::DecodeFailed(format!("Decode error: {}", e)))?;

        append_planes(&decoded, &mut channels);
    }

    if channels.is_empty() || channels[0].is_empty() {
        return Err(AudioError::DecodeFailed(
            "No audio data decoded".to_string(),
        ));
    }

    let clip = AudioClip::new(channels, sample_rate)?;

    tracing::debug!(
        frames = clip.frames(),
        channels = clip.channel_count(),
        sample_rate = clip.sample_rate(),
        "decoded audio clip"
    );

    Ok(clip)
}

/// Decode an audio file to planar PCM samples in memory
///
/// Convenience wrapper around [`decode_audio_bytes`] that reads the file
/// and hints the prober with the file extension.
///
/// # Example
/// ```no_run
/// use audiocut::audio::decode_audio_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let clip = decode_audio_file("song.mp3")?;
/// println!("Loaded {} seconds of audio", clip.duration_seconds());
/// # Ok(())
/// # }
/// ```
pub fn decode_audio_file<P: AsRef<Path>>(path: P) -> Result<AudioClip> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|e| AudioError::FileOpen {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let extension = path.extension().and_then(|e| e.to_str());
    decode_audio_bytes(bytes, extension)
}

/// Get audio file metadata without decoding all samples
///
/// Much faster than [`decode_audio_file`] for just getting duration/info.
/// Duration is taken from the track's frame count and may be zero when the
/// container does not report one.
pub fn probe_info<P: AsRef<Path>>(path: P) -> Result<AudioInfo> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    let file = File::open(path).map_err(|e| AudioError::FileOpen {
        path: path_str.clone(),
        source: e,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::DecodeFailed(format!("Failed to probe: {}", e)))?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::DecodeFailed("No audio track".to_string()))?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    // Calculate duration from frame count
    let duration_seconds = if let (Some(n_frames), Some(sr)) =
        (track.codec_params.n_frames, track.codec_params.sample_rate)
    {
        n_frames as f64 / sr as f64
    } else {
        0.0
    };

    Ok(AudioInfo {
        duration_seconds,
        sample_rate,
        channels,
        format: format!("{:?}", track.codec_params.codec),
        bit_depth: track.codec_params.bits_per_sample.map(|b| b as u16),
    })
}

/// Append the planes of a decoded buffer to the planar accumulator
///
/// Handles all symphonia sample formats (u8..u32, i8..i32, f32, f64) and
/// scales integers into f32 in the range [-1.0, 1.0]
fn append_planes(buffer: &AudioBufferRef, channels: &mut Vec<Vec<f32>>) {
    fn ensure_channels(channels: &mut Vec<Vec<f32>>, count: usize) {
        if channels.is_empty() {
            channels.resize_with(count, Vec::new);
        }
    }

    match buffer {
        // Already f32 - just copy
        AudioBufferRef::F32(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend_from_slice(plane);
            }
        }

        AudioBufferRef::F64(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| s as f32));
            }
        }

        // Signed integers scale into [-1.0, 1.0]
        AudioBufferRef::S8(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| s as f32 / 128.0));
            }
        }
        AudioBufferRef::S16(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| s as f32 / 32768.0));
            }
        }
        AudioBufferRef::S24(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| s.inner() as f32 / 8388608.0));
            }
        }
        AudioBufferRef::S32(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| s as f32 / 2147483648.0));
            }
        }

        // Unsigned integers recenter around zero first
        AudioBufferRef::U8(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| (s as f32 - 128.0) / 128.0));
            }
        }
        AudioBufferRef::U16(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(plane.iter().map(|&s| (s as f32 - 32768.0) / 32768.0));
            }
        }
        AudioBufferRef::U24(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(
                    plane
                        .iter()
                        .map(|&s| (s.inner() as f32 - 8388608.0) / 8388608.0),
                );
            }
        }
        AudioBufferRef::U32(buf) => {
            ensure_channels(channels, buf.spec().channels.count());
            for (out, plane) in channels.iter_mut().zip(buf.planes().planes()) {
                out.extend(
                    plane
                        .iter()
                        .map(|&s| (s as f32 - 2147483648.0) / 2147483648.0),
                );
            }
        }
    }
}
