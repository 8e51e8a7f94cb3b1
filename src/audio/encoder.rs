// src/audio/encoder.rs

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

use crate::audio::types::AudioClip;
use crate::error::{AudioError, Result};

/// Quantize a float sample to a signed 16-bit PCM value
///
/// Clamps to [-1.0, 1.0], then scales by 32768 when the sample sits below
/// -0.5 and by 32767 otherwise, truncating toward zero. The asymmetric
/// scale keeps +1.0 from overflowing while letting -1.0 reach the full
/// negative range.
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);

    let scaled = if 0.5 + clamped < 0.0 {
        clamped * 32768.0
    } else {
        clamped * 32767.0
    };

    scaled as i16
}

/// Encode a clip to WAV bytes in memory
///
/// Pure function, no file I/O: the result is a complete RIFF/WAVE file as
/// 16-bit little-endian signed PCM with the canonical 44-byte header.
/// Samples are written frame-interleaved (L0 R0 L1 R1 ...) as standard
/// WAVE playback requires.
///
/// # Example
/// ```
/// use audiocut::audio::{encode_wav, AudioClip};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let clip = AudioClip::new(vec![vec![0.0, 0.5, -0.5, 1.0, -1.0]], 44100)?;
/// let wav = encode_wav(&clip)?;
///
/// // 44-byte header plus 2 bytes per sample
/// assert_eq!(wav.len(), 44 + 5 * 2);
/// # Ok(())
/// # }
/// ```
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>> {
    let channels = u16::try_from(clip.channel_count()).map_err(|_| {
        AudioError::EncodeFailed(format!("too many channels: {}", clip.channel_count()))
    })?;

    let spec = WavSpec {
        channels,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());

    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for frame in 0..clip.frames() {
        for channel in clip.channels() {
            writer.write_sample(quantize_sample(channel[frame]))?;
        }
    }
    // Finalize patches the RIFF and data chunk sizes
    writer.finalize()?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_quantize_sample_rule() {
        assert_eq!(quantize_sample(0.0), 0);
        assert_eq!(quantize_sample(1.0), 32767);
        assert_eq!(quantize_sample(-1.0), -32768);
        assert_eq!(quantize_sample(0.5), 16383);
        // At and above -0.5 the positive scale applies
        assert_eq!(quantize_sample(-0.5), -16383);
        assert_eq!(quantize_sample(-0.25), -8191);
        // Below -0.5 the full negative scale applies
        assert_eq!(quantize_sample(-0.6), -19660);
    }

    #[test]
    fn test_quantize_clamps_out_of_range_input() {
        assert_eq!(quantize_sample(2.0), 32767);
        assert_eq!(quantize_sample(-2.0), -32768);
    }

    #[test]
    fn test_wav_header_layout() {
        // 3 seconds of mono silence at 44.1kHz: 132300 frames, 264644 bytes
        let clip = AudioClip::new(vec![vec![0.0; 132300]], 44100).unwrap();
        let wav = encode_wav(&clip).unwrap();

        assert_eq!(wav.len(), 264644);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32(&wav, 4) as usize, wav.len() - 8);
        assert_eq!(&wav[8..12], b"WAVE");

        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(read_u32(&wav, 16), 16); // fmt chunk size
        assert_eq!(read_u16(&wav, 20), 1); // PCM
        assert_eq!(read_u16(&wav, 22), 1); // channels
        assert_eq!(read_u32(&wav, 24), 44100); // sample rate
        assert_eq!(read_u32(&wav, 28), 44100 * 2); // byte rate
        assert_eq!(read_u16(&wav, 32), 2); // block align
        assert_eq!(read_u16(&wav, 34), 16); // bits per sample

        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32(&wav, 40) as usize, wav.len() - 44);
    }

    #[test]
    fn test_stereo_header_fields() {
        let clip = AudioClip::new(vec![vec![0.0; 480], vec![0.0; 480]], 48000).unwrap();
        let wav = encode_wav(&clip).unwrap();

        assert_eq!(read_u16(&wav, 22), 2); // channels
        assert_eq!(read_u32(&wav, 28), 48000 * 2 * 2); // byte rate
        assert_eq!(read_u16(&wav, 32), 4); // block align
        assert_eq!(read_u32(&wav, 40), 480 * 2 * 2); // data chunk size
    }

    #[test]
    fn test_stereo_data_is_frame_interleaved() {
        let clip = AudioClip::new(
            vec![vec![0.25, 0.5], vec![-0.25, -0.5]],
            44100,
        )
        .unwrap();
        let wav = encode_wav(&clip).unwrap();

        let samples: Vec<i16> = wav[44..]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();

        // L0 R0 L1 R1, not all of L then all of R
        assert_eq!(
            samples,
            vec![
                quantize_sample(0.25),
                quantize_sample(-0.25),
                quantize_sample(0.5),
                quantize_sample(-0.5),
            ]
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let frames = 441;
        let left: Vec<f32> = (0..frames)
            .map(|i| (i as f32 / frames as f32) * 2.0 - 1.0)
            .collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let clip = AudioClip::new(vec![left.clone(), right], 44100).unwrap();

        let wav = encode_wav(&clip).unwrap();

        let mut reader = WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), frames * 2);

        // Quantization error stays within one step of the 16-bit scale
        for (i, &original) in left.iter().enumerate() {
            let decoded = samples[i * 2] as f32 / 32768.0;
            assert!(
                (original - decoded).abs() <= 2.0 / 32768.0,
                "sample {} off by {}",
                i,
                (original - decoded).abs()
            );
        }
    }
}
