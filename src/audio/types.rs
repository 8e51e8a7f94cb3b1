use serde::{Deserialize, Serialize};

use crate::audio::timecode::parse_time;
use crate::error::{AudioError, Result};

/// A decoded audio clip held in memory as planar PCM
///
/// Each channel keeps its own sample vector: `channels[0]` is the left
/// (or mono) channel, `channels[1]` the right, and so on. Every sample is
/// a 32-bit float in the range [-1.0, 1.0]. A clip is immutable once
/// constructed; all channels have the same length.
#[derive(Debug, Clone)]
pub struct AudioClip {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from planar channel data with validation
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidClip(
                "sample rate must be positive".to_string(),
            ));
        }

        if channels.is_empty() {
            return Err(AudioError::InvalidClip("no channel data".to_string()));
        }

        let frames = channels[0].len();
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(AudioError::InvalidClip(
                "channels have different lengths".to_string(),
            ));
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Per-channel sample data
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Number of audio channels (1 = mono, 2 = stereo)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample rate in Hz (e.g., 44100, 48000)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of audio frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Total duration of the clip in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Metadata about an audio file without loading all samples
///
/// Use this for quick info queries without decoding the entire file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Total duration in seconds
    pub duration_seconds: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels
    pub channels: u16,

    /// Audio format/codec name (e.g., "MP3", "FLAC", "Vorbis")
    pub format: String,

    /// Bit depth if available (e.g., 16, 24)
    pub bit_depth: Option<u16>,
}

/// A half-open [start, end) cut window in seconds
///
/// Valid by construction: start is non-negative and strictly less than end.
/// Whether the window fits inside a particular clip is checked at trim time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Create a new cut window with validation
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AudioError::InvalidWindow(
                "start and end must be finite".to_string(),
            ));
        }

        if start < 0.0 {
            return Err(AudioError::InvalidWindow(format!(
                "start time cannot be negative: {}",
                start
            )));
        }

        if end <= start {
            return Err(AudioError::InvalidWindow(format!(
                "end time ({}) must be greater than start time ({})",
                end, start
            )));
        }

        Ok(Self { start, end })
    }

    /// Build a window from two mm:ss strings (e.g. "00:02", "01:30")
    pub fn from_text(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    /// Window start in seconds
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Window end in seconds
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the window in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_duration_and_frames() {
        let clip = AudioClip::new(vec![vec![0.0; 88200], vec![0.0; 88200]], 44100).unwrap();

        assert_eq!(clip.channel_count(), 2);
        assert_eq!(clip.frames(), 88200);
        assert_eq!(clip.duration_seconds(), 2.0);
    }

    #[test]
    fn test_clip_rejects_ragged_channels() {
        let result = AudioClip::new(vec![vec![0.0; 100], vec![0.0; 99]], 44100);
        assert!(matches!(result, Err(AudioError::InvalidClip(_))));
    }

    #[test]
    fn test_clip_rejects_empty_and_zero_rate() {
        assert!(AudioClip::new(vec![], 44100).is_err());
        assert!(AudioClip::new(vec![vec![0.0; 10]], 0).is_err());
    }

    #[test]
    fn test_window_validation() {
        // start == end must be rejected, not silently produce an empty cut
        assert!(TimeWindow::new(0.0, 0.0).is_err());

        // Start > end
        assert!(TimeWindow::new(10.0, 5.0).is_err());

        // Negative start
        assert!(TimeWindow::new(-1.0, 5.0).is_err());

        let window = TimeWindow::new(2.0, 5.0).unwrap();
        assert_eq!(window.duration(), 3.0);
    }

    #[test]
    fn test_window_from_text() {
        let window = TimeWindow::from_text("00:02", "00:05").unwrap();
        assert_eq!(window.start(), 2.0);
        assert_eq!(window.end(), 5.0);

        assert!(TimeWindow::from_text("00:00", "00:00").is_err());
        assert!(TimeWindow::from_text("bogus", "00:05").is_err());
    }
}
