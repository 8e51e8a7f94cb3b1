// src/audio/trim.rs

use crate::audio::types::{AudioClip, TimeWindow};
use crate::error::{AudioError, Result};

/// Cut a time window out of a clip
///
/// Copies the contiguous run of samples covered by `window` out of each
/// channel independently. No resampling, no fades at the boundaries. The
/// output always has exactly `round(window.duration() * sample_rate)`
/// frames and keeps the source's channel count and sample rate.
///
/// A window that reaches past the end of the clip is rejected with
/// `WindowOutOfBounds` instead of reading out of range.
///
/// # Example
/// ```
/// use audiocut::audio::{trim_clip, AudioClip, TimeWindow};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // 10 seconds of mono at 44.1kHz
/// let clip = AudioClip::new(vec![vec![0.5; 441000]], 44100)?;
///
/// let window = TimeWindow::from_text("00:02", "00:05")?;
/// let cut = trim_clip(&clip, &window)?;
///
/// assert_eq!(cut.frames(), 132300);
/// assert_eq!(cut.sample_rate(), 44100);
/// # Ok(())
/// # }
/// ```
pub fn trim_clip(clip: &AudioClip, window: &TimeWindow) -> Result<AudioClip> {
    let duration = clip.duration_seconds();

    if window.end() > duration {
        return Err(AudioError::WindowOutOfBounds {
            start: window.start(),
            end: window.end(),
            duration,
        });
    }

    let sample_rate = clip.sample_rate() as f64;
    let frames = (window.duration() * sample_rate).round() as usize;

    if frames == 0 {
        return Err(AudioError::InvalidWindow(format!(
            "window of {}s rounds to zero frames at {} Hz",
            window.duration(),
            clip.sample_rate()
        )));
    }

    // Rounding the start can land one frame past what fits; pull it back
    // so the slice stays inside the clip.
    let start = (window.start() * sample_rate).round() as usize;
    let start = start.min(clip.frames() - frames);

    let channels: Vec<Vec<f32>> = clip
        .channels()
        .iter()
        .map(|channel| channel[start..start + frames].to_vec())
        .collect();

    AudioClip::new(channels, clip.sample_rate())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create test audio with a per-channel linear ramp
    fn ramp_clip(duration_seconds: f64, sample_rate: u32, channels: usize) -> AudioClip {
        let frames = (duration_seconds * sample_rate as f64) as usize;
        let data: Vec<Vec<f32>> = (0..channels)
            .map(|ch| {
                (0..frames)
                    .map(|i| (ch as f32 + 1.0) * i as f32 / frames as f32)
                    .collect()
            })
            .collect();

        AudioClip::new(data, sample_rate).unwrap()
    }

    #[test]
    fn test_trim_middle_section() {
        // 10 seconds of stereo, cut 3s..7s
        let clip = ramp_clip(10.0, 44100, 2);
        let window = TimeWindow::new(3.0, 7.0).unwrap();

        let cut = trim_clip(&clip, &window).unwrap();

        assert_eq!(cut.frames(), 4 * 44100);
        assert_eq!(cut.channel_count(), 2);
        assert_eq!(cut.duration_seconds(), 4.0);
    }

    #[test]
    fn test_trim_frame_count_is_exact() {
        // Output length is round((end-start) * rate), never off by one
        let clip = ramp_clip(10.0, 44100, 1);
        let window = TimeWindow::from_text("00:02", "00:05").unwrap();

        let cut = trim_clip(&clip, &window).unwrap();
        assert_eq!(cut.frames(), 132300);
    }

    #[test]
    fn test_trim_copies_each_channel_from_window_start() {
        let clip = ramp_clip(10.0, 1000, 2);
        let window = TimeWindow::new(2.0, 5.0).unwrap();

        let cut = trim_clip(&clip, &window).unwrap();

        for (ch, channel) in cut.channels().iter().enumerate() {
            assert_eq!(channel[0], clip.channels()[ch][2000]);
            assert_eq!(channel[2999], clip.channels()[ch][4999]);
        }
    }

    #[test]
    fn test_trim_to_exact_end_of_clip() {
        let clip = ramp_clip(10.0, 44100, 1);
        let window = TimeWindow::new(8.0, 10.0).unwrap();

        let cut = trim_clip(&clip, &window).unwrap();
        assert_eq!(cut.frames(), 2 * 44100);
    }

    #[test]
    fn test_trim_out_of_bounds() {
        let clip = ramp_clip(10.0, 44100, 2);
        let window = TimeWindow::new(5.0, 15.0).unwrap();

        let result = trim_clip(&clip, &window);
        assert!(matches!(
            result,
            Err(AudioError::WindowOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_trim_rejects_window_rounding_to_zero_frames() {
        // 4 Hz clip, 0.1s window: 0.4 frames rounds to zero
        let clip = AudioClip::new(vec![vec![0.0; 40]], 4).unwrap();
        let window = TimeWindow::new(0.0, 0.1).unwrap();

        assert!(matches!(
            trim_clip(&clip, &window),
            Err(AudioError::InvalidWindow(_))
        ));
    }
}
