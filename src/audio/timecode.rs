// src/audio/timecode.rs

use crate::error::{AudioError, Result};

/// Parse an mm:ss string into seconds
///
/// Expects exactly two colon-separated integer fields. Seconds of 60 or
/// more are accepted and carry into minutes ("01:90" is 150 seconds).
/// Anything else (missing field, extra field, non-numeric text) is an
/// `InvalidTime` error rather than a silent zero.
///
/// # Example
/// ```
/// use audiocut::audio::parse_time;
///
/// assert_eq!(parse_time("02:30").unwrap(), 150.0);
/// assert!(parse_time("2m30s").is_err());
/// ```
pub fn parse_time(text: &str) -> Result<f64> {
    let mut fields = text.split(':');

    let (Some(minutes), Some(seconds), None) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(AudioError::InvalidTime(text.to_string()));
    };

    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| AudioError::InvalidTime(text.to_string()))?;
    let seconds: u32 = seconds
        .trim()
        .parse()
        .map_err(|_| AudioError::InvalidTime(text.to_string()))?;

    Ok(f64::from(minutes) * 60.0 + f64::from(seconds))
}

/// Format seconds as an mm:ss string
///
/// Floors to whole seconds and zero-pads both fields to width 2. Not a
/// true inverse of [`parse_time`] for fractional input; sub-second
/// precision is dropped.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
