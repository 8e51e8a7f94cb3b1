use thiserror::Error;

/// All possible errors that can occur in the cut/export pipeline
#[derive(Debug, Error)]
pub enum AudioError {
    /// Failed to open or read the audio file from disk
    #[error("Failed to open audio file '{path}': {source}")]
    FileOpen {
        path: String,
        source: std::io::Error,
    },

    /// The audio format is not supported by symphonia
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Error occurred while decoding the audio data
    #[error("Audio decoding failed: {0}")]
    DecodeFailed(String),

    /// Error occurred while encoding to WAV
    #[error("WAV encoding failed: {0}")]
    EncodeFailed(String),

    /// Malformed mm:ss time text
    #[error("Invalid time '{0}': expected mm:ss")]
    InvalidTime(String),

    /// Invalid cut window (e.g. start >= end, negative values)
    #[error("Invalid cut window: {0}")]
    InvalidWindow(String),

    /// Cut window is outside the audio clip's duration
    #[error("Cut window ({start}s to {end}s) exceeds audio duration ({duration}s)")]
    WindowOutOfBounds {
        start: f64,
        end: f64,
        duration: f64,
    },

    /// A previous export has not finished yet
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Malformed clip data (ragged channels, zero sample rate, empty decode)
    #[error("Invalid audio clip: {0}")]
    InvalidClip(String),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from hound WAV writer
    #[error("Hound WAV error: {0}")]
    Hound(#[from] hound::Error),
}

/// Convenient Result type that uses our AudioError
pub type Result<T> = std::result::Result<T, AudioError>;
