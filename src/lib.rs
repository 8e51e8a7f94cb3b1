pub mod audio;
pub mod error;

// Re-export for convenience
pub use audio::*;
pub use error::{AudioError, Result};
