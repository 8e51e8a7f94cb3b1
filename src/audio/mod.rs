// src/audio/mod.rs

pub mod decoder;
pub mod encoder;
pub mod export;
pub mod timecode;
pub mod trim;
pub mod types;

// Re-export commonly used items
pub use decoder::{decode_audio_bytes, decode_audio_file, probe_info};
pub use encoder::{encode_wav, quantize_sample};
pub use export::{output_file_name, AudioDecoder, DirSaver, Exporter, FileSaver, SymphoniaDecoder};
pub use timecode::{format_time, parse_time};
pub use trim::trim_clip;
pub use types::{AudioClip, AudioInfo, TimeWindow};
