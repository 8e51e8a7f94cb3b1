// src/audio/export.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::audio::decoder::decode_audio_bytes;
use crate::audio::encoder::encode_wav;
use crate::audio::trim::trim_clip;
use crate::audio::types::{AudioClip, TimeWindow};
use crate::error::{AudioError, Result};

/// Decodes raw audio bytes into a clip
///
/// Narrow seam over the platform decoder so the export orchestration can
/// be exercised in tests without real audio files.
pub trait AudioDecoder {
    fn decode(&self, bytes: &[u8], extension_hint: Option<&str>) -> Result<AudioClip>;
}

/// Production decoder backed by symphonia
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8], extension_hint: Option<&str>) -> Result<AudioClip> {
        decode_audio_bytes(bytes.to_vec(), extension_hint)
    }
}

/// Delivers a finished file to its destination
///
/// The bytes handed over are always a complete file; a saver never sees
/// a partially built export.
pub trait FileSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves exported files into a directory on disk
pub struct DirSaver {
    dir: PathBuf,
}

impl DirSaver {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Derive the export file name: `cut_<name-without-extension>.wav`
pub fn output_file_name(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_name);

    format!("cut_{}.wav", stem)
}

/// Runs the decode → trim → encode → save pipeline for one source file
///
/// Exports are serialized: a second call while one is in flight fails
/// with `ExportInProgress` instead of racing it. Any stage failing aborts
/// the whole export and nothing is saved.
pub struct Exporter<D, S> {
    decoder: D,
    saver: S,
    busy: AtomicBool,
}

/// Clears the busy flag when the export ends, on success or failure
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<D: AudioDecoder, S: FileSaver> Exporter<D, S> {
    pub fn new(decoder: D, saver: S) -> Self {
        Self {
            decoder,
            saver,
            busy: AtomicBool::new(false),
        }
    }

    /// Cut `window` out of the given audio bytes and save the WAV
    ///
    /// `source_name` is the original file name; it supplies the extension
    /// hint for decoding and the `cut_<stem>.wav` output name.
    ///
    /// # Returns
    /// The path the saver delivered the file to
    pub fn export(&self, source_name: &str, bytes: &[u8], window: &TimeWindow) -> Result<PathBuf> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AudioError::ExportInProgress);
        }
        let _guard = BusyGuard(&self.busy);

        let extension = Path::new(source_name)
            .extension()
            .and_then(|e| e.to_str());

        let clip = self.decoder.decode(bytes, extension)?;
        tracing::info!(
            source = source_name,
            duration_seconds = clip.duration_seconds(),
            "decoded source audio"
        );

        let cut = trim_clip(&clip, window)?;
        let wav = encode_wav(&cut)?;

        let path = self.saver.save(&output_file_name(source_name), &wav)?;
        tracing::info!(path = %path.display(), bytes = wav.len(), "export complete");

        Ok(path)
    }
}
