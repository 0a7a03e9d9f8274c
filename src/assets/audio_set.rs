use itertools::Itertools;
use log::trace;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::SoundEvent;

use super::AssetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    Wav,
    Ogg,
    Mp3,
}

impl SoundFormat {
    fn sniff(bytes: &[u8]) -> Option<SoundFormat> {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            Some(SoundFormat::Wav)
        } else if bytes.starts_with(b"OggS") {
            Some(SoundFormat::Ogg)
        } else if bytes.starts_with(b"ID3")
            || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
        {
            Some(SoundFormat::Mp3)
        } else {
            None
        }
    }
}

/// A sound loaded into memory. The file path is kept for players that
/// stream from disk.
#[derive(Clone)]
pub struct SoundHandle {
    event: SoundEvent,
    format: SoundFormat,
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl SoundHandle {
    pub fn event(&self) -> SoundEvent {
        self.event
    }

    pub fn format(&self) -> SoundFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for SoundHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SoundHandle({} {:?})", self.event, self.format)
    }
}

pub struct AudioSet {
    sounds: Vec<SoundHandle>,
}

impl AudioSet {
    /// Expects one `<event>.<ext>` file per [`SoundEvent`].
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let entries = fs::read_dir(dir).map_err(|source| AssetError::MissingDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .sorted()
            .collect();

        let mut sounds = Vec::with_capacity(SoundEvent::ALL.len());
        for event in SoundEvent::ALL {
            let path = paths
                .iter()
                .find(|path| path.file_stem().and_then(|s| s.to_str()) == Some(event.name()))
                .ok_or(AssetError::MissingSound(event))?;
            let bytes = fs::read(path).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            })?;
            let format = SoundFormat::sniff(&bytes)
                .ok_or_else(|| AssetError::UnknownSoundFormat { path: path.clone() })?;
            trace!(target: "audio_set", "Loaded {} ({:?}) from {}", event, format, path.display());
            sounds.push(SoundHandle {
                event,
                format,
                path: path.clone(),
                bytes: Arc::from(bytes),
            });
        }

        Ok(Self { sounds })
    }

    pub fn get(&self, event: SoundEvent) -> SoundHandle {
        self.sounds[event.index()].clone()
    }
}

impl Debug for AudioSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AudioSet({} sounds)", self.sounds.len())
    }
}
