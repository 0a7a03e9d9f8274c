use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Category, SoundEvent};

/// Startup failures while building the asset cache. All of them are fatal:
/// the view cannot honour its display contract with a partial cache.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset directory {} is not readable", .path.display())]
    MissingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no image asset for category {0}")]
    MissingImage(Category),
    #[error("no sound asset for event {0}")]
    MissingSound(SoundEvent),
    #[error("could not decode image {}", .path.display())]
    Undecodable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unrecognized sound format in {}", .path.display())]
    UnknownSoundFormat { path: PathBuf },
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
