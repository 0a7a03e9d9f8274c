mod asset_cache;
mod audio_set;
mod error;
mod image_set;

pub use asset_cache::AssetCache;
pub use audio_set::{AudioSet, SoundFormat, SoundHandle};
pub use error::AssetError;
pub use image_set::{ImageHandle, ImageSet};
