use image::RgbaImage;
use log::info;
use std::path::Path;

use crate::model::{Category, SoundEvent};

use super::audio_set::{AudioSet, SoundHandle};
use super::image_set::{ImageHandle, ImageSet};
use super::AssetError;

const IMAGES_DIR: &str = "images";
const SOUNDS_DIR: &str = "sounds";

/// Every image and sound the view needs, decoded once at startup and
/// read-only afterwards. Shared between the UI thread and the queue worker
/// behind an `Arc`.
#[derive(Debug)]
pub struct AssetCache {
    image_set: ImageSet,
    audio_set: AudioSet,
}

impl AssetCache {
    pub fn initialize(root: &Path) -> Result<Self, AssetError> {
        info!(target: "asset_cache", "Loading assets from {}", root.display());
        let image_set = ImageSet::load(&root.join(IMAGES_DIR))?;
        let audio_set = AudioSet::load(&root.join(SOUNDS_DIR))?;
        info!(
            target: "asset_cache",
            "Loaded {} images and {} sounds, background: {}",
            Category::COUNT,
            SoundEvent::ALL.len(),
            image_set.background().is_some()
        );
        Ok(Self {
            image_set,
            audio_set,
        })
    }

    pub fn image(&self, category: Category) -> ImageHandle {
        self.image_set.get(category)
    }

    pub fn sound(&self, event: SoundEvent) -> SoundHandle {
        self.audio_set.get(event)
    }

    /// Picture shown behind the grid, when the asset directory has one.
    pub fn background(&self) -> Option<&RgbaImage> {
        self.image_set.background()
    }
}
