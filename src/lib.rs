mod destroyable;
pub mod assets;
pub mod events;
pub mod game;
pub mod model;
#[cfg(feature = "gtk")]
pub mod ui;
pub mod view;

#[cfg(test)]
pub(crate) mod tests {
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Once};
    use tempfile::TempDir;
    use test_context::TestContext;

    use crate::assets::AssetCache;
    use crate::model::{Category, SoundEvent};

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger;

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                let _ = env_logger::builder().is_test(true).try_init();
            });
            UsingLogger
        }

        fn teardown(self) {}
    }

    /// Writes a complete asset tree: one 2x2 png per category, each a
    /// different shade, a 4x3 background and a minimal wav for every sound
    /// event.
    pub fn write_asset_fixture(root: &Path) {
        let images = root.join("images");
        let sounds = root.join("sounds");
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(&sounds).unwrap();

        for category in Category::all() {
            let shade = (category.index() * 16) as u8;
            let pixels = RgbaImage::from_pixel(2, 2, Rgba([shade, 255 - shade, shade / 2, 255]));
            pixels
                .save(images.join(format!("{}_gem.png", category.asset_key())))
                .unwrap();
        }

        RgbaImage::from_pixel(4, 3, Rgba([20, 20, 40, 255]))
            .save(images.join("background.png"))
            .unwrap();

        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&36u32.to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&[1, 0, 1, 0]);
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&[1, 0, 8, 0]);
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&0u32.to_le_bytes());
        for event in SoundEvent::ALL {
            fs::write(sounds.join(format!("{}.wav", event.name())), &wav).unwrap();
        }
    }

    pub fn test_assets() -> (TempDir, Arc<AssetCache>) {
        let dir = TempDir::new().unwrap();
        write_asset_fixture(dir.path());
        let assets = AssetCache::initialize(dir.path()).unwrap();
        (dir, Arc::new(assets))
    }
}
