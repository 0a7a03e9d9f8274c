use image::RgbaImage;
use itertools::Itertools;
use log::{debug, trace, warn};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::Category;

use super::AssetError;

/// Decoded image for one category. Cloning shares the pixels.
#[derive(Clone)]
pub struct ImageHandle {
    category: Category,
    image: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn same_image(&self, other: &ImageHandle) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "ImageHandle({} {}x{})", self.category, width, height)
    }
}

/// File key of the optional picture drawn behind the grid.
pub const BACKGROUND_KEY: &str = "background";

/// One image per [`Category`], indexed by `Category::index`, plus an
/// optional background.
pub struct ImageSet {
    images: Vec<ImageHandle>,
    background: Option<Arc<RgbaImage>>,
}

fn decode(path: &Path) -> Result<RgbaImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Undecodable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// `RedHL_gem.png` -> `RedHL`; names without `_` use the whole stem.
fn asset_key(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    match name.split_once('_') {
        Some((key, _)) => Some(key),
        None => path.file_stem()?.to_str(),
    }
}

impl ImageSet {
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

        let mut found: Vec<Option<ImageHandle>> = vec![None; Category::COUNT];
        let mut background = None;
        for path in paths {
            if asset_key(&path) == Some(BACKGROUND_KEY) {
                if background.is_some() {
                    warn!(target: "image_set", "Duplicate background, ignoring {}", path.display());
                } else {
                    background = Some(Arc::new(decode(&path)?));
                    trace!(target: "image_set", "Loaded background from {}", path.display());
                }
                continue;
            }
            let Some(category) = asset_key(&path).and_then(Category::from_asset_key) else {
                warn!(target: "image_set", "Skipping unrecognized image {}", path.display());
                continue;
            };
            if found[category.index()].is_some() {
                warn!(target: "image_set", "Duplicate image for {}, ignoring {}", category, path.display());
                continue;
            }
            let image = decode(&path)?;
            trace!(target: "image_set", "Loaded {} from {}", category, path.display());
            found[category.index()] = Some(ImageHandle {
                category,
                image: Arc::new(image),
            });
        }

        if let Some(missing) = Category::all().find(|category| found[category.index()].is_none()) {
            return Err(AssetError::MissingImage(missing));
        }

        if background.is_none() {
            debug!(target: "image_set", "No {} image in {}", BACKGROUND_KEY, dir.display());
        }

        Ok(Self {
            images: found.into_iter().flatten().collect(),
            background,
        })
    }

    pub fn get(&self, category: Category) -> ImageHandle {
        self.images[category.index()].clone()
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_deref()
    }
}

impl Debug for ImageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImageSet({} images)", self.images.len())
    }
}
