//! Billboard image loading.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Loads billboard images by URL.
pub trait ImageLoader {
    /// Loads and decodes the image at `url`.
    fn load(&self, url: &str) -> Result<Arc<image::RgbaImage>, image::ImageError>;
}

/// Loads images from disk relative to a base directory.
///
/// Each URL is decoded once; repeated loads share the same image.
pub struct FileImageLoader {
    base_dir: PathBuf,
    cache: Mutex<HashMap<String, Arc<image::RgbaImage>>>,
}

impl FileImageLoader {
    /// Creates a loader resolving relative URLs against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, url: &str) -> Result<Arc<image::RgbaImage>, image::ImageError> {
        if let Some(image) = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(url).cloned())
        {
            return Ok(image);
        }

        let path = self.base_dir.join(url);
        log::debug!("loading billboard image {}", path.display());
        let image = Arc::new(image::open(&path)?.to_rgba8());

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), image.clone());
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_png_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(4, 8, image::Rgba([0, 128, 0, 255]))
            .save(dir.path().join("pine.png"))
            .unwrap();

        let loader = FileImageLoader::new(dir.path());
        let image = loader.load("pine.png").unwrap();
        assert_eq!(image.dimensions(), (4, 8));
    }

    #[test]
    fn test_repeated_load_shares_image() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(2, 2)
            .save(dir.path().join("bush.png"))
            .unwrap();

        let loader = FileImageLoader::new(dir.path());
        let a = loader.load("bush.png").unwrap();
        let b = loader.load("bush.png").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileImageLoader::new(dir.path());
        assert!(loader.load("missing.png").is_err());
    }
}
