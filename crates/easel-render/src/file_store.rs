//! Image store backed by files on disk.

use easel_core::error::{Error, Result};
use easel_core::raster::Raster;
use easel_core::storage::ImageStore;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

/// Loads and saves rasters as image files under a root directory.
///
/// Any format the `image` crate can decode is accepted on load, whatever the
/// file is called. On save the format follows the file extension, defaulting
/// to PNG.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    root: PathBuf,
}

impl FileImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn io_error(name: &str, err: impl std::fmt::Display) -> Error {
    let err = Error::ImageIo {
        name: name.to_string(),
        message: err.to_string(),
    };
    log::warn!("{err}");
    err
}

impl ImageStore for FileImageStore {
    fn load(&self, name: &str) -> Result<Raster> {
        let data = std::fs::read(self.path(name)).map_err(|e| io_error(name, e))?;
        let decoded = image::load_from_memory(&data).map_err(|e| io_error(name, e))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Loaded image {name} ({width}x{height})");
        Raster::from_rgba(width, height, rgba.into_raw())
            .ok_or_else(|| io_error(name, "decoded buffer has the wrong size"))
    }

    fn save(&self, name: &str, raster: &Raster) -> Result<()> {
        let path = self.path(name);
        let format = ImageFormat::from_path(&path).unwrap_or(ImageFormat::Png);
        let buffer = RgbaImage::from_raw(raster.width(), raster.height(), raster.as_bytes().to_vec())
            .ok_or_else(|| io_error(name, "raster buffer has the wrong size"))?;
        let image = match format {
            // No alpha channel in JPEG.
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(buffer).to_rgb8()),
            _ => DynamicImage::ImageRgba8(buffer),
        };
        image
            .save_with_format(&path, format)
            .map_err(|e| io_error(name, e))?;
        log::debug!("Saved image {name} as {format:?}");
        Ok(())
    }
}
