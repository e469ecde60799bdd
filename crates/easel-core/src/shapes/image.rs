//! Raster images with per-pixel access.

use super::{Content, Image, Shape, ShapeKind, ShapeStyle};
use crate::color::ColorSpec;
use crate::error::Result;
use crate::geometry::{AnchoredGeometry, Geometry};
use crate::raster::Raster;
use crate::storage::ImageStore;
use crate::surface::SharedSurface;
use crate::validate;
use std::rc::Rc;

impl Image {
    pub(crate) fn create(
        surface: &SharedSurface,
        x: i32,
        y: i32,
        raster: Raster,
        store: Rc<dyn ImageStore>,
    ) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Image,
            Geometry::Anchored(AnchoredGeometry::new(x, y, None)),
            ShapeStyle::default(),
            Content::Image { raster, store },
        ))
    }

    fn dimensions(&self) -> (u32, u32) {
        match &self.inner.borrow().content {
            Content::Image { raster, .. } => (raster.width(), raster.height()),
            _ => (0, 0),
        }
    }

    /// Copy of the pixel buffer.
    pub fn raster(&self) -> Option<Raster> {
        match &self.inner.borrow().content {
            Content::Image { raster, .. } => Some(raster.clone()),
            _ => None,
        }
    }

    /// RGB color of the zero-based pixel `(x, y)`.
    pub fn get_color(&self, x: i32, y: i32) -> Result<(u8, u8, u8)> {
        let (w, h) = self.dimensions();
        let (px, py) = validate::pixel("image.get_color", x, y, w, h)?;
        if self.is_deleted() {
            return Err(validate::illegal("image.get_color", "can't read pixels of a removed image"));
        }
        match &self.inner.borrow().content {
            Content::Image { raster, .. } => Ok(raster.get(px, py).map(|c| c.to_rgb()).unwrap_or_default()),
            _ => Ok((0, 0, 0)),
        }
    }

    /// Overwrite the zero-based pixel `(x, y)`.
    pub fn set_color(&self, x: i32, y: i32, color: impl Into<ColorSpec>) -> Result<()> {
        let (w, h) = self.dimensions();
        let (px, py) = validate::pixel("image.set_color", x, y, w, h)?;
        let color = self.resolve_color("image.set_color", &color.into())?;
        self.mutate(|d| {
            if let Content::Image { raster, .. } = &mut d.content {
                raster.put(px, py, color);
            }
            d.surface.borrow_mut().put_pixel(d.item, px, py, color);
        });
        Ok(())
    }

    /// Persist the pixels under `name` in the window's image store.
    pub fn save_as(&self, name: &str) -> Result<()> {
        validate::name("image.save_as", "file name", name)?;
        if self.is_deleted() {
            return Err(validate::illegal("image.save_as", "can't save a removed image"));
        }
        let data = self.inner.borrow();
        match &data.content {
            Content::Image { raster, store } => {
                log::debug!("Saving image {} as {name}", data.id);
                store.save(name, raster)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgba;
    use crate::error::Error;
    use crate::raster::Raster;
    use crate::storage::MemoryImageStore;
    use crate::testing;
    use std::rc::Rc;

    fn checker() -> Raster {
        let mut raster = Raster::filled(4, 3, Rgba::white());
        raster.put(1, 1, Rgba::black());
        raster
    }

    #[test]
    fn test_extent_is_native_size() {
        let store = Rc::new(MemoryImageStore::new());
        store.insert("checker", checker());
        let (_host, window) = testing::window_with_store(200, 200, store);

        let image = window.image(5, 6, "checker").unwrap().unwrap();
        assert_eq!((image.left(), image.top()), (5, 6));
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn test_pixels_are_bounds_checked() {
        let store = Rc::new(MemoryImageStore::new());
        store.insert("checker", checker());
        let (_host, window) = testing::window_with_store(200, 200, store);
        let image = window.image(0, 0, "checker").unwrap().unwrap();

        assert_eq!(image.get_color(1, 1).unwrap(), (0, 0, 0));
        assert_eq!(image.get_color(3, 2).unwrap(), (255, 255, 255));
        assert!(image.get_color(4, 0).is_err());
        assert!(image.get_color(0, -1).is_err());

        image.set_color(0, 0, (10, 20, 30)).unwrap();
        assert_eq!(image.get_color(0, 0).unwrap(), (10, 20, 30));
        assert!(image.set_color(0, 3, "red").is_err());
    }

    #[test]
    fn test_save_as_writes_to_store() {
        let store = Rc::new(MemoryImageStore::new());
        store.insert("checker", checker());
        let (_host, window) = testing::window_with_store(200, 200, store.clone());
        let image = window.image(0, 0, "checker").unwrap().unwrap();

        image.set_color(2, 2, "red").unwrap();
        image.save_as("copy.png").unwrap();
        let saved = store.get("copy.png").unwrap();
        assert_eq!(saved.get(2, 2), Some(Rgba::rgb(255, 0, 0)));
    }

    #[test]
    fn test_removed_image_reads_are_illegal() {
        let store = Rc::new(MemoryImageStore::new());
        store.insert("checker", checker());
        let (_host, window) = testing::window_with_store(200, 200, store);
        let image = window.image(0, 0, "checker").unwrap().unwrap();
        window.remove(&image);

        assert!(matches!(
            image.get_color(0, 0),
            Err(Error::IllegalOperation { .. })
        ));
        assert!(matches!(image.save_as("x.png"), Err(Error::IllegalOperation { .. })));
        // Out-of-range is still reported as a bad value first.
        assert!(matches!(image.get_color(9, 9), Err(Error::InvalidValue { .. })));
        image.set_color(0, 0, "red").unwrap();
    }

    #[test]
    fn test_missing_image_is_io_error() {
        let (_host, window) = testing::window(200, 200);
        assert!(matches!(window.image(0, 0, "nope"), Err(Error::ImageIo { .. })));
        assert!(window.all(None).is_empty());
    }
}
