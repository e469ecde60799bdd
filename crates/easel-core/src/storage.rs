//! Image I/O abstraction.

use crate::error::{Error, Result};
use crate::raster::Raster;
use std::cell::RefCell;
use std::collections::HashMap;

/// Loads rasters into image shapes and saves them back.
///
/// Implementations can read from memory, the filesystem, or bundled assets.
pub trait ImageStore {
    /// Load the raster stored under `name`.
    fn load(&self, name: &str) -> Result<Raster>;

    /// Persist `raster` under `name`.
    fn save(&self, name: &str, raster: &Raster) -> Result<()>;
}

/// In-memory image store for tests and generated content.
#[derive(Default)]
pub struct MemoryImageStore {
    images: RefCell<HashMap<String, Raster>>,
}

impl MemoryImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raster under `name`, replacing any previous one.
    pub fn insert(&self, name: impl Into<String>, raster: Raster) {
        self.images.borrow_mut().insert(name.into(), raster);
    }

    /// Fetch a copy of a stored raster.
    pub fn get(&self, name: &str) -> Option<Raster> {
        self.images.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.borrow().contains_key(name)
    }
}

impl ImageStore for MemoryImageStore {
    fn load(&self, name: &str) -> Result<Raster> {
        self.get(name).ok_or_else(|| Error::ImageIo {
            name: name.to_string(),
            message: "not found".to_string(),
        })
    }

    fn save(&self, name: &str, raster: &Raster) -> Result<()> {
        self.insert(name, raster.clone());
        Ok(())
    }
}
