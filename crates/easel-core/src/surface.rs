//! Host drawing-surface abstraction.

use crate::color::{self, Rgba};
use crate::raster::Raster;
use crate::shapes::{ShapeKind, ShapeStyle, TextStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle of one drawable primitive on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Handle of one host surface (a top-level window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// A host canvas that owns drawable primitives.
///
/// The toolkit keeps the authoritative geometry of every shape and pushes
/// changes through this trait. Only the extent of anchored content (text
/// metrics, widget size, image size) is read back via [`Surface::bbox`].
pub trait Surface {
    /// Identity used to route host events.
    fn id(&self) -> SurfaceId;

    /// Set the title bar text.
    fn set_title(&mut self, title: &str);

    /// Position and size the surface on screen.
    fn set_geometry(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Set the background color.
    fn set_background(&mut self, color: Rgba);

    /// Make the surface visible.
    fn show(&mut self);

    /// Tear the surface down. No further calls are made afterwards.
    fn destroy(&mut self);

    /// Create a primitive with no coordinates yet.
    fn create_item(&mut self, kind: ShapeKind) -> ItemId;

    /// Replace the coordinates of a primitive.
    ///
    /// Box kinds receive two opposite corners, point-list kinds every
    /// vertex, anchored kinds the single top-left anchor.
    fn set_coords(&mut self, item: ItemId, coords: &[Point]);

    /// Apply fill and outline styling.
    fn set_style(&mut self, item: ItemId, style: &ShapeStyle);

    /// Replace text content (text items, button labels, field contents).
    fn set_text(&mut self, item: ItemId, text: &str);

    /// Change font and text color.
    fn set_font(&mut self, item: ItemId, font: &TextStyle);

    /// Replace the pixels of an image item.
    fn set_raster(&mut self, item: ItemId, raster: &Raster);

    /// Overwrite a single pixel of an image item.
    fn put_pixel(&mut self, item: ItemId, x: u32, y: u32, color: Rgba);

    /// Delete a primitive.
    fn delete_item(&mut self, item: ItemId);

    /// Rendered extent of a primitive.
    fn bbox(&self, item: ItemId) -> Option<Rect>;

    /// Primitives whose extent touches `region`.
    fn find_overlapping(&self, region: Rect) -> Vec<ItemId>;

    /// Resolve a symbolic color name or hex string.
    fn resolve_color(&self, name: &str) -> Option<Rgba> {
        color::resolve_named(name)
    }
}

/// A surface shared by a window and all of its shapes.
pub type SharedSurface = Rc<RefCell<Box<dyn Surface>>>;
