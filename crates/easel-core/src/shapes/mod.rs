//! Shapes drawn on a window.
//!
//! Every shape is a shared handle ([`Shape`]) onto one canvas primitive.
//! Geometry is stored as tagged data ([`Geometry`]): box shapes keep an
//! `(x, y, width, height)` rectangle, point-list shapes keep their vertices,
//! and anchored shapes keep a top-left anchor plus the extent the host
//! reports. Derived edges (`left`, `top`, `right`, `bottom`) are read-only
//! getters; the only way to change them is through the mutation operations.
//!
//! Mutations on a removed shape are silently ignored, but their arguments
//! are still validated first.

mod button;
mod field;
mod image;
mod line;
mod oval;
mod polygon;
mod rectangle;
mod text;

pub use button::ActivateHandler;

use crate::color::{ColorSpec, Rgba};
use crate::error::Result;
use crate::geometry::{AnchoredGeometry, BoxGeometry, Bounds, Geometry, PointListGeometry};
use crate::raster::Raster;
use crate::storage::ImageStore;
use crate::surface::{ItemId, SharedSurface};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Polygon,
    Line,
    Text,
    Button,
    Field,
    Image,
}

impl ShapeKind {
    /// Lower-case name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
            ShapeKind::Button => "button",
            ShapeKind::Field => "field",
            ShapeKind::Image => "image",
        }
    }
}

/// Fill and outline of box and point-list shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Outline (or line) color. `None` hides the outline.
    pub stroke_color: Option<Rgba>,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Fill color (`None` = no fill).
    pub fill_color: Option<Rgba>,
}

impl ShapeStyle {
    /// A one-pixel outline with no fill.
    pub fn outlined(color: Rgba) -> Self {
        Self {
            stroke_color: Some(color),
            stroke_width: 1,
            fill_color: None,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::outlined(Rgba::black())
    }
}

/// Font and color of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    /// Point size.
    pub size: u32,
    pub color: Rgba,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "Helvetica".to_string(),
            size: 16,
            color: Rgba::black(),
        }
    }
}

/// Kind-specific content of a shape.
pub(crate) enum Content {
    Plain,
    Text {
        text: String,
        font: TextStyle,
    },
    Button {
        label: String,
        handlers: Vec<ActivateHandler>,
    },
    Field {
        text: String,
    },
    Image {
        raster: Raster,
        store: Rc<dyn ImageStore>,
    },
}

pub(crate) struct ShapeData {
    pub(crate) id: ShapeId,
    pub(crate) kind: ShapeKind,
    pub(crate) item: ItemId,
    pub(crate) surface: SharedSurface,
    pub(crate) deleted: bool,
    pub(crate) groups: BTreeSet<String>,
    pub(crate) geometry: Geometry,
    pub(crate) style: ShapeStyle,
    pub(crate) content: Content,
}

impl ShapeData {
    /// Replace the geometry and reposition the backing primitive.
    ///
    /// Anchored shapes re-read their extent from the host afterwards.
    pub(crate) fn configure(&mut self, geometry: Geometry) {
        let coords = geometry.coords();
        self.surface.borrow_mut().set_coords(self.item, &coords);
        self.geometry = geometry;
        self.refresh_extent();
    }

    pub(crate) fn refresh_extent(&mut self) {
        if let Geometry::Anchored(g) = self.geometry {
            let extent = self.surface.borrow().bbox(self.item);
            self.geometry = Geometry::Anchored(AnchoredGeometry::new(g.x, g.y, extent));
        }
    }

    pub(crate) fn push_style(&self) {
        self.surface.borrow_mut().set_style(self.item, &self.style);
    }

    fn push_content(&self) {
        let mut surface = self.surface.borrow_mut();
        match &self.content {
            Content::Plain => {}
            Content::Text { text, font } => {
                surface.set_font(self.item, font);
                surface.set_text(self.item, text);
            }
            Content::Button { label: text, .. } | Content::Field { text } => {
                surface.set_text(self.item, text);
            }
            Content::Image { raster, .. } => surface.set_raster(self.item, raster),
        }
    }
}

/// A drawable primitive owned by a window.
///
/// Cloning yields another handle to the same shape; equality is identity.
#[derive(Clone)]
pub struct Shape {
    pub(crate) inner: Rc<RefCell<ShapeData>>,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Shape {}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Shape")
            .field("kind", &data.kind)
            .field("id", &data.id)
            .field("deleted", &data.deleted)
            .field("bounds", &data.geometry.bounds())
            .finish()
    }
}

impl Shape {
    /// Allocate the backing primitive and push geometry, style and content.
    pub(crate) fn create(
        surface: &SharedSurface,
        kind: ShapeKind,
        geometry: Geometry,
        style: ShapeStyle,
        content: Content,
    ) -> Self {
        let item = surface.borrow_mut().create_item(kind);
        let mut data = ShapeData {
            id: Uuid::new_v4(),
            kind,
            item,
            surface: surface.clone(),
            deleted: false,
            groups: BTreeSet::new(),
            geometry: geometry.clone(),
            style,
            content,
        };
        data.push_content();
        if !matches!(geometry, Geometry::Anchored(_)) {
            data.push_style();
        }
        data.configure(geometry);
        log::debug!("Created {} {} at {:?}", kind.name(), data.id, data.geometry.bounds());
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    /// Name of an operation on this shape, for error messages.
    pub(crate) fn op_name(&self, operation: &str) -> String {
        format!("{}.{}", self.inner.borrow().kind.name(), operation)
    }

    /// Run `f` unless the shape has been removed.
    pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut ShapeData) -> R) -> Option<R> {
        let mut data = self.inner.borrow_mut();
        if data.deleted {
            return None;
        }
        Some(f(&mut data))
    }

    /// Resolve a color against this shape's surface.
    pub(crate) fn resolve_color(&self, operation: &str, spec: &ColorSpec) -> Result<Rgba> {
        let data = self.inner.borrow();
        let surface = data.surface.borrow();
        validate::color(operation, &**surface, spec)
    }

    /// Take the primitive off the canvas. The flag is permanent.
    pub(crate) fn delete(&self) {
        let mut data = self.inner.borrow_mut();
        data.deleted = true;
        data.surface.borrow_mut().delete_item(data.item);
        if let Content::Button { handlers, .. } = &mut data.content {
            handlers.clear();
        }
        log::debug!("Deleted {} {}", data.kind.name(), data.id);
    }

    pub fn id(&self) -> ShapeId {
        self.inner.borrow().id
    }

    pub fn kind(&self) -> ShapeKind {
        self.inner.borrow().kind
    }

    /// Handle of the backing primitive on the host surface.
    pub fn item(&self) -> ItemId {
        self.inner.borrow().item
    }

    /// Whether the shape has been removed from its window.
    pub fn is_deleted(&self) -> bool {
        self.inner.borrow().deleted
    }

    /// Group names, sorted.
    pub fn groups(&self) -> Vec<String> {
        self.inner.borrow().groups.iter().cloned().collect()
    }

    pub fn in_group(&self, name: &str) -> bool {
        self.inner.borrow().groups.contains(name)
    }

    /// Put this shape in a named group.
    pub fn group(&self, name: &str) -> Result<()> {
        validate::name(&self.op_name("group"), "group name", name)?;
        self.mutate(|d| d.groups.insert(name.to_string()));
        Ok(())
    }

    /// Take this shape out of a named group.
    pub fn ungroup(&self, name: &str) -> Result<()> {
        validate::name(&self.op_name("ungroup"), "group name", name)?;
        self.inner.borrow_mut().groups.remove(name);
        Ok(())
    }

    /// Whether this shape touches the bounding box of `other`.
    ///
    /// Always false for the same shape, for removed shapes, and for shapes
    /// on different surfaces.
    pub fn overlaps(&self, other: &Shape) -> bool {
        if self == other {
            return false;
        }
        let me = self.inner.borrow();
        let them = other.inner.borrow();
        if me.deleted || them.deleted || !Rc::ptr_eq(&me.surface, &them.surface) {
            return false;
        }
        let region = them.geometry.bounds().to_rect();
        me.surface.borrow().find_overlapping(region).contains(&me.item)
    }

    pub fn bounds(&self) -> Bounds {
        self.inner.borrow().geometry.bounds()
    }

    pub fn left(&self) -> i32 {
        self.bounds().left
    }

    pub fn top(&self) -> i32 {
        self.bounds().top
    }

    pub fn right(&self) -> i32 {
        self.bounds().right
    }

    pub fn bottom(&self) -> i32 {
        self.bounds().bottom
    }

    pub fn width(&self) -> i32 {
        self.bounds().width()
    }

    pub fn height(&self) -> i32 {
        self.bounds().height()
    }

    /// Current fill and outline.
    pub fn style(&self) -> ShapeStyle {
        self.inner.borrow().style.clone()
    }

    /// Text content of text, button and field shapes.
    pub(crate) fn content_text(&self) -> String {
        match &self.inner.borrow().content {
            Content::Text { text, .. } | Content::Button { label: text, .. } | Content::Field { text } => {
                text.clone()
            }
            Content::Plain | Content::Image { .. } => String::new(),
        }
    }

    /// Replace text content and re-read the rendered extent.
    pub(crate) fn replace_text(&self, message: String) {
        self.mutate(|d| {
            match &mut d.content {
                Content::Text { text, .. }
                | Content::Button { label: text, .. }
                | Content::Field { text } => *text = message.clone(),
                Content::Plain | Content::Image { .. } => return,
            }
            d.surface.borrow_mut().set_text(d.item, &message);
            d.refresh_extent();
        });
    }
}

macro_rules! shape_handle {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $as_fn:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(pub(crate) Shape);

        impl std::ops::Deref for $name {
            type Target = Shape;

            fn deref(&self) -> &Shape {
                &self.0
            }
        }

        impl AsRef<Shape> for $name {
            fn as_ref(&self) -> &Shape {
                &self.0
            }
        }

        impl From<$name> for Shape {
            fn from(shape: $name) -> Shape {
                shape.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Shape {
            #[doc = concat!("This shape as a [`", stringify!($name), "`], if it is one.")]
            pub fn $as_fn(&self) -> Option<$name> {
                (self.kind() == ShapeKind::$kind).then(|| $name(self.clone()))
            }
        }
    };
}

shape_handle!(
    /// A filled or outlined rectangle.
    Rectangle, Rectangle, as_rectangle
);
shape_handle!(
    /// An ellipse inscribed in its bounding box.
    Oval, Oval, as_oval
);
shape_handle!(
    /// A closed polygon through three or more points.
    Polygon, Polygon, as_polygon
);
shape_handle!(
    /// An open polyline through two or more points.
    Line, Line, as_line
);
shape_handle!(
    /// A text label anchored at its top-left corner.
    Text, Text, as_text
);
shape_handle!(
    /// A clickable push button.
    Button, Button, as_button
);
shape_handle!(
    /// A single-line text entry.
    Field, Field, as_field
);
shape_handle!(
    /// An editable raster image.
    Image, Image, as_image
);

/// Operations shared by rectangles and ovals.
pub trait BoxShape: AsRef<Shape> {
    /// Left edge.
    fn x(&self) -> i32 {
        self.as_ref().left()
    }

    /// Top edge.
    fn y(&self) -> i32 {
        self.as_ref().top()
    }

    /// Change the fill color.
    fn fill(&self, color: impl Into<ColorSpec>) -> Result<()> {
        let shape = self.as_ref();
        let color = shape.resolve_color(&shape.op_name("fill"), &color.into())?;
        shape.mutate(|d| {
            d.style.fill_color = Some(color);
            d.push_style();
        });
        Ok(())
    }

    /// Change the outline. Width 0 hides it.
    fn border(&self, width: i32, color: impl Into<ColorSpec>) -> Result<()> {
        let shape = self.as_ref();
        let op = shape.op_name("border");
        validate::at_least(&op, "border width", width.into(), 0)?;
        let color = shape.resolve_color(&op, &color.into())?;
        shape.mutate(|d| {
            set_outline(&mut d.style, width as u32, color);
            d.push_style();
        });
        Ok(())
    }

    /// Shift by a delta.
    fn move_by(&self, dx: i32, dy: i32) -> Result<()> {
        let shape = self.as_ref();
        let b = shape.bounds();
        let op = shape.op_name("move_by");
        let (x, y) = offset(&op, b.left, b.top, dx, dy)?;
        validate::placement(&op, x, y, b.width(), b.height())?;
        shape.mutate(|d| d.configure(Geometry::Box(BoxGeometry::new(x, y, b.width(), b.height()))));
        Ok(())
    }

    /// Move the top-left corner to `(x, y)`.
    fn relocate(&self, x: i32, y: i32) -> Result<()> {
        let shape = self.as_ref();
        let b = shape.bounds();
        validate::placement(&shape.op_name("relocate"), x, y, b.width(), b.height())?;
        shape.mutate(|d| d.configure(Geometry::Box(BoxGeometry::new(x, y, b.width(), b.height()))));
        Ok(())
    }

    /// Change the size, keeping the top-left corner.
    fn resize(&self, width: i32, height: i32) -> Result<()> {
        let shape = self.as_ref();
        let op = shape.op_name("resize");
        validate::dimensions(&op, "new dimensions", width, height)?;
        let b = shape.bounds();
        validate::placement(&op, b.left, b.top, width, height)?;
        shape.mutate(|d| d.configure(Geometry::Box(BoxGeometry::new(b.left, b.top, width, height))));
        Ok(())
    }
}

/// Operations shared by shapes anchored at a single point.
pub trait AnchoredShape: AsRef<Shape> {
    /// Anchor x.
    fn x(&self) -> i32 {
        self.as_ref().left()
    }

    /// Anchor y.
    fn y(&self) -> i32 {
        self.as_ref().top()
    }

    /// Shift by a delta.
    fn move_by(&self, dx: i32, dy: i32) -> Result<()> {
        let shape = self.as_ref();
        let b = shape.bounds();
        let (x, y) = offset(&shape.op_name("move_by"), b.left, b.top, dx, dy)?;
        shape.mutate(|d| d.configure(Geometry::Anchored(AnchoredGeometry::new(x, y, None))));
        Ok(())
    }

    /// Move the anchor to `(x, y)`.
    fn relocate(&self, x: i32, y: i32) -> Result<()> {
        self.as_ref()
            .mutate(|d| d.configure(Geometry::Anchored(AnchoredGeometry::new(x, y, None))));
        Ok(())
    }
}

/// Operations shared by polygons and lines.
pub trait PointListShape: AsRef<Shape> {
    /// Current vertices, in order.
    fn points(&self) -> Vec<(i32, i32)> {
        match &self.as_ref().inner.borrow().geometry {
            Geometry::Points(g) => g.points().to_vec(),
            _ => Vec::new(),
        }
    }

    /// Translate every point by the same delta.
    fn move_by(&self, dx: i32, dy: i32) -> Result<()> {
        let shape = self.as_ref();
        let op = shape.op_name("move_by");
        let b = shape.bounds();
        let (left, top) = offset(&op, b.left, b.top, dx, dy)?;
        let (right, bottom) = offset(&op, b.right, b.bottom, dx, dy)?;
        validate::span(&op, left, top, right, bottom)?;
        let moved = PointListGeometry::new(self.points()).translated(dx, dy);
        shape.mutate(|d| d.configure(Geometry::Points(moved)));
        Ok(())
    }
}

impl BoxShape for Rectangle {}
impl BoxShape for Oval {}
impl PointListShape for Polygon {}
impl PointListShape for Line {}
impl AnchoredShape for Text {}
impl AnchoredShape for Button {}
impl AnchoredShape for Field {}
impl AnchoredShape for Image {}

/// Add a movement vector to a position, rejecting overflow.
pub(crate) fn offset(operation: &str, x: i32, y: i32, dx: i32, dy: i32) -> Result<(i32, i32)> {
    match (x.checked_add(dx), y.checked_add(dy)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(validate::invalid(operation, "movement vector", (dx, dy))),
    }
}

/// Apply an outline width, where 0 hides the outline.
pub(crate) fn set_outline(style: &mut ShapeStyle, width: u32, color: Rgba) {
    if width == 0 {
        style.stroke_color = None;
        style.stroke_width = 0;
    } else {
        style.stroke_color = Some(color);
        style.stroke_width = width;
    }
}

/// Parse text content as `T`, naming the content and type on failure.
pub(crate) fn parse_content<T: std::str::FromStr>(operation: &str, content: &str) -> Result<T> {
    content.trim().parse::<T>().map_err(|_| {
        validate::invalid(
            operation,
            "content",
            format!("couldn't interpret '{content}' as {}", std::any::type_name::<T>()),
        )
    })
}
