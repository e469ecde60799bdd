//! Open polylines.

use super::{Content, Line, Shape, ShapeKind, ShapeStyle};
use crate::color::ColorSpec;
use crate::error::Result;
use crate::geometry::{Geometry, PointListGeometry};
use crate::surface::SharedSurface;
use crate::validate;

impl Line {
    pub(crate) fn create(surface: &SharedSurface, points: Vec<(i32, i32)>, style: ShapeStyle) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Line,
            Geometry::Points(PointListGeometry::new(points)),
            style,
            Content::Plain,
        ))
    }

    /// Change stroke width and color. Lines are always visible, so the
    /// width must be at least 1.
    pub fn border(&self, width: i32, color: impl Into<ColorSpec>) -> Result<()> {
        validate::at_least("line.border", "line width", width.into(), 1)?;
        let color = self.resolve_color("line.border", &color.into())?;
        self.mutate(|d| {
            d.style.stroke_color = Some(color);
            d.style.stroke_width = width as u32;
            d.push_style();
        });
        Ok(())
    }
}
