//! Closed polygons.

use super::{Content, Polygon, Shape, ShapeKind, ShapeStyle, set_outline};
use crate::color::ColorSpec;
use crate::error::Result;
use crate::geometry::{Geometry, PointListGeometry};
use crate::surface::SharedSurface;
use crate::validate;

impl Polygon {
    pub(crate) fn create(surface: &SharedSurface, points: Vec<(i32, i32)>, style: ShapeStyle) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Polygon,
            Geometry::Points(PointListGeometry::new(points)),
            style,
            Content::Plain,
        ))
    }

    /// Change the fill color.
    pub fn fill(&self, color: impl Into<ColorSpec>) -> Result<()> {
        let color = self.resolve_color("polygon.fill", &color.into())?;
        self.mutate(|d| {
            d.style.fill_color = Some(color);
            d.push_style();
        });
        Ok(())
    }

    /// Change the outline. Width 0 hides it.
    pub fn border(&self, width: i32, color: impl Into<ColorSpec>) -> Result<()> {
        validate::at_least("polygon.border", "border width", width.into(), 0)?;
        let color = self.resolve_color("polygon.border", &color.into())?;
        self.mutate(|d| {
            set_outline(&mut d.style, width as u32, color);
            d.push_style();
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::shapes::PointListShape;
    use crate::testing;

    #[test]
    fn test_bounds_from_point_extremes() {
        let (_host, window) = testing::window(400, 300);
        let poly = window
            .polygon([(0, 0), (10, 0), (10, 10), (0, 10)])
            .unwrap()
            .unwrap();
        assert_eq!((poly.left(), poly.top(), poly.right(), poly.bottom()), (0, 0, 10, 10));

        poly.move_by(5, 5).unwrap();
        assert_eq!(poly.points(), vec![(5, 5), (15, 5), (15, 15), (5, 15)]);
        assert_eq!((poly.left(), poly.top(), poly.right(), poly.bottom()), (5, 5, 15, 15));
    }

    #[test]
    fn test_needs_three_points() {
        let (_host, window) = testing::window(400, 300);
        let err = window.polygon([(0, 0), (5, 5)]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));
        assert!(window.all(None).is_empty());
    }

    #[test]
    fn test_zero_border_hides_outline() {
        let (_host, window) = testing::window(400, 300);
        let poly = window.polygon([(0, 0), (10, 0), (5, 8)]).unwrap().unwrap();
        poly.border(0, "red").unwrap();
        assert_eq!(poly.style().stroke_color, None);
        poly.border(2, "red").unwrap();
        assert_eq!(poly.style().stroke_width, 2);
        poly.fill("green").unwrap();
        assert!(poly.style().fill_color.is_some());
    }

    #[test]
    fn test_span_wider_than_i32_is_rejected() {
        let (_host, window) = testing::window(400, 300);
        let err = window
            .polygon([(-2_000_000_000, 0), (2_000_000_000, 0), (0, 5)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { argument: "point list", .. }));
        assert!(window.all(None).is_empty());

        let poly = window.polygon([(-1_000_000_000, 0), (1_000_000_000, 0), (0, 5)]).unwrap().unwrap();
        assert_eq!(poly.width(), 2_000_000_000);
        assert!(poly.move_by(i32::MAX, 0).is_err());
        assert_eq!(poly.left(), -1_000_000_000);
        poly.move_by(-1_000_000_000, 0).unwrap();
        assert_eq!((poly.left(), poly.right()), (-2_000_000_000, 0));
        assert_eq!(poly.width(), 2_000_000_000);
    }
}
