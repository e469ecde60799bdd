//! Axis-aligned rectangles.

use super::{Content, Rectangle, Shape, ShapeKind, ShapeStyle};
use crate::geometry::{BoxGeometry, Geometry};
use crate::surface::SharedSurface;

impl Rectangle {
    pub(crate) fn create(surface: &SharedSurface, geometry: BoxGeometry, style: ShapeStyle) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Rectangle,
            Geometry::Box(geometry),
            style,
            Content::Plain,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgba;
    use crate::error::Error;
    use crate::shapes::BoxShape;
    use crate::testing;

    #[test]
    fn test_bounds_follow_every_mutation() {
        let (_host, window) = testing::window(400, 300);
        let rect = window.rectangle(0, 0, 100, 50).unwrap().unwrap();

        let check = |r: &crate::shapes::Rectangle| {
            assert_eq!(r.right() - r.left(), r.width());
            assert_eq!(r.bottom() - r.top(), r.height());
        };
        check(&rect);
        rect.move_by(10, -5).unwrap();
        check(&rect);
        rect.relocate(-20, 40).unwrap();
        check(&rect);
        rect.resize(7, 3).unwrap();
        check(&rect);
        assert_eq!((rect.left(), rect.top(), rect.right(), rect.bottom()), (-20, 40, -13, 43));
    }

    #[test]
    fn test_resize_rejects_zero() {
        let (_host, window) = testing::window(400, 300);
        let rect = window.rectangle(5, 5, 10, 10).unwrap().unwrap();

        let err = rect.resize(0, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue { ref operation, .. } if operation == "rectangle.resize"
        ));
        assert_eq!((rect.width(), rect.height()), (10, 10));
    }

    #[test]
    fn test_fill_and_border() {
        let (_host, window) = testing::window(400, 300);
        let rect = window.rectangle(5, 5, 10, 10).unwrap().unwrap();

        rect.fill("red").unwrap();
        rect.border(3, (0, 0, 255)).unwrap();
        let style = rect.style();
        assert_eq!(style.fill_color, Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(style.stroke_color, Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(style.stroke_width, 3);

        rect.border(0, "black").unwrap();
        assert_eq!(rect.style().stroke_color, None);

        assert!(rect.border(-1, "black").is_err());
        assert!(rect.fill("not-a-color").is_err());
        assert_eq!(rect.style().fill_color, Some(Rgba::rgb(255, 0, 0)));
    }

    #[test]
    fn test_removed_rectangle_is_inert_but_validates() {
        let (_host, window) = testing::window(400, 300);
        let rect = window.rectangle(0, 0, 10, 10).unwrap().unwrap();
        assert!(window.remove(&rect));

        rect.move_by(5, 5).unwrap();
        rect.fill("blue").unwrap();
        assert!(rect.is_deleted());
        assert_eq!(rect.left(), 0);
        assert_eq!(rect.style().fill_color, None);

        assert!(rect.resize(0, 0).is_err());
    }
}
