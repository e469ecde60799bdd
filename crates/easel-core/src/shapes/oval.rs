//! Ellipses inscribed in a box.

use super::{Content, Oval, Shape, ShapeKind, ShapeStyle};
use crate::geometry::{BoxGeometry, Geometry};
use crate::surface::SharedSurface;

impl Oval {
    pub(crate) fn create(surface: &SharedSurface, geometry: BoxGeometry, style: ShapeStyle) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Oval,
            Geometry::Box(geometry),
            style,
            Content::Plain,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::shapes::BoxShape;
    use crate::testing;

    #[test]
    fn test_overlap_uses_bounding_boxes() {
        let (_host, window) = testing::window(400, 300);
        let a = window.oval(0, 0, 20, 20).unwrap().unwrap();
        let b = window.oval(19, 19, 20, 20).unwrap().unwrap();
        let c = window.oval(100, 100, 5, 5).unwrap().unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&a));

        c.relocate(20, 0).unwrap();
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_x_y_track_top_left() {
        let (_host, window) = testing::window(400, 300);
        let oval = window.oval(3, 4, 10, 20).unwrap().unwrap();
        oval.move_by(2, 2).unwrap();
        assert_eq!((oval.x(), oval.y()), (5, 6));
        assert_eq!((oval.right(), oval.bottom()), (15, 26));
    }
}
