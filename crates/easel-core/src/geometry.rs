//! Per-kind shape geometry and derived bounding boxes.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Integer bounding box in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }

    /// Bounds covering a host rect, rounded outward.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            rect.x0.floor() as i32,
            rect.y0.floor() as i32,
            rect.x1.ceil() as i32,
            rect.y1.ceil() as i32,
        )
    }
}

/// Inclusive rectangle intersection: touching edges count.
pub fn rects_touch(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Geometry of rectangles and ovals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoxGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Opposite corners as passed to the surface.
    pub fn coords(&self) -> Vec<Point> {
        let b = self.bounds();
        vec![
            Point::new(b.left as f64, b.top as f64),
            Point::new(b.right as f64, b.bottom as f64),
        ]
    }
}

/// Geometry of polygons and lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointListGeometry {
    points: Vec<(i32, i32)>,
    bounds: Bounds,
}

impl PointListGeometry {
    /// Build from a non-empty point list.
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        let bounds = Self::extremes(&points);
        Self { points, bounds }
    }

    fn extremes(points: &[(i32, i32)]) -> Bounds {
        let Some(&(x0, y0)) = points.first() else {
            return Bounds::default();
        };
        points.iter().fold(Bounds::new(x0, y0, x0, y0), |b, &(x, y)| {
            Bounds::new(b.left.min(x), b.top.min(y), b.right.max(x), b.bottom.max(y))
        })
    }

    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Every point shifted by the same delta.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.points.iter().map(|&(x, y)| (x + dx, y + dy)).collect())
    }

    pub fn coords(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|&(x, y)| Point::new(x as f64, y as f64))
            .collect()
    }
}

/// Geometry of shapes anchored at a point with a host-determined extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredGeometry {
    pub x: i32,
    pub y: i32,
    /// Bottom-right corner reported by the host.
    pub right: i32,
    pub bottom: i32,
}

impl AnchoredGeometry {
    /// Anchor with the host's extent; a missing extent collapses to the anchor.
    pub fn new(x: i32, y: i32, extent: Option<Rect>) -> Self {
        let (right, bottom) = match extent {
            Some(rect) => {
                let b = Bounds::from_rect(rect);
                (b.right.max(x), b.bottom.max(y))
            }
            None => (x, y),
        };
        Self {
            x,
            y,
            right,
            bottom,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.right, self.bottom)
    }

    pub fn coords(&self) -> Vec<Point> {
        vec![Point::new(self.x as f64, self.y as f64)]
    }
}

/// Geometry of any shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geometry {
    Box(BoxGeometry),
    Points(PointListGeometry),
    Anchored(AnchoredGeometry),
}

impl Geometry {
    pub fn bounds(&self) -> Bounds {
        match self {
            Geometry::Box(g) => g.bounds(),
            Geometry::Points(g) => g.bounds(),
            Geometry::Anchored(g) => g.bounds(),
        }
    }

    pub fn coords(&self) -> Vec<Point> {
        match self {
            Geometry::Box(g) => g.coords(),
            Geometry::Points(g) => g.coords(),
            Geometry::Anchored(g) => g.coords(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounds() {
        let g = BoxGeometry::new(10, 20, 100, 50);
        let b = g.bounds();
        assert_eq!((b.left, b.top, b.right, b.bottom), (10, 20, 110, 70));
        assert_eq!(b.width(), 100);
        assert_eq!(b.height(), 50);
    }

    #[test]
    fn test_point_list_bounds_and_translate() {
        let g = PointListGeometry::new(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
        assert_eq!(g.bounds(), Bounds::new(0, 0, 10, 10));

        let moved = g.translated(5, 5);
        assert_eq!(moved.points(), &[(5, 5), (15, 5), (15, 15), (5, 15)]);
        assert_eq!(moved.bounds(), Bounds::new(5, 5, 15, 15));
    }

    #[test]
    fn test_anchored_without_extent() {
        let g = AnchoredGeometry::new(3, 4, None);
        assert_eq!(g.bounds(), Bounds::new(3, 4, 3, 4));

        let g = AnchoredGeometry::new(3, 4, Some(Rect::new(3.0, 4.0, 40.5, 24.0)));
        assert_eq!(g.bounds(), Bounds::new(3, 4, 41, 24));
    }

    #[test]
    fn test_rects_touch_is_inclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_touch(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!rects_touch(a, Rect::new(10.5, 0.0, 20.0, 10.0)));
    }
}
