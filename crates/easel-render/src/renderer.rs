//! Software rasterizer for headless scenes.
//!
//! Each pixel is sampled at its center. Fills use kurbo's winding test,
//! strokes use the distance to the outline. Text glyphs are not drawn;
//! buttons and fields are drawn as framed boxes.

use easel_core::color::Rgba;
use easel_core::headless::{Scene, SceneItem};
use easel_core::raster::Raster;
use easel_core::shapes::ShapeKind;
use kurbo::{BezPath, Ellipse, Point, Rect, Shape as _};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Scene has no drawable area ({0}x{1})")]
    EmptyScene(i32, i32),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

const BUTTON_FACE: Rgba = Rgba::rgb(225, 225, 225);
const BUTTON_EDGE: Rgba = Rgba::rgb(120, 120, 120);
const FIELD_FACE: Rgba = Rgba::rgb(252, 252, 252);
const FIELD_EDGE: Rgba = Rgba::rgb(90, 90, 90);

/// Distance from a point to the segment `a`-`b`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

fn closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Rasterizes scenes into RGBA pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareRenderer;

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw every live item of `scene` over its background.
    pub fn render(&self, scene: &Scene) -> RenderResult<Raster> {
        if scene.width < 1 || scene.height < 1 {
            return Err(RenderError::EmptyScene(scene.width, scene.height));
        }
        let mut canvas = Raster::filled(scene.width as u32, scene.height as u32, scene.background);
        for (_, item) in scene.items() {
            self.draw_item(&mut canvas, item);
        }
        log::debug!("Rendered scene {:?} with {} items", scene.id, scene.len());
        Ok(canvas)
    }

    fn draw_item(&self, canvas: &mut Raster, item: &SceneItem) {
        let Some(bbox) = item.bbox() else {
            return;
        };
        let half = item.style.stroke_width as f64 / 2.0;
        match item.kind {
            ShapeKind::Rectangle => {
                let outer = bbox.inflate(half, half);
                let inner = bbox.inflate(-half, -half);
                if let Some(fill) = item.style.fill_color {
                    paint(canvas, bbox, fill, |p| bbox.contains(p));
                }
                if let Some(stroke) = item.style.stroke_color {
                    paint(canvas, outer, stroke, |p| outer.contains(p) && !inner.contains(p));
                }
            }
            ShapeKind::Oval => {
                let ellipse = Ellipse::from_rect(bbox);
                let outer = Ellipse::from_rect(bbox.inflate(half, half));
                let inner = Ellipse::from_rect(bbox.inflate(-half, -half));
                if let Some(fill) = item.style.fill_color {
                    paint(canvas, bbox, fill, |p| ellipse.contains(p));
                }
                if let Some(stroke) = item.style.stroke_color {
                    let thin = bbox.width() <= 2.0 * half || bbox.height() <= 2.0 * half;
                    paint(canvas, bbox.inflate(half, half), stroke, |p| {
                        outer.contains(p) && (thin || !inner.contains(p))
                    });
                }
            }
            ShapeKind::Polygon => {
                let path = closed_path(&item.coords);
                if let Some(fill) = item.style.fill_color {
                    paint(canvas, bbox, fill, |p| path.contains(p));
                }
                if let Some(stroke) = item.style.stroke_color {
                    let mut ring = item.coords.clone();
                    ring.extend(item.coords.first().copied());
                    paint(canvas, bbox.inflate(half, half), stroke, |p| {
                        point_to_polyline_dist(p, &ring) <= half
                    });
                }
            }
            ShapeKind::Line => {
                if let Some(stroke) = item.style.stroke_color {
                    let half = half.max(0.5);
                    paint(canvas, bbox.inflate(half, half), stroke, |p| {
                        point_to_polyline_dist(p, &item.coords) <= half
                    });
                }
            }
            ShapeKind::Button => frame(canvas, bbox, BUTTON_FACE, BUTTON_EDGE),
            ShapeKind::Field => frame(canvas, bbox, FIELD_FACE, FIELD_EDGE),
            // TODO: rasterize glyphs once a font backend is wired in.
            ShapeKind::Text => {}
            ShapeKind::Image => {
                if let Some(raster) = &item.raster {
                    blit(canvas, raster, bbox.x0.floor() as i64, bbox.y0.floor() as i64);
                }
            }
        }
    }
}

/// Set every pixel in `area` whose center satisfies `inside`.
fn paint(canvas: &mut Raster, area: Rect, color: Rgba, inside: impl Fn(Point) -> bool) {
    let x0 = area.x0.floor().max(0.0) as u32;
    let y0 = area.y0.floor().max(0.0) as u32;
    let x1 = area.x1.ceil().clamp(0.0, canvas.width() as f64) as u32;
    let y1 = area.y1.ceil().clamp(0.0, canvas.height() as f64) as u32;
    for y in y0..y1 {
        for x in x0..x1 {
            if inside(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                canvas.put(x, y, color);
            }
        }
    }
}

fn frame(canvas: &mut Raster, bbox: Rect, face: Rgba, edge: Rgba) {
    paint(canvas, bbox, face, |p| bbox.contains(p));
    let inner = bbox.inflate(-1.0, -1.0);
    paint(canvas, bbox, edge, |p| bbox.contains(p) && !inner.contains(p));
}

/// Copy `src` onto `canvas` at `(left, top)`, blending by source alpha.
fn blit(canvas: &mut Raster, src: &Raster, left: i64, top: i64) {
    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let (x, y) = (left + sx as i64, top + sy as i64);
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            let (Some(over), Some(under)) = (src.get(sx, sy), canvas.get(x, y)) else {
                continue;
            };
            canvas.put(x, y, blend(over, under));
        }
    }
}

fn blend(over: Rgba, under: Rgba) -> Rgba {
    let a = over.a as u32;
    let mix = |o: u8, u: u8| ((o as u32 * a + u as u32 * (255 - a)) / 255) as u8;
    Rgba::new(mix(over.r, under.r), mix(over.g, under.g), mix(over.b, under.b), 255)
}
