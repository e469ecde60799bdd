//! An in-process host with a virtual clock and scripted input.
//!
//! Surfaces record their primitives into a [`Scene`] that can be inspected
//! or rendered. Text extents are estimated from the font size, so layout is
//! deterministic across machines.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::rects_touch;
use crate::host::{Host, HostEvent, InputEvent, SurfaceRole, Wake};
use crate::raster::Raster;
use crate::shapes::{ShapeKind, ShapeStyle, TextStyle};
use crate::surface::{ItemId, Surface, SurfaceId};
use kurbo::{Point, Rect};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

/// Average glyph advance as a fraction of the point size.
const CHAR_WIDTH: f64 = 0.6;
/// Line height as a fraction of the point size.
const LINE_HEIGHT: f64 = 1.25;
/// Padding around button labels, horizontal and vertical.
const BUTTON_PADDING: (f64, f64) = (8.0, 4.0);
/// Visible width of a text field, in characters.
const FIELD_CHARS: usize = 20;

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub kind: ShapeKind,
    pub coords: Vec<Point>,
    pub style: ShapeStyle,
    pub text: String,
    pub font: TextStyle,
    pub raster: Option<Raster>,
}

impl SceneItem {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            coords: Vec::new(),
            style: ShapeStyle::default(),
            text: String::new(),
            font: TextStyle::default(),
            raster: None,
        }
    }

    fn anchor(&self) -> Point {
        self.coords.first().copied().unwrap_or(Point::ORIGIN)
    }

    fn text_extent(&self) -> (f64, f64) {
        let size = self.font.size as f64;
        let columns = self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rows = self.text.lines().count().max(1);
        (
            columns as f64 * size * CHAR_WIDTH,
            rows as f64 * size * LINE_HEIGHT,
        )
    }

    /// Extent of the primitive as the host would draw it.
    pub fn bbox(&self) -> Option<Rect> {
        let first = *self.coords.first()?;
        let rect = match self.kind {
            ShapeKind::Rectangle | ShapeKind::Oval | ShapeKind::Polygon | ShapeKind::Line => self
                .coords
                .iter()
                .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p)),
            ShapeKind::Text => {
                let (w, h) = self.text_extent();
                Rect::from_origin_size(self.anchor(), (w, h))
            }
            ShapeKind::Button => {
                let (w, h) = self.text_extent();
                let (px, py) = BUTTON_PADDING;
                Rect::from_origin_size(self.anchor(), (w + 2.0 * px, h + 2.0 * py))
            }
            ShapeKind::Field => {
                let size = self.font.size as f64;
                let (px, py) = BUTTON_PADDING;
                let w = FIELD_CHARS as f64 * size * CHAR_WIDTH;
                Rect::from_origin_size(self.anchor(), (w + 2.0 * px, size * LINE_HEIGHT + 2.0 * py))
            }
            ShapeKind::Image => {
                let (w, h) = self
                    .raster
                    .as_ref()
                    .map(|r| (r.width() as f64, r.height() as f64))
                    .unwrap_or_default();
                Rect::from_origin_size(self.anchor(), (w, h))
            }
        };
        Some(rect)
    }
}

/// Everything drawn on one headless surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: SurfaceId,
    pub role: SurfaceRole,
    pub title: String,
    pub origin: (i32, i32),
    pub width: i32,
    pub height: i32,
    pub background: Rgba,
    pub visible: bool,
    pub destroyed: bool,
    items: BTreeMap<ItemId, SceneItem>,
    next_item: u64,
}

impl Scene {
    fn new(id: SurfaceId, role: SurfaceRole) -> Self {
        Self {
            id,
            role,
            title: String::new(),
            origin: (0, 0),
            width: 0,
            height: 0,
            background: Rgba::white(),
            visible: false,
            destroyed: false,
            items: BTreeMap::new(),
            next_item: 1,
        }
    }

    /// Live items in creation (and drawing) order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &SceneItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A surface that records into a shared [`Scene`].
pub struct HeadlessSurface {
    scene: Rc<RefCell<Scene>>,
}

impl HeadlessSurface {
    fn with_item(&mut self, item: ItemId, f: impl FnOnce(&mut SceneItem)) {
        if let Some(entry) = self.scene.borrow_mut().items.get_mut(&item) {
            f(entry);
        }
    }
}

impl Surface for HeadlessSurface {
    fn id(&self) -> SurfaceId {
        self.scene.borrow().id
    }

    fn set_title(&mut self, title: &str) {
        self.scene.borrow_mut().title = title.to_string();
    }

    fn set_geometry(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let mut scene = self.scene.borrow_mut();
        scene.origin = (x, y);
        scene.width = width;
        scene.height = height;
    }

    fn set_background(&mut self, color: Rgba) {
        self.scene.borrow_mut().background = color;
    }

    fn show(&mut self) {
        self.scene.borrow_mut().visible = true;
    }

    fn destroy(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.visible = false;
        scene.destroyed = true;
        scene.items.clear();
    }

    fn create_item(&mut self, kind: ShapeKind) -> ItemId {
        let mut scene = self.scene.borrow_mut();
        let id = ItemId(scene.next_item);
        scene.next_item += 1;
        scene.items.insert(id, SceneItem::new(kind));
        id
    }

    fn set_coords(&mut self, item: ItemId, coords: &[Point]) {
        self.with_item(item, |i| i.coords = coords.to_vec());
    }

    fn set_style(&mut self, item: ItemId, style: &ShapeStyle) {
        self.with_item(item, |i| i.style = style.clone());
    }

    fn set_text(&mut self, item: ItemId, text: &str) {
        self.with_item(item, |i| i.text = text.to_string());
    }

    fn set_font(&mut self, item: ItemId, font: &TextStyle) {
        self.with_item(item, |i| i.font = font.clone());
    }

    fn set_raster(&mut self, item: ItemId, raster: &Raster) {
        self.with_item(item, |i| i.raster = Some(raster.clone()));
    }

    fn put_pixel(&mut self, item: ItemId, x: u32, y: u32, color: Rgba) {
        self.with_item(item, |i| {
            if let Some(raster) = i.raster.as_mut() {
                raster.put(x, y, color);
            }
        });
    }

    fn delete_item(&mut self, item: ItemId) {
        self.scene.borrow_mut().items.remove(&item);
    }

    fn bbox(&self, item: ItemId) -> Option<Rect> {
        self.scene.borrow().items.get(&item)?.bbox()
    }

    fn find_overlapping(&self, region: Rect) -> Vec<ItemId> {
        self.scene
            .borrow()
            .items
            .iter()
            .filter(|(_, item)| item.bbox().is_some_and(|b| rects_touch(b, region)))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[derive(Default)]
struct HostState {
    clock: Duration,
    next_surface: u64,
    events: VecDeque<(Duration, HostEvent)>,
    scenes: HashMap<SurfaceId, Rc<RefCell<Scene>>>,
    created: Vec<SurfaceId>,
}

/// Scripted host. Clones share the same clock, event queue and scenes.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    state: Rc<RefCell<HostState>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event after every event already queued.
    pub fn push_event(&self, event: HostEvent) {
        let mut state = self.state.borrow_mut();
        let clock = state.clock;
        let at = state.events.back().map_or(clock, |(t, _)| (*t).max(clock));
        state.events.push_back((at, event));
    }

    /// Queue an event for virtual time `at`, after any queued for the same time.
    pub fn push_event_at(&self, at: Duration, event: HostEvent) {
        let mut state = self.state.borrow_mut();
        let index = state.events.partition_point(|(t, _)| *t <= at);
        state.events.insert(index, (at, event));
    }

    /// Convenience for [`HeadlessHost::push_event`].
    pub fn push_input(&self, surface: SurfaceId, input: InputEvent) {
        self.push_event(HostEvent::new(surface, input));
    }

    /// Surfaces in creation order.
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.state.borrow().created.clone()
    }

    /// Snapshot of one surface's scene.
    pub fn scene(&self, surface: SurfaceId) -> Option<Scene> {
        self.state
            .borrow()
            .scenes
            .get(&surface)
            .map(|scene| scene.borrow().clone())
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().events.len()
    }
}

impl Host for HeadlessHost {
    fn create_surface(&mut self, role: SurfaceRole) -> Result<Box<dyn Surface>> {
        let mut state = self.state.borrow_mut();
        state.next_surface += 1;
        let id = SurfaceId(state.next_surface);
        let scene = Rc::new(RefCell::new(Scene::new(id, role)));
        state.scenes.insert(id, scene.clone());
        state.created.push(id);
        log::debug!("Created headless surface {id:?} ({role:?})");
        Ok(Box::new(HeadlessSurface { scene }))
    }

    fn now(&self) -> Duration {
        self.state.borrow().clock
    }

    fn wait(&mut self, deadline: Option<Duration>) -> Wake {
        let mut state = self.state.borrow_mut();
        let ready = state
            .events
            .front()
            .is_some_and(|(at, _)| deadline.is_none_or(|d| *at <= d));
        if ready {
            if let Some((at, event)) = state.events.pop_front() {
                state.clock = state.clock.max(at);
                return Wake::Event(event);
            }
        }
        match deadline {
            Some(d) => {
                state.clock = state.clock.max(d);
                Wake::Deadline
            }
            None => Wake::Idle,
        }
    }
}
