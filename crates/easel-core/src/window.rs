//! Top-level windows.
//!
//! A window owns a host surface, the shapes drawn on it and the handler
//! registries for keyboard, mouse and timer events. Shape factories validate
//! their arguments before anything is created, so a failed call never leaves
//! a half-registered shape behind. Once closed, a window ignores every
//! further mutation.

use crate::color::{ColorSpec, Rgba};
use crate::error::Result;
use crate::geometry::BoxGeometry;
use crate::handlers::{HandlerSet, KeyHandler, PointerHandler, TimerHandler, same_handler};
use crate::host::{InputEvent, SurfaceRole};
use crate::manager::WindowManager;
use crate::shapes::{Button, Field, Image, Line, Oval, Polygon, Rectangle, Shape, ShapeStyle, Text, TextStyle};
use crate::surface::{ItemId, SharedSurface, SurfaceId};
use crate::timer::TimerToken;
use crate::validate;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

pub(crate) struct WindowState {
    surface: SharedSurface,
    surface_id: SurfaceId,
    role: SurfaceRole,
    title: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    background: Rgba,
    outline: Rgba,
    font: TextStyle,
    shapes: Vec<Shape>,
    opened: bool,
    closed: bool,
    output: Option<String>,
    key_press: HandlerSet<dyn Fn(&str)>,
    left_click: HandlerSet<dyn Fn(i32, i32)>,
    left_drag: HandlerSet<dyn Fn(i32, i32)>,
    right_click: HandlerSet<dyn Fn(i32, i32)>,
    right_drag: HandlerSet<dyn Fn(i32, i32)>,
    timers: Vec<(TimerHandler, TimerToken)>,
}

/// Number of registered handlers per event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandlerCounts {
    pub key_press: usize,
    pub left_click: usize,
    pub left_drag: usize,
    pub right_click: usize,
    pub right_drag: usize,
    pub timers: usize,
}

/// A top-level window with a drawing canvas.
///
/// Cloning yields another handle to the same window.
#[derive(Clone)]
pub struct Window {
    inner: Rc<RefCell<WindowState>>,
    manager: WindowManager,
}

/// Resolve a configured color name, falling back when the surface doesn't know it.
fn configured_color(surface: &SharedSurface, name: &str, fallback: Rgba) -> Rgba {
    surface.borrow().resolve_color(name).unwrap_or_else(|| {
        log::warn!("Unknown configured color '{name}', using {}", fallback.to_hex());
        fallback
    })
}

impl Window {
    /// Create a hidden window of `width` x `height` pixels.
    ///
    /// ```
    /// use easel_core::{HeadlessHost, Window, WindowManager};
    ///
    /// let manager = WindowManager::new(HeadlessHost::new());
    /// let window = Window::new(&manager, 320, 200).unwrap();
    /// assert_eq!((window.width(), window.height()), (320, 200));
    /// assert!(Window::new(&manager, 0, 10).is_err());
    /// ```
    pub fn new(manager: &WindowManager, width: i32, height: i32) -> Result<Self> {
        validate::dimensions("window.new", "window dimensions", width, height)?;
        let (surface, role) = manager.create_surface()?;
        let config = manager.config();

        let background = configured_color(&surface, &config.background, Rgba::white());
        let outline = configured_color(&surface, &config.outline_color, Rgba::black());
        let font = TextStyle {
            family: config.font_family.clone(),
            size: config.font_size.max(1),
            color: configured_color(&surface, &config.text_color, Rgba::black()),
        };
        let surface_id = {
            let mut s = surface.borrow_mut();
            s.set_geometry(0, 0, width, height);
            s.set_background(background);
            s.id()
        };

        let inner = Rc::new(RefCell::new(WindowState {
            surface,
            surface_id,
            role,
            title: String::new(),
            x: 0,
            y: 0,
            width,
            height,
            background,
            outline,
            font,
            shapes: Vec::new(),
            opened: false,
            closed: false,
            output: None,
            key_press: HandlerSet::new(),
            left_click: HandlerSet::new(),
            left_drag: HandlerSet::new(),
            right_click: HandlerSet::new(),
            right_drag: HandlerSet::new(),
            timers: Vec::new(),
        }));
        manager.attach(role, surface_id, Rc::downgrade(&inner));
        log::debug!("Created {role:?} window {surface_id:?} ({width}x{height})");
        Ok(Self {
            inner,
            manager: manager.clone(),
        })
    }

    pub(crate) fn from_parts(inner: Rc<RefCell<WindowState>>, manager: WindowManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.inner.borrow().surface_id
    }

    /// Whether this window owns the event loop.
    pub fn is_primary(&self) -> bool {
        self.inner.borrow().role == SurfaceRole::Primary
    }

    pub fn is_opened(&self) -> bool {
        self.inner.borrow().opened
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// The output this window was closed with, if it was closed by
    /// [`Window::close`] or a host close request.
    pub fn output(&self) -> Option<String> {
        self.inner.borrow().output.clone()
    }

    pub fn title(&self) -> String {
        self.inner.borrow().title.clone()
    }

    pub fn x(&self) -> i32 {
        self.inner.borrow().x
    }

    pub fn y(&self) -> i32 {
        self.inner.borrow().y
    }

    pub fn width(&self) -> i32 {
        self.inner.borrow().width
    }

    pub fn height(&self) -> i32 {
        self.inner.borrow().height
    }

    pub fn background(&self) -> Rgba {
        self.inner.borrow().background
    }

    /// Change the background color.
    pub fn fill(&self, color: impl Into<ColorSpec>) -> Result<()> {
        let color = {
            let state = self.inner.borrow();
            let surface = state.surface.borrow();
            validate::color("window.fill", &**surface, &color.into())?
        };
        let mut state = self.inner.borrow_mut();
        if !state.closed {
            state.background = color;
            state.surface.borrow_mut().set_background(color);
        }
        Ok(())
    }

    /// Move the window on screen.
    pub fn relocate(&self, x: i32, y: i32) {
        let mut state = self.inner.borrow_mut();
        if !state.closed {
            state.x = x;
            state.y = y;
            let (w, h) = (state.width, state.height);
            state.surface.borrow_mut().set_geometry(x, y, w, h);
        }
    }

    /// Change the window size.
    pub fn resize(&self, width: i32, height: i32) -> Result<()> {
        validate::dimensions("window.resize", "window dimensions", width, height)?;
        let mut state = self.inner.borrow_mut();
        if !state.closed {
            state.width = width;
            state.height = height;
            let (x, y) = (state.x, state.y);
            state.surface.borrow_mut().set_geometry(x, y, width, height);
        }
        Ok(())
    }

    /// Build a shape on this window's surface and register it, unless closed.
    fn register<S: AsRef<Shape>>(&self, build: impl FnOnce(&SharedSurface, &WindowState) -> S) -> Option<S> {
        let shape = {
            let state = self.inner.borrow();
            if state.closed {
                return None;
            }
            build(&state.surface, &*state)
        };
        self.inner.borrow_mut().shapes.push(shape.as_ref().clone());
        Some(shape)
    }

    pub fn rectangle(&self, x: i32, y: i32, width: i32, height: i32) -> Result<Option<Rectangle>> {
        validate::dimensions("window.rectangle", "rectangle dimensions", width, height)?;
        validate::placement("window.rectangle", x, y, width, height)?;
        Ok(self.register(|surface, state| {
            Rectangle::create(
                surface,
                BoxGeometry::new(x, y, width, height),
                ShapeStyle::outlined(state.outline),
            )
        }))
    }

    pub fn oval(&self, x: i32, y: i32, width: i32, height: i32) -> Result<Option<Oval>> {
        validate::dimensions("window.oval", "oval dimensions", width, height)?;
        validate::placement("window.oval", x, y, width, height)?;
        Ok(self.register(|surface, state| {
            Oval::create(
                surface,
                BoxGeometry::new(x, y, width, height),
                ShapeStyle::outlined(state.outline),
            )
        }))
    }

    /// A closed polygon through at least three points.
    pub fn polygon(&self, points: impl IntoIterator<Item = (i32, i32)>) -> Result<Option<Polygon>> {
        let points = validate::point_list("window.polygon", points, 3)?;
        Ok(self.register(|surface, state| {
            Polygon::create(surface, points, ShapeStyle::outlined(state.outline))
        }))
    }

    /// An open polyline through at least two points.
    pub fn line(&self, points: impl IntoIterator<Item = (i32, i32)>) -> Result<Option<Line>> {
        let points = validate::point_list("window.line", points, 2)?;
        Ok(self.register(|surface, state| {
            Line::create(surface, points, ShapeStyle::outlined(state.outline))
        }))
    }

    pub fn text(&self, x: i32, y: i32, message: impl Display) -> Result<Option<Text>> {
        let message = message.to_string();
        Ok(self.register(|surface, state| Text::create(surface, x, y, message, state.font.clone())))
    }

    pub fn button(&self, x: i32, y: i32, label: impl Display) -> Result<Option<Button>> {
        let label = label.to_string();
        Ok(self.register(|surface, state| Button::create(surface, x, y, label, state.font.clone())))
    }

    /// A text entry, initially holding `message` (often empty).
    pub fn field(&self, x: i32, y: i32, message: impl Display) -> Result<Option<Field>> {
        let message = message.to_string();
        Ok(self.register(|surface, state| Field::create(surface, x, y, message, state.font.clone())))
    }

    /// An image loaded from the manager's image store.
    pub fn image(&self, x: i32, y: i32, name: &str) -> Result<Option<Image>> {
        validate::name("window.image", "file name", name)?;
        if self.is_closed() {
            return Ok(None);
        }
        let store = self.manager.images();
        let raster = store.load(name)?;
        Ok(self.register(|surface, _| Image::create(surface, x, y, raster, store)))
    }

    /// Live shapes in creation order, optionally only those in `group`.
    ///
    /// The returned list is a copy.
    pub fn all(&self, group: Option<&str>) -> Vec<Shape> {
        self.inner
            .borrow()
            .shapes
            .iter()
            .filter(|shape| group.is_none_or(|name| shape.in_group(name)))
            .cloned()
            .collect()
    }

    pub fn contains(&self, shape: &Shape) -> bool {
        self.inner.borrow().shapes.contains(shape)
    }

    /// Remove a shape. Returns `false` if it isn't registered here or the
    /// window is closed.
    pub fn remove(&self, shape: &Shape) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.closed {
                return false;
            }
            let Some(index) = state.shapes.iter().position(|s| s == shape) else {
                return false;
            };
            state.shapes.remove(index);
        }
        shape.delete();
        true
    }

    /// Register a key handler; it receives the symbolic key name.
    pub fn on_key_press(&self, handler: KeyHandler) {
        let mut state = self.inner.borrow_mut();
        if !state.closed {
            state.key_press.insert(handler);
        }
    }

    pub fn off_key_press(&self, handler: &KeyHandler) {
        self.inner.borrow_mut().key_press.remove(handler);
    }

    fn on_pointer(&self, select: fn(&mut WindowState) -> &mut HandlerSet<dyn Fn(i32, i32)>, handler: PointerHandler) {
        let mut state = self.inner.borrow_mut();
        if !state.closed {
            select(&mut state).insert(handler);
        }
    }

    fn off_pointer(&self, select: fn(&mut WindowState) -> &mut HandlerSet<dyn Fn(i32, i32)>, handler: &PointerHandler) {
        select(&mut self.inner.borrow_mut()).remove(handler);
    }

    pub fn on_left_click(&self, handler: PointerHandler) {
        self.on_pointer(|s| &mut s.left_click, handler);
    }

    pub fn off_left_click(&self, handler: &PointerHandler) {
        self.off_pointer(|s| &mut s.left_click, handler);
    }

    pub fn on_left_drag(&self, handler: PointerHandler) {
        self.on_pointer(|s| &mut s.left_drag, handler);
    }

    pub fn off_left_drag(&self, handler: &PointerHandler) {
        self.off_pointer(|s| &mut s.left_drag, handler);
    }

    pub fn on_right_click(&self, handler: PointerHandler) {
        self.on_pointer(|s| &mut s.right_click, handler);
    }

    pub fn off_right_click(&self, handler: &PointerHandler) {
        self.off_pointer(|s| &mut s.right_click, handler);
    }

    pub fn on_right_drag(&self, handler: PointerHandler) {
        self.on_pointer(|s| &mut s.right_drag, handler);
    }

    pub fn off_right_drag(&self, handler: &PointerHandler) {
        self.off_pointer(|s| &mut s.right_drag, handler);
    }

    /// Call `handler` every `interval_ms` milliseconds while the window is
    /// open. The handler's return value decides whether it keeps running.
    pub fn on_timer(&self, interval_ms: i64, handler: TimerHandler) -> Result<()> {
        validate::at_least("window.on_timer", "timer interval", interval_ms, 1)?;
        {
            let state = self.inner.borrow();
            if state.closed || state.timers.iter().any(|(h, _)| same_handler(h, &handler)) {
                return Ok(());
            }
        }
        let interval = Duration::from_millis(interval_ms as u64);
        let token = self
            .manager
            .schedule_timer(Rc::downgrade(&self.inner), interval, handler.clone());
        self.inner.borrow_mut().timers.push((handler, token));
        Ok(())
    }

    pub fn off_timer(&self, handler: &TimerHandler) {
        let removed: Vec<TimerToken> = {
            let mut state = self.inner.borrow_mut();
            let (gone, kept) = std::mem::take(&mut state.timers)
                .into_iter()
                .partition(|(h, _)| same_handler(h, handler));
            state.timers = kept;
            gone.into_iter().map(|(_, token): (TimerHandler, TimerToken)| token).collect()
        };
        for token in removed {
            self.manager.cancel_timer(token);
        }
    }

    pub fn handler_counts(&self) -> HandlerCounts {
        let state = self.inner.borrow();
        HandlerCounts {
            key_press: state.key_press.len(),
            left_click: state.left_click.len(),
            left_drag: state.left_drag.len(),
            right_click: state.right_click.len(),
            right_drag: state.right_drag.len(),
            timers: state.timers.len(),
        }
    }

    /// Make the window visible, titled `title` or the configured default.
    ///
    /// For the primary window this runs the event loop and returns the
    /// output passed to [`Window::close`], or `None` if the host ran out of
    /// events first. Secondary windows return `None` immediately.
    pub fn open(&self, title: Option<&str>) -> Option<String> {
        let title = title
            .map(str::to_string)
            .unwrap_or_else(|| self.manager.config().default_title.clone());
        {
            let mut state = self.inner.borrow_mut();
            if state.opened || state.closed {
                return None;
            }
            state.opened = true;
            state.title = title.clone();
            let mut surface = state.surface.borrow_mut();
            surface.set_title(&title);
            surface.show();
        }
        log::info!("Opened window {:?} '{title}'", self.surface_id());
        self.manager.show(self)
    }

    /// Close an open window: remove every shape, drop every handler and
    /// timer, and tear the surface down. Closing the primary window closes
    /// all others and ends the event loop with `output`.
    ///
    /// Every window keeps its output, readable through [`Window::output`];
    /// the primary's is also returned from [`Window::open`].
    pub fn close(&self, output: &str) {
        {
            let state = self.inner.borrow();
            if !state.opened || state.closed {
                return;
            }
        }
        self.teardown();
        self.inner.borrow_mut().output = Some(output.to_string());
        log::info!("Window {:?} closed: '{output}'", self.surface_id());
        self.manager.destroy(self, output);
    }

    /// Tear down without the open check; used when the primary window closes.
    pub(crate) fn discard(&self) {
        if self.is_closed() {
            return;
        }
        self.teardown();
    }

    fn teardown(&self) {
        let shapes = std::mem::take(&mut self.inner.borrow_mut().shapes);
        for shape in &shapes {
            shape.delete();
        }
        let (surface, tokens) = {
            let mut state = self.inner.borrow_mut();
            state.key_press.clear();
            state.left_click.clear();
            state.left_drag.clear();
            state.right_click.clear();
            state.right_drag.clear();
            state.closed = true;
            let tokens: Vec<TimerToken> = state.timers.drain(..).map(|(_, token)| token).collect();
            (state.surface.clone(), tokens)
        };
        for token in tokens {
            self.manager.cancel_timer(token);
        }
        surface.borrow_mut().destroy();
        log::debug!("Tore down window {:?} ({} shapes)", self.surface_id(), shapes.len());
    }

    fn find_shape(&self, item: ItemId) -> Option<Shape> {
        self.inner
            .borrow()
            .shapes
            .iter()
            .find(|shape| shape.item() == item)
            .cloned()
    }

    fn dispatch_pointer(&self, select: fn(&WindowState) -> &HandlerSet<dyn Fn(i32, i32)>, x: i32, y: i32) {
        let handlers = select(&self.inner.borrow()).snapshot();
        for handler in handlers {
            if self.is_closed() {
                break;
            }
            handler(x, y);
        }
    }

    /// Deliver one host input event to this window.
    ///
    /// Handlers run over a snapshot taken when the event arrives, so they
    /// may register or remove handlers freely. If one closes the window the
    /// rest are skipped.
    pub fn dispatch(&self, input: &InputEvent) {
        if self.is_closed() {
            return;
        }
        log::trace!("Dispatching {input:?} to {:?}", self.surface_id());
        match input {
            InputEvent::KeyPress { key } => {
                let handlers = self.inner.borrow().key_press.snapshot();
                for handler in handlers {
                    if self.is_closed() {
                        break;
                    }
                    handler(key);
                }
            }
            InputEvent::LeftClick { x, y } => self.dispatch_pointer(|s| &s.left_click, *x, *y),
            InputEvent::LeftDrag { x, y } => self.dispatch_pointer(|s| &s.left_drag, *x, *y),
            InputEvent::RightClick { x, y } => self.dispatch_pointer(|s| &s.right_click, *x, *y),
            InputEvent::RightDrag { x, y } => self.dispatch_pointer(|s| &s.right_drag, *x, *y),
            InputEvent::ButtonActivated { item } => {
                if let Some(button) = self.find_shape(*item).and_then(|s| s.as_button()) {
                    button.activate();
                }
            }
            InputEvent::FieldFocused { item } => {
                if let Some(field) = self.find_shape(*item).and_then(|s| s.as_field()) {
                    field.focus_in();
                }
            }
            InputEvent::FieldEdited { item, text } => {
                if let Some(field) = self.find_shape(*item).and_then(|s| s.as_field()) {
                    field.edited(text);
                }
            }
            InputEvent::Resized { width, height } => {
                if *width >= 1 && *height >= 1 {
                    let mut state = self.inner.borrow_mut();
                    state.width = *width;
                    state.height = *height;
                }
            }
            InputEvent::CloseRequested => self.close(""),
        }
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Window")
            .field("surface", &state.surface_id)
            .field("role", &state.role)
            .field("size", &(state.width, state.height))
            .field("shapes", &state.shapes.len())
            .field("opened", &state.opened)
            .field("closed", &state.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::headless::HeadlessHost;
    use crate::shapes::{ActivateHandler, BoxShape};
    use crate::testing;
    use crate::timer::TimerControl;
    use std::cell::Cell;

    #[test]
    fn test_end_to_end_rectangle() {
        let (_host, window) = testing::window(400, 300);
        let rect = window.rectangle(0, 0, 100, 50).unwrap().unwrap();
        assert_eq!(rect.right(), 100);
        assert_eq!(rect.bottom(), 50);

        rect.move_by(10, 0).unwrap();
        assert_eq!(rect.left(), 10);

        assert!(window.remove(&rect));
        assert!(window.all(None).is_empty());
        assert!(!rect.overlaps(&rect));
    }

    #[test]
    fn test_failed_factory_registers_nothing() {
        let (host, window) = testing::window(400, 300);
        assert!(matches!(
            window.rectangle(0, 0, 0, 10),
            Err(Error::InvalidValue { argument: "rectangle dimensions", .. })
        ));
        assert!(window.oval(0, 0, 10, -3).is_err());
        assert!(window.polygon([(0, 0)]).is_err());
        assert!(window.all(None).is_empty());
        assert!(host.scene(window.surface_id()).unwrap().is_empty());
    }

    #[test]
    fn test_groups_filter_all() {
        let (_host, window) = testing::window(400, 300);
        let a = window.rectangle(0, 0, 10, 10).unwrap().unwrap();
        let b = window.oval(0, 0, 10, 10).unwrap().unwrap();
        let c = window.text(0, 0, "c").unwrap().unwrap();
        a.group("walls").unwrap();
        c.group("walls").unwrap();
        b.group("floor").unwrap();

        let before = window.all(Some("walls"));
        assert_eq!(before, vec![Shape::from(a.clone()), Shape::from(c.clone())]);

        b.group("walls").unwrap();
        b.ungroup("walls").unwrap();
        assert_eq!(window.all(Some("walls")), before);
        assert_eq!(window.all(None).len(), 3);
        assert!(window.all(Some("ceiling")).is_empty());
    }

    #[test]
    fn test_removed_shape_leaves_every_group() {
        let (_host, window) = testing::window(400, 300);
        let a = window.rectangle(0, 0, 10, 10).unwrap().unwrap();
        a.group("x").unwrap();
        a.group("y").unwrap();
        let shape: Shape = a.clone().into();

        assert!(window.remove(&a));
        assert!(!window.remove(&a));
        for group in [None, Some("x"), Some("y")] {
            assert!(!window.all(group).contains(&shape));
        }

        a.group("z").unwrap();
        assert!(!a.in_group("z"));
        a.ungroup("x").unwrap();
        assert!(!a.in_group("x"));
    }

    #[test]
    fn test_all_returns_a_copy() {
        let (_host, window) = testing::window(400, 300);
        window.rectangle(0, 0, 10, 10).unwrap();
        let mut shapes = window.all(None);
        shapes.clear();
        assert_eq!(window.all(None).len(), 1);
    }

    #[test]
    fn test_shapes_on_other_windows_never_overlap() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host);
        let one = Window::new(&manager, 100, 100).unwrap();
        let two = Window::new(&manager, 100, 100).unwrap();
        let a = one.rectangle(0, 0, 50, 50).unwrap().unwrap();
        let b = two.rectangle(0, 0, 50, 50).unwrap().unwrap();

        assert!(!a.overlaps(&b));
        assert!(!two.remove(&a));
    }

    #[test]
    fn test_handler_registration_is_idempotent() {
        let (_host, window) = testing::window(400, 300);
        let key: KeyHandler = Rc::new(|_key: &str| {});
        let click: PointerHandler = Rc::new(|_x: i32, _y: i32| {});

        window.on_key_press(key.clone());
        window.on_key_press(key.clone());
        window.on_left_click(click.clone());
        window.on_right_drag(click.clone());
        assert_eq!(window.handler_counts().key_press, 1);
        assert_eq!(window.handler_counts().right_drag, 1);

        window.off_key_press(&key);
        window.off_key_press(&key);
        window.off_left_drag(&click);
        let counts = window.handler_counts();
        assert_eq!(counts.key_press, 0);
        assert_eq!(counts.left_click, 1);
    }

    #[test]
    fn test_dispatch_uses_snapshot() {
        let (_host, window) = testing::window(400, 300);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let late_sink = calls.clone();
        let late: PointerHandler = Rc::new(move |x: i32, _y: i32| late_sink.borrow_mut().push(format!("late {x}")));

        let sink = calls.clone();
        let registrar = window.clone();
        let late_handle = late.clone();
        let first: PointerHandler = Rc::new(move |x: i32, y: i32| {
            sink.borrow_mut().push(format!("first {x},{y}"));
            registrar.on_left_click(late_handle.clone());
            registrar.rectangle(x, y, 5, 5).unwrap();
        });
        window.on_left_click(first);

        window.dispatch(&InputEvent::LeftClick { x: 3, y: 4 });
        assert_eq!(*calls.borrow(), vec!["first 3,4"]);
        assert_eq!(window.all(None).len(), 1);

        window.dispatch(&InputEvent::LeftClick { x: 7, y: 8 });
        assert_eq!(*calls.borrow(), vec!["first 3,4", "first 7,8", "late 7"]);
    }

    #[test]
    fn test_key_handlers_receive_symbol() {
        let (_host, window) = testing::window(400, 300);
        let keys = Rc::new(RefCell::new(Vec::new()));
        let sink = keys.clone();
        window.on_key_press(Rc::new(move |key: &str| sink.borrow_mut().push(key.to_string())));

        window.dispatch(&InputEvent::KeyPress { key: "Left".into() });
        window.dispatch(&InputEvent::KeyPress { key: "space".into() });
        window.dispatch(&InputEvent::LeftClick { x: 0, y: 0 });
        assert_eq!(*keys.borrow(), vec!["Left", "space"]);
    }

    #[test]
    fn test_close_cascades_to_shapes_and_handlers() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let _primary = Window::new(&manager, 100, 100).unwrap();
        let window = Window::new(&manager, 200, 200).unwrap();
        window.open(Some("board"));

        let a = window.rectangle(0, 0, 10, 10).unwrap().unwrap();
        window.line([(0, 0), (5, 5)]).unwrap();
        window.text(1, 1, "hi").unwrap();
        window.on_key_press(Rc::new(|_key: &str| {}));
        window.on_left_click(Rc::new(|_x: i32, _y: i32| {}));
        window.on_timer(5, Rc::new(|| TimerControl::Continue)).unwrap();

        window.close("");
        assert!(window.all(None).is_empty());
        assert_eq!(window.handler_counts(), HandlerCounts::default());
        assert!(a.is_deleted());
        assert_eq!(manager.pending_timers(), 0);

        window.close("again");
        assert!(window.is_closed());
        assert!(window.rectangle(0, 0, 5, 5).unwrap().is_none());
        window.on_key_press(Rc::new(|_key: &str| {}));
        assert_eq!(window.handler_counts().key_press, 0);
        assert!(window.open(None).is_none());
    }

    #[test]
    fn test_close_requires_open() {
        let (_host, window) = testing::window(100, 100);
        window.rectangle(0, 0, 5, 5).unwrap();
        window.close("early");
        assert!(!window.is_closed());
        assert_eq!(window.all(None).len(), 1);
    }

    #[test]
    fn test_handler_closing_window_skips_the_rest() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let window = Window::new(&manager, 100, 100).unwrap();
        let later = Rc::new(Cell::new(false));

        let closer = window.clone();
        window.on_key_press(Rc::new(move |key: &str| closer.close(key)));
        let flag = later.clone();
        window.on_key_press(Rc::new(move |_key: &str| flag.set(true)));

        host.push_input(window.surface_id(), InputEvent::KeyPress { key: "q".into() });
        assert_eq!(window.open(Some("game")).as_deref(), Some("q"));
        assert!(!later.get());
    }

    #[test]
    fn test_widget_events_route_to_shapes() {
        let (_host, window) = testing::window(400, 300);
        let button = window.button(0, 0, "ok").unwrap().unwrap();
        let field = window.field(0, 40, "name").unwrap().unwrap();
        let pressed = Rc::new(Cell::new(0));
        let counter = pressed.clone();
        button.on_activate(ActivateHandler::plain(move || counter.set(counter.get() + 1)));

        window.dispatch(&InputEvent::ButtonActivated { item: button.item() });
        window.dispatch(&InputEvent::FieldFocused { item: field.item() });
        assert_eq!(field.contents(), "");
        window.dispatch(&InputEvent::FieldEdited {
            item: field.item(),
            text: "Ada".into(),
        });
        // Unknown items and mismatched kinds are ignored.
        window.dispatch(&InputEvent::ButtonActivated { item: field.item() });
        window.dispatch(&InputEvent::FieldFocused { item: ItemId(4242) });

        assert_eq!(pressed.get(), 1);
        assert_eq!(field.contents(), "Ada");
    }

    #[test]
    fn test_window_geometry() {
        let (host, window) = testing::window(400, 300);
        window.relocate(20, 30);
        window.resize(640, 480).unwrap();
        window.fill("black").unwrap();
        assert!(window.resize(0, 1).is_err());
        assert!(window.fill("nonsense").is_err());

        let scene = host.scene(window.surface_id()).unwrap();
        assert_eq!(scene.origin, (20, 30));
        assert_eq!((scene.width, scene.height), (640, 480));
        assert_eq!(scene.background, Rgba::black());

        window.dispatch(&InputEvent::Resized { width: 800, height: 600 });
        assert_eq!((window.width(), window.height()), (800, 600));
    }

    #[test]
    fn test_timer_interval_must_be_positive() {
        let (_host, window) = testing::window(100, 100);
        let tick: TimerHandler = Rc::new(|| TimerControl::Continue);
        assert!(matches!(
            window.on_timer(0, tick.clone()),
            Err(Error::InvalidValue { argument: "timer interval", .. })
        ));
        window.on_timer(10, tick.clone()).unwrap();
        window.on_timer(10, tick.clone()).unwrap();
        assert_eq!(window.handler_counts().timers, 1);

        window.off_timer(&tick);
        window.off_timer(&tick);
        assert_eq!(window.handler_counts().timers, 0);
        assert_eq!(window.manager().pending_timers(), 0);
    }

    #[test]
    fn test_config_defaults_apply() {
        let host = HeadlessHost::new();
        let config = crate::config::ToolkitConfig {
            default_title: "sketch".into(),
            outline_color: "red".into(),
            font_size: 20,
            ..Default::default()
        };
        let manager = WindowManager::with_config(host.clone(), config);
        let window = Window::new(&manager, 100, 100).unwrap();
        let rect = window.rectangle(0, 0, 5, 5).unwrap().unwrap();
        let text = window.text(0, 0, "x").unwrap().unwrap();

        assert_eq!(rect.style().stroke_color, Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(text.font().size, 20);

        host.push_input(window.surface_id(), InputEvent::CloseRequested);
        window.open(None);
        assert_eq!(window.title(), "sketch");
        assert_eq!(host.scene(window.surface_id()).unwrap().title, "sketch");
    }
}
