//! Easel Core Library
//!
//! A small retained-mode 2D toolkit: open a window, draw shapes, group and
//! query them, and react to keyboard, mouse, timer and widget events.
//!
//! The toolkit talks to the outside world through two traits: [`Host`]
//! creates surfaces and delivers input and time, and [`Surface`] owns the
//! drawable primitives. [`headless::HeadlessHost`] implements both in memory.
//!
//! ```
//! use easel_core::prelude::*;
//! use std::rc::Rc;
//!
//! let host = HeadlessHost::new();
//! let manager = WindowManager::new(host.clone());
//! let window = Window::new(&manager, 200, 100).unwrap();
//!
//! let ball = window.oval(10, 10, 20, 20).unwrap().unwrap();
//! let mover = ball.clone();
//! let closer = window.clone();
//! window.on_key_press(Rc::new(move |key: &str| match key {
//!     "Right" => mover.move_by(5, 0).unwrap(),
//!     _ => closer.close("done"),
//! }));
//!
//! host.push_input(window.surface_id(), InputEvent::KeyPress { key: "Right".into() });
//! host.push_input(window.surface_id(), InputEvent::KeyPress { key: "q".into() });
//! assert_eq!(window.open(Some("demo")).as_deref(), Some("done"));
//! assert_eq!(ball.left(), 15);
//! ```
//!
//! Handlers are typed per event kind, so a key handler that doesn't take
//! the key name is rejected at compile time:
//!
//! ```compile_fail
//! use easel_core::prelude::*;
//! use std::rc::Rc;
//!
//! let manager = WindowManager::new(HeadlessHost::new());
//! let window = Window::new(&manager, 10, 10).unwrap();
//! window.on_key_press(Rc::new(|| {}));
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod headless;
pub mod host;
pub mod manager;
pub mod raster;
pub mod shapes;
pub mod storage;
pub mod surface;
pub mod timer;
pub mod validate;
pub mod window;

pub use color::{ColorSpec, Rgba};
pub use config::{ConfigError, ToolkitConfig};
pub use error::{Error, Result};
pub use geometry::{Bounds, Geometry};
pub use handlers::{KeyHandler, PointerHandler, TimerHandler};
pub use headless::{HeadlessHost, Scene, SceneItem};
pub use host::{Host, HostEvent, InputEvent, SurfaceRole, Wake};
pub use manager::WindowManager;
pub use raster::Raster;
pub use shapes::{
    ActivateHandler, AnchoredShape, BoxShape, Button, Field, Image, Line, Oval, PointListShape,
    Polygon, Rectangle, Shape, ShapeId, ShapeKind, ShapeStyle, Text, TextStyle,
};
pub use storage::{ImageStore, MemoryImageStore};
pub use surface::{ItemId, SharedSurface, Surface, SurfaceId};
pub use timer::{TimerControl, TimerToken};
pub use window::{HandlerCounts, Window};

/// Everything needed to write a small program.
pub mod prelude {
    pub use crate::{
        ActivateHandler, AnchoredShape, BoxShape, ColorSpec, HeadlessHost, InputEvent,
        KeyHandler, PointListShape, PointerHandler, Shape, TimerControl, TimerHandler, Window,
        WindowManager,
    };
}
