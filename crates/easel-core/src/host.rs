//! Host event source and surface factory.

use crate::error::Result;
use crate::surface::{ItemId, Surface, SurfaceId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether a surface is the one that owns the shared event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceRole {
    Primary,
    Secondary,
}

/// Input decoded by the host for one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed; `key` is the symbolic key name ("a", "Left", "space").
    KeyPress { key: String },
    LeftClick { x: i32, y: i32 },
    LeftDrag { x: i32, y: i32 },
    RightClick { x: i32, y: i32 },
    RightDrag { x: i32, y: i32 },
    /// An embedded button widget was activated.
    ButtonActivated { item: ItemId },
    /// An embedded text-entry widget gained focus.
    FieldFocused { item: ItemId },
    /// The user edited an embedded text-entry widget.
    FieldEdited { item: ItemId, text: String },
    /// The user resized the surface.
    Resized { width: i32, height: i32 },
    /// The user asked to close the surface.
    CloseRequested,
}

/// An input event addressed to a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEvent {
    pub surface: SurfaceId,
    pub input: InputEvent,
}

impl HostEvent {
    pub fn new(surface: SurfaceId, input: InputEvent) -> Self {
        Self { surface, input }
    }
}

/// Why [`Host::wait`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wake {
    /// An input event arrived.
    Event(HostEvent),
    /// The requested deadline passed.
    Deadline,
    /// The host will never produce another event.
    Idle,
}

/// The windowing host: creates surfaces and delivers input and time.
pub trait Host {
    /// Allocate a hidden surface.
    fn create_surface(&mut self, role: SurfaceRole) -> Result<Box<dyn Surface>>;

    /// Monotonic time since the host started.
    fn now(&self) -> Duration;

    /// Block until an event arrives or `deadline` (absolute, see
    /// [`Host::now`]) passes. `None` waits indefinitely.
    fn wait(&mut self, deadline: Option<Duration>) -> Wake;
}
