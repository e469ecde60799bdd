//! Push buttons with their own activation handlers.

use super::{Button, Content, Shape, ShapeKind, ShapeStyle, TextStyle, parse_content};
use crate::geometry::{AnchoredGeometry, Geometry};
use crate::error::Result;
use crate::surface::SharedSurface;
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

/// A callback run when a button is activated.
#[derive(Clone)]
pub enum ActivateHandler {
    /// Takes no arguments.
    Plain(Rc<dyn Fn()>),
    /// Receives the button that was activated.
    WithSource(Rc<dyn Fn(&Button)>),
}

impl ActivateHandler {
    pub fn plain(f: impl Fn() + 'static) -> Self {
        Self::Plain(Rc::new(f))
    }

    pub fn with_source(f: impl Fn(&Button) + 'static) -> Self {
        Self::WithSource(Rc::new(f))
    }

    /// Whether both wrap the same callback instance.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(a), Self::Plain(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (Self::WithSource(a), Self::WithSource(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for ActivateHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("ActivateHandler::Plain"),
            Self::WithSource(_) => f.write_str("ActivateHandler::WithSource"),
        }
    }
}

impl Button {
    pub(crate) fn create(surface: &SharedSurface, x: i32, y: i32, label: String, font: TextStyle) -> Self {
        let button = Self(Shape::create(
            surface,
            ShapeKind::Button,
            Geometry::Anchored(AnchoredGeometry::new(x, y, None)),
            ShapeStyle::default(),
            Content::Button {
                label,
                handlers: Vec::new(),
            },
        ));
        button.mutate(|d| {
            d.surface.borrow_mut().set_font(d.item, &font);
            d.refresh_extent();
        });
        button
    }

    /// Current label.
    pub fn label(&self) -> String {
        self.content_text()
    }

    /// Parse the label as `T`.
    pub fn read<T: FromStr>(&self) -> Result<T> {
        parse_content("button.read", &self.content_text())
    }

    /// Replace the label.
    pub fn rewrite(&self, label: impl Display) {
        self.replace_text(label.to_string());
    }

    /// Register an activation handler. Registering it twice is a no-op.
    pub fn on_activate(&self, handler: ActivateHandler) {
        self.mutate(|d| {
            if let Content::Button { handlers, .. } = &mut d.content {
                if !handlers.iter().any(|h| h.same(&handler)) {
                    handlers.push(handler);
                }
            }
        });
    }

    /// Unregister an activation handler. Unknown handlers are ignored.
    pub fn off_activate(&self, handler: &ActivateHandler) {
        self.mutate(|d| {
            if let Content::Button { handlers, .. } = &mut d.content {
                handlers.retain(|h| !h.same(handler));
            }
        });
    }

    pub fn handler_count(&self) -> usize {
        match &self.inner.borrow().content {
            Content::Button { handlers, .. } => handlers.len(),
            _ => 0,
        }
    }

    /// Run every activation handler in registration order.
    pub fn activate(&self) {
        let snapshot = match &self.inner.borrow().content {
            Content::Button { handlers, .. } => handlers.clone(),
            _ => Vec::new(),
        };
        log::trace!("Activating button {} ({} handlers)", self.id(), snapshot.len());
        for handler in snapshot {
            match handler {
                ActivateHandler::Plain(f) => f(),
                ActivateHandler::WithSource(f) => f(self),
            }
        }
    }
}
