//! Callback types and identity-keyed handler registries.

use crate::timer::TimerControl;
use std::rc::Rc;

/// Called with the symbolic name of a pressed key.
pub type KeyHandler = Rc<dyn Fn(&str)>;

/// Called with integer pointer coordinates for clicks and drags.
pub type PointerHandler = Rc<dyn Fn(i32, i32)>;

/// Called on every timer tick; the return value decides whether it re-arms.
pub type TimerHandler = Rc<dyn Fn() -> TimerControl>;

/// Whether two handlers are the same callback instance.
pub fn same_handler<F: ?Sized>(a: &Rc<F>, b: &Rc<F>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Distinct callbacks in registration order.
pub struct HandlerSet<F: ?Sized> {
    handlers: Vec<Rc<F>>,
}

impl<F: ?Sized> Default for HandlerSet<F> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<F: ?Sized> HandlerSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler. Returns `false` if it was already registered.
    pub fn insert(&mut self, handler: Rc<F>) -> bool {
        if self.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    /// Remove a handler. Returns `false` if it wasn't registered.
    pub fn remove(&mut self, handler: &Rc<F>) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !same_handler(h, handler));
        self.handlers.len() != before
    }

    pub fn contains(&self, handler: &Rc<F>) -> bool {
        self.handlers.iter().any(|h| same_handler(h, handler))
    }

    /// Copy of the current handlers, safe to iterate while the set changes.
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.handlers.clone()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
