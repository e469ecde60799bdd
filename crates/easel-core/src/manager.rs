//! The window-manager context shared by every window of a program.
//!
//! It owns the host, tracks the single primary window and any secondary
//! windows, and runs the event loop while the primary window is open.
//! Closing the primary window closes every secondary window, stops the loop
//! and resets the context so a new primary window can be created.

use crate::config::ToolkitConfig;
use crate::error::Result;
use crate::handlers::TimerHandler;
use crate::host::{Host, HostEvent, SurfaceRole, Wake};
use crate::storage::{ImageStore, MemoryImageStore};
use crate::surface::{SharedSurface, SurfaceId};
use crate::timer::{Scheduler, TimerControl, TimerToken};
use crate::window::{Window, WindowState};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct WindowSlot {
    surface: SurfaceId,
    window: Weak<RefCell<WindowState>>,
}

#[derive(Clone)]
struct TimerTarget {
    window: Weak<RefCell<WindowState>>,
    handler: TimerHandler,
}

struct ManagerState {
    host: Box<dyn Host>,
    images: Rc<dyn ImageStore>,
    config: Rc<ToolkitConfig>,
    primary: Option<WindowSlot>,
    secondaries: Vec<WindowSlot>,
    scheduler: Scheduler<TimerTarget>,
    running: bool,
    exit_output: Option<String>,
}

/// Shared handle to the window-manager context.
///
/// Pass it to [`Window::new`]; the first window created becomes the primary
/// window, every later one is secondary until the primary closes.
#[derive(Clone)]
pub struct WindowManager {
    inner: Rc<RefCell<ManagerState>>,
}

impl WindowManager {
    pub fn new(host: impl Host + 'static) -> Self {
        Self::with_config(host, ToolkitConfig::default())
    }

    pub fn with_config(host: impl Host + 'static, config: ToolkitConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManagerState {
                host: Box::new(host),
                images: Rc::new(MemoryImageStore::new()),
                config: Rc::new(config),
                primary: None,
                secondaries: Vec::new(),
                scheduler: Scheduler::new(),
                running: false,
                exit_output: None,
            })),
        }
    }

    /// Use `store` for loading and saving image shapes.
    pub fn with_image_store(self, store: Rc<dyn ImageStore>) -> Self {
        self.inner.borrow_mut().images = store;
        self
    }

    pub fn config(&self) -> Rc<ToolkitConfig> {
        self.inner.borrow().config.clone()
    }

    pub fn images(&self) -> Rc<dyn ImageStore> {
        self.inner.borrow().images.clone()
    }

    /// Current host time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().host.now()
    }

    pub fn has_primary(&self) -> bool {
        self.inner.borrow().primary.is_some()
    }

    pub fn secondary_count(&self) -> usize {
        self.inner.borrow().secondaries.len()
    }

    /// Whether the event loop is running.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Number of armed timers across all windows.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().scheduler.len()
    }

    /// Allocate a hidden surface: primary if there is none yet.
    pub(crate) fn create_surface(&self) -> Result<(SharedSurface, SurfaceRole)> {
        let mut state = self.inner.borrow_mut();
        let role = if state.primary.is_none() {
            SurfaceRole::Primary
        } else {
            SurfaceRole::Secondary
        };
        let surface = state.host.create_surface(role)?;
        Ok((Rc::new(RefCell::new(surface)), role))
    }

    /// Record a window created on a surface from [`Self::create_surface`].
    pub(crate) fn attach(&self, role: SurfaceRole, surface: SurfaceId, window: Weak<RefCell<WindowState>>) {
        let slot = WindowSlot { surface, window };
        let mut state = self.inner.borrow_mut();
        match role {
            SurfaceRole::Primary => state.primary = Some(slot),
            SurfaceRole::Secondary => state.secondaries.push(slot),
        }
    }

    fn is_primary(&self, surface: SurfaceId) -> bool {
        self.inner
            .borrow()
            .primary
            .as_ref()
            .is_some_and(|slot| slot.surface == surface)
    }

    /// Called after a window became visible. Blocks in the event loop for
    /// the primary window and returns its close output.
    pub(crate) fn show(&self, window: &Window) -> Option<String> {
        if self.is_primary(window.surface_id()) {
            self.run()
        } else {
            None
        }
    }

    /// Called after a window tore itself down.
    pub(crate) fn destroy(&self, window: &Window, output: &str) {
        let surface = window.surface_id();
        if self.is_primary(surface) {
            let secondaries = std::mem::take(&mut self.inner.borrow_mut().secondaries);
            for slot in secondaries {
                if let Some(inner) = slot.window.upgrade() {
                    Window::from_parts(inner, self.clone()).discard();
                }
            }
            let mut state = self.inner.borrow_mut();
            state.running = false;
            state.primary = None;
            state.scheduler.clear();
            state.exit_output = Some(output.to_string());
            log::info!("Primary window closed");
        } else {
            self.inner
                .borrow_mut()
                .secondaries
                .retain(|slot| slot.surface != surface);
            log::debug!("Secondary window {surface:?} closed");
        }
    }

    pub(crate) fn schedule_timer(
        &self,
        window: Weak<RefCell<WindowState>>,
        interval: Duration,
        handler: TimerHandler,
    ) -> TimerToken {
        let mut state = self.inner.borrow_mut();
        let now = state.host.now();
        let token = state.scheduler.schedule(now, interval, TimerTarget { window, handler });
        log::debug!("Armed timer {token:?} every {interval:?}");
        token
    }

    pub(crate) fn cancel_timer(&self, token: TimerToken) {
        self.inner.borrow_mut().scheduler.cancel(token);
    }

    /// Run the shared event loop until the primary window closes or the
    /// host runs dry.
    fn run(&self) -> Option<String> {
        log::info!("Event loop started");
        self.inner.borrow_mut().running = true;
        while self.is_running() {
            let wake = {
                let mut state = self.inner.borrow_mut();
                let deadline = state.scheduler.next_deadline();
                state.host.wait(deadline)
            };
            match wake {
                Wake::Event(event) => self.route(event),
                Wake::Deadline => {}
                Wake::Idle => {
                    log::warn!("Host has no more events; stopping event loop");
                    break;
                }
            }
            self.fire_due_timers();
        }
        let mut state = self.inner.borrow_mut();
        state.running = false;
        log::info!("Event loop stopped");
        state.exit_output.take()
    }

    fn find(&self, surface: SurfaceId) -> Option<Window> {
        let state = self.inner.borrow();
        state
            .primary
            .iter()
            .chain(state.secondaries.iter())
            .find(|slot| slot.surface == surface)
            .and_then(|slot| slot.window.upgrade())
            .map(|inner| Window::from_parts(inner, self.clone()))
    }

    fn route(&self, event: HostEvent) {
        match self.find(event.surface) {
            Some(window) => window.dispatch(&event.input),
            None => log::trace!("Dropping {:?} for unknown surface {:?}", event.input, event.surface),
        }
    }

    fn fire_due_timers(&self) {
        loop {
            let due = {
                let mut state = self.inner.borrow_mut();
                let now = state.host.now();
                state.scheduler.pop_due(now)
            };
            let Some((token, target)) = due else {
                break;
            };
            let window = target
                .window
                .upgrade()
                .map(|inner| Window::from_parts(inner, self.clone()));
            let Some(window) = window.filter(|w| !w.is_closed()) else {
                self.cancel_timer(token);
                continue;
            };

            // Ticks before the window is shown are skipped but keep the timer armed.
            if window.is_opened() && (target.handler)() == TimerControl::Stop {
                window.off_timer(&target.handler);
                continue;
            }

            let mut state = self.inner.borrow_mut();
            let now = state.host.now();
            state.scheduler.rearm(token, now);
        }
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("WindowManager")
            .field("primary", &state.primary.as_ref().map(|slot| slot.surface))
            .field("secondaries", &state.secondaries.len())
            .field("running", &state.running)
            .field("timers", &state.scheduler.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::TimerHandler;
    use crate::headless::HeadlessHost;
    use crate::host::InputEvent;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_window_is_primary() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let first = Window::new(&manager, 100, 100).unwrap();
        let second = Window::new(&manager, 50, 50).unwrap();

        assert!(first.is_primary());
        assert!(!second.is_primary());
        assert!(manager.has_primary());
        assert_eq!(manager.secondary_count(), 1);
        assert_eq!(host.surfaces().len(), 2);
    }

    #[test]
    fn test_primary_close_cascades_and_resets() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let primary = Window::new(&manager, 100, 100).unwrap();
        let secondary = Window::new(&manager, 50, 50).unwrap();
        let hidden = Window::new(&manager, 50, 50).unwrap();
        secondary.open(Some("second"));
        secondary.rectangle(0, 0, 10, 10).unwrap();

        host.push_input(primary.surface_id(), InputEvent::CloseRequested);
        assert_eq!(primary.open(None), Some(String::new()));

        assert!(primary.is_closed());
        assert!(secondary.is_closed());
        assert!(hidden.is_closed());
        assert!(secondary.all(None).is_empty());
        assert_eq!(primary.output().as_deref(), Some(""));
        assert_eq!(secondary.output(), None);
        assert!(!manager.has_primary());
        assert_eq!(manager.secondary_count(), 0);
        assert!(!manager.is_running());

        let next = Window::new(&manager, 10, 10).unwrap();
        assert!(next.is_primary());
    }

    #[test]
    fn test_secondary_close_leaves_primary() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let primary = Window::new(&manager, 100, 100).unwrap();
        let secondary = Window::new(&manager, 50, 50).unwrap();

        assert_eq!(secondary.open(None), None);
        secondary.close("bye");
        assert!(secondary.is_closed());
        assert_eq!(secondary.output().as_deref(), Some("bye"));
        assert_eq!(primary.output(), None);
        assert!(!primary.is_closed());
        assert_eq!(manager.secondary_count(), 0);
        assert!(host.scene(secondary.surface_id()).unwrap().destroyed);
    }

    #[test]
    fn test_timer_runs_until_stopped() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let window = Window::new(&manager, 100, 100).unwrap();

        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();
        let closer = window.clone();
        let handler: TimerHandler = Rc::new(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                closer.close("three ticks");
                return TimerControl::Stop;
            }
            TimerControl::Continue
        });
        window.on_timer(10, handler).unwrap();

        assert_eq!(window.open(None).as_deref(), Some("three ticks"));
        assert_eq!(ticks.get(), 3);
        assert_eq!(host.now(), ms(30));
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn test_timer_on_hidden_secondary_never_fires() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let primary = Window::new(&manager, 100, 100).unwrap();
        let hidden = Window::new(&manager, 50, 50).unwrap();

        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();
        hidden
            .on_timer(
                10,
                Rc::new(move || {
                    counter.set(counter.get() + 1);
                    TimerControl::Continue
                }),
            )
            .unwrap();
        assert_eq!(manager.pending_timers(), 1);

        let armed = Rc::new(Cell::new(0));
        let clock = manager.clone();
        let seen = armed.clone();
        primary
            .on_timer(
                25,
                Rc::new(move || {
                    seen.set(clock.pending_timers());
                    TimerControl::Stop
                }),
            )
            .unwrap();

        host.push_event_at(ms(55), HostEvent::new(primary.surface_id(), InputEvent::CloseRequested));
        primary.open(None);

        assert_eq!(ticks.get(), 0);
        assert_eq!(armed.get(), 2);
        assert!(hidden.is_closed());
        assert_eq!(hidden.handler_counts().timers, 0);
        assert_eq!(manager.pending_timers(), 0);
        assert_eq!(host.now(), ms(55));
    }

    #[test]
    fn test_timers_interleave_with_events() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let window = Window::new(&manager, 100, 100).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        let clock = manager.clone();
        window
            .on_timer(
                20,
                Rc::new(move || {
                    sink.borrow_mut().push(format!("tick@{}", clock.now().as_millis()));
                    TimerControl::Continue
                }),
            )
            .unwrap();
        let sink = log.clone();
        window.on_key_press(Rc::new(move |key: &str| sink.borrow_mut().push(key.to_string())));

        let id = window.surface_id();
        host.push_event_at(ms(30), HostEvent::new(id, InputEvent::KeyPress { key: "a".into() }));
        host.push_event_at(ms(45), HostEvent::new(id, InputEvent::CloseRequested));
        window.open(None);

        assert_eq!(*log.borrow(), vec!["tick@20", "a", "tick@40"]);
    }

    #[test]
    fn test_idle_host_stops_loop() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host);
        let window = Window::new(&manager, 100, 100).unwrap();

        assert_eq!(window.open(None), None);
        assert!(window.is_opened());
        assert!(!window.is_closed());
        assert!(!manager.is_running());
    }

    #[test]
    fn test_events_for_unknown_surfaces_are_dropped() {
        let host = HeadlessHost::new();
        let manager = WindowManager::new(host.clone());
        let window = Window::new(&manager, 100, 100).unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        window.on_left_click(Rc::new(move |_x: i32, _y: i32| counter.set(counter.get() + 1)));

        host.push_input(SurfaceId(999), InputEvent::LeftClick { x: 1, y: 1 });
        host.push_input(window.surface_id(), InputEvent::LeftClick { x: 1, y: 1 });
        host.push_input(window.surface_id(), InputEvent::CloseRequested);
        window.open(None);

        assert_eq!(clicks.get(), 1);
    }
}
