//! Host environment seam for the scroll engine.
//!
//! The engine never talks to a real document. It asks an [`EventHost`] for viewport geometry
//! and the reduced-motion preference, and registers plain callbacks for the events it cares
//! about. [`SimulatedHost`] is the in-process implementation used by tests and the CLI.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::Rc,
};

use crate::foundation::core::{TrackBounds, Viewport};

/// Host events the engine listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostEvent {
    /// Document scrolled.
    Scroll,
    /// Viewport resized.
    Resize,
    /// The reduced-motion media feature changed.
    ReducedMotionChange,
}

/// Callback invoked on the event loop when its event fires.
pub type Listener = Rc<dyn Fn()>;

/// Handle returned by [`EventHost::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Capabilities the host rendering environment provides.
pub trait EventHost {
    /// Current viewport geometry.
    fn viewport(&self) -> Viewport;

    /// Current answer of the `prefers-reduced-motion: reduce` media query.
    fn prefers_reduced_motion(&self) -> bool;

    /// Register `listener` for `event`.
    fn add_listener(&self, event: HostEvent, listener: Listener) -> ListenerId;

    /// Unregister a listener. Returns `false` if `id` was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

#[derive(Default)]
struct HostState {
    viewport: Option<Viewport>,
    scroll_y: f64,
    reduced_motion: bool,
    next_id: u64,
    listeners: BTreeMap<ListenerId, (HostEvent, Listener)>,
    // doc_top/height of each mounted container; `None` once unmounted
    containers: Vec<Option<(f64, f64)>>,
}

/// Single-threaded in-memory document: one scroll offset, one viewport, any number of
/// tracked containers. Clones share state.
#[derive(Clone, Default)]
pub struct SimulatedHost {
    state: Rc<RefCell<HostState>>,
}

impl std::fmt::Debug for SimulatedHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("SimulatedHost")
            .field("viewport", &s.viewport)
            .field("scroll_y", &s.scroll_y)
            .field("reduced_motion", &s.reduced_motion)
            .field("listeners", &s.listeners.len())
            .finish()
    }
}

impl SimulatedHost {
    /// New document with the given viewport, scrolled to the top.
    pub fn new(viewport: Viewport) -> Self {
        let host = Self::default();
        host.state.borrow_mut().viewport = Some(viewport);
        host
    }

    /// Mount a container at document offset `doc_top` with `height`; returns its index.
    pub fn mount_container(&self, doc_top: f64, height: f64) -> usize {
        let mut s = self.state.borrow_mut();
        s.containers.push(Some((doc_top, height)));
        s.containers.len() - 1
    }

    /// Unmount a container; its bounds read as `None` afterwards.
    pub fn unmount_container(&self, index: usize) {
        if let Some(slot) = self.state.borrow_mut().containers.get_mut(index) {
            *slot = None;
        }
    }

    /// Bounds of container `index` at the current scroll offset.
    pub fn container_bounds(&self, index: usize) -> Option<TrackBounds> {
        let s = self.state.borrow();
        let (doc_top, height) = s.containers.get(index).copied().flatten()?;
        Some(TrackBounds::at_scroll(doc_top, height, s.scroll_y))
    }

    /// Bounds provider for container `index`, suitable for [`crate::ScrollObserver::new`].
    pub fn container_source(&self, index: usize) -> Rc<dyn Fn() -> Option<TrackBounds>> {
        let host = self.clone();
        Rc::new(move || host.container_bounds(index))
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Scroll to `y` and fire [`HostEvent::Scroll`].
    pub fn scroll_to(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
        self.dispatch(HostEvent::Scroll);
    }

    /// Resize the viewport and fire [`HostEvent::Resize`].
    pub fn resize(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = Some(viewport);
        self.dispatch(HostEvent::Resize);
    }

    /// Flip the reduced-motion preference, firing [`HostEvent::ReducedMotionChange`] on change.
    pub fn set_reduced_motion(&self, reduced: bool) {
        let changed = {
            let mut s = self.state.borrow_mut();
            let changed = s.reduced_motion != reduced;
            s.reduced_motion = reduced;
            changed
        };
        if changed {
            self.dispatch(HostEvent::ReducedMotionChange);
        }
    }

    /// Number of live listeners for `event`.
    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(e, _)| *e == event)
            .count()
    }

    fn dispatch(&self, event: HostEvent) {
        // Listeners read host state, so release the borrow before calling them.
        let targets: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .values()
            .filter(|(e, _)| *e == event)
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in targets {
            listener();
        }
    }
}

impl EventHost for SimulatedHost {
    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport.unwrap_or(Viewport {
            width: 0.0,
            height: 0.0,
        })
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn add_listener(&self, event: HostEvent, listener: Listener) -> ListenerId {
        let mut s = self.state.borrow_mut();
        let id = ListenerId(s.next_id);
        s.next_id += 1;
        s.listeners.insert(id, (event, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.state.borrow_mut().listeners.remove(&id).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/host.rs"]
mod tests;
