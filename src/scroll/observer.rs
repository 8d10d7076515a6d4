use std::{cell::Cell, rc::Rc};

use crate::{
    animation::{
        faces::{FaceAssignment, FaceCycle},
        timeline::{FrameParams, Timeline},
    },
    foundation::core::TrackBounds,
    scroll::{
        host::{EventHost, HostEvent, Listener, ListenerId},
        progress::scroll_progress,
    },
};

/// Provider of a tracked container's current bounds; `None` while unmounted.
pub type BoundsSource = Rc<dyn Fn() -> Option<TrackBounds>>;

/// Owns a set of host registrations and removes them on release or drop.
///
/// Ids are pushed as soon as each registration succeeds, so a guard dropped halfway through
/// setup still unregisters everything registered so far.
struct ListenerGuard {
    host: Rc<dyn EventHost>,
    ids: Vec<ListenerId>,
}

impl ListenerGuard {
    fn new(host: Rc<dyn EventHost>) -> Self {
        Self {
            host,
            ids: Vec::new(),
        }
    }

    fn add(&mut self, event: HostEvent, listener: Listener) {
        let id = self.host.add_listener(event, listener);
        tracing::trace!(?event, id = id.0, "registered host listener");
        self.ids.push(id);
    }

    fn is_active(&self) -> bool {
        !self.ids.is_empty()
    }

    fn release(&mut self) {
        for id in self.ids.drain(..) {
            if self.host.remove_listener(id) {
                tracing::trace!(id = id.0, "released host listener");
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Live scroll progress for one tracked container.
///
/// Registers scroll and resize listeners on construction; they are released by
/// [`ScrollObserver::teardown`] or when the observer is dropped.
pub struct ScrollObserver {
    progress: Rc<Cell<f64>>,
    guard: ListenerGuard,
}

impl ScrollObserver {
    /// Start observing the container described by `source`.
    pub fn new(host: Rc<dyn EventHost>, source: BoundsSource) -> Self {
        let progress = Rc::new(Cell::new(0.0));
        let mut guard = ListenerGuard::new(Rc::clone(&host));

        let recompute: Listener = {
            let host = Rc::clone(&host);
            let progress = Rc::clone(&progress);
            Rc::new(move || {
                progress.set(scroll_progress(source(), host.viewport().height));
            })
        };
        guard.add(HostEvent::Scroll, Rc::clone(&recompute));
        guard.add(HostEvent::Resize, Rc::clone(&recompute));
        recompute();

        Self { progress, guard }
    }

    /// Most recently computed progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// `false` once torn down.
    pub fn is_active(&self) -> bool {
        self.guard.is_active()
    }

    /// Unregister listeners now. Later host events no longer update progress.
    pub fn teardown(&mut self) {
        self.guard.release();
    }
}

/// Live view of the reduced-motion preference, sampled at construction and kept current by a
/// change listener.
pub struct ReducedMotionWatch {
    reduced: Rc<Cell<bool>>,
    guard: ListenerGuard,
}

impl ReducedMotionWatch {
    /// Sample the preference and subscribe to changes.
    pub fn new(host: Rc<dyn EventHost>) -> Self {
        let reduced = Rc::new(Cell::new(host.prefers_reduced_motion()));
        let mut guard = ListenerGuard::new(Rc::clone(&host));
        {
            let host = Rc::clone(&host);
            let reduced = Rc::clone(&reduced);
            guard.add(
                HostEvent::ReducedMotionChange,
                Rc::new(move || reduced.set(host.prefers_reduced_motion())),
            );
        }
        Self { reduced, guard }
    }

    /// Current preference.
    pub fn is_reduced(&self) -> bool {
        self.reduced.get()
    }

    /// Unregister the change listener.
    pub fn teardown(&mut self) {
        self.guard.release();
    }
}

/// Scroll observer + reduced-motion watch + timeline: what a presentation component mounts.
pub struct MotionDriver {
    scroll: ScrollObserver,
    motion: ReducedMotionWatch,
    timeline: Timeline,
}

impl MotionDriver {
    /// Mount against `host`, tracking the container behind `source`.
    pub fn mount(host: Rc<dyn EventHost>, source: BoundsSource, timeline: Timeline) -> Self {
        Self {
            scroll: ScrollObserver::new(Rc::clone(&host), source),
            motion: ReducedMotionWatch::new(host),
            timeline,
        }
    }

    /// Progress fed to the timeline: the terminal value 1 under reduced motion, the raw scroll
    /// progress otherwise.
    pub fn progress(&self) -> f64 {
        if self.motion.is_reduced() {
            1.0
        } else {
            self.scroll.progress()
        }
    }

    /// Raw scroll progress, ignoring the motion preference.
    pub fn raw_progress(&self) -> f64 {
        self.scroll.progress()
    }

    /// Timeline driving this component.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Sample the timeline at the effective progress.
    pub fn frame(&self) -> FrameParams {
        self.timeline.sample(self.progress())
    }

    /// Face assignment derived from the angle parameter `angle_param`.
    pub fn faces(&self, cycle: &FaceCycle, angle_param: &str) -> Option<FaceAssignment> {
        self.timeline
            .track(angle_param)
            .map(|t| cycle.assign(t.sample(self.progress())))
    }

    /// Release every host registration.
    pub fn unmount(&mut self) {
        self.scroll.teardown();
        self.motion.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/observer.rs"]
mod tests;
