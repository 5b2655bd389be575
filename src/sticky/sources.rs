//! Capability objects for viewport observation.
//!
//! The header never reads global display state. It is handed a
//! [`ViewportGeometryProvider`] and a [`ScrollSignalSource`], subscribes to
//! both while it is active, and releases both when it is torn down.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::signal::{Signal, Subscription};

use super::geometry::ViewportGeometry;

/// Source of viewport dimensions and resize notifications.
pub trait ViewportGeometryProvider {
    fn geometry(&self) -> ViewportGeometry;
    fn subscribe_resize(&self, listener: Box<dyn FnMut(ViewportGeometry)>) -> Subscription;
}

/// Source of scroll offsets (pixels from the top of the content).
pub trait ScrollSignalSource {
    fn scroll_offset(&self) -> i64;
    fn subscribe_scroll(&self, listener: Box<dyn FnMut(i64)>) -> Subscription;
}

/// In-process surface that publishes geometry and scroll samples.
///
/// The terminal event loop feeds it from crossterm events; tests drive it
/// directly. Publishing an unchanged value is a no-op.
#[derive(Debug)]
pub struct SignalSurface {
    geometry: Cell<ViewportGeometry>,
    offset: Cell<i64>,
    resized: Signal<ViewportGeometry>,
    scrolled: Signal<i64>,
}

impl SignalSurface {
    pub fn new(geometry: ViewportGeometry, offset: i64) -> Self {
        Self {
            geometry: Cell::new(geometry),
            offset: Cell::new(offset),
            resized: Signal::new(),
            scrolled: Signal::new(),
        }
    }

    pub fn publish_resize(&self, geometry: ViewportGeometry) {
        if self.geometry.replace(geometry) != geometry {
            self.resized.emit(&geometry);
        }
    }

    pub fn publish_scroll(&self, offset: i64) {
        if self.offset.replace(offset) != offset {
            self.scrolled.emit(&offset);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.resized.listener_count() + self.scrolled.listener_count()
    }
}

impl ViewportGeometryProvider for SignalSurface {
    fn geometry(&self) -> ViewportGeometry {
        self.geometry.get()
    }

    fn subscribe_resize(&self, mut listener: Box<dyn FnMut(ViewportGeometry)>) -> Subscription {
        self.resized.subscribe(move |g| listener(*g))
    }
}

impl ScrollSignalSource for SignalSurface {
    fn scroll_offset(&self) -> i64 {
        self.offset.get()
    }

    fn subscribe_scroll(&self, mut listener: Box<dyn FnMut(i64)>) -> Subscription {
        self.scrolled.subscribe(move |o| listener(*o))
    }
}

/// A viewport observation, queued in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    Resized(ViewportGeometry),
    Scrolled(i64),
}

/// Active subscriptions of the sticky header.
///
/// Listeners only enqueue, so observation never blocks the source. The
/// queue starts with the current geometry so the threshold is known before
/// the first resize. Dropping the value releases both subscriptions.
#[derive(Debug)]
pub struct HeaderSignals {
    queue: Rc<RefCell<VecDeque<HeaderEvent>>>,
    _resize: Subscription,
    _scroll: Subscription,
}

impl HeaderSignals {
    pub fn attach(
        geometry: &impl ViewportGeometryProvider,
        scroll: &impl ScrollSignalSource,
    ) -> Self {
        let queue = Rc::new(RefCell::new(VecDeque::from([HeaderEvent::Resized(
            geometry.geometry(),
        )])));
        let resize = {
            let queue = Rc::clone(&queue);
            geometry.subscribe_resize(Box::new(move |g| {
                queue.borrow_mut().push_back(HeaderEvent::Resized(g));
            }))
        };
        let scroll = {
            let queue = Rc::clone(&queue);
            scroll.subscribe_scroll(Box::new(move |offset| {
                queue.borrow_mut().push_back(HeaderEvent::Scrolled(offset));
            }))
        };
        Self {
            queue,
            _resize: resize,
            _scroll: scroll,
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<HeaderEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_seeds_current_geometry() {
        let surface = SignalSurface::new(ViewportGeometry::new(1300, 900), 0);
        let signals = HeaderSignals::attach(&surface, &surface);
        assert_eq!(
            signals.drain(),
            vec![HeaderEvent::Resized(ViewportGeometry::new(1300, 900))]
        );
        assert!(signals.drain().is_empty());
    }

    #[test]
    fn test_events_arrive_in_order() {
        let surface = SignalSurface::new(ViewportGeometry::new(800, 600), 0);
        let signals = HeaderSignals::attach(&surface, &surface);
        signals.drain();
        surface.publish_scroll(40);
        surface.publish_resize(ViewportGeometry::new(1300, 900));
        surface.publish_scroll(80);
        assert_eq!(
            signals.drain(),
            vec![
                HeaderEvent::Scrolled(40),
                HeaderEvent::Resized(ViewportGeometry::new(1300, 900)),
                HeaderEvent::Scrolled(80),
            ]
        );
    }

    #[test]
    fn test_unchanged_samples_are_not_published() {
        let surface = SignalSurface::new(ViewportGeometry::new(800, 600), 0);
        let signals = HeaderSignals::attach(&surface, &surface);
        signals.drain();
        surface.publish_scroll(0);
        surface.publish_resize(ViewportGeometry::new(800, 600));
        assert!(signals.drain().is_empty());
    }

    #[test]
    fn test_detach_on_drop_releases_listeners() {
        let surface = SignalSurface::new(ViewportGeometry::new(800, 600), 0);
        let signals = HeaderSignals::attach(&surface, &surface);
        assert_eq!(surface.listener_count(), 2);
        drop(signals);
        assert_eq!(surface.listener_count(), 0);
        surface.publish_scroll(500);
        assert_eq!(surface.scroll_offset(), 500);
    }
}
