//! Surface size tracking.
//!
//! A [`ResizeObserver`] is fed the surface size once per frame and tells its subscribers
//! when it changes. [`ResizeObserver::subscribe`] hands out a [`ResizeSubscription`]
//! guard; dropping the guard detaches the listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Size of the rendering surface, in physical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(800, 600)
    }
}

impl Viewport {
    /// A `width × height` viewport.
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// Whether one side is zero, as with a minimized window.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height; `1.0` for an empty viewport.
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Size of one pixel in normalized `[0, 1]` texture coordinates.
    pub fn texel_size(&self) -> [f32; 2] {
        [
            1.0 / self.width.max(1) as f32,
            1.0 / self.height.max(1) as f32,
        ]
    }
}

type Listener = Rc<RefCell<dyn FnMut(Viewport)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Notifies subscribers when the surface size changes.
#[derive(Default)]
pub struct ResizeObserver {
    current: Option<Viewport>,
    registry: Rc<RefCell<Registry>>,
}

impl ResizeObserver {
    /// An observer that has not seen any size yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last observed size.
    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    /// Number of attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Attaches `listener` until the returned guard is dropped.
    ///
    /// The listener is called right away if a size was already observed.
    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe(&self, listener: impl FnMut(Viewport) + 'static) -> ResizeSubscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        if let Some(current) = self.current {
            (&mut *listener.borrow_mut())(current);
        }

        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));

        ResizeSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Records the current surface size and notifies subscribers if it changed.
    ///
    /// Empty sizes are ignored. Returns whether subscribers were notified.
    pub fn observe(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() || self.current == Some(viewport) {
            return false;
        }

        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.current = Some(viewport);

        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (&mut *listener)(viewport);
            }
        }

        true
    }
}

/// Keeps a resize listener attached; dropping it detaches the listener.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ResizeSubscription {
    /// Detaches the listener now.
    pub fn detach(self) {}

    /// Whether the observer is still alive.
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().listeners.iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_only_on_change() {
        let mut observer = ResizeObserver::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _sub = observer.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(observer.observe(Viewport::new(800, 600)));
        assert!(!observer.observe(Viewport::new(800, 600)));
        assert!(!observer.observe(Viewport::new(0, 600)));
        assert!(observer.observe(Viewport::new(1024, 768)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn late_subscribers_get_the_current_size() {
        let mut observer = ResizeObserver::new();
        observer.observe(Viewport::new(640, 480));

        let seen = Rc::new(Cell::new(Viewport::default()));
        let sink = seen.clone();
        let _sub = observer.subscribe(move |v| sink.set(v));
        assert_eq!(seen.get(), Viewport::new(640, 480));
    }

    #[test]
    fn listener_may_drop_another_subscription() {
        let mut observer = ResizeObserver::new();
        let victim = Rc::new(RefCell::new(Some(observer.subscribe(|_| {}))));
        let slot = victim.clone();
        let _killer = observer.subscribe(move |_| drop(slot.borrow_mut().take()));

        observer.observe(Viewport::new(10, 10));
        assert_eq!(observer.subscriber_count(), 1);
        assert!(victim.borrow().is_none());
    }

    #[test]
    fn aspect_of_empty_viewport() {
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
        assert!((Viewport::new(800, 600).aspect() - 4.0 / 3.0).abs() < 1.0e-6);
    }
}
