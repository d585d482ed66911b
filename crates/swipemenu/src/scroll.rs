//! Vertical scroll position of the list.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCROLL_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Scroll offset of the list, in logical pixels from the top of the first
/// row.
///
/// Cloning yields another handle to the same state, so a renderer can read
/// the offset the list's gesture handling writes.
#[derive(Clone, Debug)]
pub struct ListScrollState {
    inner: Rc<ScrollStateInner>,
}

#[derive(Debug)]
struct ScrollStateInner {
    id: u64,
    value: Cell<f32>,
    /// `content_height - viewport_height`, never negative.
    max_value: Cell<f32>,
}

impl ListScrollState {
    pub fn new(initial: f32) -> Self {
        let id = NEXT_SCROLL_STATE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Rc::new(ScrollStateInner {
                id,
                value: Cell::new(initial.max(0.0)),
                max_value: Cell::new(0.0),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    /// Scrolls by `delta`, clamping to `[0, max_value]`.
    /// Returns the amount actually scrolled.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.value();
        let new_value = (current + delta).clamp(0.0, self.max_value());
        let actual_delta = new_value - current;
        if actual_delta.abs() > 0.001 {
            self.inner.value.set(new_value);
        }
        actual_delta
    }

    pub fn scroll_to(&self, position: f32) {
        self.inner.value.set(position.clamp(0.0, self.max_value()));
    }

    /// Updates the scroll range and re-clamps the current value.
    pub(crate) fn set_max_value(&self, max: f32) {
        self.inner.max_value.set(max.max(0.0));
        self.scroll_to(self.value());
    }
}

impl Default for ListScrollState {
    fn default() -> Self {
        Self::new(0.0)
    }
}
