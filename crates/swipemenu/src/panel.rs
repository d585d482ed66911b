//! One row's draggable surface.
//!
//! A [`SwipePanel`] owns the horizontal offset of a row's content and the
//! drag/open/close state machine around it:
//!
//! ```text
//! Closed ──drag past slop──▶ Dragging(side) ──release──▶ Open(side) | Closed
//! ```
//!
//! Pointer positions handed to the panel are row-local. Animation is a pure
//! step: [`SwipePanel::advance`] moves the offset to where it should be at
//! the given frame time and nothing else happens between frames.

use crate::config::SwipeConfig;
use crate::menu::SwipeMenu;
use crate::side::{Side, SideMetrics};
use swipemenu_animation::{AnimationSpec, Tween};
use swipemenu_foundation::{Point, PointerEvent, Size, VelocityTracker1D};

/// Menu state reported to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// The menu reached its fully open position.
    Open,
    /// A previously open menu returned to offset 0.
    Closed,
}

/// What a panel did with a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelResponse {
    /// Gesture is being tracked but nothing is claimed yet.
    Tracking,
    /// The panel owns the gesture and moved with it.
    Dragging,
    /// A tap closed the open menu; the row must not see a click.
    Consumed,
    /// A tap landed on a menu item.
    MenuItemClicked { side: Side, index: usize },
    /// A release started the open or close animation.
    Settled,
    /// The panel had no use for the event.
    Ignored,
}

/// Control surface for a row that can reveal menus.
///
/// Implementors provide the offset, the per-side metrics and the two
/// animation primitives; every query and convenience call is derived from
/// those. All calls are no-ops for a side without menu items.
pub trait Openable {
    fn offset(&self) -> i32;

    /// `None` when the side has no menu items.
    fn metrics(&self, side: Side) -> Option<SideMetrics>;

    /// Duration used when a caller does not name one.
    fn default_duration_millis(&self, side: Side) -> u64;

    /// Side used by the side-less open call.
    fn preferred_side(&self) -> Option<Side>;

    /// Arms the open animation for `side`.
    fn smooth_open(&mut self, side: Side, duration_millis: u64);

    /// Arms the close animation. With `only` set, a menu showing on the
    /// other side is left alone.
    fn smooth_close(&mut self, only: Option<Side>, duration_millis: u64);

    fn is_menu_open(&self) -> bool {
        self.is_left_menu_open() || self.is_right_menu_open()
    }

    fn is_left_menu_open(&self) -> bool {
        self.metrics(Side::Left)
            .is_some_and(|m| m.has_offset(self.offset()))
    }

    fn is_right_menu_open(&self) -> bool {
        self.metrics(Side::Right)
            .is_some_and(|m| m.has_offset(self.offset()))
    }

    fn is_menu_open_not_equal(&self) -> bool {
        self.is_left_menu_open_not_equal() || self.is_right_menu_open_not_equal()
    }

    fn is_left_menu_open_not_equal(&self) -> bool {
        self.metrics(Side::Left)
            .is_some_and(|m| m.is_open_not_equal(self.offset()))
    }

    fn is_right_menu_open_not_equal(&self) -> bool {
        self.metrics(Side::Right)
            .is_some_and(|m| m.is_open_not_equal(self.offset()))
    }

    fn is_menu_fully_open(&self) -> bool {
        self.is_left_menu_fully_open() || self.is_right_menu_fully_open()
    }

    fn is_left_menu_fully_open(&self) -> bool {
        self.metrics(Side::Left)
            .is_some_and(|m| m.is_open(self.offset()))
    }

    fn is_right_menu_fully_open(&self) -> bool {
        self.metrics(Side::Right)
            .is_some_and(|m| m.is_open(self.offset()))
    }

    fn smooth_open_menu(&mut self) {
        if let Some(side) = self.preferred_side() {
            let duration = self.default_duration_millis(side);
            self.smooth_open(side, duration);
        }
    }

    fn smooth_open_menu_with_duration(&mut self, duration_millis: u64) {
        if let Some(side) = self.preferred_side() {
            self.smooth_open(side, duration_millis);
        }
    }

    fn smooth_open_left_menu(&mut self) {
        let duration = self.default_duration_millis(Side::Left);
        self.smooth_open(Side::Left, duration);
    }

    fn smooth_open_left_menu_with_duration(&mut self, duration_millis: u64) {
        self.smooth_open(Side::Left, duration_millis);
    }

    fn smooth_open_right_menu(&mut self) {
        let duration = self.default_duration_millis(Side::Right);
        self.smooth_open(Side::Right, duration);
    }

    fn smooth_open_right_menu_with_duration(&mut self, duration_millis: u64) {
        self.smooth_open(Side::Right, duration_millis);
    }

    fn smooth_close_menu(&mut self) {
        let side = Side::of_offset(self.offset()).unwrap_or(Side::Right);
        let duration = self.default_duration_millis(side);
        self.smooth_close(None, duration);
    }

    fn smooth_close_menu_with_duration(&mut self, duration_millis: u64) {
        self.smooth_close(None, duration_millis);
    }

    fn smooth_close_left_menu(&mut self) {
        let duration = self.default_duration_millis(Side::Left);
        self.smooth_close(Some(Side::Left), duration);
    }

    fn smooth_close_right_menu(&mut self) {
        let duration = self.default_duration_millis(Side::Right);
        self.smooth_close(Some(Side::Right), duration);
    }
}

/// Per-gesture bookkeeping, created on press and dropped on release/cancel.
#[derive(Clone, Debug)]
struct PanelGesture {
    down: Point,
    last_x: f32,
    /// Sub-pixel movement not yet applied to the integer offset.
    remainder: f32,
    dragging: bool,
    /// Open thresholds captured at press, indexed by `Side::index`.
    open_percent: [f32; 2],
    velocity: VelocityTracker1D,
}

#[derive(Debug)]
pub struct SwipePanel {
    menus: [SwipeMenu; 2],
    size: Size,
    offset: i32,
    active_side: Option<Side>,
    config: SwipeConfig,
    swipe_enabled: bool,
    gesture: Option<PanelGesture>,
    animation: Option<Tween<i32>>,
    reported_open: Option<Side>,
}

impl SwipePanel {
    pub fn new(left: SwipeMenu, right: SwipeMenu, size: Size, config: SwipeConfig) -> Self {
        debug_assert_eq!(left.side(), Side::Left);
        debug_assert_eq!(right.side(), Side::Right);
        Self {
            menus: [left, right],
            size,
            offset: 0,
            active_side: None,
            config: config.sanitized(),
            swipe_enabled: true,
            gesture: None,
            animation: None,
            reported_open: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn menu(&self, side: Side) -> &SwipeMenu {
        &self.menus[side.index()]
    }

    pub fn has_menu(&self, side: Side) -> bool {
        self.menu(side).has_items()
    }

    pub fn has_any_menu(&self) -> bool {
        self.has_menu(Side::Left) || self.has_menu(Side::Right)
    }

    pub fn active_side(&self) -> Option<Side> {
        self.active_side
    }

    pub fn is_swipe_enabled(&self) -> bool {
        self.swipe_enabled
    }

    /// A disabled panel never starts a drag; taps and programmatic calls
    /// still work.
    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.swipe_enabled = enabled;
    }

    /// Changes the panel-wide open threshold. A gesture already in progress
    /// keeps the value it started with.
    pub fn set_open_percent(&mut self, open_percent: f32) {
        self.config.open_percent = crate::config::sanitize_open_percent(open_percent);
    }

    pub fn open_percent(&self, side: Side) -> f32 {
        self.menu(side)
            .open_percent()
            .unwrap_or(self.config.open_percent)
    }

    pub fn set_animation_duration(&mut self, millis: u64) {
        self.config.animation_duration_millis =
            crate::config::sanitize_animation_duration(millis);
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.dragging)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Offset the running animation is heading to.
    pub fn animation_target(&self) -> Option<i32> {
        self.animation.as_ref().map(|tween| *tween.target())
    }

    pub fn on_press(&mut self, event: &PointerEvent) {
        let mut velocity = VelocityTracker1D::new();
        velocity.add_data_point(event.uptime_millis, event.position.x);
        self.gesture = Some(PanelGesture {
            down: event.position,
            last_x: event.position.x,
            remainder: 0.0,
            dragging: false,
            open_percent: [self.open_percent(Side::Left), self.open_percent(Side::Right)],
            velocity,
        });
    }

    /// Returns `true` while the panel is dragging with the pointer.
    pub fn on_move(&mut self, event: &PointerEvent) -> bool {
        let Some(mut gesture) = self.gesture.take() else {
            return false;
        };
        gesture
            .velocity
            .add_data_point(event.uptime_millis, event.position.x);

        if !gesture.dragging && self.swipe_enabled {
            let dx = event.position.x - gesture.down.x;
            let dy = event.position.y - gesture.down.y;
            if dx.abs() > self.config.touch_slop && dx.abs() > dy.abs() {
                gesture.dragging = true;
                self.animation = None;
                log::trace!("panel drag started at offset {}", self.offset);
            }
        }

        let dragging = gesture.dragging;
        if dragging {
            // Finger movement is the opposite of the scroll delta.
            let delta = gesture.last_x - event.position.x + gesture.remainder;
            let whole = delta.trunc();
            gesture.remainder = delta - whole;
            gesture.last_x = event.position.x;
            self.scroll_by(whole as i32);
        }
        self.gesture = Some(gesture);
        dragging
    }

    /// Ends the gesture. Any response other than `Ignored` consumes `event`.
    pub fn on_release(&mut self, event: &PointerEvent) -> PanelResponse {
        let response = self.release(event);
        if response != PanelResponse::Ignored {
            event.consume();
        }
        response
    }

    fn release(&mut self, event: &PointerEvent) -> PanelResponse {
        let Some(mut gesture) = self.gesture.take() else {
            return PanelResponse::Ignored;
        };
        gesture
            .velocity
            .add_data_point(event.uptime_millis, event.position.x);

        if gesture.dragging {
            let velocity = gesture
                .velocity
                .calculate_velocity_with_max(self.config.max_fling_velocity);
            self.settle(velocity, gesture.open_percent);
            return PanelResponse::Settled;
        }

        let slop = self.config.touch_slop;
        let is_tap = (event.position.x - gesture.down.x).abs() <= slop
            && (event.position.y - gesture.down.y).abs() <= slop;
        if is_tap {
            if self.is_menu_open() {
                return self.tap_open_menu(event.position);
            }
            return PanelResponse::Ignored;
        }

        if self.animation.is_none() && self.settle_slowly(gesture.open_percent) {
            PanelResponse::Settled
        } else {
            PanelResponse::Ignored
        }
    }

    /// Aborts a running animation where it stands; without one, a
    /// half-dragged panel settles as a slow release would.
    pub fn on_cancel(&mut self) {
        let gesture = self.gesture.take();
        if self.animation.take().is_some() {
            log::trace!("panel animation aborted at offset {}", self.offset);
            return;
        }
        let thresholds = gesture.map(|g| g.open_percent).unwrap_or([
            self.open_percent(Side::Left),
            self.open_percent(Side::Right),
        ]);
        self.settle_slowly(thresholds);
    }

    /// Steps the running animation to `frame_time_nanos` and returns the
    /// offset.
    pub fn advance(&mut self, frame_time_nanos: u64) -> i32 {
        if let Some(tween) = self.animation.as_mut() {
            let value = tween.advance(frame_time_nanos);
            let finished = tween.is_finished();
            self.offset = self.clamp_to_bounds(value);
            if finished {
                self.animation = None;
                if self.offset == 0 {
                    self.active_side = None;
                }
            }
        }
        self.offset
    }

    /// Drops any gesture or animation and puts the content back at 0.
    pub fn snap_closed(&mut self) {
        self.gesture = None;
        self.animation = None;
        self.offset = 0;
        self.active_side = None;
    }

    /// Next pending menu-state transition, if any.
    ///
    /// Call until it returns `None`: moving straight from one fully open
    /// side to the other yields `Closed` then `Open`.
    pub fn take_state_change(&mut self) -> Option<MenuState> {
        let open_side = [Side::Left, Side::Right]
            .into_iter()
            .find(|side| self.metrics(*side).is_some_and(|m| m.is_open(self.offset)));
        match (self.reported_open, open_side) {
            (None, Some(side)) => {
                self.reported_open = Some(side);
                Some(MenuState::Open)
            }
            (Some(_), _) if self.offset == 0 => {
                self.reported_open = None;
                Some(MenuState::Closed)
            }
            (Some(reported), Some(side)) if reported != side => {
                self.reported_open = None;
                Some(MenuState::Closed)
            }
            _ => None,
        }
    }

    /// Applies a scroll delta (opposite of finger movement) to the offset,
    /// choosing the active side first if there is none.
    fn scroll_by(&mut self, dx: i32) {
        if dx == 0 {
            return;
        }
        let Some(side) = self.active_side.or_else(|| self.choose_side(dx)) else {
            return;
        };
        let Some(metrics) = self.metrics(side) else {
            return;
        };
        let clamped = metrics.clamp(self.offset + dx);
        self.offset = clamped.offset;
        self.active_side = (!clamped.reset_side).then_some(side);
    }

    /// A leftward scroll delta reveals the left menu, falling back to the
    /// only configured side.
    fn choose_side(&self, dx: i32) -> Option<Side> {
        let preferred = if dx < 0 { Side::Left } else { Side::Right };
        [preferred, preferred.opposite()]
            .into_iter()
            .find(|side| self.has_menu(*side))
    }

    fn clamp_to_bounds(&self, offset: i32) -> i32 {
        let low = self.metrics(Side::Left).map_or(0, |m| m.open_offset());
        let high = self.metrics(Side::Right).map_or(0, |m| m.open_offset());
        offset.clamp(low, high)
    }

    fn duration_cap(&self, side: Side) -> u64 {
        self.menu(side)
            .animation_duration_millis()
            .unwrap_or(self.config.animation_duration_millis)
    }

    fn tap_open_menu(&mut self, point: Point) -> PanelResponse {
        let Some(side) = Side::of_offset(self.offset) else {
            return PanelResponse::Ignored;
        };
        let Some(metrics) = self.metrics(side) else {
            return PanelResponse::Ignored;
        };
        if metrics.is_point_on_content(point.x, self.offset, self.size.width) {
            log::debug!("tap on content closes the {side} menu");
            self.smooth_close_menu();
            return PanelResponse::Consumed;
        }
        let item = metrics
            .menu_local_x(point.x, self.offset, self.size.width)
            .and_then(|x| self.menu(side).item_index_at(x, point.y, self.size.height));
        match item {
            Some(index) => PanelResponse::MenuItemClicked { side, index },
            None => PanelResponse::Consumed,
        }
    }

    /// Release decision: a fling opens when it moves further into the menu,
    /// anything slower falls back to the drag fraction.
    fn settle(&mut self, finger_velocity: f32, open_percent: [f32; 2]) {
        let Some(side) = Side::of_offset(self.offset) else {
            self.active_side = None;
            return;
        };
        let Some(metrics) = self.metrics(side) else {
            return;
        };
        let speed = finger_velocity.abs();
        if speed <= self.config.min_fling_velocity {
            self.settle_slowly(open_percent);
            return;
        }

        let opens = match side {
            Side::Right => finger_velocity < 0.0,
            Side::Left => finger_velocity > 0.0,
        };
        let target = if opens { metrics.open_offset() } else { 0 };
        let remaining = (target - self.offset).unsigned_abs();
        let duration = fling_duration_millis(remaining, speed).min(self.duration_cap(side));
        log::debug!(
            "fling {finger_velocity:.0}px/s {} the {side} menu over {duration}ms",
            if opens { "opens" } else { "closes" }
        );
        self.animate_to(side, target, duration);
    }

    /// Returns `true` if an animation was started.
    fn settle_slowly(&mut self, open_percent: [f32; 2]) -> bool {
        let Some(side) = Side::of_offset(self.offset) else {
            return false;
        };
        let Some(metrics) = self.metrics(side) else {
            return false;
        };
        let fraction = metrics.fraction(self.offset);
        let opens = fraction >= open_percent[side.index()];
        let target = if opens { metrics.open_offset() } else { 0 };
        let duration = slow_duration_millis(fraction).min(self.duration_cap(side));
        log::debug!(
            "release at {:.0}% {} the {side} menu",
            fraction * 100.0,
            if opens { "opens" } else { "closes" }
        );
        self.animate_to(side, target, duration)
    }

    /// Returns `true` if an animation was started.
    fn animate_to(&mut self, side: Side, target: i32, duration_millis: u64) -> bool {
        self.animation = None;
        if target == self.offset {
            if target == 0 {
                self.active_side = None;
            }
            return false;
        }
        self.active_side = Some(side);
        let spec = AnimationSpec::tween(duration_millis, self.config.easing);
        self.animation = Some(Tween::new(self.offset, target, spec));
        true
    }
}

impl Openable for SwipePanel {
    fn offset(&self) -> i32 {
        self.offset
    }

    fn metrics(&self, side: Side) -> Option<SideMetrics> {
        let menu = self.menu(side);
        menu.has_items()
            .then(|| SideMetrics::new(side, menu.width()))
    }

    fn default_duration_millis(&self, side: Side) -> u64 {
        self.duration_cap(side)
    }

    fn preferred_side(&self) -> Option<Side> {
        self.active_side
            .or_else(|| Side::of_offset(self.offset))
            .filter(|side| self.has_menu(*side))
            .or_else(|| {
                [Side::Right, Side::Left]
                    .into_iter()
                    .find(|side| self.has_menu(*side))
            })
    }

    fn smooth_open(&mut self, side: Side, duration_millis: u64) {
        let Some(metrics) = self.metrics(side) else {
            return;
        };
        let (_, target) = metrics.open_animation_range(self.offset);
        log::debug!("opening the {side} menu over {duration_millis}ms");
        self.animate_to(side, target, duration_millis);
    }

    fn smooth_close(&mut self, only: Option<Side>, duration_millis: u64) {
        let showing = Side::of_offset(self.offset);
        let heading = self.animation_target().and_then(Side::of_offset);
        let Some(side) = showing.or(heading) else {
            return;
        };
        if only.is_some_and(|only| only != side) {
            return;
        }
        if self.metrics(side).is_none() {
            return;
        }
        log::debug!("closing the {side} menu over {duration_millis}ms");
        self.animate_to(side, 0, duration_millis);
    }
}

/// Fling durations scale with the distance still to cover.
fn fling_duration_millis(remaining: u32, speed: f32) -> u64 {
    4 * (1000.0 * remaining as f32 / speed).round() as u64
}

/// Slow releases take 100ms plus up to another 100ms for a full drag.
fn slow_duration_millis(fraction: f32) -> u64 {
    ((fraction + 1.0) * 100.0) as u64
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
