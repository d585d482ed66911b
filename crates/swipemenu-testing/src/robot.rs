//! Robot testing framework for gesture scripting.
//!
//! This module provides a robot-style API that drives a [`SwipeMenuList`]
//! with timed pointer events:
//! - press, move, release and cancel at explicit points
//! - whole gestures: taps, slow drags, flings
//! - a virtual frame clock that steps the list's animations
//!
//! # Example
//!
//! ```
//! use swipemenu::{ListLayout, SwipeConfig, SwipeMenu, SwipeMenuItem, SwipeMenuList};
//! use swipemenu_testing::SwipeRobot;
//!
//! let mut list = SwipeMenuList::new(10usize, ListLayout::new(400.0, 50.0, 200.0), SwipeConfig::default());
//! list.set_menu_creator(|_: &mut SwipeMenu, right: &mut SwipeMenu, _: usize| {
//!     right.add_item(SwipeMenuItem::new(100));
//! });
//!
//! let mut robot = SwipeRobot::new(list);
//! let y = robot.row_center_y(0);
//! robot.fling(300.0, y, 150.0, y);
//! robot.wait_for_idle();
//! assert_eq!(robot.list_mut().open_menu_position(), Some(0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipemenu::{
    MenuState, Openable, Side, SwipeMenuBridge, SwipeMenuList, TouchDisposition,
};
use swipemenu_foundation::{PointerEvent, PointerId};

/// Length of one virtual frame.
pub const FRAME_MILLIS: i64 = 16;

/// Upper bound on frames pumped by [`SwipeRobot::wait_for_idle`].
const MAX_IDLE_FRAMES: usize = 240;

/// Scripted pointer input plus a virtual frame clock for one list.
pub struct SwipeRobot {
    list: SwipeMenuList,
    now_millis: i64,
    pointer: PointerId,
    last: Option<(f32, f32)>,
}

impl SwipeRobot {
    pub fn new(list: SwipeMenuList) -> Self {
        Self {
            list,
            now_millis: 0,
            pointer: 0,
            last: None,
        }
    }

    pub fn list(&self) -> &SwipeMenuList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut SwipeMenuList {
        &mut self.list
    }

    pub fn into_list(self) -> SwipeMenuList {
        self.list
    }

    /// Current virtual time in milliseconds.
    pub fn now_millis(&self) -> i64 {
        self.now_millis
    }

    /// Viewport `y` of the middle of the row at raw position `raw`.
    pub fn row_center_y(&self, raw: usize) -> f32 {
        let bounds = self.list.row_bounds(raw);
        bounds.y + bounds.height / 2.0
    }

    /// Offset of the panel on content row `position`, 0 when unbound.
    pub fn offset(&self, position: usize) -> i32 {
        self.list.panel(position).map_or(0, |panel| panel.offset())
    }

    // ─── Single events ──────────────────────────────────────────────────

    pub fn press(&mut self, x: f32, y: f32) -> TouchDisposition {
        self.last = Some((x, y));
        let event = PointerEvent::down(x, y, self.now_millis).with_id(self.pointer);
        self.list.on_pointer_event(&event)
    }

    /// Moves the pointer after one frame has passed.
    pub fn move_to(&mut self, x: f32, y: f32) -> TouchDisposition {
        self.move_after(x, y, FRAME_MILLIS)
    }

    /// Moves the pointer after `millis` have passed.
    pub fn move_after(&mut self, x: f32, y: f32, millis: i64) -> TouchDisposition {
        self.advance_time(millis);
        self.last = Some((x, y));
        let event = PointerEvent::moved(x, y, self.now_millis).with_id(self.pointer);
        self.list.on_pointer_event(&event)
    }

    /// Releases at the last pointer position without letting time pass.
    pub fn release(&mut self) -> TouchDisposition {
        let (x, y) = self.last.take().unwrap_or_default();
        let event = PointerEvent::up(x, y, self.now_millis).with_id(self.pointer);
        self.list.on_pointer_event(&event)
    }

    pub fn release_at(&mut self, x: f32, y: f32) -> TouchDisposition {
        self.last = Some((x, y));
        self.release()
    }

    pub fn cancel(&mut self) -> TouchDisposition {
        let (x, y) = self.last.take().unwrap_or_default();
        let event = PointerEvent::cancel(x, y, self.now_millis).with_id(self.pointer);
        self.list.on_pointer_event(&event)
    }

    /// Puts a second finger down while the first is still pressed.
    pub fn second_pointer_down(&mut self, x: f32, y: f32) -> TouchDisposition {
        let event = PointerEvent::down(x, y, self.now_millis).with_id(self.pointer + 1);
        self.list.on_pointer_event(&event)
    }

    // ─── Gestures ───────────────────────────────────────────────────────

    /// Press and release in place. Returns the release disposition.
    pub fn tap(&mut self, x: f32, y: f32) -> TouchDisposition {
        self.press(x, y);
        self.advance_time(50);
        self.release()
    }

    /// Drags in `steps` moves, holds still long enough for the release
    /// velocity to read zero, then releases.
    pub fn slow_drag(
        &mut self,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
        steps: usize,
    ) -> TouchDisposition {
        self.press(from_x, from_y);
        self.move_in_steps(from_x, from_y, to_x, to_y, steps, FRAME_MILLIS);
        self.advance_time(100);
        self.release()
    }

    /// A fast swipe: eight moves 8 ms apart and an immediate release.
    pub fn fling(&mut self, from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> TouchDisposition {
        self.press(from_x, from_y);
        self.move_in_steps(from_x, from_y, to_x, to_y, 8, 8);
        self.release()
    }

    fn move_in_steps(
        &mut self,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
        steps: usize,
        step_millis: i64,
    ) {
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from_x + (to_x - from_x) * t;
            let y = from_y + (to_y - from_y) * t;
            self.move_after(x, y, step_millis);
        }
    }

    // ─── Clock ──────────────────────────────────────────────────────────

    /// Lets `millis` pass, stepping animations once per frame.
    pub fn advance_time(&mut self, millis: i64) {
        let target = self.now_millis + millis.max(0);
        while self.now_millis < target {
            self.now_millis = (self.now_millis + FRAME_MILLIS).min(target);
            self.frame();
        }
    }

    /// Pumps frames until no animation is running.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..MAX_IDLE_FRAMES {
            self.now_millis += FRAME_MILLIS;
            if !self.frame() {
                return;
            }
        }
    }

    fn frame(&mut self) -> bool {
        let nanos = u64::try_from(self.now_millis).unwrap_or(0) * 1_000_000;
        self.list.advance(nanos)
    }
}

/// Something the list reported through one of its listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    ItemClick(usize),
    MenuItemClick {
        side: Side,
        index: usize,
        position: usize,
    },
    MenuState {
        position: usize,
        state: MenuState,
    },
}

/// Records every listener callback of a list.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<ListEvent>>>,
    close_on_menu_click: Rc<Cell<bool>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu item clicks ask the bridge to close the menu.
    pub fn closing_on_menu_click(self) -> Self {
        self.close_on_menu_click.set(true);
        self
    }

    /// Installs all three listeners on `list`.
    pub fn attach(&self, list: &mut SwipeMenuList) {
        let events = Rc::clone(&self.events);
        list.set_on_item_click(move |position| {
            events.borrow_mut().push(ListEvent::ItemClick(position));
        });

        let events = Rc::clone(&self.events);
        let close = Rc::clone(&self.close_on_menu_click);
        list.set_on_menu_item_click(move |bridge: &SwipeMenuBridge| {
            events.borrow_mut().push(ListEvent::MenuItemClick {
                side: bridge.side(),
                index: bridge.item_index(),
                position: bridge.position(),
            });
            if close.get() {
                bridge.close_menu();
            }
        });

        let events = Rc::clone(&self.events);
        list.set_on_menu_state_changed(move |position, state| {
            events
                .borrow_mut()
                .push(ListEvent::MenuState { position, state });
        });
    }

    pub fn events(&self) -> Vec<ListEvent> {
        self.events.borrow().clone()
    }

    pub fn item_clicks(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::ItemClick(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn menu_state_changes(&self) -> Vec<(usize, MenuState)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::MenuState { position, state } => Some((*position, *state)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
