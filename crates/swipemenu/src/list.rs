//! The list-level touch coordinator.
//!
//! [`SwipeMenuList`] sits between raw pointer events and the rows. For each
//! gesture it decides who owns the pointer:
//!
//! - the list itself, when a press lands away from an open menu (the stale
//!   menu is closed and the press is swallowed),
//! - a row's [`SwipePanel`], once the pointer moves horizontally past the
//!   touch slop on a row that may swipe,
//! - the container (vertical scrolling, row clicks) otherwise.
//!
//! Pointer positions are in list viewport coordinates; rows are hit-tested
//! through the [`ListScrollState`].

use crate::config::SwipeConfig;
use crate::error::SwipeError;
use crate::menu::{SwipeMenu, SwipeMenuBridge, SwipeMenuCreator};
use crate::panel::{MenuState, Openable, PanelResponse, SwipePanel};
use crate::registry::PanelRegistry;
use crate::scroll::ListScrollState;
use crate::side::Side;
use smallvec::SmallVec;
use std::ops::Range;
use swipemenu_foundation::{
    Point, PointerEvent, PointerEventKind, PointerId, PositionRemapper, Rect, Size,
    SwipeItemProvider,
};

/// Fixed geometry of the list viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListLayout {
    pub width: f32,
    pub row_height: f32,
    pub viewport_height: f32,
}

impl ListLayout {
    pub fn new(width: f32, row_height: f32, viewport_height: f32) -> Self {
        Self {
            width,
            row_height,
            viewport_height,
        }
    }
}

/// Who handled a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchDisposition {
    /// The list swallowed the event (a press that closed a stale menu, and
    /// the rest of that gesture).
    Intercepted,
    /// Routed to the panel of content row `position`.
    Panel {
        position: usize,
        response: PanelResponse,
    },
    /// Left to the container: scrolling, row clicks, rows without menus.
    Container,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Owner {
    Undecided,
    Panel,
    Container { scrolling: bool },
    Intercepted { scrolling: bool },
}

#[derive(Clone, Debug)]
struct ListGesture {
    pointer: PointerId,
    down: Point,
    last: Point,
    /// Raw position of the row under the press.
    raw: Option<usize>,
    owner: Owner,
    /// A second pointer joined; no click fires for this gesture.
    ceded: bool,
}

type ItemClickListener = Box<dyn FnMut(usize)>;
type MenuItemClickListener = Box<dyn FnMut(&SwipeMenuBridge)>;
type MenuStateListener = Box<dyn FnMut(usize, MenuState)>;

pub struct SwipeMenuList {
    config: SwipeConfig,
    layout: ListLayout,
    provider: Box<dyn SwipeItemProvider>,
    remapper: PositionRemapper,
    scroll: ListScrollState,
    registry: PanelRegistry,
    menu_creator: Option<Box<dyn SwipeMenuCreator>>,
    item_view_swipe_enabled: bool,
    gesture: Option<ListGesture>,
    disallow_parent_intercept: bool,
    on_item_click: Option<ItemClickListener>,
    on_menu_item_click: Option<MenuItemClickListener>,
    on_menu_state_changed: Option<MenuStateListener>,
}

impl std::fmt::Debug for SwipeMenuList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeMenuList")
            .field("layout", &self.layout)
            .field("remapper", &self.remapper)
            .field("scroll", &self.scroll.value())
            .field("bound_panels", &self.registry.len())
            .field("gesture", &self.gesture)
            .finish()
    }
}

impl SwipeMenuList {
    pub fn new(
        provider: impl SwipeItemProvider + 'static,
        layout: ListLayout,
        config: SwipeConfig,
    ) -> Self {
        let remapper = PositionRemapper::new(0, provider.item_count(), 0);
        let mut list = Self {
            config: config.sanitized(),
            layout,
            provider: Box::new(provider),
            remapper,
            scroll: ListScrollState::default(),
            registry: PanelRegistry::new(),
            menu_creator: None,
            item_view_swipe_enabled: false,
            gesture: None,
            disallow_parent_intercept: false,
            on_item_click: None,
            on_menu_item_click: None,
            on_menu_state_changed: None,
        };
        list.update_scroll_range();
        list
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    pub fn scroll_state(&self) -> &ListScrollState {
        &self.scroll
    }

    pub fn remapper(&self) -> &PositionRemapper {
        &self.remapper
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    // ─── Adapter plumbing ───────────────────────────────────────────────

    /// Installs the menu creator and rebinds every visible row.
    pub fn set_menu_creator(&mut self, creator: impl SwipeMenuCreator + 'static) {
        self.menu_creator = Some(Box::new(creator));
        self.rebind_all();
    }

    pub fn set_header_count(&mut self, count: usize) {
        self.remapper.set_header_count(count);
        self.notify_data_set_changed();
    }

    pub fn set_footer_count(&mut self, count: usize) {
        self.remapper.set_footer_count(count);
        self.notify_data_set_changed();
    }

    /// Re-reads the provider and rebinds every row. Panel offsets are not
    /// preserved.
    pub fn notify_data_set_changed(&mut self) {
        self.remapper.set_content_count(self.provider.item_count());
        self.update_scroll_range();
        self.rebind_all();
    }

    // ─── Listeners ──────────────────────────────────────────────────────

    /// Called with the content index of a tapped row.
    pub fn set_on_item_click(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_item_click = Some(Box::new(listener));
    }

    pub fn set_on_menu_item_click(&mut self, listener: impl FnMut(&SwipeMenuBridge) + 'static) {
        self.on_menu_item_click = Some(Box::new(listener));
    }

    /// Called once each time a row's menu becomes fully open or returns to
    /// closed.
    pub fn set_on_menu_state_changed(
        &mut self,
        listener: impl FnMut(usize, MenuState) + 'static,
    ) {
        self.on_menu_state_changed = Some(Box::new(listener));
    }

    // ─── Enablement ─────────────────────────────────────────────────────

    pub fn is_swipe_item_menu_enabled(&self) -> bool {
        self.registry.is_swipe_menu_enabled()
    }

    pub fn set_swipe_item_menu_enabled(&mut self, enabled: bool) {
        self.registry.set_swipe_menu_enabled(enabled);
        self.refresh_swipe_enabled();
    }

    pub fn is_swipe_item_menu_enabled_at(&self, position: usize) -> bool {
        self.is_swipe_allowed(position)
    }

    pub fn set_swipe_item_menu_enabled_at(&mut self, position: usize, enabled: bool) {
        self.registry.set_position_enabled(position, enabled);
        self.refresh_swipe_enabled();
    }

    /// Turns on the list's own swipe-to-dismiss handling. The two features
    /// are exclusive: while it is on, every event goes to the container.
    pub fn set_item_view_swipe_enabled(&mut self, enabled: bool) {
        self.item_view_swipe_enabled = enabled;
    }

    pub fn is_item_view_swipe_enabled(&self) -> bool {
        self.item_view_swipe_enabled
    }

    // ─── Row queries ────────────────────────────────────────────────────

    /// Content indices of the rows currently bound to a panel.
    pub fn bound_positions(&self) -> Vec<usize> {
        self.registry
            .positions()
            .filter_map(|raw| self.remapper.to_content_index(raw))
            .collect()
    }

    pub fn panel(&self, position: usize) -> Option<&SwipePanel> {
        let raw = self.remapper.to_raw_position(position)?;
        self.registry.get(raw)
    }

    /// Direct access to a row's [`Openable`] surface. Opening a row this way
    /// still closes any other open row once it is fully open.
    pub fn panel_mut(&mut self, position: usize) -> Option<&mut SwipePanel> {
        let raw = self.remapper.to_raw_position(position)?;
        self.registry.get_mut(raw)
    }

    /// Content index of the row whose menu is showing, if any.
    pub fn open_menu_position(&mut self) -> Option<usize> {
        let raw = self.registry.open_position()?;
        let open = self.registry.get(raw).is_some_and(|p| p.is_menu_open());
        open.then(|| self.remapper.to_content_index(raw)).flatten()
    }

    /// Raw position of the row under viewport `y`.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        if y < 0.0 || y >= self.layout.viewport_height || self.layout.row_height <= 0.0 {
            return None;
        }
        let raw = ((y + self.scroll.value()) / self.layout.row_height).floor() as usize;
        (raw < self.remapper.row_count()).then_some(raw)
    }

    /// Viewport bounds of the row at raw position `raw`.
    pub fn row_bounds(&self, raw: usize) -> Rect {
        let top = raw as f32 * self.layout.row_height - self.scroll.value();
        Rect::new(0.0, top, self.layout.width, self.layout.row_height)
    }

    /// Whether the parent scrollable should keep its hands off the current
    /// gesture because a horizontal move would reveal or close a menu.
    pub fn disallow_parent_intercept(&self) -> bool {
        self.disallow_parent_intercept
    }

    // ─── Programmatic control ───────────────────────────────────────────

    pub fn smooth_open_left_menu(&mut self, position: usize) -> Result<(), SwipeError> {
        self.open_menu(position, Side::Left, None)
    }

    pub fn smooth_open_right_menu(&mut self, position: usize) -> Result<(), SwipeError> {
        self.open_menu(position, Side::Right, None)
    }

    pub fn smooth_open_left_menu_with_duration(
        &mut self,
        position: usize,
        duration_millis: u64,
    ) -> Result<(), SwipeError> {
        self.open_menu(position, Side::Left, Some(duration_millis))
    }

    pub fn smooth_open_right_menu_with_duration(
        &mut self,
        position: usize,
        duration_millis: u64,
    ) -> Result<(), SwipeError> {
        self.open_menu(position, Side::Right, Some(duration_millis))
    }

    pub fn smooth_open_menu(
        &mut self,
        position: usize,
        side: Side,
        duration_millis: u64,
    ) -> Result<(), SwipeError> {
        self.open_menu(position, side, Some(duration_millis))
    }

    /// Closes whichever menu is showing. A no-op when none is.
    pub fn smooth_close_menu(&mut self) {
        let closing = self.registry.close_except(None);
        if !closing.is_empty() {
            log::debug!("closing menus on rows {closing:?}");
        }
    }

    /// Scrolls the list to `y` (clamped) and rebinds the rows that came into
    /// view.
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll.scroll_to(y);
        self.bind_visible_rows();
    }

    /// Steps every running open/close animation. Returns `true` while any
    /// animation is still running.
    pub fn advance(&mut self, frame_time_nanos: u64) -> bool {
        self.registry.advance_all(frame_time_nanos);
        // A row reaching fully open may have armed close animations elsewhere.
        self.dispatch_state_changes();
        self.registry.iter().any(|(_, panel)| panel.is_animating())
    }

    // ─── Pointer input ──────────────────────────────────────────────────

    /// Routes one pointer event. Events the list swallows or a row acts on
    /// (drags, tap-to-close, menu item hits) come back consumed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> TouchDisposition {
        let disposition = match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_up(event),
            PointerEventKind::Cancel => self.on_cancel(event),
        };
        self.dispatch_state_changes();
        disposition
    }

    fn on_down(&mut self, event: &PointerEvent) -> TouchDisposition {
        if let Some(gesture) = self.gesture.take() {
            if gesture.pointer != event.id {
                return self.cede_to_container(gesture);
            }
            // Same pointer went down again without an up: start over.
            self.cancel_panel_gesture(&gesture);
        }

        self.disallow_parent_intercept = false;
        let raw = self.row_at(event.position.y);
        let mut gesture = ListGesture {
            pointer: event.id,
            down: event.position,
            last: event.position,
            raw,
            owner: Owner::Undecided,
            ceded: false,
        };

        if !self.is_engaged() {
            gesture.owner = Owner::Container { scrolling: false };
            self.gesture = Some(gesture);
            return TouchDisposition::Container;
        }

        let stale_open = self
            .registry
            .open_position()
            .filter(|open| Some(*open) != raw)
            .filter(|open| self.registry.get(*open).is_some_and(|p| p.is_menu_open()));
        let snapped = self.registry.snap_closed_except(raw);
        if !snapped.is_empty() {
            log::trace!("press on row {raw:?} snapped rows {snapped:?} closed");
        }

        if let Some(open) = stale_open {
            log::debug!("press on row {raw:?} closed the menu of row {open}; press swallowed");
            self.registry.clear_open();
            gesture.owner = Owner::Intercepted { scrolling: false };
            self.gesture = Some(gesture);
            event.consume();
            return TouchDisposition::Intercepted;
        }

        let disposition = match self.panel_at(raw) {
            Some(raw) => {
                let local = self.to_row_local(event, raw);
                if let Some(panel) = self.registry.get_mut(raw) {
                    panel.on_press(&local);
                }
                self.panel_disposition(raw, PanelResponse::Tracking)
            }
            None => TouchDisposition::Container,
        };
        self.gesture = Some(gesture);
        disposition
    }

    fn on_move(&mut self, event: &PointerEvent) -> TouchDisposition {
        let Some(mut gesture) = self.gesture.take() else {
            return TouchDisposition::Container;
        };
        if gesture.pointer != event.id {
            self.gesture = Some(gesture);
            return TouchDisposition::Container;
        }

        let disposition = match gesture.owner {
            Owner::Intercepted { scrolling } => {
                gesture.owner = Owner::Intercepted {
                    scrolling: self.container_move(&gesture, event, scrolling),
                };
                event.consume();
                TouchDisposition::Intercepted
            }
            Owner::Container { scrolling } => {
                gesture.owner = Owner::Container {
                    scrolling: self.container_move(&gesture, event, scrolling),
                };
                TouchDisposition::Container
            }
            Owner::Panel => self.panel_move(&gesture, event),
            Owner::Undecided => self.undecided_move(&mut gesture, event),
        };

        gesture.last = event.position;
        self.gesture = Some(gesture);
        disposition
    }

    fn on_up(&mut self, event: &PointerEvent) -> TouchDisposition {
        let Some(gesture) = self.gesture.take() else {
            return TouchDisposition::Container;
        };
        if gesture.pointer != event.id {
            self.gesture = Some(gesture);
            return TouchDisposition::Container;
        }
        self.disallow_parent_intercept = false;

        let is_tap = !gesture.ceded && self.is_within_slop(gesture.down, event.position);
        match gesture.owner {
            Owner::Intercepted { .. } => {
                event.consume();
                TouchDisposition::Intercepted
            }
            Owner::Container { scrolling } => {
                if is_tap && !scrolling {
                    self.click_row(gesture.raw);
                }
                TouchDisposition::Container
            }
            Owner::Undecided | Owner::Panel => {
                let Some(raw) = self.panel_at(gesture.raw) else {
                    if is_tap {
                        self.click_row(gesture.raw);
                    }
                    return TouchDisposition::Container;
                };
                let local = self.to_row_local(event, raw);
                let response = self
                    .registry
                    .get_mut(raw)
                    .map_or(PanelResponse::Ignored, |panel| panel.on_release(&local));
                match response {
                    _ if is_tap && gesture.owner == Owner::Undecided && !local.is_consumed() => {
                        self.click_row(Some(raw));
                    }
                    PanelResponse::MenuItemClicked { side, index } => {
                        self.click_menu_item(raw, side, index);
                    }
                    _ => {}
                }
                self.panel_disposition(raw, response)
            }
        }
    }

    fn on_cancel(&mut self, event: &PointerEvent) -> TouchDisposition {
        let Some(gesture) = self.gesture.take() else {
            return TouchDisposition::Container;
        };
        if gesture.pointer != event.id {
            self.gesture = Some(gesture);
            return TouchDisposition::Container;
        }
        self.disallow_parent_intercept = false;

        match gesture.owner {
            Owner::Intercepted { .. } => TouchDisposition::Intercepted,
            Owner::Container { .. } => TouchDisposition::Container,
            Owner::Undecided | Owner::Panel => match self.cancel_panel_gesture(&gesture) {
                Some(raw) => self.panel_disposition(raw, PanelResponse::Ignored),
                None => TouchDisposition::Container,
            },
        }
    }

    /// A second pointer hands the whole gesture to the container.
    fn cede_to_container(&mut self, mut gesture: ListGesture) -> TouchDisposition {
        log::debug!("second pointer down; the list takes over the gesture");
        if matches!(gesture.owner, Owner::Undecided | Owner::Panel) {
            self.cancel_panel_gesture(&gesture);
            gesture.owner = Owner::Container { scrolling: false };
        }
        gesture.ceded = true;
        self.gesture = Some(gesture);
        TouchDisposition::Container
    }

    fn undecided_move(&mut self, gesture: &mut ListGesture, event: &PointerEvent) -> TouchDisposition {
        let dx = event.position.x - gesture.down.x;
        let dy = event.position.y - gesture.down.y;
        let slop = self.config.touch_slop;
        let panel_raw = self.panel_at(gesture.raw);
        let swipe_raw = panel_raw.filter(|raw| {
            self.remapper
                .to_content_index(*raw)
                .is_some_and(|position| self.is_swipe_allowed(position))
        });

        if let Some(raw) = swipe_raw {
            if dx != 0.0 && dx.abs() > dy.abs() && self.would_reveal_or_close(raw, dx) {
                if !self.disallow_parent_intercept {
                    log::trace!("row {raw} asks the parent not to intercept");
                }
                self.disallow_parent_intercept = true;
            }
        }

        if dx.abs() > slop && dx.abs() > dy.abs() {
            let Some(raw) = swipe_raw else {
                log::trace!("horizontal move on row {:?} left to the container", gesture.raw);
                self.cancel_panel_gesture(gesture);
                gesture.owner = Owner::Container { scrolling: false };
                return TouchDisposition::Container;
            };
            log::debug!("row {raw} claims the horizontal drag");
            gesture.owner = Owner::Panel;
            let snapped = self.registry.snap_closed_except(Some(raw));
            if !snapped.is_empty() {
                log::debug!("rows {snapped:?} closed before row {raw} drags");
            }
            self.registry.set_open(raw);
            return self.panel_move(gesture, event);
        }

        if dy.abs() > slop && dy.abs() >= dx.abs() {
            log::debug!("list claims the vertical scroll");
            self.cancel_panel_gesture(gesture);
            let closing = self.registry.close_except(None);
            if !closing.is_empty() {
                log::debug!("list scroll closes rows {closing:?}");
            }
            let scrolling = self.container_move(gesture, event, true);
            gesture.owner = Owner::Container { scrolling };
            return TouchDisposition::Container;
        }

        match panel_raw {
            Some(raw) => {
                let local = self.to_row_local(event, raw);
                if let Some(panel) = self.registry.get_mut(raw) {
                    panel.on_move(&local);
                }
                self.panel_disposition(raw, PanelResponse::Tracking)
            }
            None => TouchDisposition::Container,
        }
    }

    fn panel_move(&mut self, gesture: &ListGesture, event: &PointerEvent) -> TouchDisposition {
        let Some(raw) = self.panel_at(gesture.raw) else {
            return TouchDisposition::Container;
        };
        let local = self.to_row_local(event, raw);
        let dragging = self
            .registry
            .get_mut(raw)
            .is_some_and(|panel| panel.on_move(&local));
        let response = if dragging {
            local.consume();
            PanelResponse::Dragging
        } else {
            PanelResponse::Tracking
        };
        self.panel_disposition(raw, response)
    }

    /// Scrolls the list once the gesture is vertical. Returns whether the
    /// container is now scrolling.
    fn container_move(&mut self, gesture: &ListGesture, event: &PointerEvent, scrolling: bool) -> bool {
        let dx = event.position.x - gesture.down.x;
        let dy = event.position.y - gesture.down.y;
        let scrolling = scrolling || (dy.abs() > self.config.touch_slop && dy.abs() >= dx.abs());
        if scrolling {
            let consumed = self.scroll.dispatch_raw_delta(gesture.last.y - event.position.y);
            if consumed != 0.0 {
                self.bind_visible_rows();
            }
        }
        scrolling
    }

    /// Finger moving left (negative `dx`) reveals the right menu or closes an
    /// open left one, and vice versa.
    fn would_reveal_or_close(&self, raw: usize, dx: f32) -> bool {
        let Some(panel) = self.registry.get(raw) else {
            return false;
        };
        if dx < 0.0 {
            panel.has_menu(Side::Right) || panel.is_left_menu_fully_open()
        } else {
            panel.has_menu(Side::Left) || panel.is_right_menu_fully_open()
        }
    }

    /// Cancels the panel under the gesture, if any. Returns its raw position.
    fn cancel_panel_gesture(&mut self, gesture: &ListGesture) -> Option<usize> {
        let raw = self.panel_at(gesture.raw)?;
        if let Some(panel) = self.registry.get_mut(raw) {
            panel.on_cancel();
        }
        Some(raw)
    }

    fn click_row(&mut self, raw: Option<usize>) {
        let Some(position) = raw.and_then(|raw| self.remapper.to_content_index(raw)) else {
            return;
        };
        log::debug!("row {position} clicked");
        if let Some(listener) = self.on_item_click.as_mut() {
            listener(position);
        }
    }

    fn click_menu_item(&mut self, raw: usize, side: Side, index: usize) {
        let Some(position) = self.remapper.to_content_index(raw) else {
            return;
        };
        log::debug!("{side} menu item {index} clicked on row {position}");
        let bridge = SwipeMenuBridge::new(side, index, position);
        if let Some(listener) = self.on_menu_item_click.as_mut() {
            listener(&bridge);
        }
        if bridge.close_requested() {
            if let Some(panel) = self.registry.get_mut(raw) {
                panel.smooth_close_menu();
            }
        }
    }

    // ─── Binding ────────────────────────────────────────────────────────

    fn open_menu(
        &mut self,
        position: usize,
        side: Side,
        duration_millis: Option<u64>,
    ) -> Result<(), SwipeError> {
        let raw = self.bound_raw(position)?;
        let Some(panel) = self.registry.get(raw) else {
            return Err(SwipeError::NoSwipeMenu { position });
        };
        if !panel.has_menu(side) {
            return Err(SwipeError::NoMenuOnSide { position, side });
        }

        let closing = self.registry.close_except(Some(raw));
        if !closing.is_empty() {
            log::debug!("opening row {position} closes rows {closing:?}");
        }
        if let Some(panel) = self.registry.get_mut(raw) {
            let duration = duration_millis.unwrap_or_else(|| panel.default_duration_millis(side));
            panel.smooth_open(side, duration);
        }
        self.registry.set_open(raw);
        Ok(())
    }

    fn bound_raw(&self, position: usize) -> Result<usize, SwipeError> {
        let count = self.remapper.content_count();
        let raw = self
            .remapper
            .to_raw_position(position)
            .ok_or(SwipeError::PositionOutOfRange { position, count })?;
        if !self.visible_range().contains(&raw) {
            return Err(SwipeError::RowNotBound { position });
        }
        if !self.registry.is_bound(raw) {
            return Err(SwipeError::NoSwipeMenu { position });
        }
        Ok(raw)
    }

    fn visible_range(&self) -> Range<usize> {
        if self.layout.row_height <= 0.0 {
            return 0..0;
        }
        let top = self.scroll.value();
        let first = (top / self.layout.row_height).floor() as usize;
        let end = ((top + self.layout.viewport_height) / self.layout.row_height).ceil() as usize;
        let count = self.remapper.row_count();
        first.min(count)..end.min(count)
    }

    fn update_scroll_range(&mut self) {
        let content_height = self.remapper.row_count() as f32 * self.layout.row_height;
        self.scroll
            .set_max_value(content_height - self.layout.viewport_height);
    }

    fn rebind_all(&mut self) {
        self.registry.recycle_all();
        self.bind_visible_rows();
    }

    /// Recycles panels that scrolled out of view and binds the rows that
    /// scrolled in.
    fn bind_visible_rows(&mut self) {
        let visible = self.visible_range();
        let recycled: SmallVec<[usize; 8]> = self
            .registry
            .positions()
            .filter(|raw| !visible.contains(raw))
            .collect();
        for raw in recycled {
            self.registry.recycle(raw);
            log::trace!("recycled row {raw}");
        }

        let Some(creator) = self.menu_creator.as_ref() else {
            return;
        };
        let size = Size::new(self.layout.width, self.layout.row_height);
        for raw in visible {
            if self.registry.is_bound(raw) {
                continue;
            }
            let Some(position) = self.remapper.to_content_index(raw) else {
                continue;
            };
            let mut left = SwipeMenu::new(Side::Left);
            let mut right = SwipeMenu::new(Side::Right);
            creator.on_create_menu(&mut left, &mut right, position);
            if !left.has_items() && !right.has_items() {
                continue;
            }
            let mut panel = SwipePanel::new(left, right, size, self.config);
            panel.set_swipe_enabled(self.is_swipe_allowed(position));
            self.registry.bind(raw, panel);
            log::trace!("bound row {raw} (content {position})");
        }
    }

    fn refresh_swipe_enabled(&mut self) {
        let allowed: SmallVec<[(usize, bool); 16]> = self
            .registry
            .positions()
            .filter_map(|raw| {
                let position = self.remapper.to_content_index(raw)?;
                Some((raw, self.is_swipe_allowed(position)))
            })
            .collect();
        for (raw, enabled) in allowed {
            if let Some(panel) = self.registry.get_mut(raw) {
                panel.set_swipe_enabled(enabled);
            }
        }
    }

    /// Polls every panel for menu-state transitions and reports them. A
    /// panel that became fully open closes all others.
    fn dispatch_state_changes(&mut self) {
        let mut changes: SmallVec<[(usize, MenuState); 2]> = SmallVec::new();
        for (raw, panel) in self.registry.iter_mut() {
            while let Some(state) = panel.take_state_change() {
                changes.push((raw, state));
            }
        }

        for (raw, state) in changes {
            if state == MenuState::Open {
                self.registry.set_open(raw);
                let closing = self.registry.close_except(Some(raw));
                if !closing.is_empty() {
                    log::debug!("row {raw} opened; closing rows {closing:?}");
                }
            }
            let Some(position) = self.remapper.to_content_index(raw) else {
                continue;
            };
            log::debug!("row {position} menu {state:?}");
            if let Some(listener) = self.on_menu_state_changed.as_mut() {
                listener(position, state);
            }
        }
    }

    // ─── Helpers ────────────────────────────────────────────────────────

    fn is_engaged(&self) -> bool {
        self.menu_creator.is_some() && !self.item_view_swipe_enabled
    }

    fn is_swipe_allowed(&self, position: usize) -> bool {
        self.registry.is_swipe_menu_enabled()
            && self.registry.is_position_enabled(position)
            && self.provider.is_swipe_menu_enabled(position)
    }

    fn panel_at(&self, raw: Option<usize>) -> Option<usize> {
        raw.filter(|raw| self.registry.is_bound(*raw))
    }

    fn panel_disposition(&self, raw: usize, response: PanelResponse) -> TouchDisposition {
        match self.remapper.to_content_index(raw) {
            Some(position) => TouchDisposition::Panel { position, response },
            None => TouchDisposition::Container,
        }
    }

    fn to_row_local(&self, event: &PointerEvent, raw: usize) -> PointerEvent {
        let bounds = self.row_bounds(raw);
        event.copy_with_position(bounds.to_local(event.position))
    }

    fn is_within_slop(&self, down: Point, up: Point) -> bool {
        let slop = self.config.touch_slop;
        (up.x - down.x).abs() <= slop && (up.y - down.y).abs() <= slop
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
