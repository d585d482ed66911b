//! Swipe-menu gesture engine for list rows.
//!
//! Each list row can hide a left and/or right action menu behind its content.
//! Dragging the row horizontally reveals a menu; a release either opens it
//! fully or closes it, depending on fling velocity and how far it was dragged.
//!
//! - [`SwipePanel`] is one row's drag/open/close state machine, controlled
//!   through [`Openable`].
//! - [`SwipeMenuList`] routes pointer events between the rows and the list's
//!   own vertical scrolling, and keeps at most one row open at a time.
//!
//! Animations are stepped explicitly with [`SwipeMenuList::advance`] from the
//! host's frame clock.

pub mod config;
pub mod error;
pub mod list;
pub mod menu;
pub mod panel;
pub mod registry;
pub mod scroll;
pub mod side;

pub use config::{SwipeConfig, DEFAULT_ANIMATION_DURATION_MILLIS, DEFAULT_OPEN_PERCENT};
pub use error::SwipeError;
pub use list::{ListLayout, SwipeMenuList, TouchDisposition};
pub use menu::{MenuOrientation, SwipeMenu, SwipeMenuBridge, SwipeMenuCreator, SwipeMenuItem};
pub use panel::{MenuState, Openable, PanelResponse, SwipePanel};
pub use registry::{PanelId, PanelRegistry};
pub use scroll::ListScrollState;
pub use side::{Side, SideMetrics};

pub use swipemenu_animation::Easing;
pub use swipemenu_foundation::{
    Point, PointerEvent, PointerEventKind, PointerId, PositionRemapper, Rect, RowKind, Size,
    SwipeItemProvider,
};

pub mod prelude {
    pub use crate::list::{ListLayout, SwipeMenuList, TouchDisposition};
    pub use crate::menu::{SwipeMenu, SwipeMenuBridge, SwipeMenuItem};
    pub use crate::panel::{MenuState, Openable};
    pub use crate::side::Side;
    pub use crate::SwipeConfig;
    pub use swipemenu_foundation::{PointerEvent, SwipeItemProvider};
}
