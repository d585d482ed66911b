//! Foundation elements for swipemenu: geometry, pointer input, and the
//! adapter-side position bookkeeping the gesture engine consumes.

pub mod adapter;
pub mod geometry;
pub mod gesture_constants;
pub mod input;

pub use adapter::{PositionRemapper, RowKind, SwipeItemProvider};
pub use geometry::{Point, Rect, Size};
pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};
pub use input::{PointerEvent, PointerEventKind, PointerId, VelocityTracker1D};

pub mod prelude {
    pub use crate::adapter::{PositionRemapper, RowKind, SwipeItemProvider};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::gesture_constants::*;
    pub use crate::input::prelude::*;
}
