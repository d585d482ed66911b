use crate::geometry::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking for gesture disambiguation.
///
/// Positions are in list coordinates (the list's top-left corner is the
/// origin, before scrolling). `uptime_millis` is a monotonic timestamp used
/// for velocity tracking.
///
/// Events can be consumed by a handler (e.g. a panel closing on tap) so the
/// next handler in line (e.g. the row click) knows not to act on them. The
/// flag is shared via `Rc<Cell>`, so consumption is visible across copies.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_millis: i64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_millis: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_millis,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), uptime_millis)
    }

    pub fn moved(x: f32, y: f32, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), uptime_millis)
    }

    pub fn up(x: f32, y: f32, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), uptime_millis)
    }

    pub fn cancel(x: f32, y: f32, uptime_millis: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), uptime_millis)
    }

    /// Set the pointer id (secondary fingers use ids other than 0).
    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Mark this event as consumed.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Creates a copy of this event with a new position, sharing the
    /// consumption state.
    pub fn copy_with_position(&self, position: Point) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            position,
            uptime_millis: self.uptime_millis,
            consumed: self.consumed.clone(),
        }
    }
}
