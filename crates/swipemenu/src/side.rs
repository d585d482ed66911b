//! Per-side boundary arithmetic.
//!
//! Panel offsets follow scroll conventions: the content moves opposite to
//! the offset, so an open left menu sits at `-width` and an open right menu
//! at `+width`. Every function here is pure.

use std::fmt;

/// Which edge of the row a menu is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the offset while this side's menu is showing.
    pub fn sign(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The side a nonzero offset belongs to.
    pub fn of_offset(offset: i32) -> Option<Side> {
        match offset {
            0 => None,
            o if o < 0 => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Result of clamping a proposed offset against one side's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clamped {
    pub offset: i32,
    /// The clamped offset is back at 0, so the next drag picks a side anew.
    pub reset_side: bool,
}

/// Boundary math for one side of one panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideMetrics {
    pub side: Side,
    pub menu_width: i32,
}

impl SideMetrics {
    pub fn new(side: Side, menu_width: i32) -> Self {
        Self {
            side,
            menu_width: menu_width.max(0),
        }
    }

    /// Offset of the fully open menu.
    pub fn open_offset(&self) -> i32 {
        self.side.sign() * self.menu_width
    }

    /// Offset lies on this side of zero.
    pub fn has_offset(&self, offset: i32) -> bool {
        self.menu_width != 0 && Side::of_offset(offset) == Some(self.side)
    }

    /// At or past the fully open boundary.
    pub fn is_open(&self, offset: i32) -> bool {
        self.menu_width != 0 && offset * self.side.sign() >= self.menu_width
    }

    /// Strictly past the fully open boundary (an overscroll).
    pub fn is_open_not_equal(&self, offset: i32) -> bool {
        self.menu_width != 0 && offset * self.side.sign() > self.menu_width
    }

    pub fn is_fully_closed(&self, offset: i32) -> bool {
        offset == 0
    }

    /// Clamps into `[0, open_offset]` (ordered for the side's sign).
    pub fn clamp(&self, offset: i32) -> Clamped {
        let (low, high) = match self.side {
            Side::Left => (-self.menu_width, 0),
            Side::Right => (0, self.menu_width),
        };
        let offset = offset.clamp(low, high);
        Clamped {
            offset,
            reset_side: offset == 0,
        }
    }

    /// `(from, to)` for animating open from `offset`.
    pub fn open_animation_range(&self, offset: i32) -> (i32, i32) {
        (offset, self.open_offset())
    }

    /// `(from, to)` for animating closed from `offset`.
    pub fn close_animation_range(&self, offset: i32) -> (i32, i32) {
        (offset, 0)
    }

    /// How far open, in `[0, 1]`; zero-width menus report 0.
    pub fn fraction(&self, offset: i32) -> f32 {
        if self.menu_width == 0 || !self.has_offset(offset) {
            return 0.0;
        }
        (offset.abs() as f32 / self.menu_width as f32).min(1.0)
    }

    /// Whether row-local `x` lands on the (shifted) content rather than on
    /// the revealed menu.
    pub fn is_point_on_content(&self, x: f32, offset: i32, row_width: f32) -> bool {
        let revealed = offset.unsigned_abs() as f32;
        match self.side {
            Side::Left => x >= revealed,
            Side::Right => x < row_width - revealed,
        }
    }

    /// Converts row-local `x` into the menu's own coordinate space, or
    /// `None` if the point is outside the visible part of the menu.
    pub fn menu_local_x(&self, x: f32, offset: i32, row_width: f32) -> Option<f32> {
        let revealed = offset.unsigned_abs() as f32;
        let width = self.menu_width as f32;
        let local = match self.side {
            // The left menu slides in from the left edge.
            Side::Left => x + width - revealed,
            Side::Right => x - (row_width - revealed),
        };
        let visible = match self.side {
            Side::Left => x >= 0.0 && x < revealed,
            Side::Right => x >= row_width - revealed && x < row_width,
        };
        (visible && local >= 0.0 && local < width).then_some(local)
    }
}
