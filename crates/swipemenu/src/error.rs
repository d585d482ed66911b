use crate::side::Side;

/// Errors returned by list-level calls that name a row.
///
/// Gesture handling never fails; these only surface from programmatic
/// open requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeError {
    PositionOutOfRange { position: usize, count: usize },
    RowNotBound { position: usize },
    NoSwipeMenu { position: usize },
    NoMenuOnSide { position: usize, side: Side },
}

impl std::fmt::Display for SwipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeError::PositionOutOfRange { position, count } => {
                write!(f, "position {position} out of range; list has {count} items")
            }
            SwipeError::RowNotBound { position } => {
                write!(f, "row {position} is not bound")
            }
            SwipeError::NoSwipeMenu { position } => {
                write!(f, "row {position} has no swipe menu")
            }
            SwipeError::NoMenuOnSide { position, side } => {
                write!(f, "row {position} has no {side} menu")
            }
        }
    }
}

impl std::error::Error for SwipeError {}
