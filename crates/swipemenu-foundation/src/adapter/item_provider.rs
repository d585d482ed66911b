//! Item provider trait for swipeable lists.
//!
//! The provider describes the content rows only; header and footer rows are
//! added around them by the [`PositionRemapper`](super::PositionRemapper).

/// Supplies the content-row information the swipe coordinator needs.
///
/// Implementations should be cheap to query; the coordinator calls them on
/// every press.
pub trait SwipeItemProvider {
    /// The number of content rows (headers and footers excluded).
    fn item_count(&self) -> usize;

    /// Whether the row at `index` may show its swipe menu.
    ///
    /// Consulted when a row is bound. Defaults to `true`.
    fn is_swipe_menu_enabled(&self, index: usize) -> bool {
        let _ = index;
        true
    }
}

/// A fixed number of rows, all swipeable.
impl SwipeItemProvider for usize {
    fn item_count(&self) -> usize {
        *self
    }
}
