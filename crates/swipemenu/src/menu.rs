//! Menu model: the items a row reveals on each side, and the bridge handed
//! to menu-item click listeners.

use crate::config::{sanitize_animation_duration, sanitize_open_percent};
use crate::side::Side;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

/// How the items of one menu are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuOrientation {
    /// Items side by side; the menu is as wide as all of them together.
    #[default]
    Horizontal,
    /// Items stacked; the menu is as wide as the widest item.
    Vertical,
}

/// One button in a swipe menu.
///
/// Only `width`, `height` and `weight` affect gesture handling; `title` is
/// carried for the renderer and for logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwipeMenuItem {
    pub width: i32,
    /// Height in a vertical menu; zero or negative fills the row evenly.
    pub height: i32,
    pub title: Option<String>,
    pub weight: u32,
}

impl SwipeMenuItem {
    pub fn new(width: i32) -> Self {
        Self {
            width: width.max(0),
            ..Self::default()
        }
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// The menu attached to one side of a row.
///
/// A menu with no items disables its side entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeMenu {
    side: Side,
    orientation: MenuOrientation,
    items: SmallVec<[SwipeMenuItem; 4]>,
    open_percent: Option<f32>,
    animation_duration_millis: Option<u64>,
}

impl SwipeMenu {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orientation: MenuOrientation::Horizontal,
            items: SmallVec::new(),
            open_percent: None,
            animation_duration_millis: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn orientation(&self) -> MenuOrientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: MenuOrientation) {
        self.orientation = orientation;
    }

    pub fn add_item(&mut self, item: SwipeMenuItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = SwipeMenuItem>) -> &mut Self {
        self.items.extend(items);
        self
    }

    pub fn remove_item(&mut self, index: usize) -> Option<SwipeMenuItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn items(&self) -> &[SwipeMenuItem] {
        &self.items
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Overrides the list-wide open threshold for rows using this menu.
    pub fn set_open_percent(&mut self, open_percent: f32) {
        self.open_percent = Some(sanitize_open_percent(open_percent));
    }

    pub fn open_percent(&self) -> Option<f32> {
        self.open_percent
    }

    /// Overrides the list-wide animation duration cap for this side.
    pub fn set_animation_duration(&mut self, millis: u64) {
        self.animation_duration_millis = Some(sanitize_animation_duration(millis));
    }

    pub fn animation_duration_millis(&self) -> Option<u64> {
        self.animation_duration_millis
    }

    /// Width of the revealed region; 0 when the menu has no items.
    pub fn width(&self) -> i32 {
        match self.orientation {
            MenuOrientation::Horizontal => self.items.iter().map(|item| item.width).sum(),
            MenuOrientation::Vertical => {
                self.items.iter().map(|item| item.width).max().unwrap_or(0)
            }
        }
    }

    /// Index of the item under a point given in menu-local coordinates.
    pub fn item_index_at(&self, x: f32, y: f32, row_height: f32) -> Option<usize> {
        if x < 0.0 || y < 0.0 || x >= self.width() as f32 {
            return None;
        }
        match self.orientation {
            MenuOrientation::Horizontal => {
                let mut right = 0.0;
                self.items.iter().position(|item| {
                    right += item.width as f32;
                    x < right
                })
            }
            MenuOrientation::Vertical => {
                let count = self.items.len() as f32;
                let mut bottom = 0.0;
                self.items.iter().position(|item| {
                    bottom += if item.height > 0 {
                        item.height as f32
                    } else {
                        row_height / count
                    };
                    y < bottom
                })
            }
        }
    }
}

/// Builds the menus for a content row as it is bound.
///
/// Leave a menu empty to disable that side for the row. Rows where both
/// menus stay empty get no swipe panel at all.
pub trait SwipeMenuCreator {
    fn on_create_menu(&self, left: &mut SwipeMenu, right: &mut SwipeMenu, position: usize);
}

impl<F> SwipeMenuCreator for F
where
    F: Fn(&mut SwipeMenu, &mut SwipeMenu, usize),
{
    fn on_create_menu(&self, left: &mut SwipeMenu, right: &mut SwipeMenu, position: usize) {
        self(left, right, position)
    }
}

/// Handed to the menu-item click listener.
///
/// Calling [`close_menu`](SwipeMenuBridge::close_menu) closes the row's
/// menu once the listener returns.
#[derive(Clone, Debug)]
pub struct SwipeMenuBridge {
    side: Side,
    item_index: usize,
    position: usize,
    close_requested: Rc<Cell<bool>>,
}

impl SwipeMenuBridge {
    pub(crate) fn new(side: Side, item_index: usize, position: usize) -> Self {
        Self {
            side,
            item_index,
            position,
            close_requested: Rc::new(Cell::new(false)),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Index of the clicked item within its menu.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Content-row index of the row whose menu was clicked.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn close_menu(&self) {
        self.close_requested.set(true);
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.close_requested.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(orientation: MenuOrientation, widths: &[i32]) -> SwipeMenu {
        let mut menu = SwipeMenu::new(Side::Right);
        menu.set_orientation(orientation);
        menu.add_items(widths.iter().map(|&w| SwipeMenuItem::new(w)));
        menu
    }

    #[test]
    fn width_depends_on_orientation() {
        assert_eq!(menu(MenuOrientation::Horizontal, &[60, 80]).width(), 140);
        assert_eq!(menu(MenuOrientation::Vertical, &[60, 80]).width(), 80);
        assert_eq!(menu(MenuOrientation::Horizontal, &[]).width(), 0);
    }

    #[test]
    fn horizontal_hit_test_walks_item_widths() {
        let menu = menu(MenuOrientation::Horizontal, &[60, 80]);
        assert_eq!(menu.item_index_at(0.0, 10.0, 50.0), Some(0));
        assert_eq!(menu.item_index_at(59.9, 10.0, 50.0), Some(0));
        assert_eq!(menu.item_index_at(60.0, 10.0, 50.0), Some(1));
        assert_eq!(menu.item_index_at(140.0, 10.0, 50.0), None);
    }

    #[test]
    fn vertical_items_share_row_height() {
        let menu = menu(MenuOrientation::Vertical, &[80, 80]);
        assert_eq!(menu.item_index_at(10.0, 10.0, 60.0), Some(0));
        assert_eq!(menu.item_index_at(10.0, 35.0, 60.0), Some(1));
        assert_eq!(menu.item_index_at(10.0, 61.0, 60.0), None);
    }

    #[test]
    fn bridge_close_request_is_shared() {
        let bridge = SwipeMenuBridge::new(Side::Left, 1, 7);
        let copy = bridge.clone();
        copy.close_menu();
        assert!(bridge.close_requested());
        assert_eq!((bridge.side(), bridge.item_index(), bridge.position()), (Side::Left, 1, 7));
    }

    #[test]
    fn open_percent_override_is_clamped() {
        let mut menu = SwipeMenu::new(Side::Left);
        menu.set_open_percent(3.0);
        assert_eq!(menu.open_percent(), Some(1.0));
    }

    #[test]
    fn zero_duration_override_becomes_one_millisecond() {
        let mut menu = SwipeMenu::new(Side::Right);
        menu.set_animation_duration(0);
        assert_eq!(menu.animation_duration_millis(), Some(1));
    }
}
