//! How the list splits pointer streams between rows and its own scrolling,
//! and how it keeps at most one row open.

use swipemenu::prelude::*;
use swipemenu::PanelResponse;
use swipemenu_testing::robot_assertions::{
    assert_approx_eq, assert_at_most_one_open, assert_offset,
};
use swipemenu_testing::{RecordingListener, SwipeRobot};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn both_sides(left: &mut SwipeMenu, right: &mut SwipeMenu, _position: usize) {
    left.add_item(SwipeMenuItem::new(100));
    right.add_items([SwipeMenuItem::new(50), SwipeMenuItem::new(50)]);
}

fn right_only(_left: &mut SwipeMenu, right: &mut SwipeMenu, _position: usize) {
    right.add_item(SwipeMenuItem::new(100));
}

fn robot_with(
    items: usize,
    creator: fn(&mut SwipeMenu, &mut SwipeMenu, usize),
    listener: &RecordingListener,
) -> SwipeRobot {
    init_logging();
    let mut list = SwipeMenuList::new(
        items,
        ListLayout::new(400.0, 50.0, 200.0),
        SwipeConfig::default(),
    );
    list.set_menu_creator(creator);
    listener.attach(&mut list);
    SwipeRobot::new(list)
}

fn robot(listener: &RecordingListener) -> SwipeRobot {
    robot_with(20, both_sides, listener)
}

#[test]
fn press_on_another_row_closes_the_open_row_first() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();
    listener.clear();

    let y = robot.row_center_y(2);
    assert_eq!(robot.press(200.0, y), TouchDisposition::Intercepted);
    assert_offset(robot.list(), 0, 0, "closed before the press is handled");
    assert_at_most_one_open(robot.list(), "after press");

    assert_eq!(robot.move_to(100.0, y), TouchDisposition::Intercepted);
    assert_eq!(robot.release(), TouchDisposition::Intercepted);
    robot.wait_for_idle();

    assert_offset(robot.list(), 2, 0, "the swallowed gesture never drags");
    assert!(listener.item_clicks().is_empty());
    assert_eq!(listener.menu_state_changes(), vec![(0, MenuState::Closed)]);
    assert_eq!(robot.list_mut().open_menu_position(), None);
}

#[test]
fn at_most_one_row_is_open_after_every_press() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);

    for row in 0..4 {
        let y = robot.row_center_y(row);
        let first = robot.fling(300.0, y, 150.0, y);
        assert_at_most_one_open(robot.list(), "after fling");
        if row > 0 {
            assert_eq!(first, TouchDisposition::Intercepted, "row {row}");
            robot.wait_for_idle();
            let second = robot.fling(300.0, y, 150.0, y);
            assert_eq!(
                second,
                TouchDisposition::Panel {
                    position: row,
                    response: PanelResponse::Settled
                }
            );
        }
        robot.wait_for_idle();
        assert_offset(robot.list(), row, 100, "opened");
        assert_at_most_one_open(robot.list(), "settled");
        assert_eq!(robot.list_mut().open_menu_position(), Some(row));
    }

    let opened: Vec<_> = listener
        .menu_state_changes()
        .into_iter()
        .filter(|(_, state)| *state == MenuState::Open)
        .map(|(position, _)| position)
        .collect();
    assert_eq!(opened, vec![0, 1, 2, 3]);
}

#[test]
fn disabled_row_never_moves_and_falls_through_to_the_list() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    robot.list_mut().set_swipe_item_menu_enabled_at(3, false);
    let y = robot.row_center_y(3);

    assert_eq!(
        robot.press(300.0, y),
        TouchDisposition::Panel {
            position: 3,
            response: PanelResponse::Tracking
        }
    );
    assert_eq!(robot.move_to(200.0, y), TouchDisposition::Container);
    assert!(!robot.list().disallow_parent_intercept());
    assert_eq!(robot.move_to(150.0, y), TouchDisposition::Container);
    assert_eq!(robot.release(), TouchDisposition::Container);
    robot.wait_for_idle();
    assert_offset(robot.list(), 3, 0, "disabled row");

    robot.fling(100.0, y, 300.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 3, 0, "disabled row");
    assert!(listener.events().is_empty());

    robot.list_mut().set_swipe_item_menu_enabled_at(3, true);
    robot.fling(300.0, y, 150.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 3, 100, "re-enabled row");
}

#[test]
fn globally_disabled_list_never_opens_rows_by_drag() {
    let mut robot = robot(&RecordingListener::new());
    robot.list_mut().set_swipe_item_menu_enabled(false);
    let y = robot.row_center_y(1);

    robot.fling(300.0, y, 150.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 1, 0, "swipes disabled");

    robot
        .list_mut()
        .smooth_open_right_menu(1)
        .expect("programmatic open still works");
    robot.wait_for_idle();
    assert_offset(robot.list(), 1, 100, "opened programmatically");
}

#[test]
fn vertical_drag_scrolls_the_list_and_closes_the_open_row() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();
    listener.clear();

    robot.press(100.0, 25.0);
    assert_eq!(robot.move_to(100.0, 15.0), TouchDisposition::Container);
    assert_eq!(robot.move_to(100.0, 0.0), TouchDisposition::Container);
    assert_eq!(robot.release(), TouchDisposition::Container);
    robot.wait_for_idle();

    assert_approx_eq(robot.list().scroll_state().value(), 25.0, 0.001, "scrolled");
    assert_offset(robot.list(), 0, 0, "scroll closed the row");
    assert_eq!(listener.menu_state_changes(), vec![(0, MenuState::Closed)]);
    assert!(listener.item_clicks().is_empty());
}

#[test]
fn exact_diagonal_drag_goes_to_the_list() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);

    robot.press(200.0, 95.0);
    assert_eq!(robot.move_to(180.0, 75.0), TouchDisposition::Container);
    assert!(!robot.list().disallow_parent_intercept());
    assert_eq!(robot.release(), TouchDisposition::Container);
    robot.wait_for_idle();

    assert_offset(robot.list(), 1, 0, "row never moved");
    assert_approx_eq(robot.list().scroll_state().value(), 20.0, 0.001, "scrolled");
    assert!(listener.events().is_empty());
}

#[test]
fn scrolling_rebinds_rows_that_come_into_view() {
    let mut robot = robot(&RecordingListener::new());
    assert_eq!(robot.list().bound_positions(), vec![0, 1, 2, 3]);

    robot.press(200.0, 175.0);
    for y in [125.0, 75.0, 25.0] {
        assert_eq!(robot.move_to(200.0, y), TouchDisposition::Container);
    }
    robot.release();

    assert_approx_eq(robot.list().scroll_state().value(), 150.0, 0.001, "scrolled");
    assert_eq!(robot.list().bound_positions(), vec![3, 4, 5, 6]);
    assert_eq!(robot.list().row_at(25.0), Some(3));
}

#[test]
fn tap_on_a_closed_row_clicks_it() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    let y = robot.row_center_y(1);

    assert_eq!(
        robot.tap(200.0, y),
        TouchDisposition::Panel {
            position: 1,
            response: PanelResponse::Ignored
        }
    );
    assert_eq!(listener.item_clicks(), vec![1]);
}

#[test]
fn headers_and_footers_neither_click_nor_swipe() {
    let listener = RecordingListener::new();
    let mut robot = robot_with(3, both_sides, &listener);
    robot.list_mut().set_header_count(1);
    robot.list_mut().set_footer_count(1);

    assert_eq!(robot.tap(200.0, 25.0), TouchDisposition::Container);
    assert_eq!(robot.slow_drag(300.0, 25.0, 150.0, 25.0, 1), TouchDisposition::Container);
    assert!(listener.events().is_empty());

    let y = robot.row_center_y(1);
    robot.tap(200.0, y);
    assert_eq!(listener.item_clicks(), vec![0]);

    robot.fling(300.0, y, 150.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 100, "first content row sits below the header");
}

#[test]
fn second_pointer_hands_the_gesture_to_the_list() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    let y = robot.row_center_y(0);

    robot.press(300.0, y);
    robot.move_to(290.0, y);
    assert_offset(robot.list(), 0, 10, "dragging");

    assert_eq!(robot.second_pointer_down(100.0, 125.0), TouchDisposition::Container);
    assert_eq!(robot.move_to(200.0, y), TouchDisposition::Container);
    assert_eq!(robot.release(), TouchDisposition::Container);
    robot.wait_for_idle();

    assert_offset(robot.list(), 0, 0, "short drag settled closed");
    assert!(listener.item_clicks().is_empty());

    robot.press(200.0, y);
    robot.second_pointer_down(100.0, 125.0);
    robot.release();
    assert!(listener.item_clicks().is_empty(), "multi-touch is never a tap");
}

#[test]
fn item_view_swipe_disengages_the_menus() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    robot.list_mut().set_item_view_swipe_enabled(true);
    let y = robot.row_center_y(1);

    assert_eq!(robot.slow_drag(300.0, y, 150.0, y, 1), TouchDisposition::Container);
    robot.wait_for_idle();
    assert_offset(robot.list(), 1, 0, "menus disengaged");

    assert_eq!(robot.tap(200.0, y), TouchDisposition::Container);
    assert_eq!(listener.item_clicks(), vec![1]);

    robot.list_mut().set_item_view_swipe_enabled(false);
    robot.fling(300.0, y, 150.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 1, 100, "menus engaged again");
}

#[test]
fn parent_intercept_is_disallowed_only_for_moves_that_reveal_or_close() {
    let mut robot = robot(&RecordingListener::new());
    let y = robot.row_center_y(0);
    robot.press(300.0, y);
    robot.move_to(295.0, y);
    assert!(robot.list().disallow_parent_intercept(), "would reveal the right menu");
    robot.release();
    assert!(!robot.list().disallow_parent_intercept());

    let mut robot = robot_with(20, right_only, &RecordingListener::new());
    robot.press(300.0, y);
    robot.move_to(305.0, y);
    assert!(!robot.list().disallow_parent_intercept(), "no left menu to reveal");
    robot.release();

    robot.press(300.0, y);
    robot.move_to(303.0, y + 5.0);
    assert!(!robot.list().disallow_parent_intercept(), "mostly vertical");
    robot.release();

    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();
    robot.press(100.0, y);
    robot.move_to(105.0, y);
    assert!(robot.list().disallow_parent_intercept(), "would close the right menu");
    robot.release();
}

#[test]
fn partly_open_menu_does_not_block_the_parent() {
    let mut robot = robot_with(20, right_only, &RecordingListener::new());
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.advance_time(48);
    robot.press(200.0, y);
    robot.cancel();
    let frozen = robot.offset(0);
    assert!(frozen > 0 && frozen < 100, "mid-animation: {frozen}");

    robot.press(100.0, y);
    robot.move_to(105.0, y);
    assert!(!robot.list().disallow_parent_intercept(), "only a fully open menu closes");
    robot.release();
}

#[test]
fn menu_state_changes_fire_once_per_transition() {
    let listener = RecordingListener::new();
    let mut robot = robot(&listener);
    let y = robot.row_center_y(2);

    robot.fling(300.0, y, 150.0, y);
    robot.wait_for_idle();
    robot.advance_time(500);
    assert_eq!(listener.menu_state_changes(), vec![(2, MenuState::Open)]);

    robot.list_mut().smooth_close_menu();
    robot.wait_for_idle();
    robot.list_mut().smooth_close_menu();
    robot.wait_for_idle();
    assert_eq!(
        listener.menu_state_changes(),
        vec![(2, MenuState::Open), (2, MenuState::Closed)]
    );
}
