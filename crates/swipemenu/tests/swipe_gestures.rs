//! Single-row gestures driven through the list: drag thresholds, flings,
//! taps on an open row, cancellation and programmatic control.

use swipemenu::prelude::*;
use swipemenu::PanelResponse;
use swipemenu_testing::robot_assertions::{assert_offset, assert_offsets_clamped};
use swipemenu_testing::{ListEvent, RecordingListener, SwipeRobot};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 100 px left menu and a 100 px right menu of two 50 px items.
fn creator(left: &mut SwipeMenu, right: &mut SwipeMenu, _position: usize) {
    left.add_item(SwipeMenuItem::new(100).title("Archive"));
    right.add_items([
        SwipeMenuItem::new(50).title("Edit"),
        SwipeMenuItem::new(50).title("Delete"),
    ]);
}

fn robot_with(listener: &RecordingListener) -> SwipeRobot {
    init_logging();
    let mut list = SwipeMenuList::new(
        20usize,
        ListLayout::new(400.0, 50.0, 200.0),
        SwipeConfig::default(),
    );
    list.set_menu_creator(creator);
    listener.attach(&mut list);
    SwipeRobot::new(list)
}

fn robot() -> SwipeRobot {
    robot_with(&RecordingListener::new())
}

#[test]
fn slow_release_opens_at_half_the_menu_width() {
    for (drag, expected) in [(49, 0), (50, 100), (51, 100)] {
        let listener = RecordingListener::new();
        let mut robot = robot_with(&listener);
        let y = robot.row_center_y(0);

        let release = robot.slow_drag(300.0, y, 300.0 - drag as f32, y, 1);
        assert_eq!(
            release,
            TouchDisposition::Panel {
                position: 0,
                response: PanelResponse::Settled
            }
        );
        assert_offset(robot.list(), 0, drag, "released in place");

        robot.wait_for_idle();
        assert_offset(robot.list(), 0, expected, "after settling");
        let opened = if expected == 0 {
            vec![]
        } else {
            vec![(0, MenuState::Open)]
        };
        assert_eq!(listener.menu_state_changes(), opened, "drag {drag}");
    }
}

#[test]
fn opening_fling_overrides_a_short_drag() {
    let mut robot = robot();
    let y = robot.row_center_y(0);

    robot.press(300.0, y);
    robot.move_after(296.0, y, 4);
    robot.move_after(292.0, y, 4);
    let claim = robot.move_after(290.0, y, 4);
    assert_eq!(
        claim,
        TouchDisposition::Panel {
            position: 0,
            response: PanelResponse::Dragging
        }
    );
    assert_offset(robot.list(), 0, 10, "dragged past slop");

    robot.release();
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 100, "fling opened the right menu");
}

#[test]
fn closing_fling_overrides_a_long_drag() {
    let mut robot = robot();
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();

    robot.fling(100.0, y, 130.0, y);
    let offset = robot.offset(0);
    assert!(offset > 50, "still mostly open at release: {offset}");

    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 0, "fling closed the right menu");
}

#[test]
fn fling_right_opens_the_left_menu() {
    let mut robot = robot();
    let y = robot.row_center_y(0);

    robot.fling(100.0, y, 250.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, -100, "left menu open");
    assert!(robot
        .list()
        .panel(0)
        .is_some_and(|panel| panel.is_left_menu_fully_open()));
}

#[test]
fn offset_stays_within_menu_bounds_through_a_reversing_drag() {
    let mut robot = robot();
    let y = robot.row_center_y(0);

    robot.press(200.0, y);
    for x in [150.0, 100.0, 50.0, 0.0] {
        robot.move_to(x, y);
        assert_offsets_clamped(robot.list(), "dragging left");
    }
    assert_offset(robot.list(), 0, 100, "clamped at the right menu width");

    robot.move_to(100.0, y);
    assert_offset(robot.list(), 0, 0, "stopped at zero on the way back");
    for x in [200.0, 300.0, 400.0] {
        robot.move_to(x, y);
        assert_offsets_clamped(robot.list(), "dragging right");
    }
    assert_offset(robot.list(), 0, -100, "clamped at the left menu width");

    robot.advance_time(100);
    robot.release();
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, -100, "fully dragged menu stays open");
}

#[test]
fn tap_on_open_row_content_closes_it_without_a_row_click() {
    let listener = RecordingListener::new();
    let mut robot = robot_with(&listener);
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();
    listener.clear();

    let release = robot.tap(150.0, y);
    assert_eq!(
        release,
        TouchDisposition::Panel {
            position: 0,
            response: PanelResponse::Consumed
        }
    );
    robot.wait_for_idle();

    assert_offset(robot.list(), 0, 0, "tap closed the menu");
    assert!(listener.item_clicks().is_empty());
    assert_eq!(listener.menu_state_changes(), vec![(0, MenuState::Closed)]);
}

#[test]
fn menu_item_tap_reports_the_item_and_honours_close_requests() {
    let listener = RecordingListener::new().closing_on_menu_click();
    let mut robot = robot_with(&listener);
    let y = robot.row_center_y(1);
    robot
        .list_mut()
        .smooth_open_right_menu(1)
        .expect("row 1 is bound");
    robot.wait_for_idle();
    listener.clear();

    let release = robot.tap(320.0, y);
    assert_eq!(
        release,
        TouchDisposition::Panel {
            position: 1,
            response: PanelResponse::MenuItemClicked {
                side: Side::Right,
                index: 0
            }
        }
    );
    robot.wait_for_idle();

    assert_eq!(
        listener.events(),
        vec![
            ListEvent::MenuItemClick {
                side: Side::Right,
                index: 0,
                position: 1
            },
            ListEvent::MenuState {
                position: 1,
                state: MenuState::Closed
            },
        ]
    );
    assert_offset(robot.list(), 1, 0, "bridge closed the menu");
}

#[test]
fn menu_item_tap_without_close_request_leaves_menu_open() {
    let listener = RecordingListener::new();
    let mut robot = robot_with(&listener);
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();

    robot.tap(370.0, y);
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 100, "menu stays open");
    assert!(listener.events().contains(&ListEvent::MenuItemClick {
        side: Side::Right,
        index: 1,
        position: 0
    }));
}

#[test]
fn left_menu_items_are_hit_where_they_are_revealed() {
    let listener = RecordingListener::new();
    let mut robot = robot_with(&listener);
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_left_menu(0)
        .expect("row 0 is bound");
    robot.wait_for_idle();

    robot.tap(50.0, y);
    assert!(listener.events().contains(&ListEvent::MenuItemClick {
        side: Side::Left,
        index: 0,
        position: 0
    }));
}

#[test]
fn cancel_settles_a_half_dragged_row() {
    let mut robot = robot();
    let y = robot.row_center_y(0);

    robot.press(300.0, y);
    robot.move_to(230.0, y);
    assert_offset(robot.list(), 0, 70, "dragged");

    let cancel = robot.cancel();
    assert_eq!(
        cancel,
        TouchDisposition::Panel {
            position: 0,
            response: PanelResponse::Ignored
        }
    );
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 100, "past the threshold, so it opens");
}

#[test]
fn cancel_freezes_a_running_animation() {
    let mut robot = robot();
    let y = robot.row_center_y(0);
    robot
        .list_mut()
        .smooth_open_right_menu(0)
        .expect("row 0 is bound");
    robot.advance_time(48);

    let frozen = robot.offset(0);
    assert!(frozen > 0 && frozen < 100, "mid-animation: {frozen}");

    robot.press(200.0, y);
    robot.cancel();
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, frozen, "animation aborted in place");
}

#[test]
fn programmatic_open_then_side_close_returns_to_zero() {
    let mut robot = robot();
    robot
        .list_mut()
        .panel_mut(0)
        .expect("row 0 is bound")
        .smooth_open_left_menu_with_duration(120);
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, -100, "left open");

    robot
        .list_mut()
        .panel_mut(0)
        .expect("row 0 is bound")
        .smooth_close_right_menu();
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, -100, "closing the other side is a no-op");

    robot
        .list_mut()
        .panel_mut(0)
        .expect("row 0 is bound")
        .smooth_close_left_menu();
    robot.wait_for_idle();
    assert_offset(robot.list(), 0, 0, "left closed");
}

#[test]
fn closing_when_nothing_is_open_reports_nothing() {
    let listener = RecordingListener::new();
    let mut robot = robot_with(&listener);

    robot.list_mut().smooth_close_menu();
    robot
        .list_mut()
        .panel_mut(2)
        .expect("row 2 is bound")
        .smooth_close_menu();
    robot.wait_for_idle();

    assert!(listener.events().is_empty());
    assert!(robot.list().bound_positions().iter().all(|p| robot.offset(*p) == 0));
}
