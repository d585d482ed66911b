use anyhow::Context;
use swipemenu::prelude::*;
use swipemenu::Easing;

const ROW_WIDTH: f32 = 360.0;
const ROW_HEIGHT: f32 = 64.0;
const FRAME_MILLIS: i64 = 16;

/// An inbox: archive on the left for unread rows, edit/delete on the right.
struct Inbox {
    subjects: Vec<&'static str>,
}

impl SwipeItemProvider for Inbox {
    fn item_count(&self) -> usize {
        self.subjects.len()
    }

    /// Pinned messages (the first one) cannot be swiped.
    fn is_swipe_menu_enabled(&self, index: usize) -> bool {
        index != 0
    }
}

fn create_menus(left: &mut SwipeMenu, right: &mut SwipeMenu, position: usize) {
    if position % 2 == 1 {
        left.add_item(SwipeMenuItem::new(96).title("Archive"));
    }
    right.add_items([
        SwipeMenuItem::new(80).title("Edit"),
        SwipeMenuItem::new(80).title("Delete"),
    ]);
}

/// Feeds timed pointer events and frames to the list.
struct Session {
    list: SwipeMenuList,
    now_millis: i64,
}

impl Session {
    fn row_y(&self, row: usize) -> f32 {
        let bounds = self.list.row_bounds(row);
        bounds.y + bounds.height / 2.0
    }

    fn send(&mut self, event: PointerEvent) -> TouchDisposition {
        let disposition = self.list.on_pointer_event(&event);
        log::info!(
            "{:?} at ({:.0}, {:.0}) -> {:?}",
            event.kind,
            event.position.x,
            event.position.y,
            disposition
        );
        disposition
    }

    fn swipe(&mut self, row: usize, from_x: f32, to_x: f32, step_millis: i64) {
        let y = self.row_y(row);
        self.send(PointerEvent::down(from_x, y, self.now_millis));
        for step in 1..=6 {
            self.run_frames(step_millis);
            let x = from_x + (to_x - from_x) * step as f32 / 6.0;
            self.list
                .on_pointer_event(&PointerEvent::moved(x, y, self.now_millis));
        }
        self.send(PointerEvent::up(to_x, y, self.now_millis));
        self.settle();
    }

    fn tap(&mut self, x: f32, y: f32) {
        self.send(PointerEvent::down(x, y, self.now_millis));
        self.run_frames(60);
        self.send(PointerEvent::up(x, y, self.now_millis));
        self.settle();
    }

    fn scroll(&mut self, from_y: f32, to_y: f32) {
        self.send(PointerEvent::down(ROW_WIDTH / 2.0, from_y, self.now_millis));
        for step in 1..=8 {
            self.run_frames(FRAME_MILLIS);
            let y = from_y + (to_y - from_y) * step as f32 / 8.0;
            self.list
                .on_pointer_event(&PointerEvent::moved(ROW_WIDTH / 2.0, y, self.now_millis));
        }
        self.send(PointerEvent::up(ROW_WIDTH / 2.0, to_y, self.now_millis));
        self.settle();
        log::info!(
            "scrolled to {:.0}; bound rows {:?}",
            self.list.scroll_state().value(),
            self.list.bound_positions()
        );
    }

    fn run_frames(&mut self, millis: i64) {
        let end = self.now_millis + millis;
        while self.now_millis < end {
            self.now_millis = (self.now_millis + FRAME_MILLIS).min(end);
            self.list.advance(self.now_millis as u64 * 1_000_000);
        }
    }

    fn settle(&mut self) {
        loop {
            self.now_millis += FRAME_MILLIS;
            if !self.list.advance(self.now_millis as u64 * 1_000_000) {
                break;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let inbox = Inbox {
        subjects: vec![
            "Welcome aboard",
            "Quarterly report",
            "Lunch on Friday?",
            "Build is green",
            "Invoice #2231",
            "Re: travel plans",
            "Password reset",
            "Weekly digest",
            "Offsite agenda",
            "Your order shipped",
            "Team photo",
            "Security notice",
        ],
    };
    let subjects = inbox.subjects.clone();

    let mut list = SwipeMenuList::new(
        inbox,
        ListLayout::new(ROW_WIDTH, ROW_HEIGHT, ROW_HEIGHT * 6.0),
        SwipeConfig::default().with_easing(Easing::ViscousFluid),
    );
    list.set_header_count(1);
    list.set_menu_creator(create_menus);
    list.set_on_item_click(move |position| {
        log::info!("open message {position}: {}", subjects[position]);
    });
    list.set_on_menu_item_click(|bridge: &SwipeMenuBridge| {
        log::info!(
            "{} menu item {} on message {}",
            bridge.side(),
            bridge.item_index(),
            bridge.position()
        );
        if bridge.side() == Side::Right && bridge.item_index() == 1 {
            bridge.close_menu();
        }
    });
    list.set_on_menu_state_changed(|position, state| {
        log::info!("message {position} menu {state:?}");
    });

    let mut session = Session {
        list,
        now_millis: 0,
    };

    log::info!("-- fling message 1 open to the right menu");
    session.swipe(2, 300.0, 140.0, 8);

    log::info!("-- tap message 3: closes message 1 first, the tap is swallowed");
    let y = session.row_y(4);
    session.tap(180.0, y);

    log::info!("-- slow drag on message 3 reveals its left menu");
    session.swipe(4, 60.0, 150.0, 40);

    log::info!("-- tap its archive button");
    let y = session.row_y(4);
    session.tap(40.0, y);

    log::info!("-- the pinned message never swipes");
    session.swipe(1, 300.0, 100.0, 8);

    log::info!("-- open message 2 from code, then delete via its menu");
    session
        .list
        .smooth_open_right_menu(2)
        .context("message 2 should be on screen")?;
    session.settle();
    let y = session.row_y(3);
    session.tap(ROW_WIDTH - 40.0, y);

    log::info!("-- scroll down; off-screen rows are recycled");
    let from = session.row_y(5);
    let to = session.row_y(1);
    session.scroll(from, to);

    if let Err(err) = session.list.smooth_open_right_menu(0) {
        log::warn!("cannot open message 0 after scrolling: {err}");
    }

    log::info!("-- tap message 6");
    let y = session.row_y(7);
    session.tap(180.0, y);

    Ok(())
}
