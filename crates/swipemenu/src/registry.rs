//! Bound panels and the list-wide swipe bookkeeping.
//!
//! The registry owns every bound row's [`SwipePanel`], keyed by raw list
//! position, along with the single "open panel" reference the coordinator
//! uses to enforce one open menu at a time.

use crate::panel::{Openable, SwipePanel};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Identity of one bound panel. A row that is recycled and bound again gets
/// a new id, which is how stale open references are detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelId(u64);

#[derive(Debug)]
struct BoundPanel {
    id: PanelId,
    panel: SwipePanel,
}

#[derive(Debug)]
pub struct PanelRegistry {
    panels: IndexMap<usize, BoundPanel>,
    open: Option<(usize, PanelId)>,
    /// Content indices whose swipe menu is switched off.
    disabled_positions: FxHashSet<usize>,
    swipe_menu_enabled: bool,
    next_id: u64,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            panels: IndexMap::new(),
            open: None,
            disabled_positions: FxHashSet::default(),
            swipe_menu_enabled: true,
            next_id: 1,
        }
    }

    pub fn bind(&mut self, raw: usize, panel: SwipePanel) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.insert(raw, BoundPanel { id, panel });
        id
    }

    /// Destroys the panel at `raw`. An open reference to it is left in
    /// place and dropped the next time it is resolved.
    pub fn recycle(&mut self, raw: usize) -> Option<SwipePanel> {
        self.panels.shift_remove(&raw).map(|bound| bound.panel)
    }

    pub fn recycle_all(&mut self) {
        self.panels.clear();
    }

    pub fn is_bound(&self, raw: usize) -> bool {
        self.panels.contains_key(&raw)
    }

    pub fn id(&self, raw: usize) -> Option<PanelId> {
        self.panels.get(&raw).map(|bound| bound.id)
    }

    pub fn get(&self, raw: usize) -> Option<&SwipePanel> {
        self.panels.get(&raw).map(|bound| &bound.panel)
    }

    pub fn get_mut(&mut self, raw: usize) -> Option<&mut SwipePanel> {
        self.panels.get_mut(&raw).map(|bound| &mut bound.panel)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.panels.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &SwipePanel)> + '_ {
        self.panels.iter().map(|(raw, bound)| (*raw, &bound.panel))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut SwipePanel)> + '_ {
        self.panels
            .iter_mut()
            .map(|(raw, bound)| (*raw, &mut bound.panel))
    }

    /// Records the panel at `raw` as the one that may be open.
    pub fn set_open(&mut self, raw: usize) {
        self.open = self.id(raw).map(|id| (raw, id));
    }

    pub fn clear_open(&mut self) {
        self.open = None;
    }

    /// Raw position of the open-panel reference, dropping it first if the
    /// row it pointed at has since been recycled or rebound.
    pub fn open_position(&mut self) -> Option<usize> {
        let (raw, id) = self.open?;
        if self.id(raw) == Some(id) {
            return Some(raw);
        }
        log::debug!("dropping stale open-panel reference to row {raw}");
        self.open = None;
        None
    }

    /// Puts every panel other than `keep` back at offset 0 immediately.
    pub fn snap_closed_except(&mut self, keep: Option<usize>) -> SmallVec<[usize; 2]> {
        let mut snapped = SmallVec::new();
        for (raw, panel) in self.iter_mut() {
            if Some(raw) != keep && (panel.offset() != 0 || panel.is_animating()) {
                panel.snap_closed();
                snapped.push(raw);
            }
        }
        snapped
    }

    /// Starts the close animation on every panel other than `keep` that is
    /// showing a menu.
    pub fn close_except(&mut self, keep: Option<usize>) -> SmallVec<[usize; 2]> {
        let mut closing = SmallVec::new();
        for (raw, panel) in self.iter_mut() {
            let heading_open = panel.animation_target().is_some_and(|target| target != 0);
            if Some(raw) != keep && (panel.offset() != 0 || heading_open) {
                panel.smooth_close_menu();
                closing.push(raw);
            }
        }
        closing
    }

    /// Steps every panel's animation. Returns `true` while any is running.
    pub fn advance_all(&mut self, frame_time_nanos: u64) -> bool {
        let mut animating = false;
        for (_, panel) in self.iter_mut() {
            panel.advance(frame_time_nanos);
            animating |= panel.is_animating();
        }
        animating
    }

    pub fn is_swipe_menu_enabled(&self) -> bool {
        self.swipe_menu_enabled
    }

    pub fn set_swipe_menu_enabled(&mut self, enabled: bool) {
        self.swipe_menu_enabled = enabled;
    }

    pub fn is_position_enabled(&self, position: usize) -> bool {
        !self.disabled_positions.contains(&position)
    }

    pub fn set_position_enabled(&mut self, position: usize, enabled: bool) {
        if enabled {
            self.disabled_positions.remove(&position);
        } else {
            self.disabled_positions.insert(position);
        }
    }
}
