//! Mediator wiring a pager to its menu bar.
//!
//! ## Usage
//!
//! Neither the pager nor a menu bar knows the other's concrete type; the
//! coordinator forwards transition events one way and tap-originated scroll
//! commands the other, and fans out optional will/did change-index
//! notifications.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::menu::MenuProvider;
use crate::pager::{PagerController, ScrollCommand};
use crate::px::PxPosition;

/// Optional external observer of index changes.
///
/// Absence of a listener is a no-op; both hooks default to doing nothing.
pub trait PagerListener {
    /// Called before a tap-originated move starts animating.
    fn will_change_index(&mut self, _index: usize) {}

    /// Called after the settled index changed — once per tap-originated
    /// move, and once per drag that crosses a page boundary.
    fn did_change_index(&mut self, _index: usize) {}
}

/// Wires a [`PagerController`] to a [`MenuProvider`].
///
/// Holds weak references to both endpoints so the coordinator can be stored
/// on the screen it decorates without creating a retain cycle; entry points
/// on a dead endpoint degrade to no-ops.
pub struct PagerCoordinator {
    pager: Weak<RwLock<PagerController>>,
    menu: Weak<RwLock<dyn MenuProvider>>,
    listener: Option<Box<dyn PagerListener>>,
}

impl PagerCoordinator {
    /// Creates a coordinator between the given pager and menu bar.
    pub fn new(
        pager: &Arc<RwLock<PagerController>>,
        menu: &Arc<RwLock<dyn MenuProvider>>,
    ) -> Self {
        Self {
            pager: Arc::downgrade(pager),
            menu: Arc::downgrade(menu),
            listener: None,
        }
    }

    /// Installs the external index-change listener.
    pub fn set_listener(&mut self, listener: Box<dyn PagerListener>) {
        self.listener = Some(listener);
    }

    /// Sources menu items from the pages' title capability.
    ///
    /// Call once after both endpoints have their geometry.
    pub fn prepare(&self) {
        let (Some(pager), Some(menu)) = (self.pager.upgrade(), self.menu.upgrade()) else {
            return;
        };
        let titles = pager.read().menu_titles();
        menu.write().set_items(titles);
    }

    /// Forwards one host scroll-offset sample to the pager and the derived
    /// transition event on to the menu bar.
    ///
    /// When the settled index changed, the external listener's
    /// `did_change_index` fires after the event is forwarded.
    pub fn on_scroll(&mut self, offset_x: f32) {
        let Some(pager) = self.pager.upgrade() else {
            return;
        };
        let event = pager.write().on_scroll(offset_x);
        let Some(event) = event else {
            return;
        };
        if let Some(menu) = self.menu.upgrade() {
            menu.write().drag_to(&event);
        }
        if event.index_changed {
            let settled = pager.read().current_index();
            if let Some(listener) = self.listener.as_mut() {
                listener.did_change_index(settled);
            }
        }
    }

    /// Forwards the host's end-of-scroll signal to the pager.
    pub fn on_scroll_animation_finished(&self) {
        if let Some(pager) = self.pager.upgrade() {
            pager.write().scroll_animation_finished();
        }
    }

    /// Resolves a tap on the menu bar and, when it lands on a tab other
    /// than the current one, performs the full move.
    ///
    /// Ordering: `will_change_index` fires first, then the menu animation
    /// starts and the pager's scroll command is issued (exactly once), then
    /// `did_change_index` fires. Returns the scroll command for the host.
    pub fn on_menu_tap(&mut self, position: PxPosition) -> Option<ScrollCommand> {
        let menu = self.menu.upgrade()?;
        let index = menu.read().hit_test(position)?;
        let current = menu.read().current_index();
        if index == current {
            return None;
        }
        self.change_index(current, index)
    }

    /// Programmatically selects a tab, with the same ordering guarantees as
    /// a tap. No-op when `index` is already current.
    pub fn select(&mut self, index: usize) -> Option<ScrollCommand> {
        let menu = self.menu.upgrade()?;
        let current = menu.read().current_index();
        if index == current {
            return None;
        }
        self.change_index(current, index)
    }

    /// Advances the menu bar's indicator animation.
    pub fn tick(&mut self, dt: f32) {
        if let Some(menu) = self.menu.upgrade() {
            menu.write().tick(dt);
        }
    }

    fn change_index(&mut self, from: usize, to: usize) -> Option<ScrollCommand> {
        let menu = self.menu.upgrade()?;
        let pager = self.pager.upgrade()?;
        if let Some(listener) = self.listener.as_mut() {
            listener.will_change_index(to);
        }
        menu.write().move_to(from, to, true);
        let command = pager.write().move_to(to, true);
        if let Some(listener) = self.listener.as_mut() {
            listener.did_change_index(to);
        }
        command
    }
}
