//! Page container for swipeable screens.
//!
//! ## Usage
//!
//! Feed the host scroll view's offset samples into [`PagerController`] and
//! forward the produced [`PageTransition`] events to a menu bar (usually
//! through [`crate::coordinator::PagerCoordinator`]).

use std::ops::Range;

use derive_setters::Setters;
use tracing::debug;

use crate::px::Px;

/// An opaque child screen hosted by the pager.
///
/// All capabilities are optional: a page that exposes no menu title is
/// simply skipped when tab items are sourced, and the lifecycle hooks
/// default to no-ops.
pub trait Page {
    /// The title shown in the menu bar for this page, if any.
    fn menu_title(&self) -> Option<String> {
        None
    }

    /// Called when the page's slot enters the keep-alive window around the
    /// viewport and the page should join the host view hierarchy.
    fn attached(&mut self) {}

    /// Called when the page's slot leaves the keep-alive window and the page
    /// should be removed from the host view hierarchy.
    fn detached(&mut self) {}
}

/// Instantaneous swipe direction, derived from consecutive offset samples.
///
/// This is a direction, not a persisted state: it is recomputed on every
/// sample from the sign of the offset delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content moving left; the user is heading toward a higher page index.
    Left,
    /// Content moving right; the user is heading toward a lower page index.
    Right,
    /// No movement between the last two samples.
    None,
}

/// One normalized transition event, the protocol between the page container
/// and a menu bar.
///
/// `from_index` and `to_index` are adjacent or equal, except at the two open
/// boundaries where `to_index` may be `-1` (dragged past the first page) or
/// `N` (dragged past the last page); consumers pin the indicator to the
/// boundary in that case. `percentage` is the interpolation fraction from
/// `from_index`'s resting geometry toward `to_index`'s and can transiently
/// leave `[0, 1]` during boundary overscroll; consumers saturate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageTransition {
    /// Index whose resting geometry the interpolation starts from.
    pub from_index: i32,
    /// Index whose resting geometry the interpolation heads toward.
    pub to_index: i32,
    /// Interpolation fraction from `from_index` toward `to_index`.
    pub percentage: f32,
    /// True exactly once per settled-page change; gates per-page geometry
    /// re-derivation in the menu bar.
    pub index_changed: bool,
}

/// A scroll instruction for the host scroll primitive, produced by
/// [`PagerController::move_to`].
///
/// After the host has applied the command and the scroll has settled —
/// whether it was animated or instant — it must call
/// [`PagerController::scroll_animation_finished`] so transition events
/// resume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCommand {
    /// Target content offset (the left edge of the destination slot).
    pub offset_x: f32,
    /// Whether the host should animate to the target offset.
    pub animated: bool,
}

/// Configuration arguments for [`PagerController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Setters)]
pub struct PagerArgs {
    /// Number of extra pages kept attached on either side of the pages
    /// adjacent to the viewport.
    pub beyond_viewport_page_count: usize,
}

impl Default for PagerArgs {
    fn default() -> Self {
        Self {
            beyond_viewport_page_count: 0,
        }
    }
}

/// Tracks the continuous scroll offset of a horizontally-paginated container
/// and derives discrete page transitions from it.
///
/// The controller owns no views: the host feeds geometry
/// ([`set_viewport_width`](Self::set_viewport_width)) and offset samples
/// ([`on_scroll`](Self::on_scroll)) in, and receives [`ScrollCommand`]s and
/// [`PageTransition`] events back.
pub struct PagerController {
    pages: Vec<Box<dyn Page>>,
    // Settled page implied by nearest-slot rounding of the last sample. Kept
    // signed: boundary overscroll legitimately pushes it one step outside
    // [0, N-1] until the scroll view rubber-bands back.
    current_index: i32,
    page_width: f32,
    last_offset_x: f32,
    programmatic_scroll: bool,
    beyond_viewport_page_count: usize,
    attached: Range<usize>,
}

impl PagerController {
    /// Creates a controller with no pages.
    pub fn new(args: PagerArgs) -> Self {
        Self {
            pages: Vec::new(),
            current_index: 0,
            page_width: 0.0,
            last_offset_x: 0.0,
            programmatic_scroll: false,
            beyond_viewport_page_count: args.beyond_viewport_page_count,
            attached: 0..0,
        }
    }

    /// Replaces the page set and resets the selection to the first page.
    ///
    /// There is no partial-update path; the set is fixed for the session.
    pub fn set_pages(&mut self, pages: Vec<Box<dyn Page>>) {
        for index in self.attached.clone() {
            if let Some(page) = self.pages.get_mut(index) {
                page.detached();
            }
        }
        self.attached = 0..0;
        self.pages = pages;
        self.current_index = 0;
        self.last_offset_x = 0.0;
        self.programmatic_scroll = false;
        self.sync_attachments();
    }

    /// Updates the container's visible width. Each page occupies exactly one
    /// slot of this width, laid out contiguously left to right.
    pub fn set_viewport_width(&mut self, width: Px) {
        self.page_width = width.to_f32().max(0.0);
    }

    /// Number of pages in the set.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The settled page, clamped into range.
    ///
    /// This is the authoritative value [`move_to`](Self::move_to) compares
    /// against.
    pub fn current_index(&self) -> usize {
        if self.pages.is_empty() {
            return 0;
        }
        self.current_index.clamp(0, self.pages.len() as i32 - 1) as usize
    }

    /// Range of page indices currently attached to the host hierarchy.
    pub fn attached_pages(&self) -> Range<usize> {
        self.attached.clone()
    }

    /// Menu titles sourced from the pages, in page order.
    ///
    /// Pages without the title capability are skipped, so the tab count may
    /// be smaller than the page count.
    pub fn menu_titles(&self) -> Vec<String> {
        self.pages.iter().filter_map(|page| page.menu_title()).collect()
    }

    /// Requests a programmatic move to `index`.
    ///
    /// Returns the scroll command for the host, or `None` when the request
    /// is a no-op (already on `index`, or nothing to scroll). While the
    /// commanded scroll settles, outgoing transition events are suppressed
    /// so the move does not feed back into the menu bar as if the user
    /// dragged.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range; that is a caller contract
    /// violation, not a recoverable condition.
    pub fn move_to(&mut self, index: usize, animated: bool) -> Option<ScrollCommand> {
        let count = self.pages.len();
        assert!(index < count, "page index {index} out of range for {count} pages");
        if count <= 1 || index == self.current_index() {
            return None;
        }
        self.programmatic_scroll = true;
        debug!(index, animated, "pager: programmatic move");
        Some(ScrollCommand {
            offset_x: index as f32 * self.page_width,
            animated,
        })
    }

    /// Clears the programmatic-scroll suppression window.
    ///
    /// The host calls this once a commanded scroll has settled, whether it
    /// was animated or instant.
    pub fn scroll_animation_finished(&mut self) {
        self.programmatic_scroll = false;
    }

    /// Consumes one scroll-offset sample and derives the transition event.
    ///
    /// Returns `None` while a programmatic scroll is in flight, or when
    /// there is nothing to transition to (fewer than two pages, or no
    /// viewport geometry yet). The settled index, swipe direction and page
    /// attachment window are updated regardless.
    pub fn on_scroll(&mut self, offset_x: f32) -> Option<PageTransition> {
        if self.pages.len() <= 1 || self.page_width <= f32::EPSILON {
            self.last_offset_x = offset_x;
            return None;
        }
        let count = self.pages.len() as i32;

        let direction = if offset_x > self.last_offset_x {
            SwipeDirection::Left
        } else if offset_x < self.last_offset_x {
            SwipeDirection::Right
        } else {
            SwipeDirection::None
        };

        let old_index = self.current_index;
        let new_index = (offset_x / self.page_width).round() as i32;
        self.current_index = new_index;

        // Progress within the current slot, mirrored on right swipes so the
        // percentage always measures progress from `from` toward `to`.
        let raw = (offset_x % self.page_width) / self.page_width;
        let scroll_percentage = if direction == SwipeDirection::Right {
            1.0 - raw
        } else {
            raw
        };

        let mut from_index = new_index;
        let mut to_index = new_index;
        let mut percentage = scroll_percentage;

        match direction {
            SwipeDirection::Left => {
                if new_index > count - 1 {
                    // Pulled past the last page; pin to the open boundary.
                    from_index = count - 1;
                    to_index = count;
                } else {
                    // The >= here pairs with round-half-away-from-zero above:
                    // at exactly 0.5 the settled index is already the higher
                    // slot, so the transition restarts from its predecessor.
                    if scroll_percentage >= 0.5 {
                        from_index = (to_index - 1).max(0);
                    } else {
                        to_index = from_index + 1;
                    }
                    if to_index == count {
                        percentage += 1.0;
                        from_index -= 1;
                        to_index -= 1;
                    }
                }
            }
            SwipeDirection::Right => {
                if new_index < 0 {
                    from_index = 0;
                    to_index = -1;
                } else {
                    // Strict > is the mirror of the left-swipe >=: at exactly
                    // 0.5 the settled index has not dropped yet.
                    if scroll_percentage > 0.5 {
                        from_index = (to_index + 1).min(count);
                    } else {
                        to_index = from_index - 1;
                    }
                    if from_index == count {
                        percentage -= 1.0;
                        from_index -= 1;
                        to_index -= 1;
                    }
                }
            }
            SwipeDirection::None => {}
        }

        self.sync_attachments();
        self.last_offset_x = offset_x;

        if self.programmatic_scroll {
            return None;
        }
        let index_changed = new_index != old_index;
        if index_changed {
            debug!(index = self.current_index(), "pager: settled page changed");
        }
        Some(PageTransition {
            from_index,
            to_index,
            percentage,
            index_changed,
        })
    }

    fn sync_attachments(&mut self) {
        let next = compute_attached_range(
            self.current_index(),
            self.pages.len(),
            self.beyond_viewport_page_count,
        );
        if next == self.attached {
            return;
        }
        let prev = self.attached.clone();
        for index in prev.clone() {
            if !next.contains(&index) {
                if let Some(page) = self.pages.get_mut(index) {
                    page.detached();
                }
            }
        }
        for index in next.clone() {
            if !prev.contains(&index) {
                if let Some(page) = self.pages.get_mut(index) {
                    page.attached();
                }
            }
        }
        self.attached = next;
    }
}

impl Default for PagerController {
    fn default() -> Self {
        Self::new(PagerArgs::default())
    }
}

fn compute_attached_range(current_page: usize, page_count: usize, beyond: usize) -> Range<usize> {
    if page_count == 0 {
        return 0..0;
    }
    let extra = beyond.saturating_add(1);
    let start = current_page.saturating_sub(extra);
    let end = (current_page + extra + 1).min(page_count);
    start..end
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rstest::rstest;

    use super::*;

    struct TestPage {
        title: Option<String>,
        log: Rc<RefCell<Vec<String>>>,
        id: usize,
    }

    impl Page for TestPage {
        fn menu_title(&self) -> Option<String> {
            self.title.clone()
        }

        fn attached(&mut self) {
            self.log.borrow_mut().push(format!("attach {}", self.id));
        }

        fn detached(&mut self) {
            self.log.borrow_mut().push(format!("detach {}", self.id));
        }
    }

    fn pager_with(count: usize) -> (PagerController, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pages: Vec<Box<dyn Page>> = (0..count)
            .map(|id| {
                Box::new(TestPage {
                    title: Some(format!("Page {id}")),
                    log: log.clone(),
                    id,
                }) as Box<dyn Page>
            })
            .collect();
        let mut pager = PagerController::new(PagerArgs::default());
        pager.set_pages(pages);
        pager.set_viewport_width(Px(320));
        (pager, log)
    }

    fn transition(pager: &mut PagerController, offset: f32) -> PageTransition {
        pager
            .on_scroll(offset)
            .expect("expected a transition event")
    }

    #[test]
    fn test_half_drag_between_first_pages() {
        let (mut pager, _) = pager_with(5);
        let event = transition(&mut pager, 160.0);
        assert_eq!(event.from_index, 0);
        assert_eq!(event.to_index, 1);
        assert_eq!(event.percentage, 0.5);
        // Nearest-slot rounding promotes the settled index at the midpoint,
        // which is the one moment the flag fires.
        assert!(event.index_changed);
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn test_index_changes_once_per_crossing() {
        let (mut pager, _) = pager_with(5);
        assert!(transition(&mut pager, 100.0).index_changed == false);
        assert!(transition(&mut pager, 160.0).index_changed);
        assert!(!transition(&mut pager, 200.0).index_changed);
        assert!(!transition(&mut pager, 320.0).index_changed);
    }

    #[test]
    fn test_settled_sample_collapses_to_current() {
        let (mut pager, _) = pager_with(5);
        transition(&mut pager, 160.0);
        transition(&mut pager, 320.0);
        // Same offset again: direction None, at rest.
        let event = transition(&mut pager, 320.0);
        assert_eq!(event.from_index, 1);
        assert_eq!(event.to_index, 1);
        assert!(!event.index_changed);
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn test_exact_boundary_percentage_is_zero_or_one() {
        let (mut pager, _) = pager_with(5);
        // Leftward drag landing exactly on the slot edge.
        transition(&mut pager, 100.0);
        let event = transition(&mut pager, 320.0);
        assert_eq!(event.percentage, 0.0);

        // Rightward drag back to the same edge.
        transition(&mut pager, 400.0);
        let event = transition(&mut pager, 320.0);
        assert_eq!(event.percentage, 1.0);
        assert_eq!((event.from_index, event.to_index), (2, 1));
    }

    #[rstest]
    #[case(40.0, 0, 1)]
    #[case(100.0, 0, 1)]
    #[case(159.0, 0, 1)]
    #[case(160.0, 0, 1)]
    #[case(161.0, 0, 1)]
    #[case(300.0, 0, 1)]
    #[case(420.0, 1, 2)]
    fn test_leftward_pairs_are_adjacent(
        #[case] offset: f32,
        #[case] from: i32,
        #[case] to: i32,
    ) {
        let (mut pager, _) = pager_with(5);
        let event = transition(&mut pager, offset);
        assert_eq!((event.from_index, event.to_index), (from, to));
        assert!((event.to_index - event.from_index).abs() <= 1);
    }

    #[rstest]
    #[case(300.0, 1, 0)]
    #[case(161.0, 1, 0)]
    #[case(160.0, 1, 0)]
    #[case(159.0, 1, 0)]
    #[case(40.0, 1, 0)]
    fn test_rightward_pairs_are_adjacent(
        #[case] offset: f32,
        #[case] from: i32,
        #[case] to: i32,
    ) {
        let (mut pager, _) = pager_with(5);
        // Drag out to page 1 first, then sample on the way back.
        transition(&mut pager, 160.0);
        transition(&mut pager, 320.0);
        let event = transition(&mut pager, offset);
        assert_eq!((event.from_index, event.to_index), (from, to));
    }

    #[test]
    fn test_continuity_of_indicator_position() {
        // The interpolated indicator position from + (to - from) * pct must
        // track the finger across the whole content width.
        let (mut pager, _) = pager_with(5);
        for step in 1..=128 {
            let offset = step as f32 * 10.0;
            let event = transition(&mut pager, offset);
            let position = event.from_index as f32
                + (event.to_index - event.from_index) as f32 * event.percentage;
            assert!(
                (position - offset / 320.0).abs() < 1e-4,
                "offset {offset}: indicator at {position}"
            );
        }
    }

    #[test]
    fn test_overscroll_past_last_page() {
        let (mut pager, _) = pager_with(5);
        transition(&mut pager, 1280.0);
        let event = transition(&mut pager, 1450.0);
        assert_eq!(event.from_index, 4);
        assert_eq!(event.to_index, 5);
        assert_eq!(pager.current_index(), 4);
    }

    #[test]
    fn test_overscroll_past_first_page() {
        let (mut pager, _) = pager_with(5);
        transition(&mut pager, 100.0);
        let event = transition(&mut pager, -200.0);
        assert_eq!(event.from_index, 0);
        assert_eq!(event.to_index, -1);
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn test_wrap_correction_near_last_page() {
        let (mut pager, _) = pager_with(5);
        transition(&mut pager, 1280.0);
        // Just past the final slot edge but not past the virtual boundary:
        // the derivation reinterprets as 100%+ of the previous transition.
        let event = transition(&mut pager, 1400.0);
        assert_eq!(event.from_index, 3);
        assert_eq!(event.to_index, 4);
        assert!(event.percentage > 1.0);
    }

    #[test]
    fn test_move_to_current_is_noop() {
        let (mut pager, _) = pager_with(5);
        assert_eq!(pager.move_to(0, true), None);
        assert_eq!(pager.move_to(0, false), None);
        // Still emitting events — no suppression window was opened.
        assert!(pager.on_scroll(10.0).is_some());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_move_to_out_of_range_panics() {
        let (mut pager, _) = pager_with(5);
        let _ = pager.move_to(5, true);
    }

    #[test]
    fn test_programmatic_move_suppresses_events() {
        let (mut pager, _) = pager_with(5);
        let command = pager.move_to(3, true).expect("expected a scroll command");
        assert_eq!(command.offset_x, 960.0);
        assert!(command.animated);

        // Samples during the commanded scroll update state but stay silent.
        assert_eq!(pager.on_scroll(400.0), None);
        assert_eq!(pager.on_scroll(960.0), None);
        assert_eq!(pager.current_index(), 3);

        pager.scroll_animation_finished();
        assert!(pager.on_scroll(960.0).is_some());
    }

    #[test]
    fn test_single_page_skips_everything() {
        let (mut pager, _) = pager_with(1);
        assert_eq!(pager.on_scroll(50.0), None);
        assert_eq!(pager.move_to(0, true), None);
    }

    #[test]
    fn test_menu_titles_skip_untitled_pages() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pages: Vec<Box<dyn Page>> = vec![
            Box::new(TestPage {
                title: Some("A".into()),
                log: log.clone(),
                id: 0,
            }),
            Box::new(TestPage {
                title: None,
                log: log.clone(),
                id: 1,
            }),
            Box::new(TestPage {
                title: Some("C".into()),
                log: log.clone(),
                id: 2,
            }),
        ];
        let mut pager = PagerController::default();
        pager.set_pages(pages);
        assert_eq!(pager.menu_titles(), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_attachment_window_follows_current_page() {
        let (mut pager, log) = pager_with(5);
        assert_eq!(pager.attached_pages(), 0..2);
        assert_eq!(*log.borrow(), vec!["attach 0", "attach 1"]);

        log.borrow_mut().clear();
        transition(&mut pager, 160.0);
        transition(&mut pager, 320.0);
        // Settled on page 1: window widens to 0..3.
        assert_eq!(pager.attached_pages(), 0..3);
        assert_eq!(*log.borrow(), vec!["attach 2"]);

        log.borrow_mut().clear();
        transition(&mut pager, 480.0);
        transition(&mut pager, 640.0);
        // Settled on page 2: page 0 scrolled fully away.
        assert_eq!(pager.attached_pages(), 1..4);
        assert_eq!(*log.borrow(), vec!["detach 0", "attach 3"]);
    }

    #[test]
    fn test_set_pages_detaches_previous_set() {
        let (mut pager, log) = pager_with(3);
        log.borrow_mut().clear();
        pager.set_pages(Vec::new());
        assert_eq!(*log.borrow(), vec!["detach 0", "detach 1"]);
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.current_index(), 0);
    }
}
