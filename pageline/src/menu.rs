//! Shared machinery for the menu bar variants.
//!
//! Both [`crate::pill_menu::PillMenuBar`] and
//! [`crate::underline_menu::UnderlineMenuBar`] are one component behind the
//! [`MenuProvider`] trait: a horizontal strip of measured tab items plus a
//! selection indicator whose frame is a pure function of the incoming
//! [`PageTransition`] and the item geometry. The variants differ only in
//! indicator geometry policy and configuration surface.

use thiserror::Error;
use tracing::trace;

use crate::animation::Tween1D;
use crate::color::Color;
use crate::dp::Dp;
use crate::pager::PageTransition;
use crate::px::{Px, PxPosition, PxRect, PxSize};

/// Host seam for text measurement.
///
/// The host toolkit owns fonts and rasterization; the menu bars only need
/// the size a title occupies at a given font size to lay out tabs and hug
/// the indicator to labels.
pub trait TextMeasurer {
    /// Measures the rendered size of `title` at `font_size`.
    fn title_size(&self, title: &str, font_size: Dp) -> PxSize;
}

/// How tab cells share the bar's width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuDistribution {
    /// Every tab gets an equal share of the bar's width.
    #[default]
    FillEqually,
    /// Tabs hug their title width and are separated by the item spacing.
    EqualSpacing,
}

/// How content-hugging tabs are aligned within the bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuAlignment {
    /// Tabs pack from the leading edge with the configured spacing.
    #[default]
    Left,
    /// Spacing and edge insets are computed once per
    /// [`MenuProvider::set_items`] call so the tabs exactly fill the bar.
    Center,
}

/// Width policy for the underline indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum IndicatorWidthMode {
    /// Hug the selected title's width plus the indicator insets.
    #[default]
    Automatic,
    /// Divide the bar's width equally by the tab count.
    FillEqually,
    /// A fixed constant width.
    Fixed(Dp),
}

/// Edge insets in density-independent pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    /// Inset from the top edge.
    pub top: Dp,
    /// Inset from the leading edge.
    pub left: Dp,
    /// Inset from the bottom edge.
    pub bottom: Dp,
    /// Inset from the trailing edge.
    pub right: Dp,
}

impl EdgeInsets {
    /// Zero insets on every edge.
    pub const ZERO: Self = Self::new(Dp(0.0), Dp(0.0), Dp(0.0), Dp(0.0));

    /// Creates insets from the four edge values.
    pub const fn new(top: Dp, left: Dp, bottom: Dp, right: Dp) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of the leading and trailing insets.
    pub fn horizontal(&self) -> Dp {
        Dp(self.left.0 + self.right.0)
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> Dp {
        Dp(self.top.0 + self.bottom.0)
    }
}

/// One laid-out tab: its title and its measured frame in strip-content
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    /// The tab's title.
    pub title: String,
    /// The tab's frame within the (possibly scrolled) item strip.
    pub frame: PxRect,
}

/// Errors from the menu layout pass.
///
/// These never escape the public API: a failed layout degrades to "no
/// update this frame" and self-corrects once geometry exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// No tab items have been sourced yet.
    #[error("menu bar has no items to lay out")]
    NoItems,
    /// The host has not reported a bar size yet.
    #[error("menu bar size is not established yet")]
    UnsizedBar,
}

/// The capability set shared by both menu bar variants.
///
/// Geometry flows in through [`set_bar_size`](Self::set_bar_size) and
/// [`set_items`](Self::set_items); transition events arrive through
/// [`drag_to`](Self::drag_to) (live drag) and [`move_to`](Self::move_to)
/// (tap/programmatic); the host reads the results back through
/// [`indicator_frame`](Self::indicator_frame), [`item_frame`](Self::item_frame)
/// and [`strip_offset`](Self::strip_offset).
pub trait MenuProvider {
    /// The authoritative settled selection.
    fn current_index(&self) -> usize;

    /// Updates the bar's on-screen size and reflows the items.
    fn set_bar_size(&mut self, size: PxSize);

    /// (Re)initializes tab items from page titles.
    ///
    /// Runs a full layout pass and places the indicator at the current
    /// index's resting geometry with no animation.
    fn set_items(&mut self, titles: Vec<String>);

    /// Live-drag path: applies one transition event.
    ///
    /// When `index_changed` is set the selection is committed and the items
    /// reflowed before the indicator is interpolated, so both endpoint
    /// geometries are fresh. Degenerate indices pin to the nearest boundary
    /// and the percentage saturates to `[0, 1]`.
    fn drag_to(&mut self, transition: &PageTransition);

    /// Tap/programmatic path: commits the selection and animates the
    /// indicator from `from_index`'s resting geometry to `to_index`'s over a
    /// fixed short duration, or snaps instantly when `animated` is false.
    fn move_to(&mut self, from_index: usize, to_index: usize, animated: bool);

    /// Resolves a position in bar coordinates to the tab under it.
    fn hit_test(&self, position: PxPosition) -> Option<usize>;

    /// Advances the indicator animation by `dt` seconds.
    fn tick(&mut self, dt: f32);

    /// The indicator's current frame in bar coordinates.
    fn indicator_frame(&self) -> PxRect;

    /// The frame of tab `index` in bar coordinates, if laid out.
    fn item_frame(&self, index: usize) -> Option<PxRect>;

    /// The strip's current scroll offset, for hosts whose tab strip
    /// overflows the bar.
    fn strip_offset(&self) -> f32;

    /// The color the host should paint tab `index`'s title with.
    fn title_color(&self, index: usize) -> Color;
}

/// A resting indicator geometry: where the indicator sits when a tab is
/// selected and no transition is in progress.
///
/// `center_x` is in strip-content coordinates; widths and centers are
/// integer-valued so interpolation endpoints reproduce exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RestGeometry {
    pub center_x: f32,
    pub width: f32,
    pub y: Px,
    pub height: Px,
}

/// Lays out tab items along the strip.
pub(crate) fn layout_strip(
    titles: &[String],
    measurer: &dyn TextMeasurer,
    font_size: Dp,
    distribution: MenuDistribution,
    item_spacing: Dp,
    insets: EdgeInsets,
    bar: PxSize,
) -> Result<(Vec<MenuItem>, Px), LayoutError> {
    if titles.is_empty() {
        return Err(LayoutError::NoItems);
    }
    if bar.width <= Px::ZERO || bar.height <= Px::ZERO {
        return Err(LayoutError::UnsizedBar);
    }

    let mut items = Vec::with_capacity(titles.len());
    match distribution {
        MenuDistribution::FillEqually => {
            let inner = bar.width - insets.horizontal().to_px();
            let width = inner / titles.len() as i32;
            let mut x = insets.left.to_px();
            for title in titles {
                items.push(MenuItem {
                    title: title.clone(),
                    frame: PxRect::new(x, Px::ZERO, width, bar.height),
                });
                x += width;
            }
            Ok((items, bar.width))
        }
        MenuDistribution::EqualSpacing => {
            let spacing = item_spacing.to_px();
            let mut x = insets.left.to_px();
            for (index, title) in titles.iter().enumerate() {
                if index > 0 {
                    x += spacing;
                }
                let width = measurer.title_size(title, font_size).width;
                items.push(MenuItem {
                    title: title.clone(),
                    frame: PxRect::new(x, Px::ZERO, width, bar.height),
                });
                x += width;
            }
            let content_width = x + insets.right.to_px();
            Ok((items, content_width))
        }
    }
}

/// State shared by both menu bar variants: the sourced titles, the laid-out
/// item strip, the strip's scroll offset (with indicator delta-tracking),
/// and the indicator tween pair.
pub(crate) struct MenuCore {
    pub(crate) titles: Vec<String>,
    pub(crate) items: Vec<MenuItem>,
    pub(crate) content_width: Px,
    pub(crate) current_index: usize,
    pub(crate) bar_size: PxSize,
    pub(crate) measurer: Box<dyn TextMeasurer>,
    pub(crate) strip_offset: f32,
    last_strip_offset: f32,
    pub(crate) indicator_x: Tween1D,
    pub(crate) indicator_width: Tween1D,
    pub(crate) indicator_y: Px,
    pub(crate) indicator_height: Px,
}

impl MenuCore {
    pub(crate) fn new(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            titles: Vec::new(),
            items: Vec::new(),
            content_width: Px::ZERO,
            current_index: 0,
            bar_size: PxSize::ZERO,
            measurer,
            strip_offset: 0.0,
            last_strip_offset: 0.0,
            indicator_x: Tween1D::new(0.0),
            indicator_width: Tween1D::new(0.0),
            indicator_y: Px::ZERO,
            indicator_height: Px::ZERO,
        }
    }

    /// Reflows the item strip with the given policy.
    pub(crate) fn relayout(
        &mut self,
        font_size: Dp,
        distribution: MenuDistribution,
        item_spacing: Dp,
        insets: EdgeInsets,
    ) -> Result<(), LayoutError> {
        let (items, content_width) = layout_strip(
            &self.titles,
            self.measurer.as_ref(),
            font_size,
            distribution,
            item_spacing,
            insets,
            self.bar_size,
        )?;
        self.items = items;
        self.content_width = content_width;
        Ok(())
    }

    /// Commits a new settled selection.
    pub(crate) fn commit(&mut self, index: usize) {
        self.current_index = index;
    }

    /// Overflow of the strip content beyond the bar, in pixels.
    fn strip_overflow(&self) -> f32 {
        (self.content_width.to_f32() - self.bar_size.width.to_f32()).max(0.0)
    }

    /// The strip offset that centers tab `index`'s share of the overflow.
    pub(crate) fn strip_rest_offset(&self, index: usize) -> f32 {
        let overflow = self.strip_overflow();
        let count = self.items.len();
        if overflow <= 0.0 || count <= 1 {
            return 0.0;
        }
        overflow / (count - 1) as f32 * index as f32
    }

    /// Interpolates the strip offset between the transition's endpoints.
    pub(crate) fn sync_strip(&mut self, from: usize, to: usize, percentage: f32) {
        let overflow = self.strip_overflow();
        if overflow <= 0.0 || self.items.len() <= 1 {
            return;
        }
        let from_value = self.strip_rest_offset(from);
        let to_value = self.strip_rest_offset(to);
        let value = (to_value - from_value) * percentage + from_value;
        self.set_strip_offset(value);
    }

    /// Scrolls the strip so tab `index` takes its resting share.
    pub(crate) fn scroll_strip_to_rest(&mut self, index: usize) {
        let offset = self.strip_rest_offset(index);
        self.set_strip_offset(offset);
    }

    /// Moves the strip to `offset`, shifting the indicator by exactly the
    /// negative of the incremental delta so it stays glued to its tab.
    pub(crate) fn set_strip_offset(&mut self, offset: f32) {
        let delta = offset - self.last_strip_offset;
        self.indicator_x.shift(-delta);
        self.strip_offset = offset;
        self.last_strip_offset = offset;
    }

    /// Resets the strip scroll without touching the indicator.
    pub(crate) fn reset_strip(&mut self) {
        self.strip_offset = 0.0;
        self.last_strip_offset = 0.0;
    }

    /// Places the indicator at a resting geometry with no animation.
    pub(crate) fn place_indicator(&mut self, rest: RestGeometry) {
        self.indicator_x.snap_to(rest.center_x - self.strip_offset);
        self.indicator_width.snap_to(rest.width);
        self.indicator_y = rest.y;
        self.indicator_height = rest.height;
    }

    /// Starts (or snaps) the indicator animation between two resting
    /// geometries.
    pub(crate) fn run_indicator(
        &mut self,
        from: RestGeometry,
        to: RestGeometry,
        animated: bool,
        duration: f32,
    ) {
        self.place_indicator(from);
        self.indicator_y = to.y;
        self.indicator_height = to.height;
        if animated {
            self.indicator_x
                .animate_to(to.center_x - self.strip_offset, duration);
            self.indicator_width.animate_to(to.width, duration);
        } else {
            self.indicator_x.snap_to(to.center_x - self.strip_offset);
            self.indicator_width.snap_to(to.width);
        }
    }

    /// Sets the indicator frame from an interpolated center and width, in
    /// strip-content coordinates.
    pub(crate) fn scrub_indicator(&mut self, center_x: f32, width: f32, rest: RestGeometry) {
        self.indicator_x.snap_to(center_x - self.strip_offset);
        self.indicator_width.snap_to(width);
        self.indicator_y = rest.y;
        self.indicator_height = rest.height;
    }

    pub(crate) fn tick(&mut self, dt: f32) {
        self.indicator_x.tick(dt);
        self.indicator_width.tick(dt);
    }

    /// The indicator's rendered frame in bar coordinates.
    pub(crate) fn indicator_frame(&self) -> PxRect {
        let width = self.indicator_width.value().max(0.0);
        let x = self.indicator_x.value() - width / 2.0;
        PxRect::new(
            Px::saturating_from_f32(x),
            self.indicator_y,
            Px::saturating_from_f32(width),
            self.indicator_height,
        )
    }

    /// Tab frame in bar coordinates, if laid out.
    pub(crate) fn item_frame_in_bar(&self, index: usize) -> Option<PxRect> {
        let item = self.items.get(index)?;
        let mut frame = item.frame;
        frame.x -= Px::saturating_from_f32(self.strip_offset);
        Some(frame)
    }

    /// Resolves a bar-coordinate position to the tab under it.
    pub(crate) fn hit_test(&self, position: PxPosition) -> Option<usize> {
        let content = position.offset(Px::saturating_from_f32(self.strip_offset), Px::ZERO);
        let index = self.items.iter().position(|item| item.frame.contains(content));
        if index.is_none() {
            trace!(x = position.x.raw(), y = position.y.raw(), "menu: tap missed all items");
        }
        index
    }

    /// Clamps a transition's endpoints into the laid-out item range.
    ///
    /// Degenerate boundary indices pin to the first/last tab; the
    /// percentage saturates to `[0, 1]`.
    pub(crate) fn clamp_transition(&self, transition: &PageTransition) -> Option<(usize, usize, f32)> {
        if self.items.is_empty() {
            return None;
        }
        let last = (self.items.len() - 1) as i32;
        let from = transition.from_index.clamp(0, last) as usize;
        let to = transition.to_index.clamp(0, last) as usize;
        let percentage = transition.percentage.clamp(0.0, 1.0);
        Some((from, to, percentage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TenPerChar;

    impl TextMeasurer for TenPerChar {
        fn title_size(&self, title: &str, _font_size: Dp) -> PxSize {
            PxSize::new(Px(title.chars().count() as i32 * 10), Px(20))
        }
    }

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_fill_equally() {
        let items = layout_strip(
            &titles(&["aa", "bb", "cc"]),
            &TenPerChar,
            Dp(14.0),
            MenuDistribution::FillEqually,
            Dp(0.0),
            EdgeInsets::ZERO,
            PxSize::new(Px(300), Px(48)),
        )
        .expect("layout");
        let (items, content_width) = items;
        assert_eq!(content_width, Px(300));
        assert_eq!(items[0].frame, PxRect::new(Px(0), Px(0), Px(100), Px(48)));
        assert_eq!(items[1].frame.x, Px(100));
        assert_eq!(items[2].frame.x, Px(200));
    }

    #[test]
    fn test_layout_equal_spacing() {
        let (items, content_width) = layout_strip(
            &titles(&["aaaa", "bb"]),
            &TenPerChar,
            Dp(14.0),
            MenuDistribution::EqualSpacing,
            Dp(32.0),
            EdgeInsets::new(Dp(0.0), Dp(20.0), Dp(0.0), Dp(20.0)),
            PxSize::new(Px(300), Px(48)),
        )
        .expect("layout");
        assert_eq!(items[0].frame.x, Px(20));
        assert_eq!(items[0].frame.width, Px(40));
        assert_eq!(items[1].frame.x, Px(20 + 40 + 32));
        assert_eq!(items[1].frame.width, Px(20));
        assert_eq!(content_width, Px(20 + 40 + 32 + 20 + 20));
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            layout_strip(
                &[],
                &TenPerChar,
                Dp(14.0),
                MenuDistribution::FillEqually,
                Dp(0.0),
                EdgeInsets::ZERO,
                PxSize::new(Px(300), Px(48)),
            ),
            Err(LayoutError::NoItems)
        );
        assert_eq!(
            layout_strip(
                &titles(&["aa"]),
                &TenPerChar,
                Dp(14.0),
                MenuDistribution::FillEqually,
                Dp(0.0),
                EdgeInsets::ZERO,
                PxSize::ZERO,
            ),
            Err(LayoutError::UnsizedBar)
        );
    }

    fn overflowing_core() -> MenuCore {
        let mut core = MenuCore::new(Box::new(TenPerChar));
        core.titles = titles(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
        core.bar_size = PxSize::new(Px(200), Px(48));
        core.relayout(
            Dp(14.0),
            MenuDistribution::EqualSpacing,
            Dp(0.0),
            EdgeInsets::ZERO,
        )
        .expect("layout");
        core
    }

    #[test]
    fn test_strip_delta_tracking() {
        let mut core = overflowing_core();
        // 3 * 100 wide content in a 200 wide bar: 100 overflow.
        assert_eq!(core.content_width, Px(300));
        core.place_indicator(RestGeometry {
            center_x: 50.0,
            width: 80.0,
            y: Px(40),
            height: Px(8),
        });
        let before = core.indicator_frame();

        core.set_strip_offset(30.0);
        let after = core.indicator_frame();
        assert_eq!(after.x, before.x - Px(30));
        assert_eq!(after.width, before.width);
    }

    #[test]
    fn test_strip_rest_offsets_split_overflow() {
        let core = overflowing_core();
        assert_eq!(core.strip_rest_offset(0), 0.0);
        assert_eq!(core.strip_rest_offset(1), 50.0);
        assert_eq!(core.strip_rest_offset(2), 100.0);
    }

    #[test]
    fn test_sync_strip_interpolates() {
        let mut core = overflowing_core();
        core.sync_strip(0, 1, 0.5);
        assert_eq!(core.strip_offset, 25.0);
        core.sync_strip(1, 2, 1.0);
        assert_eq!(core.strip_offset, 100.0);
    }

    #[test]
    fn test_hit_test_accounts_for_strip_scroll() {
        let mut core = overflowing_core();
        // Second item spans content x 100..200.
        assert_eq!(core.hit_test(PxPosition::new(Px(150), Px(10))), Some(1));
        core.set_strip_offset(100.0);
        assert_eq!(core.hit_test(PxPosition::new(Px(150), Px(10))), Some(2));
        assert_eq!(core.hit_test(PxPosition::new(Px(150), Px(60))), None);
    }

    #[test]
    fn test_clamp_transition_pins_boundaries() {
        let core = overflowing_core();
        let event = PageTransition {
            from_index: 0,
            to_index: -1,
            percentage: 1.6,
            index_changed: false,
        };
        assert_eq!(core.clamp_transition(&event), Some((0, 0, 1.0)));
    }
}
