//! Menu bar with an underline indicator pinned to the bottom edge.
//!
//! ## Usage
//!
//! A thin bar slides beneath the selected tab's label. Width policy,
//! tab distribution and alignment are configurable independently; see
//! [`UnderlineMenuArgs`].

use derive_setters::Setters;
use tracing::trace;

use crate::animation::lerp;
use crate::color::Color;
use crate::dp::Dp;
use crate::menu::{
    EdgeInsets, IndicatorWidthMode, LayoutError, MenuAlignment, MenuCore, MenuDistribution,
    MenuProvider, RestGeometry, TextMeasurer,
};
use crate::pager::PageTransition;
use crate::px::{Px, PxPosition, PxRect, PxSize};

const ANIMATION_DURATION: f32 = 0.25;

/// Default configuration values for [`UnderlineMenuBar`].
pub struct UnderlineMenuDefaults;

impl UnderlineMenuDefaults {
    /// Default spacing between content-hugging tabs.
    pub const ITEM_SPACING: Dp = Dp(32.0);
    /// Default strip edge insets.
    pub const INSETS: EdgeInsets = EdgeInsets::ZERO;
    /// Default title font size.
    pub const TITLE_FONT_SIZE: Dp = Dp(14.0);
    /// Default height of the underline bar.
    pub const BAR_HEIGHT: Dp = Dp(2.0);
    /// Default insets added around the label width in automatic width mode.
    pub const BAR_INSETS: EdgeInsets = EdgeInsets::new(Dp(0.0), Dp(16.0), Dp(0.0), Dp(16.0));

    /// Default color of the underline bar and the selected title.
    pub fn accent_color() -> Color {
        Color::from_hex(0x1DA1F2)
    }

    /// Default color for deselected titles.
    pub fn deselected_text_color() -> Color {
        Color::from_rgb(0.33, 0.33, 0.33)
    }
}

/// Configuration arguments for [`UnderlineMenuBar`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct UnderlineMenuArgs {
    /// How tab cells share the bar's width.
    pub distribution: MenuDistribution,
    /// How content-hugging tabs are aligned within the bar.
    pub alignment: MenuAlignment,
    /// Strip edge insets (left alignment only; centered alignment computes
    /// its own).
    pub insets: EdgeInsets,
    /// Spacing between content-hugging tabs (left alignment only).
    pub item_spacing: Dp,
    /// Title font size, passed through to the text measurer.
    pub title_font_size: Dp,
    /// Color of the selected tab's title.
    pub selected_text_color: Color,
    /// Color of deselected tab titles.
    pub deselected_text_color: Color,
    /// Color of the underline bar.
    pub bar_color: Color,
    /// Height of the underline bar.
    pub bar_height: Dp,
    /// Insets added around the label width in automatic width mode.
    pub bar_insets: EdgeInsets,
    /// Width policy for the underline bar.
    pub bar_width_mode: IndicatorWidthMode,
}

impl Default for UnderlineMenuArgs {
    fn default() -> Self {
        Self {
            distribution: MenuDistribution::default(),
            alignment: MenuAlignment::default(),
            insets: UnderlineMenuDefaults::INSETS,
            item_spacing: UnderlineMenuDefaults::ITEM_SPACING,
            title_font_size: UnderlineMenuDefaults::TITLE_FONT_SIZE,
            selected_text_color: UnderlineMenuDefaults::accent_color(),
            deselected_text_color: UnderlineMenuDefaults::deselected_text_color(),
            bar_color: UnderlineMenuDefaults::accent_color(),
            bar_height: UnderlineMenuDefaults::BAR_HEIGHT,
            bar_insets: UnderlineMenuDefaults::BAR_INSETS,
            bar_width_mode: IndicatorWidthMode::default(),
        }
    }
}

/// Menu bar whose indicator is a thin underline pinned to the bottom edge.
pub struct UnderlineMenuBar {
    args: UnderlineMenuArgs,
    core: MenuCore,
    // Spacing and edge insets for centered alignment, derived once per
    // set_items/set_bar_size rather than per frame.
    centered: Option<(Dp, EdgeInsets)>,
}

impl UnderlineMenuBar {
    /// Creates an underline menu bar with the host's text measurer.
    pub fn new(args: UnderlineMenuArgs, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            args,
            core: MenuCore::new(measurer),
            centered: None,
        }
    }

    /// The configuration this bar was built with.
    pub fn args(&self) -> &UnderlineMenuArgs {
        &self.args
    }

    fn effective_spacing(&self) -> Dp {
        match self.centered {
            Some((spacing, _)) => spacing,
            None => self.args.item_spacing,
        }
    }

    fn effective_insets(&self) -> EdgeInsets {
        match self.centered {
            Some((_, insets)) => insets,
            None => self.args.insets,
        }
    }

    fn compute_centered_layout(&mut self) {
        self.centered = None;
        if self.args.alignment != MenuAlignment::Center {
            return;
        }
        let count = self.core.titles.len();
        if count == 0 || self.core.bar_size.width <= Px::ZERO {
            return;
        }
        let mut content = 0.0;
        for title in &self.core.titles {
            content += self
                .core
                .measurer
                .title_size(title, self.args.title_font_size)
                .width
                .to_f32();
        }
        let leftover = self.core.bar_size.width.to_f32() - content;
        if leftover <= 0.0 {
            return;
        }
        let spacing = leftover / count as f32;
        let half = Dp::from_pixels_f64(f64::from(spacing) / 2.0);
        self.centered = Some((
            Dp::from_pixels_f64(f64::from(spacing)),
            EdgeInsets::new(Dp(0.0), half, Dp(0.0), half),
        ));
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        let spacing = self.effective_spacing();
        let insets = self.effective_insets();
        self.core
            .relayout(self.args.title_font_size, self.args.distribution, spacing, insets)
    }

    fn rest_geometry(&self, index: usize) -> Option<RestGeometry> {
        let item = self.core.items.get(index)?;
        let count = self.core.items.len();
        let width = match self.args.bar_width_mode {
            IndicatorWidthMode::Automatic => {
                let label = self
                    .core
                    .measurer
                    .title_size(&item.title, self.args.title_font_size)
                    .width;
                let inset = match self.args.alignment {
                    MenuAlignment::Left => self.args.bar_insets.horizontal().to_px(),
                    // Centered alignment reuses the computed item spacing as
                    // the hug inset.
                    MenuAlignment::Center => self.effective_spacing().to_px(),
                };
                (label + inset).to_f32()
            }
            IndicatorWidthMode::FillEqually => (self.core.bar_size.width / count as i32).to_f32(),
            IndicatorWidthMode::Fixed(width) => width.to_px().to_f32(),
        };
        let height = self.args.bar_height.to_px();
        Some(RestGeometry {
            center_x: item.frame.center_x().to_f32(),
            width,
            y: self.core.bar_size.height - height,
            height,
        })
    }

    fn place_at_rest(&mut self) {
        if let Some(rest) = self.rest_geometry(self.core.current_index) {
            self.core.place_indicator(rest);
        }
    }
}

impl MenuProvider for UnderlineMenuBar {
    fn current_index(&self) -> usize {
        self.core.current_index
    }

    fn set_bar_size(&mut self, size: PxSize) {
        self.core.bar_size = size;
        if !self.core.titles.is_empty() {
            self.compute_centered_layout();
            if let Err(error) = self.relayout() {
                trace!(%error, "underline menu: bar resize layout skipped");
                return;
            }
            self.place_at_rest();
        }
    }

    fn set_items(&mut self, titles: Vec<String>) {
        self.core.titles = titles;
        self.core.reset_strip();
        if self.core.current_index >= self.core.titles.len() {
            self.core.current_index = 0;
        }
        self.compute_centered_layout();
        match self.relayout() {
            Ok(()) => self.place_at_rest(),
            Err(error) => {
                self.core.items.clear();
                trace!(%error, "underline menu: initial layout skipped");
            }
        }
    }

    fn drag_to(&mut self, transition: &PageTransition) {
        let Some((from, to, percentage)) = self.core.clamp_transition(transition) else {
            return;
        };
        if transition.index_changed {
            self.core.commit(to);
            if let Err(error) = self.relayout() {
                trace!(%error, "underline menu: relayout skipped");
            }
        }
        self.core.sync_strip(from, to, percentage);
        let (Some(a), Some(b)) = (self.rest_geometry(from), self.rest_geometry(to)) else {
            trace!(from, to, "underline menu: missing item geometry, skipping frame");
            return;
        };
        let center_x = lerp(a.center_x, b.center_x, percentage);
        let width = lerp(a.width, b.width, percentage);
        self.core.scrub_indicator(center_x, width, b);
    }

    fn move_to(&mut self, from_index: usize, to_index: usize, animated: bool) {
        if self.core.items.is_empty() {
            return;
        }
        let last = self.core.items.len() - 1;
        let from = from_index.min(last);
        let to = to_index.min(last);
        self.core.commit(to);
        if let Err(error) = self.relayout() {
            trace!(%error, "underline menu: relayout skipped");
            return;
        }
        self.core.scroll_strip_to_rest(to);
        let (Some(a), Some(b)) = (self.rest_geometry(from), self.rest_geometry(to)) else {
            trace!(from, to, "underline menu: missing item geometry, skipping move");
            return;
        };
        self.core.run_indicator(a, b, animated, ANIMATION_DURATION);
    }

    fn hit_test(&self, position: PxPosition) -> Option<usize> {
        self.core.hit_test(position)
    }

    fn tick(&mut self, dt: f32) {
        self.core.tick(dt);
    }

    fn indicator_frame(&self) -> PxRect {
        self.core.indicator_frame()
    }

    fn item_frame(&self, index: usize) -> Option<PxRect> {
        self.core.item_frame_in_bar(index)
    }

    fn strip_offset(&self) -> f32 {
        self.core.strip_offset
    }

    fn title_color(&self, index: usize) -> Color {
        if index == self.core.current_index {
            self.args.selected_text_color
        } else {
            self.args.deselected_text_color
        }
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

    fn bar_with(args: UnderlineMenuArgs, titles: &[&str]) -> UnderlineMenuBar {
        let mut bar = UnderlineMenuBar::new(args, Box::new(TenPerChar));
        bar.set_bar_size(PxSize::new(Px(400), Px(48)));
        bar.set_items(titles.iter().map(|s| s.to_string()).collect());
        bar
    }

    #[test]
    fn test_automatic_width_hugs_label() {
        let bar = bar_with(UnderlineMenuArgs::default(), &["aaaa", "bb"]);
        let frame = bar.indicator_frame();
        // 40px label plus 16+16 bar insets, centered in the 200px cell.
        assert_eq!(frame.width, Px(72));
        assert_eq!(frame.center_x(), Px(100));
        // Pinned to the bottom edge.
        assert_eq!(frame.y, Px(46));
        assert_eq!(frame.height, Px(2));
    }

    #[test]
    fn test_fill_equally_width_mode() {
        let bar = bar_with(
            UnderlineMenuArgs::default().bar_width_mode(IndicatorWidthMode::FillEqually),
            &["aaaa", "bb"],
        );
        assert_eq!(bar.indicator_frame().width, Px(200));
    }

    #[test]
    fn test_fixed_width_mode_is_constant_during_drag() {
        let mut bar = bar_with(
            UnderlineMenuArgs::default().bar_width_mode(IndicatorWidthMode::Fixed(Dp(50.0))),
            &["aaaa", "bb"],
        );
        assert_eq!(bar.indicator_frame().width, Px(50));
        bar.drag_to(&PageTransition {
            from_index: 0,
            to_index: 1,
            percentage: 0.4,
            index_changed: false,
        });
        assert_eq!(bar.indicator_frame().width, Px(50));
    }

    #[test]
    fn test_centered_alignment_fills_bar_exactly() {
        let mut bar = UnderlineMenuBar::new(
            UnderlineMenuArgs::default()
                .distribution(MenuDistribution::EqualSpacing)
                .alignment(MenuAlignment::Center),
            Box::new(TenPerChar),
        );
        bar.set_bar_size(PxSize::new(Px(480), Px(48)));
        bar.set_items(vec!["aaaaaaaaaa".to_string(), "aaaaaaaaaaaaaa".to_string()]);

        // Labels 100 + 140 leave 240 leftover: spacing 120, edges 60.
        let first = bar.item_frame(0).expect("item 0");
        let second = bar.item_frame(1).expect("item 1");
        assert_eq!(first.x, Px(60));
        assert_eq!(second.x, Px(60 + 100 + 120));
        assert_eq!(second.right() + Px(60), Px(480));

        // Automatic width under centered alignment hugs with the computed
        // spacing, not the bar insets.
        assert_eq!(bar.indicator_frame().width, Px(100 + 120));
    }

    #[test]
    fn test_drag_interpolates_between_cells() {
        let mut bar = bar_with(UnderlineMenuArgs::default(), &["aaaa", "bb"]);
        bar.drag_to(&PageTransition {
            from_index: 0,
            to_index: 1,
            percentage: 0.5,
            index_changed: false,
        });
        let frame = bar.indicator_frame();
        assert_eq!(frame.center_x(), Px(200));
        // Widths 72 and 52 interpolate to 62.
        assert_eq!(frame.width, Px(62));
    }

    #[test]
    fn test_drag_full_matches_instant_move() {
        let mut dragged = bar_with(UnderlineMenuArgs::default(), &["aaaa", "bb"]);
        dragged.drag_to(&PageTransition {
            from_index: 0,
            to_index: 1,
            percentage: 1.0,
            index_changed: true,
        });

        let mut tapped = bar_with(UnderlineMenuArgs::default(), &["aaaa", "bb"]);
        tapped.move_to(0, 1, false);

        assert_eq!(dragged.indicator_frame(), tapped.indicator_frame());
    }

    #[test]
    fn test_overflowing_strip_keeps_indicator_glued() {
        let mut bar = UnderlineMenuBar::new(
            UnderlineMenuArgs::default()
                .distribution(MenuDistribution::EqualSpacing)
                .item_spacing(Dp(0.0))
                .bar_insets(EdgeInsets::ZERO),
            Box::new(TenPerChar),
        );
        bar.set_bar_size(PxSize::new(Px(200), Px(48)));
        bar.set_items(vec![
            "aaaaaaaaaa".to_string(),
            "aaaaaaaaaa".to_string(),
            "aaaaaaaaaa".to_string(),
        ]);

        // Content 300 in a 200 bar: overflow 100, split across two steps.
        bar.drag_to(&PageTransition {
            from_index: 0,
            to_index: 1,
            percentage: 1.0,
            index_changed: true,
        });
        assert_eq!(bar.strip_offset(), 50.0);
        // Item 1 sits at content x 100..200; in bar coordinates the
        // indicator stays centered on it after the strip scrolled.
        assert_eq!(bar.indicator_frame().center_x(), Px(150 - 50));
    }
}
