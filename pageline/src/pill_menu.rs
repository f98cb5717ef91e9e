//! Menu bar with a centered pill indicator.
//!
//! ## Usage
//!
//! A rounded pill sits behind the selected tab's label, hugging its measured
//! size plus the pill insets, and slides/resizes between labels as the pager
//! is dragged.

use derive_setters::Setters;
use tracing::trace;

use crate::animation::lerp;
use crate::color::Color;
use crate::dp::Dp;
use crate::menu::{
    EdgeInsets, LayoutError, MenuCore, MenuDistribution, MenuProvider, RestGeometry, TextMeasurer,
};
use crate::pager::PageTransition;
use crate::px::{PxPosition, PxRect, PxSize};

const ANIMATION_DURATION: f32 = 0.3;

/// Default configuration values for [`PillMenuBar`].
pub struct PillMenuDefaults;

impl PillMenuDefaults {
    /// Default spacing between content-hugging tabs.
    pub const ITEM_SPACING: Dp = Dp(32.0);
    /// Default strip edge insets.
    pub const INSETS: EdgeInsets = EdgeInsets::new(Dp(0.0), Dp(20.0), Dp(0.0), Dp(20.0));
    /// Default title font size.
    pub const TITLE_FONT_SIZE: Dp = Dp(16.0);
    /// Default insets between a label and the pill's edges.
    pub const PILL_INSETS: EdgeInsets = EdgeInsets::new(Dp(8.0), Dp(20.0), Dp(8.0), Dp(20.0));

    /// Default pill fill color.
    pub fn pill_color() -> Color {
        Color::from_rgb(0.9, 0.9, 0.9)
    }

    /// Default color for the selected title.
    pub fn selected_text_color() -> Color {
        Color::BLACK
    }

    /// Default color for deselected titles.
    pub fn deselected_text_color() -> Color {
        Color::from_rgb(0.7, 0.7, 0.7)
    }
}

/// Configuration arguments for [`PillMenuBar`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct PillMenuArgs {
    /// How tab cells share the bar's width.
    pub distribution: MenuDistribution,
    /// Spacing between content-hugging tabs.
    pub item_spacing: Dp,
    /// Strip edge insets.
    pub insets: EdgeInsets,
    /// Title font size, passed through to the text measurer.
    pub title_font_size: Dp,
    /// Color of the selected tab's title.
    pub selected_text_color: Color,
    /// Color of deselected tab titles.
    pub deselected_text_color: Color,
    /// Fill color of the pill.
    pub pill_color: Color,
    /// Insets between the selected label and the pill's edges.
    pub pill_insets: EdgeInsets,
}

impl Default for PillMenuArgs {
    fn default() -> Self {
        Self {
            distribution: MenuDistribution::default(),
            item_spacing: PillMenuDefaults::ITEM_SPACING,
            insets: PillMenuDefaults::INSETS,
            title_font_size: PillMenuDefaults::TITLE_FONT_SIZE,
            selected_text_color: PillMenuDefaults::selected_text_color(),
            deselected_text_color: PillMenuDefaults::deselected_text_color(),
            pill_color: PillMenuDefaults::pill_color(),
            pill_insets: PillMenuDefaults::PILL_INSETS,
        }
    }
}

/// Menu bar whose indicator is a rounded pill hugging the selected label.
pub struct PillMenuBar {
    args: PillMenuArgs,
    core: MenuCore,
}

impl PillMenuBar {
    /// Creates a pill menu bar with the host's text measurer.
    pub fn new(args: PillMenuArgs, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            args,
            core: MenuCore::new(measurer),
        }
    }

    /// The configuration this bar was built with.
    pub fn args(&self) -> &PillMenuArgs {
        &self.args
    }

    /// Corner radius the host should apply to the pill (half its height).
    pub fn corner_radius(&self) -> f32 {
        self.indicator_frame().height.to_f32() / 2.0
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        self.core.relayout(
            self.args.title_font_size,
            self.args.distribution,
            self.args.item_spacing,
            self.args.insets,
        )
    }

    fn rest_geometry(&self, index: usize) -> Option<RestGeometry> {
        let item = self.core.items.get(index)?;
        let label = self
            .core
            .measurer
            .title_size(&item.title, self.args.title_font_size);
        let width = label.width + self.args.pill_insets.horizontal().to_px();
        let height = label.height + self.args.pill_insets.vertical().to_px();
        Some(RestGeometry {
            center_x: item.frame.center_x().to_f32(),
            width: width.to_f32(),
            y: item.frame.center_y() - height / 2,
            height,
        })
    }

    fn place_at_rest(&mut self) {
        if let Some(rest) = self.rest_geometry(self.core.current_index) {
            self.core.place_indicator(rest);
        }
    }
}

impl MenuProvider for PillMenuBar {
    fn current_index(&self) -> usize {
        self.core.current_index
    }

    fn set_bar_size(&mut self, size: PxSize) {
        self.core.bar_size = size;
        if !self.core.titles.is_empty() {
            if let Err(error) = self.relayout() {
                trace!(%error, "pill menu: bar resize layout skipped");
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
        match self.relayout() {
            Ok(()) => self.place_at_rest(),
            Err(error) => {
                self.core.items.clear();
                trace!(%error, "pill menu: initial layout skipped");
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
                trace!(%error, "pill menu: relayout skipped");
            }
        }
        self.core.sync_strip(from, to, percentage);
        let (Some(a), Some(b)) = (self.rest_geometry(from), self.rest_geometry(to)) else {
            trace!(from, to, "pill menu: missing item geometry, skipping frame");
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
            trace!(%error, "pill menu: relayout skipped");
            return;
        }
        self.core.scroll_strip_to_rest(to);
        let (Some(a), Some(b)) = (self.rest_geometry(from), self.rest_geometry(to)) else {
            trace!(from, to, "pill menu: missing item geometry, skipping move");
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
