//! Headless demo: drives a five-page pager against both menu bar styles,
//! simulating the host toolkit's scroll samples, taps and frame ticks.

use std::sync::Arc;

use parking_lot::RwLock;
use pageline::menu::{MenuProvider, TextMeasurer};
use pageline::pill_menu::{PillMenuArgs, PillMenuBar};
use pageline::underline_menu::{UnderlineMenuArgs, UnderlineMenuBar};
use pageline::{
    Dp, Page, PagerArgs, PagerController, PagerCoordinator, PagerListener, Px, PxPosition, PxSize,
};
use tracing::info;

const VIEWPORT_WIDTH: i32 = 360;
const BAR_HEIGHT: i32 = 44;

struct DemoPage {
    title: &'static str,
}

impl Page for DemoPage {
    fn menu_title(&self) -> Option<String> {
        Some(self.title.to_string())
    }

    fn attached(&mut self) {
        info!(title = self.title, "page attached");
    }

    fn detached(&mut self) {
        info!(title = self.title, "page detached");
    }
}

/// Stand-in for the host's text measurement: a fixed advance per character.
struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn title_size(&self, title: &str, font_size: Dp) -> PxSize {
        let advance = font_size.to_pixels_f32() * 0.6;
        let width = (title.chars().count() as f32 * advance).ceil();
        let height = (font_size.to_pixels_f32() * 1.4).ceil();
        PxSize::new(Px::saturating_from_f32(width), Px::saturating_from_f32(height))
    }
}

struct LoggingListener;

impl PagerListener for LoggingListener {
    fn will_change_index(&mut self, index: usize) {
        info!(index, "will change index");
    }

    fn did_change_index(&mut self, index: usize) {
        info!(index, "did change index");
    }
}

fn demo_pages() -> Vec<Box<dyn Page>> {
    ["Tweets", "Replies", "Media", "Likes", "About"]
        .into_iter()
        .map(|title| Box::new(DemoPage { title }) as Box<dyn Page>)
        .collect()
}

fn build_pager() -> Arc<RwLock<PagerController>> {
    let mut controller = PagerController::new(PagerArgs::default().beyond_viewport_page_count(1));
    controller.set_pages(demo_pages());
    controller.set_viewport_width(Px(VIEWPORT_WIDTH));
    Arc::new(RwLock::new(controller))
}

fn run_scenario(name: &str, pager: Arc<RwLock<PagerController>>, menu: Arc<RwLock<dyn MenuProvider>>) {
    info!(menu = name, "--- scenario start ---");

    let mut coordinator = PagerCoordinator::new(&pager, &menu);
    coordinator.set_listener(Box::new(LoggingListener));
    coordinator.prepare();

    // A finger-drag from page 0 to page 1, sampled at the host's cadence.
    for step in 1..=9 {
        let offset = step as f32 * VIEWPORT_WIDTH as f32 / 9.0;
        coordinator.on_scroll(offset);
        let frame = menu.read().indicator_frame();
        info!(
            offset = f64::from(offset),
            x = frame.x.raw(),
            width = frame.width.raw(),
            "drag sample"
        );
    }

    // Tap the fourth tab; the host receives one scroll command back.
    let tab = menu.read().item_frame(3).expect("four tabs are laid out");
    let tap = PxPosition::new(tab.center_x(), Px(BAR_HEIGHT / 2));
    let command = coordinator
        .on_menu_tap(tap)
        .expect("tap lands on an unselected tab");
    info!(
        target_offset = f64::from(command.offset_x),
        animated = command.animated,
        "scroll command"
    );

    // Indicator animation plus the commanded (suppressed) scroll.
    for frame_index in 0..20 {
        coordinator.tick(1.0 / 60.0);
        let progress = (frame_index + 1) as f32 / 20.0;
        coordinator.on_scroll(360.0 + (command.offset_x - 360.0) * progress);
    }
    coordinator.on_scroll_animation_finished();

    let frame = menu.read().indicator_frame();
    info!(
        index = pager.read().current_index(),
        x = frame.x.raw(),
        width = frame.width.raw(),
        "settled"
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut underline = UnderlineMenuBar::new(UnderlineMenuArgs::default(), Box::new(HeuristicMeasurer));
    underline.set_bar_size(PxSize::new(Px(VIEWPORT_WIDTH), Px(BAR_HEIGHT)));
    run_scenario(
        "underline",
        build_pager(),
        Arc::new(RwLock::new(underline)),
    );

    let mut pill = PillMenuBar::new(PillMenuArgs::default(), Box::new(HeuristicMeasurer));
    pill.set_bar_size(PxSize::new(Px(VIEWPORT_WIDTH), Px(BAR_HEIGHT)));
    run_scenario("pill", build_pager(), Arc::new(RwLock::new(pill)));
}
