//! Swipeable pager core with synchronized menu bars.
//!
//! A horizontally-swipeable container of child screens
//! ([`PagerController`]) paired with a menu bar in one of two visual styles
//! — a centered pill ([`pill_menu::PillMenuBar`]) or an underline bar
//! ([`underline_menu::UnderlineMenuBar`]) — kept in lockstep through a
//! mediating [`PagerCoordinator`].
//!
//! The crate owns the synchronization algorithm, not the views: the host
//! toolkit feeds geometry and scroll-offset samples in and receives scroll
//! commands and indicator frames back. The host seams are the [`Page`],
//! [`menu::TextMeasurer`] and [`PagerListener`] traits.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use parking_lot::RwLock;
//! use pageline::menu::{MenuProvider, TextMeasurer};
//! use pageline::underline_menu::{UnderlineMenuArgs, UnderlineMenuBar};
//! use pageline::{Dp, Page, PagerArgs, PagerController, PagerCoordinator, Px, PxSize};
//!
//! struct Screen(&'static str);
//!
//! impl Page for Screen {
//!     fn menu_title(&self) -> Option<String> {
//!         Some(self.0.to_string())
//!     }
//! }
//!
//! struct Mono;
//!
//! impl TextMeasurer for Mono {
//!     fn title_size(&self, title: &str, _font_size: Dp) -> PxSize {
//!         PxSize::new(Px(title.chars().count() as i32 * 8), Px(18))
//!     }
//! }
//!
//! let mut controller = PagerController::new(PagerArgs::default());
//! let pages: Vec<Box<dyn Page>> =
//!     vec![Box::new(Screen("Home")), Box::new(Screen("Likes"))];
//! controller.set_pages(pages);
//! controller.set_viewport_width(Px(320));
//! let pager = Arc::new(RwLock::new(controller));
//!
//! let mut bar = UnderlineMenuBar::new(UnderlineMenuArgs::default(), Box::new(Mono));
//! bar.set_bar_size(PxSize::new(Px(320), Px(48)));
//! let menu: Arc<RwLock<dyn MenuProvider>> = Arc::new(RwLock::new(bar));
//!
//! let mut coordinator = PagerCoordinator::new(&pager, &menu);
//! coordinator.prepare();
//!
//! // Halfway through a finger-drag toward the second page.
//! coordinator.on_scroll(160.0);
//! assert_eq!(pager.read().current_index(), 1);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod animation;

pub mod color;
pub mod coordinator;
pub mod dp;
pub mod menu;
pub mod pager;
pub mod pill_menu;
pub mod px;
pub mod underline_menu;

pub use color::Color;
pub use coordinator::{PagerCoordinator, PagerListener};
pub use dp::Dp;
pub use pager::{Page, PageTransition, PagerArgs, PagerController, ScrollCommand, SwipeDirection};
pub use px::{Px, PxPosition, PxRect, PxSize};
