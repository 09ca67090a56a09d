//! Nemesix Page Effects
//!
//! Decorative behaviours layered on top of the document. Every effect
//! installs itself against a [`Window`](nemesix_core::Window) and skips
//! quietly when the elements it needs are not on the page.
//!
//! # Features
//!
//! - **Loading Overlay**: Spinner faded out on `load`, with a one-shot completion
//! - **Intro**: Logo, nav items and hero entrance followed by a typewriter title
//! - **Scroll Effects**: Progress indicator, scrolled navbar, nav auto-hide, scroll-to-top
//! - **Hover**: Scale and lift tweens for buttons and cards
//! - **Smooth Scroll**: Animated in-page anchor navigation
//! - **Particles**: Looping floating particles from a caller-supplied random source
//! - **Flash Messages**: Timed fade-out and removal of alerts
//! - **Info Boxes**: Avatar grid and detail boxes with a single continuation
//! - **Navigation**: Section selector and the intro video teaser

pub mod flash;
pub mod hover;
pub mod info_boxes;
pub mod intro;
pub mod loading;
mod lookup;
pub mod nav_selector;
pub mod particles;
pub mod scroll;
pub mod smooth_scroll;
pub mod typewriter;
pub mod video_teaser;

pub use flash::{install_flash, FlashOptions};
pub use hover::{install_hover, HoverOptions};
pub use info_boxes::{InfoBoxOptions, InfoBoxes};
pub use intro::{play_intro, IntroOptions};
pub use loading::{install_loading, LoadingOptions, LoadingOverlay};
pub use nav_selector::install_nav_selector;
pub use particles::{spawn_particles, ParticleOptions};
pub use scroll::{
    install_scroll_indicator, install_scroll_to_top, scroll_fraction, NavAutoHide, ScrollOptions,
};
pub use smooth_scroll::{install_smooth_scroll, SmoothScrollOptions};
pub use typewriter::typewriter;
pub use video_teaser::install_video_teaser;
