//! Nemesix Viewport Reveal
//!
//! Scroll-triggered, one-shot entrance effects for marked elements.
//!
//! # Example
//!
//! ```rust
//! use nemesix_animation::AnimationScheduler;
//! use nemesix_core::{Rect, Window};
//! use nemesix_reveal::{RevealEngine, RevealOptions, RevealTable};
//!
//! let window = Window::new(1280.0, 720.0);
//! let card = {
//!     let mut doc = window.document_mut();
//!     let body = doc.body();
//!     doc.build(body, "div")
//!         .class("animate-card")
//!         .bounds(Rect::new(0.0, 100.0, 300.0, 200.0))
//!         .finish()
//! };
//!
//! let scheduler = AnimationScheduler::new(&window);
//! let reveal = RevealEngine::attach(&window, &scheduler, RevealTable::standard(), &RevealOptions::default())?;
//!
//! window.advance(16);
//! assert!(reveal.is_revealed(card));
//! # Ok::<(), nemesix_core::CoreError>(())
//! ```

pub mod engine;
pub mod table;

pub use engine::{RevealController, RevealEngine, RevealOptions};
pub use table::{RevealAction, RevealProfile, RevealTable};
