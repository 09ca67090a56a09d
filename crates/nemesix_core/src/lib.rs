//! Nemesix Core
//!
//! Headless page host for the Nemesix site behaviours.
//!
//! # Features
//!
//! - **Document**: arena-backed element tree with classes, attributes,
//!   inline style, form values and host-supplied bounds
//! - **Selectors**: the CSS subset the page scripts use
//! - **Events**: typed listeners with `prevent_default`
//! - **Timers**: `setTimeout`/`setInterval` on a virtual clock
//! - **Intersection Observers**: threshold plus root margin
//! - **Window**: one handle bundling all of the above

pub mod disposer;
pub mod dom;
pub mod error;
pub mod events;
pub mod geometry;
pub mod observer;
pub mod selector;
pub mod style;
pub mod timer;
pub mod window;

pub use disposer::Disposer;
pub use dom::{Document, ElementBuilder, NodeId};
pub use error::{CoreError, Result};
pub use events::{event_types, EventCallback, EventContext, EventTarget, EventType, ListenerId};
pub use geometry::{Rect, RootMargin, Viewport};
pub use observer::{IntersectionEntry, ObserverId, ObserverOptions};
pub use selector::Selector;
pub use style::{Style, StyleProperty};
pub use timer::TimerId;
pub use window::{FrameCallbackId, Navigation, SubmitOutcome, WeakWindow, Window, FRAME_MS};
