//! Scroll-driven effects
//!
//! - a progress bar (`div.scroll-indicator`) scaled to the scroll fraction,
//!   plus a `scrolled` marker on the main navbar
//! - a navbar that hides while scrolling down and returns on scroll up
//! - a scroll-to-top button shown past a threshold

use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{event_types, Disposer, EventTarget, NodeId, StyleProperty, Window};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

use crate::lookup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    pub indicator_ms: u64,
    pub navbar_id: String,
    /// Scroll offset past which the navbar gets `scrolled`
    pub scrolled_after: f32,
    pub auto_hide_id: String,
    /// `top` of the hidden navbar
    pub hidden_top: String,
    pub scroll_top_id: String,
    /// Scroll offset past which the scroll-to-top button shows
    pub scroll_top_after: f32,
    pub scroll_top_ms: u64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            indicator_ms: 100,
            navbar_id: "mainNav".to_string(),
            scrolled_after: 50.0,
            auto_hide_id: "nav".to_string(),
            hidden_top: "-100px".to_string(),
            scroll_top_id: "scrollToTop".to_string(),
            scroll_top_after: 300.0,
            scroll_top_ms: 600,
        }
    }
}

/// Fraction of the page scrolled, 0 when the page does not scroll
pub fn scroll_fraction(window: &Window) -> f32 {
    let max = window.max_scroll();
    if max <= 0.0 {
        0.0
    } else {
        (window.scroll_y() / max).clamp(0.0, 1.0)
    }
}

/// Append the progress bar and keep it and the navbar marker in sync
pub fn install_scroll_indicator(
    window: &Window,
    scheduler: &AnimationScheduler,
    options: &ScrollOptions,
) -> (NodeId, Disposer) {
    let (indicator, navbar) = {
        let mut doc = window.document_mut();
        let body = doc.body();
        let indicator = doc.build(body, "div").class("scroll-indicator").finish();
        (indicator, lookup::by_id(&doc, &options.navbar_id, "scroll indicator"))
    };

    let weak = window.downgrade();
    let scheduler = scheduler.clone();
    let duration = options.indicator_ms;
    let scrolled_after = options.scrolled_after;
    let listener = window.add_event_listener(EventTarget::Window, event_types::SCROLL, move |event| {
        let Some(window) = weak.upgrade() else {
            return;
        };
        scheduler.animate(
            &[indicator],
            &AnimationSpec::new(duration)
                .to(StyleProperty::ScaleX, scroll_fraction(&window))
                .easing(Easing::Linear),
        );
        if let Some(navbar) = navbar {
            window
                .document_mut()
                .toggle_class(navbar, "scrolled", event.scroll_y > scrolled_after);
        }
    });

    let mut disposer = Disposer::new();
    disposer.listener(listener);
    (indicator, disposer)
}

/// Hides the navbar while the page scrolls down
///
/// Owns the last seen scroll offset.
pub struct NavAutoHide {
    nav: NodeId,
    last_scroll_top: Rc<Cell<f32>>,
    disposer: Disposer,
}

impl NavAutoHide {
    pub fn attach(window: &Window, options: &ScrollOptions) -> Option<Self> {
        let nav = lookup::by_id(&window.document(), &options.auto_hide_id, "nav auto-hide")?;
        let last_scroll_top = Rc::new(Cell::new(window.scroll_y()));

        let weak = window.downgrade();
        let last = Rc::clone(&last_scroll_top);
        let hidden_top = options.hidden_top.clone();
        let listener = window.add_event_listener(EventTarget::Window, event_types::SCROLL, move |event| {
            let Some(window) = weak.upgrade() else {
                return;
            };
            let top = if event.scroll_y > last.get() {
                hidden_top.as_str()
            } else {
                "0"
            };
            window.document_mut().set_style_keyword(nav, "top", top);
            last.set(event.scroll_y);
        });

        let mut disposer = Disposer::new();
        disposer.listener(listener);
        Some(Self {
            nav,
            last_scroll_top,
            disposer,
        })
    }

    pub fn nav(&self) -> NodeId {
        self.nav
    }

    pub fn last_scroll_top(&self) -> f32 {
        self.last_scroll_top.get()
    }

    pub fn into_disposer(self) -> Disposer {
        self.disposer
    }
}

/// Show the scroll-to-top button past the threshold; a click scrolls
/// smoothly back to the top
pub fn install_scroll_to_top(
    window: &Window,
    scheduler: &AnimationScheduler,
    options: &ScrollOptions,
) -> Option<Disposer> {
    let button = lookup::by_id(&window.document(), &options.scroll_top_id, "scroll-to-top")?;
    let mut disposer = Disposer::new();

    let weak = window.downgrade();
    let threshold = options.scroll_top_after;
    disposer.listener(window.add_event_listener(EventTarget::Window, event_types::SCROLL, move |event| {
        if let Some(window) = weak.upgrade() {
            let display = if event.scroll_y > threshold { "block" } else { "none" };
            window.document_mut().set_style_keyword(button, "display", display);
        }
    }));

    let scheduler = scheduler.clone();
    let duration = options.scroll_top_ms;
    disposer.listener(window.add_event_listener(button.into(), event_types::CLICK, move |_| {
        scheduler.animate_window(
            &AnimationSpec::new(duration)
                .scroll_y_to(0.0)
                .easing(Easing::EaseInOutCubic),
        );
    }));

    Some(disposer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nemesix_core::Rect;

    fn page() -> (Window, AnimationScheduler) {
        let window = Window::new(800.0, 600.0);
        {
            let mut doc = window.document_mut();
            let body = doc.body();
            doc.build(body, "nav").id("nav").finish();
            doc.build(body, "div").id("mainNav").finish();
            doc.build(body, "button").id("scrollToTop").finish();
            doc.build(body, "main")
                .bounds(Rect::new(0.0, 0.0, 800.0, 2600.0))
                .finish();
        }
        let scheduler = AnimationScheduler::new(&window);
        (window, scheduler)
    }

    fn by_id(window: &Window, id: &str) -> NodeId {
        window.document().element_by_id(id).unwrap()
    }

    #[test]
    fn test_indicator_tracks_fraction() {
        let (window, scheduler) = page();
        let (indicator, _) = install_scroll_indicator(&window, &scheduler, &ScrollOptions::default());
        let main_nav = by_id(&window, "mainNav");

        window.scroll_to(1000.0);
        window.advance(100);
        assert_eq!(
            window.document().style_value(indicator, StyleProperty::ScaleX),
            Some(0.5)
        );
        assert!(window.document().has_class(main_nav, "scrolled"));

        window.scroll_to(40.0);
        window.advance(100);
        assert!(!window.document().has_class(main_nav, "scrolled"));
    }

    #[test]
    fn test_nav_auto_hide() {
        let (window, _) = page();
        let hide = NavAutoHide::attach(&window, &ScrollOptions::default()).unwrap();
        let nav = hide.nav();

        window.scroll_to(200.0);
        assert_eq!(window.document().style_keyword(nav, "top"), Some("-100px"));
        assert_eq!(hide.last_scroll_top(), 200.0);

        window.scroll_to(150.0);
        assert_eq!(window.document().style_keyword(nav, "top"), Some("0"));

        // No movement counts as "not down"
        window.scroll_to(150.0);
        assert_eq!(window.document().style_keyword(nav, "top"), Some("0"));
    }

    #[test]
    fn test_scroll_to_top() {
        let (window, scheduler) = page();
        install_scroll_to_top(&window, &scheduler, &ScrollOptions::default()).unwrap();
        let button = by_id(&window, "scrollToTop");

        window.scroll_to(301.0);
        assert_eq!(window.document().style_keyword(button, "display"), Some("block"));
        window.scroll_to(300.0);
        assert_eq!(window.document().style_keyword(button, "display"), Some("none"));

        window.scroll_to(1500.0);
        window.click(button);
        window.advance(600);
        assert_eq!(window.scroll_y(), 0.0);
        assert_eq!(window.document().style_keyword(button, "display"), Some("none"));
    }

    #[test]
    fn test_missing_elements() {
        let window = Window::new(800.0, 600.0);
        let scheduler = AnimationScheduler::new(&window);
        assert!(NavAutoHide::attach(&window, &ScrollOptions::default()).is_none());
        assert!(install_scroll_to_top(&window, &scheduler, &ScrollOptions::default()).is_none());

        // The indicator works without a navbar
        let (indicator, _) = install_scroll_indicator(&window, &scheduler, &ScrollOptions::default());
        window.scroll_to(100.0);
        window.advance(100);
        assert_eq!(
            window.document().style_value(indicator, StyleProperty::ScaleX),
            Some(0.0)
        );
    }

    #[test]
    fn test_options_from_toml() {
        let options: ScrollOptions = toml::from_str(
            r#"
            scroll_top_after = 500
            hidden_top = "-80px"
            "#,
        )
        .unwrap();
        assert_eq!(options.scroll_top_after, 500.0);
        assert_eq!(options.hidden_top, "-80px");
        assert_eq!(options.navbar_id, "mainNav");
        assert_eq!(options.indicator_ms, 100);
    }
}
