//! Smooth scrolling for in-page anchors

use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{event_types, Disposer, Window};
use serde::{Deserialize, Serialize};

use crate::lookup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollOptions {
    /// Space left above the target (fixed navbar height)
    pub offset: f32,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            offset: 80.0,
            duration_ms: 1000,
            easing: Easing::EaseInOutCubic,
        }
    }
}

/// Make every `a[href^="#"]` scroll smoothly to its target
///
/// The default jump is always cancelled; an anchor whose target does not
/// exist does nothing.
pub fn install_smooth_scroll(
    window: &Window,
    scheduler: &AnimationScheduler,
    options: &SmoothScrollOptions,
) -> Disposer {
    let anchors = lookup::select_all(&window.document(), r##"a[href^="#"]"##);
    let mut disposer = Disposer::new();

    for anchor in anchors {
        let weak = window.downgrade();
        let scheduler = scheduler.clone();
        let options = options.clone();
        disposer.listener(window.add_event_listener(anchor.into(), event_types::CLICK, move |event| {
            event.prevent_default();
            let Some(window) = weak.upgrade() else {
                return;
            };

            let top = {
                let doc = window.document();
                doc.attribute(anchor, "href")
                    .and_then(|href| lookup::select(&doc, href))
                    .and_then(|target| doc.bounds(target))
                    .map(|bounds| bounds.y)
            };
            if let Some(top) = top {
                scheduler.animate_window(
                    &AnimationSpec::new(options.duration_ms)
                        .scroll_y_to(top - options.offset)
                        .easing(options.easing),
                );
            }
        }));
    }

    disposer
}

#[cfg(test)]
mod tests {
    use super::*;
    use nemesix_core::Rect;

    #[test]
    fn test_anchor_scrolls_to_target() {
        let window = Window::new(800.0, 600.0);
        let (to_team, to_nowhere, external) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let to_team = doc.build(body, "a").attr("href", "#equipo").finish();
            let to_nowhere = doc.build(body, "a").attr("href", "#missing").finish();
            let external = doc.build(body, "a").attr("href", "/login").finish();
            doc.build(body, "section")
                .id("equipo")
                .bounds(Rect::new(0.0, 1200.0, 800.0, 600.0))
                .finish();
            doc.build(body, "footer")
                .bounds(Rect::new(0.0, 1800.0, 800.0, 1200.0))
                .finish();
            (to_team, to_nowhere, external)
        };
        let scheduler = AnimationScheduler::new(&window);
        install_smooth_scroll(&window, &scheduler, &SmoothScrollOptions::default());

        assert!(!window.click(external).default_prevented());

        assert!(window.click(to_nowhere).default_prevented());
        assert_eq!(scheduler.active_count(), 0);

        assert!(window.click(to_team).default_prevented());
        window.advance(500);
        assert!(window.scroll_y() > 0.0 && window.scroll_y() < 1120.0);
        window.advance(500);
        assert_eq!(window.scroll_y(), 1120.0);
    }
}
