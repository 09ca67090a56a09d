//! Loading overlay
//!
//! A full-page overlay with a spinning indicator, faded out once the
//! window has loaded. Its removal is the page's one continuation: the
//! completion callback runs exactly once, after the overlay is gone.

use nemesix_animation::{AnimationId, AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{event_types, Disposer, EventTarget, NodeId, StyleProperty, Window};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingOptions {
    /// One spinner turn
    pub spin_ms: u64,
    pub fade_ms: u64,
    pub fade_easing: Easing,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            spin_ms: 1000,
            fade_ms: 500,
            fade_easing: Easing::EaseOutQuad,
        }
    }
}

/// Nodes and registrations of the installed overlay
pub struct LoadingOverlay {
    pub overlay: NodeId,
    pub spinner: NodeId,
    pub spin: AnimationId,
    pub disposer: Disposer,
}

type Continuation = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// Append the overlay, start the spinner and fade out on `load`
pub fn install_loading<F>(
    window: &Window,
    scheduler: &AnimationScheduler,
    options: &LoadingOptions,
    on_complete: F,
) -> LoadingOverlay
where
    F: FnOnce() + 'static,
{
    let (overlay, spinner) = {
        let mut doc = window.document_mut();
        let body = doc.body();
        let overlay = doc.build(body, "div").class("loading-overlay").finish();
        let spinner = doc.build(overlay, "div").class("loading-spinner").finish();
        (overlay, spinner)
    };

    let spin = scheduler.animate(
        &[spinner],
        &AnimationSpec::new(options.spin_ms)
            .from_to(StyleProperty::Rotate, 0.0, 1.0)
            .easing(Easing::Linear)
            .looping(true),
    );

    let continuation: Continuation = Rc::new(RefCell::new(Some(Box::new(on_complete))));
    let fade = AnimationSpec::new(options.fade_ms)
        .to(StyleProperty::Opacity, 0.0)
        .easing(options.fade_easing);

    let weak = window.downgrade();
    let fade_scheduler = scheduler.clone();
    let listener = window.add_event_listener(EventTarget::Window, event_types::LOAD, move |_| {
        let Some(window) = weak.upgrade() else {
            return;
        };
        if !window.document().contains(overlay) {
            return;
        }

        let weak = window.downgrade();
        let scheduler = fade_scheduler.clone();
        let continuation = Rc::clone(&continuation);
        fade_scheduler.animate_with_complete(&[overlay], &fade, move || {
            scheduler.cancel(spin);
            if let Some(window) = weak.upgrade() {
                window.document_mut().remove(overlay);
            }
            tracing::debug!("loading overlay removed");
            let next = continuation.borrow_mut().take();
            if let Some(next) = next {
                next();
            }
        });
    });

    let mut disposer = Disposer::new();
    disposer.listener(listener);

    LoadingOverlay {
        overlay,
        spinner,
        spin,
        disposer,
    }
}
