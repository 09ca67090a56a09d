//! Hover micro-interactions for buttons and cards

use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{event_types, Disposer, StyleProperty, Window};
use serde::{Deserialize, Serialize};

use crate::lookup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverOptions {
    pub buttons: String,
    pub button_scale: f32,
    pub button_ms: u64,
    pub cards: String,
    pub card_lift: f32,
    pub card_scale: f32,
    pub card_ms: u64,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self {
            buttons: ".btn-animated".to_string(),
            button_scale: 1.05,
            button_ms: 200,
            cards: ".animate-card".to_string(),
            card_lift: -10.0,
            card_scale: 1.02,
            card_ms: 300,
        }
    }
}

/// Register enter/leave tweens on every current button and card
pub fn install_hover(window: &Window, scheduler: &AnimationScheduler, options: &HoverOptions) -> Disposer {
    let (buttons, cards) = {
        let doc = window.document();
        (
            lookup::select_all(&doc, &options.buttons),
            lookup::select_all(&doc, &options.cards),
        )
    };

    let button_enter = AnimationSpec::new(options.button_ms)
        .to(StyleProperty::Scale, options.button_scale)
        .easing(Easing::EaseOutQuad);
    let button_leave = AnimationSpec::new(options.button_ms)
        .to(StyleProperty::Scale, 1.0)
        .easing(Easing::EaseOutQuad);
    let card_enter = AnimationSpec::new(options.card_ms)
        .to(StyleProperty::TranslateY, options.card_lift)
        .to(StyleProperty::Scale, options.card_scale)
        .easing(Easing::EaseOutCubic);
    let card_leave = AnimationSpec::new(options.card_ms)
        .to(StyleProperty::TranslateY, 0.0)
        .to(StyleProperty::Scale, 1.0)
        .easing(Easing::EaseOutCubic);

    let mut disposer = Disposer::new();
    let pairs = buttons
        .into_iter()
        .map(|node| (node, &button_enter, &button_leave))
        .chain(cards.into_iter().map(|node| (node, &card_enter, &card_leave)));

    for (node, enter, leave) in pairs {
        for (event_type, spec) in [(event_types::POINTER_ENTER, enter), (event_types::POINTER_LEAVE, leave)] {
            let scheduler = scheduler.clone();
            let spec = spec.clone();
            disposer.listener(window.add_event_listener(node.into(), event_type, move |_| {
                scheduler.animate(&[node], &spec);
            }));
        }
    }

    disposer
}

#[cfg(test)]
mod tests {
    use super::*;
    use nemesix_core::NodeId;

    #[test]
    fn test_button_and_card_hover() {
        let window = Window::new(800.0, 600.0);
        let (button, card) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let button = doc.build(body, "a").class("btn-animated").finish();
            let card = doc.build(body, "div").class("animate-card").finish();
            (button, card)
        };
        let scheduler = AnimationScheduler::new(&window);
        let disposer = install_hover(&window, &scheduler, &HoverOptions::default());
        assert_eq!(disposer.len(), 4);

        let value = |node: NodeId, property| window.document().style_value(node, property);

        window.pointer_enter(button);
        window.pointer_enter(card);
        window.advance(300);
        assert_eq!(value(button, StyleProperty::Scale), Some(1.05));
        assert_eq!(value(card, StyleProperty::TranslateY), Some(-10.0));
        assert_eq!(value(card, StyleProperty::Scale), Some(1.02));

        // Leaving mid-transition supersedes the enter tween
        window.pointer_enter(button);
        window.advance(50);
        window.pointer_leave(button);
        window.pointer_leave(card);
        window.advance(300);
        assert_eq!(value(button, StyleProperty::Scale), Some(1.0));
        assert_eq!(value(card, StyleProperty::TranslateY), Some(0.0));
        assert_eq!(scheduler.active_count(), 0);
    }
}
