//! Flash message auto-dismissal

use nemesix_core::{Disposer, StyleProperty, Window};
use serde::{Deserialize, Serialize};

use crate::lookup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashOptions {
    pub selector: String,
    /// Time on screen before fading
    pub dismiss_after_ms: u64,
    /// Fade time before removal
    pub remove_after_ms: u64,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            selector: ".alert".to_string(),
            dismiss_after_ms: 5000,
            remove_after_ms: 300,
        }
    }
}

/// Fade out and remove every current flash message
///
/// Both the fade and the removal are scheduled up front, so disposing
/// at any point cancels whatever has not run yet.
pub fn install_flash(window: &Window, options: &FlashOptions) -> Disposer {
    let alerts = lookup::select_all(&window.document(), &options.selector);
    let mut disposer = Disposer::new();
    let remove_at = options.dismiss_after_ms + options.remove_after_ms;

    for alert in alerts {
        let weak = window.downgrade();
        disposer.timer(window.set_timeout(options.dismiss_after_ms, move || {
            if let Some(window) = weak.upgrade() {
                let mut doc = window.document_mut();
                if doc.is_connected(alert) {
                    doc.set_style(alert, StyleProperty::Opacity, 0.0);
                }
            }
        }));

        let weak = window.downgrade();
        disposer.timer(window.set_timeout(remove_at, move || {
            if let Some(window) = weak.upgrade() {
                let mut doc = window.document_mut();
                if doc.is_connected(alert) {
                    doc.remove(alert);
                }
            }
        }));
    }

    disposer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_fade_then_go() {
        let window = Window::new(800.0, 600.0);
        let (first, second) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let first = doc.build(body, "div").class("alert").text("Saved").finish();
            let second = doc.build(body, "div").class("alert").text("Welcome").finish();
            (first, second)
        };
        let disposer = install_flash(&window, &FlashOptions::default());
        assert_eq!(disposer.len(), 4);

        window.advance(4999);
        assert_eq!(window.document().style_value(first, StyleProperty::Opacity), Some(1.0));

        window.advance(1);
        assert_eq!(window.document().style_value(first, StyleProperty::Opacity), Some(0.0));
        assert!(window.document().contains(first));

        // Removed by someone else in the meantime
        window.document_mut().remove(second);
        window.advance(300);
        assert!(!window.document().contains(first));
        assert_eq!(window.pending_timers(), 0);
    }

    #[test]
    fn test_dispose_before_dismissal() {
        let window = Window::new(800.0, 600.0);
        let alert = {
            let mut doc = window.document_mut();
            let body = doc.body();
            doc.build(body, "div").class("alert").finish()
        };
        install_flash(&window, &FlashOptions::default()).dispose(&window);
        window.advance(6000);
        assert!(window.document().contains(alert));
    }

    #[test]
    fn test_dispose_during_fade() {
        let window = Window::new(800.0, 600.0);
        let alert = {
            let mut doc = window.document_mut();
            let body = doc.body();
            doc.build(body, "div").class("alert").finish()
        };
        let disposer = install_flash(&window, &FlashOptions::default());

        window.advance(5100);
        assert_eq!(window.document().style_value(alert, StyleProperty::Opacity), Some(0.0));

        disposer.dispose(&window);
        assert_eq!(window.pending_timers(), 0);
        window.advance(1000);
        assert!(window.document().contains(alert));
    }
}
