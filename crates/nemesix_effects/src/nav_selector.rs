//! Section selector (`<select id="nav-selector">`)

use nemesix_core::{event_types, Disposer, Window};

use crate::lookup;

/// Jump to the chosen section by setting the location hash
///
/// An empty choice is ignored.
pub fn install_nav_selector(window: &Window, id: &str) -> Option<Disposer> {
    let select = lookup::by_id(&window.document(), id, "nav selector")?;

    let weak = window.downgrade();
    let listener = window.add_event_listener(select.into(), event_types::CHANGE, move |_| {
        let Some(window) = weak.upgrade() else {
            return;
        };
        let destination = window.document().value(select).unwrap_or_default().to_string();
        if !destination.is_empty() {
            window.set_location_hash(&destination);
        }
    });

    let mut disposer = Disposer::new();
    disposer.listener(listener);
    Some(disposer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_sets_hash() {
        let window = Window::new(800.0, 600.0);
        let select = {
            let mut doc = window.document_mut();
            let body = doc.body();
            doc.build(body, "select").id("nav-selector").finish()
        };
        install_nav_selector(&window, "nav-selector").unwrap();

        window.change(select, "juegos");
        assert_eq!(window.location_hash(), "#juegos");

        window.change(select, "");
        assert_eq!(window.location_hash(), "#juegos");
    }

    #[test]
    fn test_missing_selector() {
        let window = Window::new(800.0, 600.0);
        assert!(install_nav_selector(&window, "nav-selector").is_none());
    }
}
