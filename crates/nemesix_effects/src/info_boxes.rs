//! Info boxes on the team page
//!
//! The avatar grid and the detail boxes are mutually exclusive. Hiding
//! the active boxes is animated by the stylesheet: the `active` class is
//! dropped at once and `display: none` follows once the transition is
//! over. Whatever comes next (showing a box, or the grid) runs exactly
//! once, right away if nothing was active, otherwise after the last box
//! is hidden.

use nemesix_core::{NodeId, Window};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::lookup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoBoxOptions {
    pub box_class: String,
    pub active_class: String,
    pub avatars_id: String,
    /// Box ids are this prefix followed by the member id
    pub box_prefix: String,
    /// Length of the hide transition
    pub hide_ms: u64,
    /// Delay between displaying a box and activating it
    pub show_delay_ms: u64,
}

impl Default for InfoBoxOptions {
    fn default() -> Self {
        Self {
            box_class: "info-box".to_string(),
            active_class: "active".to_string(),
            avatars_id: "avatars-container".to_string(),
            box_prefix: "info-".to_string(),
            hide_ms: 500,
            show_delay_ms: 10,
        }
    }
}

type Continuation = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// Switches between the avatar grid and the detail boxes
#[derive(Clone)]
pub struct InfoBoxes {
    window: Window,
    options: Rc<InfoBoxOptions>,
}

impl InfoBoxes {
    pub fn new(window: &Window, options: InfoBoxOptions) -> Self {
        Self {
            window: window.clone(),
            options: Rc::new(options),
        }
    }

    /// Hide the grid and any open box, then open `info-<id>`
    pub fn show(&self, id: &str) {
        let window = self.window.downgrade();
        let options = Rc::clone(&self.options);
        let box_id = format!("{}{}", options.box_prefix, id);

        self.hide_all(move || {
            let Some(window) = window.upgrade() else {
                return;
            };
            let Some(node) = lookup::by_id(&window.document(), &box_id, "info boxes") else {
                return;
            };
            window.document_mut().set_style_keyword(node, "display", "block");

            let weak = window.downgrade();
            window.set_timeout(options.show_delay_ms, move || {
                if let Some(window) = weak.upgrade() {
                    window.document_mut().add_class(node, &options.active_class);
                }
            });
        });
    }

    /// Hide every box, then bring the grid back
    pub fn return_to_avatars(&self) {
        let window = self.window.downgrade();
        let avatars_id = self.options.avatars_id.clone();

        self.hide_all(move || {
            if let Some(window) = window.upgrade() {
                let avatars = window.document().element_by_id(&avatars_id);
                if let Some(avatars) = avatars {
                    window.document_mut().set_style_keyword(avatars, "display", "flex");
                }
            }
        });
    }

    /// Boxes currently carrying the active class
    pub fn active_boxes(&self) -> Vec<NodeId> {
        let doc = self.window.document();
        self.boxes()
            .into_iter()
            .filter(|&node| doc.has_class(node, &self.options.active_class))
            .collect()
    }

    fn boxes(&self) -> Vec<NodeId> {
        lookup::select_all(&self.window.document(), &format!(".{}", self.options.box_class))
    }

    fn hide_all<F>(&self, then: F)
    where
        F: FnOnce() + 'static,
    {
        let active = self.active_boxes();
        {
            let mut doc = self.window.document_mut();
            for &node in &active {
                doc.remove_class(node, &self.options.active_class);
            }
            if let Some(avatars) = doc.element_by_id(&self.options.avatars_id) {
                doc.set_style_keyword(avatars, "display", "none");
            }
        }

        if active.is_empty() {
            then();
            return;
        }

        let pending = Rc::new(Cell::new(active.len()));
        let continuation: Continuation = Rc::new(RefCell::new(Some(Box::new(then))));
        for node in active {
            let weak = self.window.downgrade();
            let pending = Rc::clone(&pending);
            let continuation = Rc::clone(&continuation);
            self.window.set_timeout(self.options.hide_ms, move || {
                if let Some(window) = weak.upgrade() {
                    window.document_mut().set_style_keyword(node, "display", "none");
                }
                pending.set(pending.get().saturating_sub(1));
                if pending.get() == 0 {
                    let next = continuation.borrow_mut().take();
                    if let Some(next) = next {
                        next();
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TeamPage {
        window: Window,
        avatars: NodeId,
        ana: NodeId,
        leo: NodeId,
    }

    fn team_page() -> TeamPage {
        let window = Window::new(800.0, 600.0);
        let (avatars, ana, leo) = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let avatars = doc
                .build(body, "div")
                .id("avatars-container")
                .style("display", "flex")
                .finish();
            let ana = doc
                .build(body, "div")
                .id("info-ana")
                .class("info-box")
                .style("display", "none")
                .finish();
            let leo = doc
                .build(body, "div")
                .id("info-leo")
                .class("info-box")
                .style("display", "none")
                .finish();
            (avatars, ana, leo)
        };
        TeamPage {
            window,
            avatars,
            ana,
            leo,
        }
    }

    fn display(window: &Window, node: NodeId) -> Option<String> {
        window
            .document()
            .style_keyword(node, "display")
            .map(str::to_string)
    }

    #[test]
    fn test_show_from_grid() {
        let page = team_page();
        let boxes = InfoBoxes::new(&page.window, InfoBoxOptions::default());

        boxes.show("ana");
        assert_eq!(display(&page.window, page.avatars).as_deref(), Some("none"));
        assert_eq!(display(&page.window, page.ana).as_deref(), Some("block"));
        assert!(boxes.active_boxes().is_empty());

        page.window.advance(10);
        assert_eq!(boxes.active_boxes(), vec![page.ana]);
    }

    #[test]
    fn test_switch_waits_for_hide() {
        let page = team_page();
        let boxes = InfoBoxes::new(&page.window, InfoBoxOptions::default());
        boxes.show("ana");
        page.window.advance(10);

        boxes.show("leo");
        assert!(boxes.active_boxes().is_empty());
        assert_eq!(display(&page.window, page.leo).as_deref(), Some("none"));

        page.window.advance(499);
        assert_eq!(display(&page.window, page.ana).as_deref(), Some("block"));
        page.window.advance(1);
        assert_eq!(display(&page.window, page.ana).as_deref(), Some("none"));
        assert_eq!(display(&page.window, page.leo).as_deref(), Some("block"));

        page.window.advance(10);
        assert_eq!(boxes.active_boxes(), vec![page.leo]);
    }

    #[test]
    fn test_return_to_avatars_runs_once() {
        let page = team_page();
        let boxes = InfoBoxes::new(&page.window, InfoBoxOptions::default());

        // Nothing active: the grid is shown immediately and stays shown
        boxes.return_to_avatars();
        assert_eq!(display(&page.window, page.avatars).as_deref(), Some("flex"));

        boxes.show("ana");
        page.window.advance(10);
        boxes.return_to_avatars();
        assert_eq!(display(&page.window, page.avatars).as_deref(), Some("none"));

        page.window.advance(500);
        assert_eq!(display(&page.window, page.avatars).as_deref(), Some("flex"));
        assert_eq!(display(&page.window, page.ana).as_deref(), Some("none"));
        assert_eq!(page.window.pending_timers(), 0);
    }

    #[test]
    fn test_continuation_after_several_boxes() {
        let page = team_page();
        {
            let mut doc = page.window.document_mut();
            doc.add_class(page.ana, "active");
            doc.add_class(page.leo, "active");
        }
        let calls = Rc::new(Cell::new(0));
        let boxes = InfoBoxes::new(&page.window, InfoBoxOptions::default());

        let c = Rc::clone(&calls);
        boxes.hide_all(move || c.set(c.get() + 1));
        assert_eq!(calls.get(), 0);
        page.window.advance(500);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unknown_box() {
        let page = team_page();
        let boxes = InfoBoxes::new(&page.window, InfoBoxOptions::default());
        boxes.show("nobody");
        page.window.advance(100);
        assert!(boxes.active_boxes().is_empty());
    }
}
