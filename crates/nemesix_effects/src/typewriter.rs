//! Typewriter text reveal

use nemesix_core::{NodeId, StyleProperty, TimerId, Window};
use std::cell::Cell;
use std::rc::Rc;

/// Retype a node's text one character per `speed_ms`
///
/// The text is captured and cleared immediately and the node is made
/// visible. The interval clears itself on the tick after the last
/// character.
pub fn typewriter(window: &Window, node: NodeId, speed_ms: u64) -> TimerId {
    let chars: Vec<char> = {
        let mut doc = window.document_mut();
        let text = doc.text_content(node);
        doc.set_text(node, "");
        doc.set_style(node, StyleProperty::Opacity, 1.0);
        text.chars().collect()
    };

    let index = Cell::new(0usize);
    let timer: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
    let weak = window.downgrade();
    let own_timer = Rc::clone(&timer);

    let id = window.set_interval(speed_ms, move || {
        let Some(window) = weak.upgrade() else {
            return;
        };
        let i = index.get();
        match chars.get(i) {
            Some(c) => {
                window.document_mut().append_text(node, c.encode_utf8(&mut [0; 4]));
                index.set(i + 1);
            }
            None => {
                if let Some(id) = own_timer.get() {
                    window.clear_timer(id);
                }
            }
        }
    });
    timer.set(Some(id));
    id
}
