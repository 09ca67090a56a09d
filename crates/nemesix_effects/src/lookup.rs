//! Element lookup that never fails loudly
//!
//! Effects are cosmetic: a missing element or a selector that does not
//! parse makes the effect skip, with a debug line.

use nemesix_core::{Document, NodeId, Selector};

pub(crate) fn select_all(doc: &Document, selector: &str) -> Vec<NodeId> {
    match Selector::parse(selector) {
        Ok(selector) => doc.select_all(&selector),
        Err(err) => {
            tracing::debug!("skipping selector: {}", err);
            Vec::new()
        }
    }
}

pub(crate) fn select(doc: &Document, selector: &str) -> Option<NodeId> {
    match Selector::parse(selector) {
        Ok(selector) => doc.select(&selector),
        Err(err) => {
            tracing::debug!("skipping selector: {}", err);
            None
        }
    }
}

pub(crate) fn by_id(doc: &Document, id: &str, effect: &str) -> Option<NodeId> {
    let node = doc.element_by_id(id);
    if node.is_none() {
        tracing::debug!("{}: no element with id `{}`", effect, id);
    }
    node
}
