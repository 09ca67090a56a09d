//! Intersection observers
//!
//! An observer watches a set of nodes and reports when each one crosses its
//! visibility threshold against the viewport (expanded or shrunk by the
//! root margin). The first check after `observe` always reports the node's
//! state; later checks only report changes.

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use std::rc::Rc;

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::geometry::{Rect, RootMargin};

new_key_type! {
    /// Handle to a registered intersection observer
    pub struct ObserverId;
}

/// Observer configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target area that must be visible (0.0-1.0)
    pub threshold: f32,
    /// Adjustment applied to the viewport before intersecting
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    pub fn new(threshold: f32, root_margin: RootMargin) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
        }
    }

    /// Build from a CSS margin string such as `"0px 0px -50px 0px"`
    pub fn parse(threshold: f32, root_margin: &str) -> Result<Self> {
        Ok(Self::new(threshold, RootMargin::parse(root_margin)?))
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::new(0.0, RootMargin::default())
    }
}

/// One reported state change
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
}

/// Callback receiving a batch of entries
pub type IntersectionCallback = Rc<dyn Fn(&[IntersectionEntry])>;

/// Visible fraction of `target` inside `root`
///
/// A zero-area target counts as fully visible when it lies inside the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f32 {
    let area = target.area();
    if area <= 0.0 {
        return if root.contains_point(target.x, target.y) {
            1.0
        } else {
            0.0
        };
    }
    target
        .intersection(root)
        .map(|i| (i.area() / area).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

struct ObserverState {
    options: ObserverOptions,
    callback: IntersectionCallback,
    /// Last reported state per target (`None` until the first check)
    targets: IndexMap<NodeId, Option<bool>>,
}

/// All observers of a window
#[derive(Default)]
pub struct ObserverRegistry {
    observers: SlotMap<ObserverId, ObserverState>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, options: ObserverOptions, callback: IntersectionCallback) -> ObserverId {
        self.observers.insert(ObserverState {
            options,
            callback,
            targets: IndexMap::new(),
        })
    }

    pub fn observe(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(state) = self.observers.get_mut(observer) {
            state.targets.entry(node).or_insert(None);
        }
    }

    pub fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(state) = self.observers.get_mut(observer) {
            state.targets.shift_remove(&node);
        }
    }

    /// Remove the observer entirely
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.remove(observer).is_some()
    }

    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.observers
            .get(observer)
            .map(|s| s.targets.len())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Recompute every target against `viewport` and collect the entries
    /// to deliver, without invoking any callback
    pub fn check(
        &mut self,
        doc: &Document,
        viewport: Rect,
    ) -> Vec<(IntersectionCallback, Vec<IntersectionEntry>)> {
        let mut batches = Vec::new();

        for (_, state) in self.observers.iter_mut() {
            let root = viewport.expand(&state.options.root_margin);
            let mut entries = Vec::new();

            // Removed nodes are dropped from the watch list
            state.targets.retain(|node, _| doc.contains(*node));

            for (&node, last) in state.targets.iter_mut() {
                let ratio = match doc.bounds(node) {
                    Some(bounds) if doc.is_connected(node) => intersection_ratio(&bounds, &root),
                    _ => 0.0,
                };
                let is_intersecting = if state.options.threshold > 0.0 {
                    ratio >= state.options.threshold
                } else {
                    ratio > 0.0
                };

                if *last != Some(is_intersecting) {
                    *last = Some(is_intersecting);
                    entries.push(IntersectionEntry {
                        target: node,
                        is_intersecting,
                        intersection_ratio: ratio,
                    });
                }
            }

            if !entries.is_empty() {
                batches.push((Rc::clone(&state.callback), entries));
            }
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use std::cell::RefCell;

    #[test]
    fn test_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 0.0, 10.0, 10.0), &root), 1.0);
        assert!((intersection_ratio(&Rect::new(0.0, 90.0, 10.0, 100.0), &root) - 0.1).abs() < 1e-4);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 200.0, 10.0, 10.0), &root), 0.0);
        assert_eq!(intersection_ratio(&Rect::new(5.0, 5.0, 0.0, 0.0), &root), 1.0);
    }

    #[test]
    fn test_reports_initial_state_then_changes_only() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc
            .build(body, "div")
            .bounds(Rect::new(0.0, 1000.0, 100.0, 100.0))
            .finish();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let mut registry = ObserverRegistry::new();
        let id = registry.create(
            ObserverOptions::parse(0.1, "0px 0px -50px 0px").unwrap(),
            Rc::new(move |entries: &[IntersectionEntry]| {
                s.borrow_mut()
                    .extend(entries.iter().map(|e| e.is_intersecting))
            }),
        );
        registry.observe(id, card);

        let mut viewport = Viewport::new(800.0, 600.0);
        let run = |registry: &mut ObserverRegistry, viewport: &Viewport| {
            for (callback, entries) in registry.check(&doc, viewport.rect()) {
                callback(&entries);
            }
        };

        run(&mut registry, &viewport);
        assert_eq!(*seen.borrow(), vec![false]);

        // Unchanged state reports nothing
        run(&mut registry, &viewport);
        assert_eq!(seen.borrow().len(), 1);

        // Card top at 1000, shrunk root bottom = scroll + 550.
        // 10% of 100px visible requires scroll >= 460.
        viewport.scroll_y = 455.0;
        run(&mut registry, &viewport);
        assert_eq!(seen.borrow().len(), 1);

        viewport.scroll_y = 460.0;
        run(&mut registry, &viewport);
        assert_eq!(*seen.borrow(), vec![false, true]);
    }
}
