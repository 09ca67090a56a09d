//! Viewport reveal engine
//!
//! Every element carrying a marker class from the [`RevealTable`] is
//! watched by one intersection observer. The first time an element is at
//! least `threshold` visible inside the viewport (shrunk by the root
//! margin), the actions of all of its markers run and the element is
//! recorded as revealed. Revealing happens once: an element that leaves
//! and re-enters the viewport is left alone.
//!
//! Only elements present when the engine attaches are watched.

use nemesix_animation::AnimationScheduler;
use nemesix_core::{
    Disposer, IntersectionEntry, NodeId, ObserverId, ObserverOptions, Result, Selector, WeakWindow, Window,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::table::{RevealAction, RevealTable};

fn default_threshold() -> f32 {
    0.1
}

fn default_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

/// Visibility predicate settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealOptions {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            root_margin: default_root_margin(),
        }
    }
}

impl RevealOptions {
    pub fn observer_options(&self) -> Result<ObserverOptions> {
        ObserverOptions::parse(self.threshold, &self.root_margin)
    }
}

#[derive(Default)]
struct RevealState {
    watched: Vec<NodeId>,
    revealed: FxHashSet<NodeId>,
}

/// Handle to an attached reveal engine
pub struct RevealController {
    window: WeakWindow,
    observer: ObserverId,
    state: Rc<RefCell<RevealState>>,
}

impl RevealController {
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.state.borrow().revealed.contains(&node)
    }

    pub fn revealed_count(&self) -> usize {
        self.state.borrow().revealed.len()
    }

    /// Number of elements registered at attach time
    pub fn watched_count(&self) -> usize {
        self.state.borrow().watched.len()
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    /// Stop watching; already revealed elements keep their state
    pub fn dispose(self) {
        let Some(window) = self.window.upgrade() else {
            return;
        };
        let mut disposer = Disposer::new();
        disposer.observer(self.observer);
        disposer.dispose(&window);
    }
}

/// Entry point of the reveal engine
pub struct RevealEngine;

impl RevealEngine {
    /// Observe every current element carrying a marker class
    ///
    /// Fails only if the options carry a malformed root margin or the
    /// table holds a marker that is not a valid class name.
    pub fn attach(
        window: &Window,
        scheduler: &AnimationScheduler,
        table: RevealTable,
        options: &RevealOptions,
    ) -> Result<RevealController> {
        let observer_options = options.observer_options()?;
        let state = Rc::new(RefCell::new(RevealState::default()));

        let watched = if table.is_empty() {
            Vec::new()
        } else {
            let selector = Selector::parse(&table.selector())?;
            window.document().select_all(&selector)
        };

        let table = Rc::new(table);
        let callback = {
            let window = window.downgrade();
            let scheduler = scheduler.clone();
            let state = Rc::clone(&state);
            let table = Rc::clone(&table);
            move |entries: &[IntersectionEntry]| {
                reveal_entries(&window, &scheduler, &table, &state, entries);
            }
        };

        let observer = window.create_intersection_observer(observer_options, callback);
        for &node in &watched {
            window.observe(observer, node);
        }

        tracing::debug!(
            "reveal engine watching {} elements ({} markers)",
            watched.len(),
            table.len()
        );
        state.borrow_mut().watched = watched;

        Ok(RevealController {
            window: window.downgrade(),
            observer,
            state,
        })
    }
}

fn reveal_entries(
    window: &WeakWindow,
    scheduler: &AnimationScheduler,
    table: &RevealTable,
    state: &RefCell<RevealState>,
    entries: &[IntersectionEntry],
) {
    let Some(window) = window.upgrade() else {
        return;
    };

    for entry in entries.iter().filter(|e| e.is_intersecting) {
        let node = entry.target;
        if !state.borrow_mut().revealed.insert(node) {
            continue;
        }

        let actions: Vec<RevealAction> = {
            let doc = window.document();
            table.actions_for(doc.classes(node)).cloned().collect()
        };
        tracing::trace!(
            "revealing node {} ({} actions, ratio {:.2})",
            node.to_raw(),
            actions.len(),
            entry.intersection_ratio
        );

        for action in actions {
            match action {
                RevealAction::AddClass { add_class } => window.document_mut().add_class(node, &add_class),
                RevealAction::Animate(profile) => {
                    scheduler.animate(&[node], &profile.spec());
                }
            }
        }
    }
}
