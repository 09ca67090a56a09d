//! Event types, event context and listener storage
//!
//! Listeners are stored per `(target, event type)` in registration order,
//! and a dispatch invokes them in that order. Events do not bubble: a
//! listener only sees events dispatched at its own target.
//!
//! ```text
//! Host input (scroll, blur, submit, ...)
//!     ↓ Window::dispatch(target, EventContext)
//! ListenerRegistry (callbacks cloned out, registry borrow released)
//!     ↓
//! Listener callbacks run; they may call prevent_default()
//! ```

use indexmap::IndexMap;
use std::cell::Cell;
use std::rc::Rc;

use crate::dom::NodeId;

/// Event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    /// `DOMContentLoaded`
    pub const DOM_READY: EventType = 1;
    /// Window `load` (all resources loaded)
    pub const LOAD: EventType = 2;
    pub const SCROLL: EventType = 3;
    pub const RESIZE: EventType = 4;
    pub const CLICK: EventType = 10;
    pub const POINTER_ENTER: EventType = 11;
    pub const POINTER_LEAVE: EventType = 12;
    pub const FOCUS: EventType = 20;
    pub const BLUR: EventType = 21;
    pub const INPUT: EventType = 22;
    pub const CHANGE: EventType = 23;
    pub const SUBMIT: EventType = 24;
    pub const KEY_DOWN: EventType = 30;

    /// Human-readable name, for logging
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            DOM_READY => "DOMContentLoaded",
            LOAD => "load",
            SCROLL => "scroll",
            RESIZE => "resize",
            CLICK => "click",
            POINTER_ENTER => "mouseenter",
            POINTER_LEAVE => "mouseleave",
            FOCUS => "focus",
            BLUR => "blur",
            INPUT => "input",
            CHANGE => "change",
            SUBMIT => "submit",
            KEY_DOWN => "keydown",
            _ => "unknown",
        }
    }
}

/// Where an event is dispatched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

impl From<NodeId> for EventTarget {
    fn from(node: NodeId) -> Self {
        EventTarget::Node(node)
    }
}

/// Context passed to event listeners
#[derive(Clone, Debug)]
pub struct EventContext {
    /// The type of event that occurred
    pub event_type: EventType,
    /// Where the event was dispatched
    pub target: EventTarget,
    /// Key name for KEY_DOWN events (`"Enter"`, `"a"`, ...)
    pub key: Option<String>,
    /// Window scroll offset at dispatch time
    pub scroll_y: f32,
    default_prevented: Cell<bool>,
}

impl EventContext {
    /// Create a new event context
    pub fn new(event_type: EventType, target: EventTarget) -> Self {
        Self {
            event_type,
            target,
            key: None,
            scroll_y: 0.0,
            default_prevented: Cell::new(false),
        }
    }

    /// Set the key (for KEY_DOWN events)
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the window scroll offset
    pub fn with_scroll_y(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// The node this event was dispatched at, if any
    pub fn node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Cancel the default action (form submission, anchor navigation)
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Callback for handling events
///
/// Uses Rc since the page runs on a single thread.
pub type EventCallback = Rc<dyn Fn(&EventContext)>;

/// Handle to a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Listener {
    target: EventTarget,
    event_type: EventType,
    callback: EventCallback,
}

/// All listeners of a window, kept in registration order
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: IndexMap<ListenerId, Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its handle
    pub fn add<F>(&mut self, target: EventTarget, event_type: EventType, callback: F) -> ListenerId
    where
        F: Fn(&EventContext) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            Listener {
                target,
                event_type,
                callback: Rc::new(callback),
            },
        );
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Check if a target has listeners for an event type
    pub fn has_listener(&self, target: EventTarget, event_type: EventType) -> bool {
        self.listeners
            .values()
            .any(|l| l.target == target && l.event_type == event_type)
    }

    /// Callbacks for a target and event type, in registration order
    ///
    /// Returned as clones so the caller can release the registry before
    /// invoking them (listeners may register or remove listeners).
    pub fn callbacks_for(&self, target: EventTarget, event_type: EventType) -> Vec<EventCallback> {
        self.listeners
            .values()
            .filter(|l| l.target == target && l.event_type == event_type)
            .map(|l| Rc::clone(&l.callback))
            .collect()
    }

    /// Drop every listener attached to a node (e.g. after it was removed)
    pub fn remove_target(&mut self, target: EventTarget) {
        self.listeners.retain(|_, l| l.target != target);
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
