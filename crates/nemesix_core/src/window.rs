//! The page host
//!
//! `Window` is a cheap, clonable handle that bundles the document, the
//! listener registry, the timer queue, intersection observers, frame
//! callbacks and the viewport. Hosts push input through the `fire_*`,
//! interaction and [`Window::advance`] methods; page behaviours register
//! listeners, timers and observers against it.
//!
//! No `RefCell` borrow is held while a callback runs, so callbacks are free
//! to touch the document, schedule timers or dispatch further events.
//!
//! # Example
//!
//! ```rust
//! use nemesix_core::{event_types, EventTarget, Window};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let window = Window::new(1280.0, 720.0);
//! let ready = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&ready);
//! window.add_event_listener(EventTarget::Document, event_types::DOM_READY, move |_| {
//!     flag.set(true);
//! });
//!
//! window.fire_dom_ready();
//! assert!(ready.get());
//! ```

use slotmap::{new_key_type, SlotMap};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::dom::{Document, NodeId};
use crate::events::{event_types, EventContext, EventTarget, EventType, ListenerId, ListenerRegistry};
use crate::geometry::Viewport;
use crate::observer::{IntersectionEntry, ObserverId, ObserverOptions, ObserverRegistry};
use crate::timer::{TimerId, TimerQueue};

/// Length of one animation frame of the virtual clock
pub const FRAME_MS: u64 = 16;

new_key_type! {
    /// Handle to a registered frame callback
    pub struct FrameCallbackId;
}

/// Called once per frame with the elapsed milliseconds
pub type FrameCallback = Rc<dyn Fn(f32)>;

/// What happened to a submitted form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A listener cancelled the submission; nothing was sent
    Cancelled,
    /// The default action ran; the browser would navigate to `action`
    Submitted { action: Option<String> },
}

impl SubmitOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitOutcome::Cancelled)
    }
}

/// A navigation caused by a default action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub form: NodeId,
    pub action: Option<String>,
}

struct WindowInner {
    document: Rc<RefCell<Document>>,
    listeners: RefCell<ListenerRegistry>,
    timers: RefCell<TimerQueue>,
    observers: RefCell<ObserverRegistry>,
    frame_callbacks: RefCell<SlotMap<FrameCallbackId, FrameCallback>>,
    viewport: Cell<Viewport>,
    now_ms: Cell<u64>,
    location_hash: RefCell<String>,
    navigations: RefCell<Vec<Navigation>>,
}

/// Shared handle to the page host
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

/// Non-owning window handle for callbacks stored inside the window
#[derive(Clone)]
pub struct WeakWindow {
    inner: Weak<WindowInner>,
}

impl WeakWindow {
    pub fn upgrade(&self) -> Option<Window> {
        self.inner.upgrade().map(|inner| Window { inner })
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("viewport", &self.inner.viewport.get())
            .field("now_ms", &self.inner.now_ms.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .field("timers", &self.inner.timers.borrow().len())
            .finish()
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::with_document(Document::new(), Viewport::default())
    }
}

impl Window {
    /// Create a window with an empty document
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_document(Document::new(), Viewport::new(width, height))
    }

    /// Create a window around an existing document
    pub fn with_document(document: Document, viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                document: Rc::new(RefCell::new(document)),
                listeners: RefCell::new(ListenerRegistry::new()),
                timers: RefCell::new(TimerQueue::new()),
                observers: RefCell::new(ObserverRegistry::new()),
                frame_callbacks: RefCell::new(SlotMap::with_key()),
                viewport: Cell::new(viewport),
                now_ms: Cell::new(0),
                location_hash: RefCell::new(String::new()),
                navigations: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakWindow {
        WeakWindow {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // =========================================================================
    // Document access
    // =========================================================================

    /// Borrow the document immutably
    ///
    /// Do not hold the borrow across calls that run callbacks.
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    /// Borrow the document mutably
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    /// Run a closure with mutable document access
    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.document.borrow_mut())
    }

    // =========================================================================
    // Viewport and clock
    // =========================================================================

    pub fn viewport(&self) -> Viewport {
        self.inner.viewport.get()
    }

    pub fn scroll_y(&self) -> f32 {
        self.inner.viewport.get().scroll_y
    }

    pub fn inner_width(&self) -> f32 {
        self.inner.viewport.get().width
    }

    pub fn inner_height(&self) -> f32 {
        self.inner.viewport.get().height
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        let height = self.document().scroll_height();
        (height - self.inner_height()).max(0.0)
    }

    /// Milliseconds elapsed on the virtual clock
    pub fn now_ms(&self) -> u64 {
        self.inner.now_ms.get()
    }

    pub fn location_hash(&self) -> String {
        self.inner.location_hash.borrow().clone()
    }

    /// Set `location.hash`; a leading `#` is added when missing
    pub fn set_location_hash(&self, hash: &str) {
        let hash = if hash.starts_with('#') {
            hash.to_string()
        } else {
            format!("#{}", hash)
        };
        *self.inner.location_hash.borrow_mut() = hash;
    }

    /// Navigations triggered by form submissions, oldest first
    pub fn navigations(&self) -> Vec<Navigation> {
        self.inner.navigations.borrow().clone()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_event_listener<F>(&self, target: EventTarget, event_type: EventType, callback: F) -> ListenerId
    where
        F: Fn(&EventContext) + 'static,
    {
        self.inner
            .listeners
            .borrow_mut()
            .add(target, event_type, callback)
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id)
    }

    pub fn has_listener(&self, target: EventTarget, event_type: EventType) -> bool {
        self.inner
            .listeners
            .borrow()
            .has_listener(target, event_type)
    }

    /// Dispatch an event to the listeners of `target`
    ///
    /// Returns the context so callers can inspect `default_prevented()`.
    pub fn dispatch(&self, event: EventContext) -> EventContext {
        let callbacks = self
            .inner
            .listeners
            .borrow()
            .callbacks_for(event.target, event.event_type);

        tracing::trace!(
            "dispatch {} to {:?} ({} listeners)",
            event_types::name(event.event_type),
            event.target,
            callbacks.len()
        );

        for callback in callbacks {
            callback(&event);
        }
        event
    }

    fn event(&self, event_type: EventType, target: EventTarget) -> EventContext {
        EventContext::new(event_type, target).with_scroll_y(self.scroll_y())
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Fire `DOMContentLoaded` on the document
    pub fn fire_dom_ready(&self) {
        self.dispatch(self.event(event_types::DOM_READY, EventTarget::Document));
    }

    /// Fire `load` on the window
    pub fn fire_load(&self) {
        self.dispatch(self.event(event_types::LOAD, EventTarget::Window));
    }

    /// Scroll the window (clamped to the content), fire `scroll` and
    /// re-check intersection observers
    pub fn scroll_to(&self, y: f32) {
        let y = y.clamp(0.0, self.max_scroll());
        let mut viewport = self.viewport();
        viewport.scroll_y = y;
        self.inner.viewport.set(viewport);

        self.dispatch(self.event(event_types::SCROLL, EventTarget::Window));
        self.update_intersections();
    }

    /// Change the viewport size, fire `resize` and re-check observers
    pub fn resize(&self, width: f32, height: f32) {
        let mut viewport = self.viewport();
        viewport.width = width;
        viewport.height = height;
        self.inner.viewport.set(viewport);

        self.dispatch(self.event(event_types::RESIZE, EventTarget::Window));
        self.update_intersections();
    }

    pub fn click(&self, node: NodeId) -> EventContext {
        self.dispatch(self.event(event_types::CLICK, node.into()))
    }

    pub fn focus(&self, node: NodeId) {
        self.dispatch(self.event(event_types::FOCUS, node.into()));
    }

    pub fn blur(&self, node: NodeId) {
        self.dispatch(self.event(event_types::BLUR, node.into()));
    }

    /// Replace a field's value and fire `input`
    pub fn type_text(&self, node: NodeId, value: &str) {
        self.document_mut().set_value(node, value);
        self.dispatch(self.event(event_types::INPUT, node.into()));
    }

    /// Replace a control's value and fire `change`
    pub fn change(&self, node: NodeId, value: &str) {
        self.document_mut().set_value(node, value);
        self.dispatch(self.event(event_types::CHANGE, node.into()));
    }

    /// Fire `keydown` on the document
    pub fn key_down(&self, key: &str) {
        self.dispatch(self.event(event_types::KEY_DOWN, EventTarget::Document).with_key(key));
    }

    pub fn pointer_enter(&self, node: NodeId) {
        self.dispatch(self.event(event_types::POINTER_ENTER, node.into()));
    }

    pub fn pointer_leave(&self, node: NodeId) {
        self.dispatch(self.event(event_types::POINTER_LEAVE, node.into()));
    }

    /// Fire `submit` on a form; unless cancelled, record the navigation
    pub fn submit(&self, form: NodeId) -> SubmitOutcome {
        let event = self.dispatch(self.event(event_types::SUBMIT, form.into()));
        if event.default_prevented() {
            tracing::debug!("form submission cancelled");
            return SubmitOutcome::Cancelled;
        }

        let action = self.document().attribute(form, "action").map(str::to_string);
        self.inner.navigations.borrow_mut().push(Navigation {
            form,
            action: action.clone(),
        });
        SubmitOutcome::Submitted { action }
    }

    // =========================================================================
    // Timers and frames
    // =========================================================================

    pub fn set_timeout<F>(&self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let now = self.now_ms();
        self.inner
            .timers
            .borrow_mut()
            .set_timeout(now, delay_ms, Box::new(callback))
    }

    pub fn set_interval<F>(&self, period_ms: u64, callback: F) -> TimerId
    where
        F: Fn() + 'static,
    {
        let now = self.now_ms();
        self.inner
            .timers
            .borrow_mut()
            .set_interval(now, period_ms, Rc::new(callback))
    }

    pub fn clear_timer(&self, id: TimerId) -> bool {
        self.inner.timers.borrow_mut().clear(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    pub fn request_frame_callback<F>(&self, callback: F) -> FrameCallbackId
    where
        F: Fn(f32) + 'static,
    {
        self.inner
            .frame_callbacks
            .borrow_mut()
            .insert(Rc::new(callback))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) -> bool {
        self.inner.frame_callbacks.borrow_mut().remove(id).is_some()
    }

    /// Advance the virtual clock
    ///
    /// Time moves in frames of [`FRAME_MS`]. Within each frame, due timers
    /// fire in order; then frame callbacks run and observers are checked.
    pub fn advance(&self, ms: u64) {
        let end = self.now_ms() + ms;

        while self.now_ms() < end {
            let frame_end = (self.now_ms() + FRAME_MS).min(end);
            let step = frame_end - self.now_ms();

            loop {
                let due = self.inner.timers.borrow_mut().pop_due(frame_end);
                let Some((due_ms, timer)) = due else {
                    break;
                };
                self.inner.now_ms.set(due_ms.max(self.now_ms()));
                timer.invoke();
            }

            self.inner.now_ms.set(frame_end);
            self.run_frame_callbacks(step as f32);
            self.update_intersections();
        }
    }

    fn run_frame_callbacks(&self, dt_ms: f32) {
        let callbacks: Vec<FrameCallback> = self
            .inner
            .frame_callbacks
            .borrow()
            .values()
            .map(Rc::clone)
            .collect();
        for callback in callbacks {
            callback(dt_ms);
        }
    }

    // =========================================================================
    // Intersection observers
    // =========================================================================

    pub fn create_intersection_observer<F>(&self, options: ObserverOptions, callback: F) -> ObserverId
    where
        F: Fn(&[IntersectionEntry]) + 'static,
    {
        self.inner
            .observers
            .borrow_mut()
            .create(options, Rc::new(callback))
    }

    pub fn observe(&self, observer: ObserverId, node: NodeId) {
        self.inner.observers.borrow_mut().observe(observer, node);
    }

    pub fn unobserve(&self, observer: ObserverId, node: NodeId) {
        self.inner.observers.borrow_mut().unobserve(observer, node);
    }

    pub fn disconnect_observer(&self, observer: ObserverId) -> bool {
        self.inner.observers.borrow_mut().disconnect(observer)
    }

    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.inner.observers.borrow().observed_count(observer)
    }

    /// Check every observer now and deliver pending entries
    pub fn update_intersections(&self) {
        let viewport = self.viewport().rect();
        let batches = {
            let doc = self.inner.document.borrow();
            self.inner.observers.borrow_mut().check(&doc, viewport)
        };
        for (callback, entries) in batches {
            callback(&entries);
        }
    }
}
