//! Explicit teardown of registrations

use crate::events::ListenerId;
use crate::observer::ObserverId;
use crate::timer::TimerId;
use crate::window::{FrameCallbackId, Window};

/// Collects the handles an engine registered so they can be released
/// together
///
/// Dropping a disposer does not remove anything; registrations live for
/// the page's lifetime unless [`Disposer::dispose`] is called.
#[derive(Debug, Default)]
pub struct Disposer {
    listeners: Vec<ListenerId>,
    observers: Vec<ObserverId>,
    timers: Vec<TimerId>,
    frame_callbacks: Vec<FrameCallbackId>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&mut self, id: ListenerId) -> &mut Self {
        self.listeners.push(id);
        self
    }

    pub fn observer(&mut self, id: ObserverId) -> &mut Self {
        self.observers.push(id);
        self
    }

    pub fn timer(&mut self, id: TimerId) -> &mut Self {
        self.timers.push(id);
        self
    }

    pub fn frame_callback(&mut self, id: FrameCallbackId) -> &mut Self {
        self.frame_callbacks.push(id);
        self
    }

    /// Move every handle of `other` into this disposer
    pub fn extend(&mut self, other: Disposer) {
        self.listeners.extend(other.listeners);
        self.observers.extend(other.observers);
        self.timers.extend(other.timers);
        self.frame_callbacks.extend(other.frame_callbacks);
    }

    /// Number of collected handles
    pub fn len(&self) -> usize {
        self.listeners.len() + self.observers.len() + self.timers.len() + self.frame_callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registration from the window
    pub fn dispose(self, window: &Window) {
        tracing::trace!("disposing {} registrations", self.len());
        for id in self.listeners {
            window.remove_event_listener(id);
        }
        for id in self.observers {
            window.disconnect_observer(id);
        }
        for id in self.timers {
            window.clear_timer(id);
        }
        for id in self.frame_callbacks {
            window.cancel_frame_callback(id);
        }
    }
}
