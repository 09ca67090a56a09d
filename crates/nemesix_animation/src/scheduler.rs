//! Frame-driven animation scheduler
//!
//! The scheduler registers one frame callback on the window and advances
//! every running tween on each frame. Values are computed while the
//! scheduler state is borrowed, then written to the document (and the
//! window scroll offset) after the borrow is released, and only then are
//! completion callbacks invoked. Completion callbacks and scroll listeners
//! may therefore start new animations.
//!
//! # Example
//!
//! ```rust
//! use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
//! use nemesix_core::{StyleProperty, Window};
//!
//! let window = Window::new(1280.0, 720.0);
//! let logo = {
//!     let mut doc = window.document_mut();
//!     let body = doc.body();
//!     doc.build(body, "div").class("animate-logo").finish()
//! };
//!
//! let scheduler = AnimationScheduler::new(&window);
//! scheduler.animate(
//!     &[logo],
//!     &AnimationSpec::new(800)
//!         .from_to(StyleProperty::Opacity, 0.0, 1.0)
//!         .easing(Easing::EaseOutCubic),
//! );
//!
//! window.advance(800);
//! assert_eq!(window.document().style_value(logo, StyleProperty::Opacity), Some(1.0));
//! ```

use nemesix_core::{FrameCallbackId, NodeId, WeakWindow, Window};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::easing::Easing;
use crate::tween::{AnimationSpec, AnimationTarget, Property};
use crate::values::sample_keyframes;

new_key_type! {
    /// Handle to a running animation
    pub struct AnimationId;
}

impl AnimationId {
    /// Convert to a raw u64 for logging
    pub fn to_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Called once when an animation finishes
pub type CompletionCallback = Box<dyn FnOnce()>;

struct ActiveTrack {
    property: Property,
    values: SmallVec<[f32; 4]>,
}

struct TargetState {
    target: AnimationTarget,
    delay_ms: f32,
    tracks: SmallVec<[ActiveTrack; 4]>,
}

struct Animation {
    targets: Vec<TargetState>,
    duration_ms: f32,
    easing: Easing,
    looping: bool,
    elapsed_ms: f32,
    on_complete: Option<CompletionCallback>,
}

impl Animation {
    /// Progress of a target at the current time, `None` while delayed
    fn progress(&self, delay_ms: f32) -> Option<f32> {
        let local = self.elapsed_ms - delay_ms;
        if local < 0.0 {
            return None;
        }
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        if self.looping {
            Some((local % self.duration_ms) / self.duration_ms)
        } else {
            Some((local / self.duration_ms).min(1.0))
        }
    }
}

struct SchedulerInner {
    window: WeakWindow,
    animations: SlotMap<AnimationId, Animation>,
    frame_callback: Option<FrameCallbackId>,
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        if let (Some(window), Some(id)) = (self.window.upgrade(), self.frame_callback) {
            window.cancel_frame_callback(id);
        }
    }
}

/// A computed value waiting to be written
type Write = (AnimationTarget, Property, f32);

/// Tween scheduler bound to one window
///
/// Cloning yields another handle to the same scheduler.
#[derive(Clone)]
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    /// Create a scheduler that ticks on the window's frames
    pub fn new(window: &Window) -> Self {
        let inner = Rc::new(RefCell::new(SchedulerInner {
            window: window.downgrade(),
            animations: SlotMap::with_key(),
            frame_callback: None,
        }));

        let weak: Weak<RefCell<SchedulerInner>> = Rc::downgrade(&inner);
        let id = window.request_frame_callback(move |dt_ms| {
            if let Some(inner) = weak.upgrade() {
                AnimationScheduler { inner }.tick(dt_ms);
            }
        });
        inner.borrow_mut().frame_callback = Some(id);

        Self { inner }
    }

    /// Start an animation on the given nodes
    pub fn animate(&self, nodes: &[NodeId], spec: &AnimationSpec) -> AnimationId {
        let targets = nodes.iter().copied().map(AnimationTarget::Node).collect();
        self.start(targets, spec, None)
    }

    /// Start an animation and run `on_complete` once it has finished
    pub fn animate_with_complete<F>(&self, nodes: &[NodeId], spec: &AnimationSpec, on_complete: F) -> AnimationId
    where
        F: FnOnce() + 'static,
    {
        let targets = nodes.iter().copied().map(AnimationTarget::Node).collect();
        self.start(targets, spec, Some(Box::new(on_complete)))
    }

    /// Start an animation of window properties (scroll offset)
    pub fn animate_window(&self, spec: &AnimationSpec) -> AnimationId {
        self.start(vec![AnimationTarget::Window], spec, None)
    }

    fn start(
        &self,
        targets: Vec<AnimationTarget>,
        spec: &AnimationSpec,
        on_complete: Option<CompletionCallback>,
    ) -> AnimationId {
        let window = self.inner.borrow().window.upgrade();

        // Resolve start values and write them before the first frame
        let mut states = Vec::with_capacity(targets.len());
        let mut writes: Vec<Write> = Vec::new();
        for (index, target) in targets.into_iter().enumerate() {
            let tracks: SmallVec<[ActiveTrack; 4]> = spec
                .tracks
                .iter()
                .map(|track| {
                    let current = window
                        .as_ref()
                        .map(|w| current_value(w, target, track.property))
                        .unwrap_or(0.0);
                    ActiveTrack {
                        property: track.property,
                        values: AnimationSpec::resolve(track, current),
                    }
                })
                .collect();

            for track in &tracks {
                if let Some(first) = track.values.first() {
                    writes.push((target, track.property, *first));
                }
            }

            states.push(TargetState {
                target,
                delay_ms: spec.delay_for(index) as f32,
                tracks,
            });
        }

        let id = {
            let mut inner = self.inner.borrow_mut();
            for state in &states {
                for track in &state.tracks {
                    supersede(&mut inner.animations, state.target, track.property);
                }
            }
            inner.animations.insert(Animation {
                targets: states,
                duration_ms: spec.duration_ms as f32,
                easing: spec.easing,
                looping: spec.looping,
                elapsed_ms: 0.0,
                on_complete,
            })
        };

        tracing::trace!(
            "animation {} started ({}ms, {})",
            id.to_raw(),
            spec.duration_ms,
            spec.easing
        );

        if let Some(window) = window {
            apply_writes(&window, writes);
        }
        id
    }

    /// Stop an animation where it is; its completion callback never runs
    pub fn cancel(&self, id: AnimationId) -> bool {
        self.inner.borrow_mut().animations.remove(id).is_some()
    }

    /// Stop every animation; no completion callback runs
    pub fn cancel_all(&self) -> usize {
        // Dropped after the borrow ends: callbacks may hold scheduler handles
        let removed: Vec<Animation> = self
            .inner
            .borrow_mut()
            .animations
            .drain()
            .map(|(_, animation)| animation)
            .collect();
        removed.len()
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.inner.borrow().animations.contains_key(id)
    }

    /// Number of animations still running
    pub fn active_count(&self) -> usize {
        self.inner.borrow().animations.len()
    }

    /// Advance every animation by `dt_ms`
    ///
    /// Normally driven by the window's frame callback.
    pub fn tick(&self, dt_ms: f32) {
        let mut writes: Vec<Write> = Vec::new();
        let mut completed: Vec<CompletionCallback> = Vec::new();

        let window = {
            let mut inner = self.inner.borrow_mut();
            let mut finished = Vec::new();

            for (id, animation) in inner.animations.iter_mut() {
                animation.elapsed_ms += dt_ms;
                let mut done = true;

                for state in &animation.targets {
                    let Some(progress) = animation.progress(state.delay_ms) else {
                        done = false;
                        continue;
                    };
                    for track in &state.tracks {
                        if let Some(value) = sample_keyframes(&track.values, progress, animation.easing) {
                            writes.push((state.target, track.property, value));
                        }
                    }
                    if animation.looping || progress < 1.0 {
                        done = false;
                    }
                }

                if done {
                    finished.push(id);
                }
            }

            for id in finished {
                if let Some(animation) = inner.animations.remove(id) {
                    tracing::trace!("animation {} finished", id.to_raw());
                    if let Some(callback) = animation.on_complete {
                        completed.push(callback);
                    }
                }
            }

            inner.window.upgrade()
        };

        if let Some(window) = window {
            apply_writes(&window, writes);
        }
        for callback in completed {
            callback();
        }
    }
}

/// Drop the track of any older animation on the same target and property
///
/// An older animation left without tracks is removed without completing.
fn supersede(animations: &mut SlotMap<AnimationId, Animation>, target: AnimationTarget, property: Property) {
    let mut emptied = Vec::new();
    for (id, animation) in animations.iter_mut() {
        for state in animation.targets.iter_mut().filter(|s| s.target == target) {
            state.tracks.retain(|t| t.property != property);
        }
        animation.targets.retain(|s| !s.tracks.is_empty());
        if animation.targets.is_empty() {
            emptied.push(id);
        }
    }
    for id in emptied {
        tracing::trace!("animation {} superseded", id.to_raw());
        animations.remove(id);
    }
}

fn current_value(window: &Window, target: AnimationTarget, property: Property) -> f32 {
    match (target, property) {
        (AnimationTarget::Node(node), Property::Style(style)) => window
            .document()
            .style_value(node, style)
            .unwrap_or_else(|| style.initial_value()),
        (AnimationTarget::Window, Property::ScrollY) => window.scroll_y(),
        _ => 0.0,
    }
}

/// Write node values first (one document borrow), then window values
fn apply_writes(window: &Window, writes: Vec<Write>) {
    let mut scroll = None;
    {
        let mut doc = window.document_mut();
        for (target, property, value) in writes {
            match (target, property) {
                (AnimationTarget::Node(node), Property::Style(style)) => {
                    doc.set_style(node, style, value)
                }
                (AnimationTarget::Window, Property::ScrollY) => scroll = Some(value),
                _ => {}
            }
        }
    }
    if let Some(y) = scroll {
        window.scroll_to(y);
    }
}
