//! Nemesix Animation System
//!
//! Tweens for the page effects, ticked by the window's frame callbacks.
//!
//! # Features
//!
//! - **Easing**: the curves the page uses, named as in configuration files
//! - **Tweens**: from/to and keyframe tracks with fixed or staggered delays
//! - **Looping**: for spinners and background particles
//! - **Completion Callbacks**: run once, after the final values are written
//! - **Supersede**: a new tween on the same property replaces the old one

pub mod easing;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use easing::{Easing, UnknownEasing};
pub use scheduler::{AnimationId, AnimationScheduler, CompletionCallback};
pub use tween::{AnimationSpec, AnimationTarget, Delay, Property, Track, TrackValues};
pub use values::{sample_keyframes, Interpolate};
