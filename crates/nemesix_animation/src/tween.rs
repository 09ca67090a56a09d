//! Tween definitions
//!
//! An [`AnimationSpec`] describes what to animate and how; it holds no
//! target and no state, so one spec can be started on many nodes.
//!
//! # Example
//!
//! ```rust
//! use nemesix_animation::{AnimationSpec, Easing};
//! use nemesix_core::StyleProperty;
//!
//! // Staggered nav items: 100ms apart, starting at 400ms
//! let spec = AnimationSpec::new(600)
//!     .from_to(StyleProperty::Opacity, 0.0, 1.0)
//!     .from_to(StyleProperty::TranslateY, -20.0, 0.0)
//!     .stagger(100, 400)
//!     .easing(Easing::EaseOutCubic);
//!
//! assert_eq!(spec.delay_for(2), 600);
//! ```

use nemesix_core::{NodeId, StyleProperty};
use smallvec::{smallvec, SmallVec};

use crate::easing::Easing;

/// Something a track can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// A numeric inline style property of a node
    Style(StyleProperty),
    /// The window's vertical scroll offset
    ScrollY,
}

impl From<StyleProperty> for Property {
    fn from(property: StyleProperty) -> Self {
        Property::Style(property)
    }
}

/// What a tween writes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Node(NodeId),
    Window,
}

impl From<NodeId> for AnimationTarget {
    fn from(node: NodeId) -> Self {
        AnimationTarget::Node(node)
    }
}

/// Values of one track
#[derive(Clone, Debug, PartialEq)]
pub enum TrackValues {
    /// From the value the property has when the animation starts
    To(f32),
    /// Evenly spaced keyframes
    Keyframes(SmallVec<[f32; 4]>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub property: Property,
    pub values: TrackValues,
}

/// Start delay of each target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delay {
    #[default]
    None,
    Fixed(u64),
    /// `start + step * index`
    Stagger { step: u64, start: u64 },
}

impl Delay {
    pub fn for_index(&self, index: usize) -> u64 {
        match *self {
            Delay::None => 0,
            Delay::Fixed(ms) => ms,
            Delay::Stagger { step, start } => start + step * index as u64,
        }
    }
}

/// A reusable tween description
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration_ms: u64,
    pub easing: Easing,
    pub delay: Delay,
    pub looping: bool,
    pub tracks: SmallVec<[Track; 4]>,
}

impl AnimationSpec {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            easing: Easing::default(),
            delay: Delay::None,
            looping: false,
            tracks: SmallVec::new(),
        }
    }

    /// Animate from the current value to `value`
    pub fn to(mut self, property: impl Into<Property>, value: f32) -> Self {
        self.tracks.push(Track {
            property: property.into(),
            values: TrackValues::To(value),
        });
        self
    }

    /// Animate from `from` to `to`
    pub fn from_to(self, property: impl Into<Property>, from: f32, to: f32) -> Self {
        self.keyframes(property, &[from, to])
    }

    /// Animate through evenly spaced keyframes
    ///
    /// An empty list adds no track.
    pub fn keyframes(mut self, property: impl Into<Property>, values: &[f32]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.tracks.push(Track {
            property: property.into(),
            values: TrackValues::Keyframes(SmallVec::from_slice(values)),
        });
        self
    }

    /// Animate the window scroll offset to `y`
    pub fn scroll_y_to(self, y: f32) -> Self {
        self.to(Property::ScrollY, y)
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay = Delay::Fixed(delay_ms);
        self
    }

    pub fn stagger(mut self, step_ms: u64, start_ms: u64) -> Self {
        self.delay = Delay::Stagger {
            step: step_ms,
            start: start_ms,
        };
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn delay_for(&self, index: usize) -> u64 {
        self.delay.for_index(index)
    }

    /// Resolve a track into keyframes given the property's current value
    pub(crate) fn resolve(track: &Track, current: f32) -> SmallVec<[f32; 4]> {
        match &track.values {
            TrackValues::To(value) => smallvec![current, *value],
            TrackValues::Keyframes(values) => values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let spec = AnimationSpec::new(800)
            .from_to(StyleProperty::Opacity, 0.0, 1.0)
            .to(StyleProperty::Scale, 1.05)
            .keyframes(StyleProperty::TranslateY, &[])
            .delay(200);

        assert_eq!(spec.tracks.len(), 2);
        assert_eq!(spec.delay_for(5), 200);
        assert!(!spec.looping);
        assert_eq!(spec.easing, Easing::Linear);
    }

    #[test]
    fn test_resolve() {
        let to = Track {
            property: Property::ScrollY,
            values: TrackValues::To(0.0),
        };
        assert_eq!(AnimationSpec::resolve(&to, 700.0).as_slice(), &[700.0f32, 0.0]);

        let spec = AnimationSpec::new(100).keyframes(StyleProperty::Opacity, &[0.0, 1.0, 0.0]);
        assert_eq!(
            AnimationSpec::resolve(&spec.tracks[0], 0.5).as_slice(),
            &[0.0f32, 1.0, 0.0]
        );
    }

    #[test]
    fn test_stagger() {
        let delay = Delay::Stagger { step: 100, start: 400 };
        assert_eq!(delay.for_index(0), 400);
        assert_eq!(delay.for_index(3), 700);
        assert_eq!(Delay::None.for_index(3), 0);
    }
}
