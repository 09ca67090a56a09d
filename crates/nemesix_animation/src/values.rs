//! Animatable values
//!
//! Keyframe sampling for anything that can be linearly interpolated.

use crate::easing::Easing;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Sample evenly spaced keyframes at progress `t`
///
/// The easing is applied within each segment, so a `[0, 1, 0]` track eases
/// in and out of its peak. Returns `None` for an empty list.
pub fn sample_keyframes<T: Interpolate>(values: &[T], t: f32, easing: Easing) -> Option<T> {
    match values {
        [] => None,
        [only] => Some(only.clone()),
        [.., last] if t >= 1.0 => Some(last.clone()),
        _ => {
            let segments = values.len() - 1;
            let scaled = t.clamp(0.0, 1.0) * segments as f32;
            let index = (scaled.floor() as usize).min(segments - 1);
            let local = scaled - index as f32;
            Some(values[index].lerp(&values[index + 1], easing.apply(local)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_keyframes() {
        let values = [50.0f32, 0.0];
        assert_eq!(sample_keyframes(&values, 0.0, Easing::Linear), Some(50.0));
        assert_eq!(sample_keyframes(&values, 0.5, Easing::Linear), Some(25.0));
        assert_eq!(sample_keyframes(&values, 1.0, Easing::Linear), Some(0.0));
    }

    #[test]
    fn test_three_keyframes_peak_in_middle() {
        let values = [0.0f32, 1.0, 0.0];
        assert_eq!(sample_keyframes(&values, 0.5, Easing::EaseInOutSine), Some(1.0));
        assert_eq!(sample_keyframes(&values, 1.0, Easing::EaseInOutSine), Some(0.0));
        let quarter = sample_keyframes(&values, 0.25, Easing::Linear).unwrap();
        assert!((quarter - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_lists() {
        assert_eq!(sample_keyframes::<f32>(&[], 0.5, Easing::Linear), None);
        assert_eq!(sample_keyframes(&[3.0f32], 0.5, Easing::Linear), Some(3.0));
    }
}
