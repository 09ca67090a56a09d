//! Easing curves
//!
//! Every curve maps 0 to 0 and 1 to 1. Input outside `[0, 1]` is clamped.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Easing functions for tweens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInOutSine,
}

/// An easing name that is not one of [`Easing::ALL`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing `{0}`")]
pub struct UnknownEasing(pub String);

impl Easing {
    pub const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInOutSine,
    ];

    /// Apply easing to a progress value
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// The camelCase name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInOutSine => "easeInOutSine",
        }
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{} at 1", easing);
        }
    }

    #[test]
    fn test_ease_out_cubic_never_overshoots() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = Easing::EaseOutCubic.apply(i as f32 / 100.0);
            assert!(v <= 1.0);
            assert!(v >= last);
            last = v;
        }
        // Decelerates: more than half done at the midpoint
        assert!((Easing::EaseOutCubic.apply(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::EaseInQuad.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseInQuad.apply(2.0), 1.0);
    }

    #[test]
    fn test_names_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert_eq!(
            "bounce".parse::<Easing>(),
            Err(UnknownEasing("bounce".to_string()))
        );
    }

    #[test]
    fn test_serde_camel_case() {
        let easing: Easing = serde_json::from_str("\"easeOutCubic\"").unwrap();
        assert_eq!(easing, Easing::EaseOutCubic);
        assert_eq!(serde_json::to_string(&Easing::EaseInOutSine).unwrap(), "\"easeInOutSine\"");
    }
}
