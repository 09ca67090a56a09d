//! Geometry primitives: rectangles, viewport and observer root margins

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Axis-aligned rectangle in document coordinates (pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Check whether a point lies inside the rectangle (edges inclusive)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < x || bottom < y {
            return None;
        }

        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Grow (or shrink, for negative values) each edge by the given margin
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// The visible window area and its vertical scroll position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible rectangle in document coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Margin applied to the observer root before intersecting, in CSS
/// shorthand order (top, right, bottom, left)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Parse CSS margin shorthand with 1 to 4 pixel values
    ///
    /// `"0px 0px -50px 0px"` shrinks the root by 50px at the bottom.
    pub fn parse(input: &str) -> Result<Self> {
        let values = input
            .split_whitespace()
            .map(parse_px)
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| CoreError::InvalidRootMargin(input.to_string()))?;

        match values.as_slice() {
            [all] => Ok(Self::new(*all, *all, *all, *all)),
            [vertical, horizontal] => Ok(Self::new(*vertical, *horizontal, *vertical, *horizontal)),
            [top, horizontal, bottom] => Ok(Self::new(*top, *horizontal, *bottom, *horizontal)),
            [top, right, bottom, left] => Ok(Self::new(*top, *right, *bottom, *left)),
            _ => Err(CoreError::InvalidRootMargin(input.to_string())),
        }
    }
}

fn parse_px(token: &str) -> Option<f32> {
    let number = token.strip_suffix("px").unwrap_or(token);
    // Bare numbers are only allowed for zero, as in CSS
    if number.len() == token.len() && token != "0" {
        return None;
    }
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

impl FromStr for RootMargin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert!((i.area() - 1000.0).abs() < 1e-3);

        let far = Rect::new(500.0, 500.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn test_root_margin_shorthand() {
        assert_eq!(
            RootMargin::parse("0px 0px -50px 0px").unwrap(),
            RootMargin::new(0.0, 0.0, -50.0, 0.0)
        );
        assert_eq!(
            RootMargin::parse("10px").unwrap(),
            RootMargin::new(10.0, 10.0, 10.0, 10.0)
        );
        assert_eq!(
            RootMargin::parse("10px 20px").unwrap(),
            RootMargin::new(10.0, 20.0, 10.0, 20.0)
        );
        assert_eq!(
            RootMargin::parse("1px 2px 3px").unwrap(),
            RootMargin::new(1.0, 2.0, 3.0, 2.0)
        );
        assert_eq!(RootMargin::parse("0").unwrap(), RootMargin::default());
    }

    #[test]
    fn test_root_margin_rejects_garbage() {
        assert!(RootMargin::parse("").is_err());
        assert!(RootMargin::parse("10").is_err());
        assert!(RootMargin::parse("1px 2px 3px 4px 5px").is_err());
        assert!(RootMargin::parse("abcpx").is_err());
    }

    #[test]
    fn test_expand_with_negative_bottom() {
        let viewport = Viewport::new(800.0, 600.0).rect();
        let shrunk = viewport.expand(&RootMargin::parse("0px 0px -50px 0px").unwrap());
        assert_eq!(shrunk.bottom(), 550.0);
        assert_eq!(shrunk.width, 800.0);
    }
}
