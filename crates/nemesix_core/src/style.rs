//! Inline element style
//!
//! Numeric properties (opacity and the transform components) are what the
//! animation scheduler writes. Keyword properties (`display`, `top`, ...)
//! are plain strings set by effects.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;

/// Numeric style properties that can be tweened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    /// Rotation in turns
    Rotate,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 6] = [
        StyleProperty::Opacity,
        StyleProperty::TranslateX,
        StyleProperty::TranslateY,
        StyleProperty::Scale,
        StyleProperty::ScaleX,
        StyleProperty::Rotate,
    ];

    /// Value an element has when nothing was written
    pub fn initial_value(self) -> f32 {
        match self {
            StyleProperty::Opacity | StyleProperty::Scale | StyleProperty::ScaleX => 1.0,
            StyleProperty::TranslateX | StyleProperty::TranslateY | StyleProperty::Rotate => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::TranslateX => "translateX",
            StyleProperty::TranslateY => "translateY",
            StyleProperty::Scale => "scale",
            StyleProperty::ScaleX => "scaleX",
            StyleProperty::Rotate => "rotate",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inline style of a single node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    numeric: FxHashMap<StyleProperty, f32>,
    keywords: IndexMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a numeric property, falling back to its initial value
    pub fn get(&self, property: StyleProperty) -> f32 {
        self.numeric
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.initial_value())
    }

    /// Value only if it was explicitly written
    pub fn get_explicit(&self, property: StyleProperty) -> Option<f32> {
        self.numeric.get(&property).copied()
    }

    pub fn set(&mut self, property: StyleProperty, value: f32) {
        self.numeric.insert(property, value);
    }

    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.keywords.get(name).map(String::as_str)
    }

    pub fn set_keyword(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.keywords.insert(name.into(), value.into());
    }

    pub fn remove_keyword(&mut self, name: &str) -> Option<String> {
        self.keywords.shift_remove(name)
    }

    /// Whether the node is hidden through `display: none`
    pub fn is_display_none(&self) -> bool {
        self.keyword("display") == Some("none")
    }
}

impl fmt::Display for Style {
    /// Renders the style as CSS text, e.g. `opacity: 0.5; transform: translateY(10px)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if let Some(opacity) = self.get_explicit(StyleProperty::Opacity) {
            parts.push(format!("opacity: {}", opacity));
        }

        let mut transform: Vec<String> = Vec::new();
        if let Some(v) = self.get_explicit(StyleProperty::TranslateX) {
            transform.push(format!("translateX({}px)", v));
        }
        if let Some(v) = self.get_explicit(StyleProperty::TranslateY) {
            transform.push(format!("translateY({}px)", v));
        }
        if let Some(v) = self.get_explicit(StyleProperty::Scale) {
            transform.push(format!("scale({})", v));
        }
        if let Some(v) = self.get_explicit(StyleProperty::ScaleX) {
            transform.push(format!("scaleX({})", v));
        }
        if let Some(v) = self.get_explicit(StyleProperty::Rotate) {
            transform.push(format!("rotate({}turn)", v));
        }
        if !transform.is_empty() {
            parts.push(format!("transform: {}", transform.join(" ")));
        }

        for (name, value) in &self.keywords {
            parts.push(format!("{}: {}", name, value));
        }

        f.write_str(&parts.join("; "))
    }
}
