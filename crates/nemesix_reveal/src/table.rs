//! Marker classes and what revealing them does

use indexmap::IndexMap;
use nemesix_animation::{AnimationSpec, Easing};
use nemesix_core::StyleProperty;
use serde::{Deserialize, Serialize};

fn default_duration() -> u64 {
    800
}

fn default_easing() -> Easing {
    Easing::EaseOutCubic
}

/// A one-shot entrance animation
///
/// Each present property animates from its first to its second value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 2]>,
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    #[serde(default = "default_easing")]
    pub easing: Easing,
}

impl RevealProfile {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            opacity: None,
            translate_x: None,
            translate_y: None,
            scale: None,
            duration_ms,
            easing: default_easing(),
        }
    }

    pub fn opacity(mut self, from: f32, to: f32) -> Self {
        self.opacity = Some([from, to]);
        self
    }

    pub fn translate_x(mut self, from: f32, to: f32) -> Self {
        self.translate_x = Some([from, to]);
        self
    }

    pub fn translate_y(mut self, from: f32, to: f32) -> Self {
        self.translate_y = Some([from, to]);
        self
    }

    pub fn scale(mut self, from: f32, to: f32) -> Self {
        self.scale = Some([from, to]);
        self
    }

    /// The tween this profile plays
    pub fn spec(&self) -> AnimationSpec {
        let tracks = [
            (StyleProperty::Opacity, self.opacity),
            (StyleProperty::TranslateX, self.translate_x),
            (StyleProperty::TranslateY, self.translate_y),
            (StyleProperty::Scale, self.scale),
        ];
        tracks
            .into_iter()
            .filter_map(|(property, range)| range.map(|[from, to]| (property, from, to)))
            .fold(
                AnimationSpec::new(self.duration_ms).easing(self.easing),
                |spec, (property, from, to)| spec.from_to(property, from, to),
            )
    }
}

/// What happens to an element when it is revealed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RevealAction {
    /// Add a companion class; the stylesheet owns the transition
    AddClass { add_class: String },
    /// Play an entrance animation
    Animate(RevealProfile),
}

/// Ordered map from marker class to reveal action
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealTable {
    entries: IndexMap<String, RevealAction>,
}

impl RevealTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's markers: three animated profiles and four class toggles
    pub fn standard() -> Self {
        Self::new()
            .with(
                "animate-card",
                RevealAction::Animate(
                    RevealProfile::new(800)
                        .opacity(0.0, 1.0)
                        .translate_y(50.0, 0.0)
                        .scale(0.9, 1.0),
                ),
            )
            .with(
                "team-member",
                RevealAction::Animate(RevealProfile::new(600).opacity(0.0, 1.0).translate_y(30.0, 0.0)),
            )
            .with(
                "game-info",
                RevealAction::Animate(RevealProfile::new(800).opacity(0.0, 1.0).translate_x(-50.0, 0.0)),
            )
            .with_class("descripcion-izq", "scroll-activo-izq")
            .with_class("descripcion-der", "scroll-activo-der")
            .with_class("img-izq", "scroll-activo-img-izq")
            .with_class("img-der", "scroll-activo-img-der")
    }

    pub fn with(mut self, marker: impl Into<String>, action: RevealAction) -> Self {
        self.entries.insert(marker.into(), action);
        self
    }

    pub fn with_class(self, marker: impl Into<String>, class: impl Into<String>) -> Self {
        self.with(
            marker,
            RevealAction::AddClass {
                add_class: class.into(),
            },
        )
    }

    pub fn get(&self, marker: &str) -> Option<&RevealAction> {
        self.entries.get(marker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RevealAction)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Selector matching every marker, e.g. `.animate-card, .team-member`
    pub fn selector(&self) -> String {
        self.entries
            .keys()
            .map(|marker| format!(".{}", marker))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Actions for the markers in `classes`, in table order
    pub fn actions_for<'a>(&'a self, classes: &'a [String]) -> impl Iterator<Item = &'a RevealAction> + 'a {
        self.entries
            .iter()
            .filter(move |(marker, _)| classes.iter().any(|c| c == *marker))
            .map(|(_, action)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = RevealTable::standard();
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.selector(),
            ".animate-card, .team-member, .game-info, .descripcion-izq, .descripcion-der, .img-izq, .img-der"
        );

        match table.get("animate-card") {
            Some(RevealAction::Animate(profile)) => {
                assert_eq!(profile.duration_ms, 800);
                assert_eq!(profile.scale, Some([0.9, 1.0]));
                assert_eq!(profile.easing, Easing::EaseOutCubic);
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(
            table.get("img-der"),
            Some(&RevealAction::AddClass {
                add_class: "scroll-activo-img-der".to_string()
            })
        );
    }

    #[test]
    fn test_profile_spec() {
        let spec = RevealProfile::new(600).opacity(0.0, 1.0).translate_y(30.0, 0.0).spec();
        assert_eq!(spec.duration_ms, 600);
        assert_eq!(spec.tracks.len(), 2);
        assert_eq!(spec.easing, Easing::EaseOutCubic);
    }

    #[test]
    fn test_actions_for_multiple_markers() {
        let table = RevealTable::standard();
        let classes = vec!["img-der".to_string(), "game-info".to_string()];
        let actions: Vec<_> = table.actions_for(&classes).collect();
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], RevealAction::Animate(_)));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let table: RevealTable = toml::from_str(
            r#"
            [hero-card]
            opacity = [0.0, 1.0]
            translate_y = [20.0, 0.0]
            duration_ms = 400
            easing = "easeOutQuad"

            [banner]
            add_class = "banner-visible"
            "#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        match table.get("hero-card") {
            Some(RevealAction::Animate(profile)) => {
                assert_eq!(profile.duration_ms, 400);
                assert_eq!(profile.easing, Easing::EaseOutQuad);
                assert_eq!(profile.translate_x, None);
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(table.selector(), ".hero-card, .banner");
    }
}
