//! Page configuration (`nemesix.toml`)
//!
//! Every field defaults to what the live site uses, so an empty file is a
//! valid configuration:
//!
//! ```toml
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//!
//! [reveal.profiles.animate-card]
//! opacity = [0.0, 1.0]
//! translate_y = [50.0, 0.0]
//! duration_ms = 800
//!
//! [forms]
//! selectors = [".styled-form"]
//!
//! [effects.enabled]
//! particles = false
//!
//! [effects.loading]
//! fade_ms = 300
//!
//! [particles]
//! count = 12
//! ```
//!
//! Supplying `[reveal.profiles]` replaces the whole standard table.

use nemesix_animation::Easing;
use nemesix_core::Selector;
use nemesix_effects::{
    FlashOptions, HoverOptions, InfoBoxOptions, IntroOptions, LoadingOptions, ParticleOptions, ScrollOptions,
    SmoothScrollOptions,
};
use nemesix_reveal::{RevealOptions, RevealTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Root of `nemesix.toml`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub forms: FormsConfig,
    pub effects: EffectsConfig,
    pub particles: ParticleOptions,
}

impl PageConfig {
    /// Parse and check a configuration
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: PageConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and check a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded page config from {}", path.display());
        Ok(config)
    }

    /// Check everything that is parsed lazily at runtime
    ///
    /// Selectors and the root margin are checked here so that a bad value
    /// is reported before any effect is installed.
    pub fn validate(&self) -> Result<()> {
        self.reveal.options().observer_options()?;
        if !self.reveal.profiles.is_empty() {
            Selector::parse(&self.reveal.profiles.selector())?;
        }
        self.forms.form_selectors()?;
        for selector in self.effects.selectors() {
            Selector::parse(selector)?;
        }
        Ok(())
    }
}

/// `[reveal]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub enabled: bool,
    pub threshold: f32,
    pub root_margin: String,
    pub profiles: RevealTable,
}

impl Default for RevealConfig {
    fn default() -> Self {
        let options = RevealOptions::default();
        Self {
            enabled: true,
            threshold: options.threshold,
            root_margin: options.root_margin,
            profiles: RevealTable::standard(),
        }
    }
}

impl RevealConfig {
    pub fn options(&self) -> RevealOptions {
        RevealOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }
}

/// `[forms]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    pub enabled: bool,
    /// Forms to validate; each selector attaches to its first match
    pub selectors: Vec<String>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selectors: vec![
                ".styled-form".to_string(),
                r#"form[action="/login"]"#.to_string(),
                r#"form[action="/register"]"#.to_string(),
            ],
        }
    }
}

impl FormsConfig {
    pub fn form_selectors(&self) -> Result<Vec<Selector>> {
        let selectors = self
            .selectors
            .iter()
            .map(|s| Selector::parse(s))
            .collect::<nemesix_core::Result<Vec<_>>>()?;
        Ok(selectors)
    }
}

/// `[effects.enabled]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectToggles {
    pub loading: bool,
    pub intro: bool,
    pub scroll_indicator: bool,
    pub nav_auto_hide: bool,
    pub scroll_to_top: bool,
    pub hover: bool,
    pub smooth_scroll: bool,
    pub particles: bool,
    pub flash: bool,
    pub nav_selector: bool,
    pub video_teaser: bool,
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            loading: true,
            intro: true,
            scroll_indicator: true,
            nav_auto_hide: true,
            scroll_to_top: true,
            hover: true,
            smooth_scroll: true,
            particles: true,
            flash: true,
            nav_selector: true,
            video_teaser: true,
        }
    }
}

impl EffectToggles {
    /// Names of the enabled effects, in declaration order
    pub fn enabled_names(&self) -> Vec<&'static str> {
        [
            ("loading", self.loading),
            ("intro", self.intro),
            ("scroll_indicator", self.scroll_indicator),
            ("nav_auto_hide", self.nav_auto_hide),
            ("scroll_to_top", self.scroll_to_top),
            ("hover", self.hover),
            ("smooth_scroll", self.smooth_scroll),
            ("particles", self.particles),
            ("flash", self.flash),
            ("nav_selector", self.nav_selector),
            ("video_teaser", self.video_teaser),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

/// `[effects]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub enabled: EffectToggles,
    pub loading: LoadingOptions,
    pub intro: IntroOptions,
    pub scroll: ScrollOptions,
    pub hover: HoverOptions,
    pub smooth_scroll: SmoothScrollOptions,
    pub flash: FlashOptions,
    pub info_boxes: InfoBoxOptions,
    pub nav_selector_id: String,
    pub intro_id: String,
    pub intro_video_id: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: EffectToggles::default(),
            loading: LoadingOptions::default(),
            intro: IntroOptions::default(),
            scroll: ScrollOptions::default(),
            hover: HoverOptions::default(),
            smooth_scroll: SmoothScrollOptions::default(),
            flash: FlashOptions::default(),
            info_boxes: InfoBoxOptions::default(),
            nav_selector_id: "nav-selector".to_string(),
            intro_id: "intro".to_string(),
            intro_video_id: "introVideo".to_string(),
        }
    }
}

impl EffectsConfig {
    /// Every selector string the effects parse at install time
    pub fn selectors(&self) -> [&str; 7] {
        [
            self.intro.logo.as_str(),
            self.intro.nav_items.as_str(),
            self.intro.hero.as_str(),
            self.intro.title.as_str(),
            self.hover.buttons.as_str(),
            self.hover.cards.as_str(),
            self.flash.selector.as_str(),
        ]
    }
}

/// Look up an easing by its configuration name
pub fn parse_easing(name: &str) -> Result<Easing> {
    Ok(name.parse()?)
}
