//! Intro sequence played once the loading overlay is gone

use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{StyleProperty, TimerId, Window};
use serde::{Deserialize, Serialize};

use crate::lookup;
use crate::typewriter::typewriter;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroOptions {
    pub logo: String,
    pub nav_items: String,
    pub hero: String,
    pub title: String,
    /// Milliseconds per typed character
    pub typewriter_ms: u64,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            logo: ".animate-logo".to_string(),
            nav_items: ".animate-nav-items .nav-item".to_string(),
            hero: ".hero-content".to_string(),
            title: ".hero-title".to_string(),
            typewriter_ms: 100,
        }
    }
}

/// Slide in the logo, stagger the nav items, raise the hero content and
/// start typing the hero title
///
/// Returns the typewriter interval when a title was found.
pub fn play_intro(window: &Window, scheduler: &AnimationScheduler, options: &IntroOptions) -> Option<TimerId> {
    let (logo, nav_items, hero, title) = {
        let doc = window.document();
        (
            lookup::select_all(&doc, &options.logo),
            lookup::select_all(&doc, &options.nav_items),
            lookup::select_all(&doc, &options.hero),
            lookup::select(&doc, &options.title),
        )
    };

    scheduler.animate(
        &logo,
        &AnimationSpec::new(800)
            .from_to(StyleProperty::Opacity, 0.0, 1.0)
            .from_to(StyleProperty::TranslateX, -30.0, 0.0)
            .delay(200)
            .easing(Easing::EaseOutCubic),
    );
    scheduler.animate(
        &nav_items,
        &AnimationSpec::new(600)
            .from_to(StyleProperty::Opacity, 0.0, 1.0)
            .from_to(StyleProperty::TranslateY, -20.0, 0.0)
            .stagger(100, 400)
            .easing(Easing::EaseOutCubic),
    );
    scheduler.animate(
        &hero,
        &AnimationSpec::new(1000)
            .from_to(StyleProperty::Opacity, 0.0, 1.0)
            .from_to(StyleProperty::TranslateY, 50.0, 0.0)
            .delay(600)
            .easing(Easing::EaseOutCubic),
    );

    tracing::debug!(
        "intro: {} logo, {} nav items, {} hero",
        logo.len(),
        nav_items.len(),
        hero.len()
    );

    let title = title?;
    Some(typewriter(window, title, options.typewriter_ms))
}
