//! Floating background particles

use nemesix_animation::{AnimationScheduler, AnimationSpec, Easing};
use nemesix_core::{NodeId, StyleProperty, Window};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    pub count: usize,
    /// How far past the viewport edges a particle may drift
    pub margin: f32,
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 20,
            margin: 200.0,
            min_duration_ms: 3000,
            max_duration_ms: 6000,
            max_delay_ms: 2000,
        }
    }
}

/// Inline style each particle gets
const PARTICLE_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("width", "4px"),
    ("height", "4px"),
    ("background", "rgba(255, 255, 255, 0.3)"),
    ("border-radius", "50%"),
    ("pointer-events", "none"),
    ("z-index", "-1"),
];

/// Uniform value in `[min, max]` from a `[0, 1)` source
fn random_range(rng: &mut impl FnMut() -> f32, min: f32, max: f32) -> f32 {
    min + (max - min) * rng().clamp(0.0, 1.0)
}

/// Append the particles to the body and start their loops
///
/// `rng` yields values in `[0, 1)`; each particle draws its drift target,
/// duration and delay from it.
pub fn spawn_particles(
    window: &Window,
    scheduler: &AnimationScheduler,
    options: &ParticleOptions,
    rng: &mut impl FnMut() -> f32,
) -> Vec<NodeId> {
    let width = window.inner_width();
    let height = window.inner_height();
    let mut particles = Vec::with_capacity(options.count);

    for _ in 0..options.count {
        let particle = {
            let mut doc = window.document_mut();
            let body = doc.body();
            let particle = doc.build(body, "div").class("floating-particle").finish();
            for (name, value) in PARTICLE_STYLE {
                doc.set_style_keyword(particle, name, value);
            }
            particle
        };

        let x = random_range(rng, -options.margin, width + options.margin).round();
        let y = random_range(rng, -options.margin, height + options.margin).round();
        let duration = random_range(
            rng,
            options.min_duration_ms as f32,
            options.max_duration_ms as f32,
        ) as u64;
        let delay = random_range(rng, 0.0, options.max_delay_ms as f32) as u64;

        scheduler.animate(
            &[particle],
            &AnimationSpec::new(duration)
                .to(StyleProperty::TranslateX, x)
                .to(StyleProperty::TranslateY, y)
                .keyframes(StyleProperty::Opacity, &[0.0, 1.0, 0.0])
                .keyframes(StyleProperty::Scale, &[0.0, 1.0, 0.0])
                .delay(delay)
                .easing(Easing::EaseInOutSine)
                .looping(true),
        );
        particles.push(particle);
    }

    tracing::debug!("spawned {} particles", particles.len());
    particles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_looping_particles() {
        let window = Window::new(1000.0, 500.0);
        let scheduler = AnimationScheduler::new(&window);
        let mut rng = || 0.5;

        let particles = spawn_particles(&window, &scheduler, &ParticleOptions::default(), &mut rng);
        assert_eq!(particles.len(), 20);
        assert_eq!(scheduler.active_count(), 20);
        assert_eq!(
            window.document().query_selector_all(".floating-particle").unwrap().len(),
            20
        );
        assert_eq!(
            window.document().style_keyword(particles[0], "position"),
            Some("fixed")
        );

        // delay 1000, duration 4500: halfway through the first loop at 3250
        window.advance(3250);
        let doc = window.document();
        assert_eq!(doc.style_value(particles[0], StyleProperty::Opacity), Some(1.0));
        // Drift target is (500, 250); halfway there with a symmetric curve
        let x = doc.style_value(particles[0], StyleProperty::TranslateX).unwrap();
        assert!((x - 250.0).abs() < 0.01);
        drop(doc);

        window.advance(60_000);
        assert_eq!(scheduler.active_count(), 20);
    }

    #[test]
    fn test_ranges() {
        let mut low = || 0.0;
        let mut high = || 0.999_999;
        assert_eq!(random_range(&mut low, -200.0, 1200.0), -200.0);
        assert!(random_range(&mut high, -200.0, 1200.0) <= 1200.0);
        assert_eq!(random_range(&mut low, 3000.0, 6000.0) as u64, 3000);
    }
}
