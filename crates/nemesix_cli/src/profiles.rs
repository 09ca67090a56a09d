//! Reveal profile listing

use nemesix_animation::Easing;
use nemesix_reveal::{RevealAction, RevealProfile, RevealTable};

/// Keep only the animated profiles using `easing`
pub fn filter_by_easing(table: &RevealTable, easing: Easing) -> RevealTable {
    table
        .iter()
        .filter(|(_, action)| matches!(action, RevealAction::Animate(profile) if profile.easing == easing))
        .fold(RevealTable::new(), |filtered, (marker, action)| {
            filtered.with(marker, action.clone())
        })
}

/// One-line summary of an action
pub fn describe(action: &RevealAction) -> String {
    match action {
        RevealAction::AddClass { add_class } => format!("add class `{}`", add_class),
        RevealAction::Animate(profile) => {
            format!(
                "{}ms {} {}",
                profile.duration_ms,
                profile.easing,
                tracks(profile).join(", ")
            )
        }
    }
}

fn tracks(profile: &RevealProfile) -> Vec<String> {
    [
        ("opacity", profile.opacity),
        ("translateX", profile.translate_x),
        ("translateY", profile.translate_y),
        ("scale", profile.scale),
    ]
    .into_iter()
    .filter_map(|(name, range)| range.map(|[from, to]| format!("{} {}→{}", name, from, to)))
    .collect()
}

/// The table as aligned `marker  action` lines
pub fn render(table: &RevealTable) -> String {
    let width = table.iter().map(|(marker, _)| marker.len()).max().unwrap_or(0);
    table
        .iter()
        .map(|(marker, action)| format!("{:width$}  {}", marker, describe(action), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_standard_profiles() {
        let table = RevealTable::standard();
        let card = table.get("animate-card").unwrap();
        assert_eq!(
            describe(card),
            "800ms easeOutCubic opacity 0→1, translateY 50→0, scale 0.9→1"
        );
        let image = table.get("img-izq").unwrap();
        assert_eq!(describe(image), "add class `scroll-activo-img-izq`");
    }

    #[test]
    fn test_filter_by_easing() {
        let table = RevealTable::standard();
        let cubic = filter_by_easing(&table, Easing::EaseOutCubic);
        assert_eq!(cubic.len(), 3);
        assert_eq!(cubic.selector(), ".animate-card, .team-member, .game-info");
        assert!(filter_by_easing(&table, Easing::Linear).is_empty());
    }

    #[test]
    fn test_render_aligns_markers() {
        let table = RevealTable::new()
            .with_class("card", "visible")
            .with_class("descripcion-izq", "scroll-activo-izq");
        let rendered = render(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "card             add class `visible`");
        assert_eq!(lines[1], "descripcion-izq  add class `scroll-activo-izq`");
    }
}
