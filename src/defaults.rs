//! Built-in starter set of interactions.

use serde_json::json;

use crate::models::{
    ActionType, EffectType, FeedbackConfig, Interaction, SoundEffect, TriggerType, VisualEffect,
};
use crate::registry::InteractionRegistry;

/// The six default interactions: click bounce, double-click spin, hover glow,
/// right-click menu, long-press sleep and drag to move.
pub fn default_interactions() -> Vec<Interaction> {
    vec![
        Interaction::new(
            "click_bounce",
            TriggerType::Click,
            ActionType::Bounce,
            VisualEffect::new(EffectType::Bounce).with_duration(400),
        )
        .with_sound(SoundEffect::file("sounds/click.mp3", 0.5))
        .with_feedback(FeedbackConfig::message("Your pet is happy!")),
        Interaction::new(
            "doubleclick_spin",
            TriggerType::DoubleClick,
            ActionType::Spin,
            VisualEffect::new(EffectType::Rotate).with_duration(500),
        )
        .with_sound(SoundEffect::file("sounds/spin.mp3", 0.6))
        .with_param("rotation", 360),
        Interaction::new(
            "hover_glow",
            TriggerType::Hover,
            ActionType::GlowEffect,
            VisualEffect::new(EffectType::Glow).with_duration(300),
        )
        .with_feedback(FeedbackConfig::message("Are you looking at me?")),
        Interaction::new(
            "rightclick_menu",
            TriggerType::RightClick,
            ActionType::ShowMenu,
            VisualEffect::none(),
        )
        .with_param("menu", json!(["Hide", "Settings", "Exit"])),
        Interaction::new(
            "longpress_sleep",
            TriggerType::LongPress,
            ActionType::SleepMode,
            VisualEffect::new(EffectType::Fade).with_duration(800),
        )
        .with_sound(SoundEffect::file("sounds/sleep.mp3", 0.3))
        .with_feedback(FeedbackConfig::message("Good night...")),
        Interaction::new("drag_move", TriggerType::Drag, ActionType::MovePosition, VisualEffect::none())
            .with_feedback(FeedbackConfig::silent()),
    ]
}

/// A registry holding [`default_interactions`].
pub fn default_registry() -> InteractionRegistry {
    default_interactions().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let registry = default_registry();
        assert_eq!(registry.len(), 6);
        assert!(registry.duplicate_names().is_empty());
        assert!(registry.iter().all(|i| i.enabled));
        assert_eq!(registry.get("rightclick_menu").unwrap().params["menu"][2], "Exit");
        assert!(!registry.get("drag_move").unwrap().feedback.visual);
    }

    #[test]
    fn test_defaults_roundtrip_through_document() {
        let registry = default_registry();
        let mut reloaded = InteractionRegistry::new();
        reloaded.import_config(&registry.export_value()).unwrap();
        assert_eq!(reloaded, registry);
    }
}
