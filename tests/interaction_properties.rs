//! End-to-end behavior of the interaction model, registry, compiler and
//! runtime model through the public library API.

use petgen::codegen::binding::NativeEvent;
use petgen::codegen::CodegenOptions;
use petgen::runtime::{parse_script, PetRuntime};
use petgen::{
    ActionType, EffectType, FeedbackConfig, Interaction, InteractionRegistry, RegistryError,
    SoundEffect, TriggerType, VisualEffect,
};
use serde_json::json;

fn rule(name: &str, trigger: TriggerType, action: ActionType) -> Interaction {
    Interaction::new(name, trigger, action, VisualEffect::none())
}

fn fired_names(runtime: &mut PetRuntime, event: NativeEvent, at: u64) -> Vec<String> {
    runtime.handle(event, at).into_iter().map(|a| a.name).collect()
}

#[test]
fn test_roundtrip_preserves_nested_fields() {
    let original = Interaction::new(
        "tickle",
        TriggerType::MouseLeave,
        ActionType::ChangeAnimation,
        VisualEffect::new(EffectType::Shake).with_duration(250).with_easing("linear"),
    )
    .with_sound(SoundEffect::file("sounds/giggle.ogg", 0.25))
    .with_feedback(FeedbackConfig { audio: true, ..FeedbackConfig::message("hehe") })
    .with_param("animation", "wiggle")
    .disabled();

    let restored = Interaction::from_value(&original.to_value()).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_click_dispatch_in_registration_order() {
    let registry: InteractionRegistry = ["a", "b", "c"]
        .into_iter()
        .map(|name| rule(name, TriggerType::Click, ActionType::Bounce))
        .collect();
    let mut runtime = PetRuntime::new(&registry);
    assert_eq!(fired_names(&mut runtime, NativeEvent::Click, 0), ["a", "b", "c"]);
}

#[test]
fn test_disabled_interaction_exported_but_not_bound() {
    let mut registry = InteractionRegistry::new();
    registry.add(rule("menu", TriggerType::RightClick, ActionType::ShowMenu).disabled());

    let exported = registry.export_value();
    assert_eq!(exported["interactions"][0]["name"], "menu");
    assert_eq!(exported["interactions"][0]["enabled"], false);

    let js = registry.generate_client_code(&CodegenOptions::default());
    assert!(!js.contains("'contextmenu'"));
    let mut runtime = PetRuntime::new(&registry);
    assert!(runtime.handle(NativeEvent::ContextMenu, 0).is_empty());

    assert!(registry.enable("menu"));
    let js = registry.generate_client_code(&CodegenOptions::default());
    assert!(js.contains("this.listen(this.pet, 'contextmenu', (e) => this.handleRightClick(e));"));
    let mut runtime = PetRuntime::new(&registry);
    assert_eq!(fired_names(&mut runtime, NativeEvent::ContextMenu, 0), ["menu"]);
}

#[test]
fn test_long_press_timing() {
    let registry: InteractionRegistry =
        [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();

    let mut runtime = PetRuntime::new(&registry);
    let released_early = runtime.run_script(&parse_script("mousedown@0,mouseup@799,tick@2000").unwrap());
    assert!(released_early.is_empty());

    let mut runtime = PetRuntime::new(&registry);
    let held = runtime.run_script(&parse_script("mousedown@0,tick@800,tick@5000").unwrap());
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].at_ms, 800);
}

#[test]
fn test_hover_and_mouse_enter_fire_together() {
    let hover_only: InteractionRegistry =
        [rule("h", TriggerType::Hover, ActionType::GlowEffect)].into_iter().collect();
    assert_eq!(fired_names(&mut PetRuntime::new(&hover_only), NativeEvent::MouseEnter, 0), ["h"]);

    let enter_only: InteractionRegistry =
        [rule("m", TriggerType::MouseEnter, ActionType::ShowText)].into_iter().collect();
    assert_eq!(fired_names(&mut PetRuntime::new(&enter_only), NativeEvent::MouseEnter, 0), ["m"]);

    let both: InteractionRegistry = [
        rule("h", TriggerType::Hover, ActionType::GlowEffect),
        rule("m", TriggerType::MouseEnter, ActionType::ShowText),
    ]
    .into_iter()
    .collect();
    assert_eq!(fired_names(&mut PetRuntime::new(&both), NativeEvent::MouseEnter, 0), ["h", "m"]);

    let reversed: InteractionRegistry = [
        rule("m", TriggerType::MouseEnter, ActionType::ShowText),
        rule("h", TriggerType::Hover, ActionType::GlowEffect),
    ]
    .into_iter()
    .collect();
    assert_eq!(fired_names(&mut PetRuntime::new(&reversed), NativeEvent::MouseEnter, 0), ["m", "h"]);
}

#[test]
fn test_duplicate_names_remove_first() {
    let mut registry = InteractionRegistry::new();
    registry.add(rule("x", TriggerType::Click, ActionType::Bounce));
    registry.add(rule("x", TriggerType::Hover, ActionType::GlowEffect));

    assert!(registry.remove("x"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("x").unwrap().trigger, TriggerType::Hover);
}

#[test]
fn test_end_to_end_export_document() {
    let mut registry = InteractionRegistry::new();
    registry.add(Interaction::new(
        "click_bounce",
        TriggerType::Click,
        ActionType::Bounce,
        VisualEffect::new(EffectType::Bounce).with_duration(400),
    ));
    registry.add(Interaction::new(
        "hover_glow",
        TriggerType::Hover,
        ActionType::GlowEffect,
        VisualEffect::new(EffectType::Glow),
    ));

    let expected = json!({"interactions": [
        {
            "name": "click_bounce",
            "trigger": "click",
            "action": "bounce",
            "effect": {"type": "bounce", "duration": 400, "easing": "ease-in-out", "params": {}},
            "sound": {"enabled": false, "file": null, "volume": 1.0},
            "feedback": {"visual": true, "audio": false, "haptic": false, "message": null},
            "params": {},
            "enabled": true
        },
        {
            "name": "hover_glow",
            "trigger": "hover",
            "action": "glow_effect",
            "effect": {"type": "glow", "duration": 300, "easing": "ease-in-out", "params": {}},
            "sound": {"enabled": false, "file": null, "volume": 1.0},
            "feedback": {"visual": true, "audio": false, "haptic": false, "message": null},
            "params": {},
            "enabled": true
        }
    ]});
    assert_eq!(registry.export_value(), expected);

    let mut reloaded = InteractionRegistry::new();
    reloaded.import_json(&registry.to_json(false).unwrap()).unwrap();
    assert_eq!(reloaded, registry);
}

#[test]
fn test_failed_import_keeps_existing_rules() {
    let mut registry: InteractionRegistry =
        [rule("keep", TriggerType::Click, ActionType::Bounce)].into_iter().collect();
    let document = json!({"interactions": [
        {"name": "ok", "trigger": "hover", "action": "glow_effect", "effect": {"type": "glow"}},
        {"name": "bad", "trigger": "hover", "action": "glow_effect"}
    ]});

    let err = registry.import_config(&document).unwrap_err();
    assert!(matches!(err, RegistryError::Import { index: 1, .. }));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("keep"));
    assert!(!registry.contains("ok"));
}

#[test]
fn test_each_instance_gets_its_own_params() {
    let mut first = rule("a", TriggerType::Click, ActionType::Bounce);
    let second = rule("b", TriggerType::Click, ActionType::Bounce);
    first.params.insert("height".to_string(), json!(20));
    assert!(second.params.is_empty());
    assert!(second.effect.params.is_empty());
}
