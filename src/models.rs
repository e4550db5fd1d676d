//! Data models for pet interactions (triggers, actions, effects, rules)
//!
//! An [`Interaction`] is one configured rule: when its trigger fires, play its
//! sound, apply its visual effect, perform its action and show its feedback.
//! The document form produced by [`Interaction::to_value`] is the same shape
//! that is written to `pet_interactions.json` and embedded into generated
//! client code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Free-form parameters attached to effects and interactions.
pub type Params = Map<String, Value>;

/// Default effect duration in milliseconds.
pub const DEFAULT_EFFECT_DURATION_MS: u32 = 300;

/// Default CSS easing curve for effects.
pub const DEFAULT_EASING: &str = "ease-in-out";

/// A user-input event class that an interaction listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Click,
    #[serde(alias = "dblclick")]
    DoubleClick,
    Drag,
    Hover,
    #[serde(alias = "contextmenu")]
    RightClick,
    #[serde(alias = "longpress")]
    LongPress,
    #[serde(alias = "mouseenter")]
    MouseEnter,
    #[serde(alias = "mouseleave")]
    MouseLeave,
}

impl TriggerType {
    /// All triggers in declaration order.
    pub const ALL: [TriggerType; 8] = [
        TriggerType::Click,
        TriggerType::DoubleClick,
        TriggerType::Drag,
        TriggerType::Hover,
        TriggerType::RightClick,
        TriggerType::LongPress,
        TriggerType::MouseEnter,
        TriggerType::MouseLeave,
    ];

    /// The serialized name of this trigger.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Click => "click",
            TriggerType::DoubleClick => "double_click",
            TriggerType::Drag => "drag",
            TriggerType::Hover => "hover",
            TriggerType::RightClick => "right_click",
            TriggerType::LongPress => "long_press",
            TriggerType::MouseEnter => "mouse_enter",
            TriggerType::MouseLeave => "mouse_leave",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The behavior an interaction requests when its trigger fires.
///
/// Purely a tag: the generated client code owns the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[serde(alias = "playSound")]
    PlaySound,
    #[serde(alias = "changeAnimation")]
    ChangeAnimation,
    #[serde(alias = "showText")]
    ShowText,
    #[serde(alias = "toggleFullscreen")]
    ToggleFullscreen,
    #[serde(alias = "changeSkin")]
    ChangeSkin,
    #[serde(alias = "movePosition")]
    MovePosition,
    #[serde(alias = "showTooltip")]
    ShowTooltip,
    #[serde(alias = "glowEffect")]
    GlowEffect,
    #[serde(alias = "showMenu")]
    ShowMenu,
    Hide,
    #[serde(alias = "openSettings")]
    OpenSettings,
    Exit,
    #[serde(alias = "sleepMode")]
    SleepMode,
    Bounce,
    Spin,
    Shake,
}

impl ActionType {
    /// All actions in declaration order.
    pub const ALL: [ActionType; 16] = [
        ActionType::PlaySound,
        ActionType::ChangeAnimation,
        ActionType::ShowText,
        ActionType::ToggleFullscreen,
        ActionType::ChangeSkin,
        ActionType::MovePosition,
        ActionType::ShowTooltip,
        ActionType::GlowEffect,
        ActionType::ShowMenu,
        ActionType::Hide,
        ActionType::OpenSettings,
        ActionType::Exit,
        ActionType::SleepMode,
        ActionType::Bounce,
        ActionType::Spin,
        ActionType::Shake,
    ];

    /// The serialized name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::PlaySound => "play_sound",
            ActionType::ChangeAnimation => "change_animation",
            ActionType::ShowText => "show_text",
            ActionType::ToggleFullscreen => "toggle_fullscreen",
            ActionType::ChangeSkin => "change_skin",
            ActionType::MovePosition => "move_position",
            ActionType::ShowTooltip => "show_tooltip",
            ActionType::GlowEffect => "glow_effect",
            ActionType::ShowMenu => "show_menu",
            ActionType::Hide => "hide",
            ActionType::OpenSettings => "open_settings",
            ActionType::Exit => "exit",
            ActionType::SleepMode => "sleep_mode",
            ActionType::Bounce => "bounce",
            ActionType::Spin => "spin",
            ActionType::Shake => "shake",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient visual treatment applied alongside an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    None,
    Fade,
    Scale,
    Rotate,
    Glow,
    Shake,
    Bounce,
    Pulse,
    Ripple,
}

impl EffectType {
    /// All effects in declaration order.
    pub const ALL: [EffectType; 9] = [
        EffectType::None,
        EffectType::Fade,
        EffectType::Scale,
        EffectType::Rotate,
        EffectType::Glow,
        EffectType::Shake,
        EffectType::Bounce,
        EffectType::Pulse,
        EffectType::Ripple,
    ];

    /// The serialized name of this effect.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::None => "none",
            EffectType::Fade => "fade",
            EffectType::Scale => "scale",
            EffectType::Rotate => "rotate",
            EffectType::Glow => "glow",
            EffectType::Shake => "shake",
            EffectType::Bounce => "bounce",
            EffectType::Pulse => "pulse",
            EffectType::Ripple => "ripple",
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sound cue played when an interaction fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundEffect {
    pub enabled: bool,
    pub file: Option<String>,
    pub volume: f64,
}

impl Default for SoundEffect {
    fn default() -> Self {
        Self { enabled: false, file: None, volume: 1.0 }
    }
}

impl SoundEffect {
    /// An enabled sound cue for `file` at `volume`.
    pub fn file(file: impl Into<String>, volume: f64) -> Self {
        Self { enabled: true, file: Some(file.into()), volume }
    }
}

/// Visual effect descriptor: type, duration in milliseconds, easing curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_easing")]
    pub easing: String,
    #[serde(default)]
    pub params: Params,
}

fn default_duration() -> u32 {
    DEFAULT_EFFECT_DURATION_MS
}

fn default_easing() -> String {
    DEFAULT_EASING.to_string()
}

impl VisualEffect {
    /// Effect of the given type with the default duration and easing.
    pub fn new(effect_type: EffectType) -> Self {
        Self {
            effect_type,
            duration: DEFAULT_EFFECT_DURATION_MS,
            easing: default_easing(),
            params: Params::new(),
        }
    }

    /// Set the duration in milliseconds.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    /// No visual treatment.
    pub fn none() -> Self {
        Self::new(EffectType::None)
    }
}

/// Feedback shown after an interaction fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub visual: bool,
    pub audio: bool,
    /// Reserved, never acted upon by generated code
    pub haptic: bool,
    pub message: Option<String>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self { visual: true, audio: false, haptic: false, message: None }
    }
}

impl FeedbackConfig {
    /// Visual feedback carrying a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::default() }
    }

    /// No visual feedback and no message.
    pub fn silent() -> Self {
        Self { visual: false, ..Self::default() }
    }
}

/// One configured trigger → action → effect → sound → feedback rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    pub trigger: TriggerType,
    pub action: ActionType,
    pub effect: VisualEffect,
    #[serde(default)]
    pub sound: SoundEffect,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub params: Params,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Error when an interaction document cannot be turned into an [`Interaction`].
#[derive(Debug, Error)]
pub enum InteractionError {
    /// The document is not a JSON object
    #[error("interaction must be an object, found {0}")]
    NotAnObject(&'static str),
    /// A required field is absent
    #[error("interaction is missing required field '{0}'")]
    MissingField(&'static str),
    /// A field is present but has the wrong shape or an unknown value
    #[error("interaction '{name}' has an invalid field: {source}")]
    InvalidField {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fields without which an interaction document is rejected.
const REQUIRED_FIELDS: [&str; 4] = ["name", "trigger", "action", "effect"];

impl Interaction {
    /// Create an enabled interaction with default sound, feedback and params.
    pub fn new(
        name: impl Into<String>,
        trigger: TriggerType,
        action: ActionType,
        effect: VisualEffect,
    ) -> Self {
        Self {
            name: name.into(),
            trigger,
            action,
            effect,
            sound: SoundEffect::default(),
            feedback: FeedbackConfig::default(),
            params: Params::new(),
            enabled: true,
        }
    }

    pub fn with_sound(mut self, sound: SoundEffect) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_feedback(mut self, feedback: FeedbackConfig) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set a single parameter, replacing any previous value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Mark the interaction as disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Canonical nested document for this interaction.
    pub fn to_value(&self) -> Value {
        // Every field is a string, number, bool or JSON map, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Parse an interaction from its document form.
    ///
    /// `name`, `trigger`, `action` and `effect` are required; `sound`,
    /// `feedback`, `params` and `enabled` take their defaults when absent.
    pub fn from_value(value: &Value) -> Result<Self, InteractionError> {
        let object = value.as_object().ok_or(InteractionError::NotAnObject(json_kind(value)))?;

        for field in REQUIRED_FIELDS {
            if object.get(field).map_or(true, Value::is_null) {
                return Err(InteractionError::MissingField(field));
            }
        }

        serde_json::from_value(value.clone()).map_err(|source| InteractionError::InvalidField {
            name: object.get("name").and_then(Value::as_str).unwrap_or("<unnamed>").to_string(),
            source,
        })
    }
}

/// Short description of a JSON value's kind for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Interaction {
        Interaction::new(
            "click_bounce",
            TriggerType::Click,
            ActionType::Bounce,
            VisualEffect::new(EffectType::Bounce).with_duration(400),
        )
        .with_sound(SoundEffect::file("sounds/click.mp3", 0.5))
        .with_feedback(FeedbackConfig::message("Your pet is happy!"))
        .with_param("height", 12)
    }

    #[test]
    fn test_interaction_roundtrip() {
        let interaction = sample();
        let parsed = Interaction::from_value(&interaction.to_value()).unwrap();
        assert_eq!(parsed, interaction);
    }

    #[test]
    fn test_to_value_is_nested() {
        let value = sample().to_value();
        assert_eq!(value["effect"]["type"], "bounce");
        assert_eq!(value["effect"]["duration"], 400);
        assert_eq!(value["effect"]["easing"], "ease-in-out");
        assert_eq!(value["sound"]["file"], "sounds/click.mp3");
        assert_eq!(value["feedback"]["haptic"], false);
        assert_eq!(value["params"]["height"], 12);
        assert_eq!(value["enabled"], true);
    }

    #[test]
    fn test_defaults_materialized_per_instance() {
        let mut a = Interaction::new("a", TriggerType::Click, ActionType::Hide, VisualEffect::none());
        let b = Interaction::new("b", TriggerType::Click, ActionType::Hide, VisualEffect::none());
        a.params.insert("k".to_string(), json!(1));
        a.effect.params.insert("k".to_string(), json!(1));
        assert!(b.params.is_empty());
        assert!(b.effect.params.is_empty());
    }

    #[test]
    fn test_from_value_defaults_sound_and_feedback() {
        let doc = json!({
            "name": "hover_glow",
            "trigger": "hover",
            "action": "glow_effect",
            "effect": {"type": "glow"}
        });
        let interaction = Interaction::from_value(&doc).unwrap();
        assert_eq!(interaction.sound, SoundEffect::default());
        assert_eq!(interaction.feedback, FeedbackConfig::default());
        assert_eq!(interaction.effect.duration, 300);
        assert_eq!(interaction.effect.easing, "ease-in-out");
        assert!(interaction.params.is_empty());
        assert!(interaction.enabled);
    }

    #[test]
    fn test_from_value_missing_required_fields() {
        let full = json!({
            "name": "n",
            "trigger": "click",
            "action": "bounce",
            "effect": {"type": "none"}
        });
        for field in REQUIRED_FIELDS {
            let mut doc = full.clone();
            doc.as_object_mut().unwrap().remove(field);
            match Interaction::from_value(&doc) {
                Err(InteractionError::MissingField(missing)) => assert_eq!(missing, field),
                other => panic!("expected MissingField({}), got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_from_value_rejects_unknown_trigger() {
        let doc = json!({
            "name": "n",
            "trigger": "telepathy",
            "action": "bounce",
            "effect": {"type": "none"}
        });
        let err = Interaction::from_value(&doc).unwrap_err();
        assert!(matches!(err, InteractionError::InvalidField { ref name, .. } if name == "n"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Interaction::from_value(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_legacy_spellings_accepted() {
        let doc = json!({
            "name": "menu",
            "trigger": "contextmenu",
            "action": "showMenu",
            "effect": {"type": "none"}
        });
        let interaction = Interaction::from_value(&doc).unwrap();
        assert_eq!(interaction.trigger, TriggerType::RightClick);
        assert_eq!(interaction.action, ActionType::ShowMenu);
        // Re-serializes with the canonical spelling
        assert_eq!(interaction.to_value()["trigger"], "right_click");
    }

    #[test]
    fn test_as_str_matches_serde() {
        for trigger in TriggerType::ALL {
            assert_eq!(serde_json::to_value(trigger).unwrap(), trigger.as_str());
        }
        for action in ActionType::ALL {
            assert_eq!(serde_json::to_value(action).unwrap(), action.as_str());
        }
        for effect in EffectType::ALL {
            assert_eq!(serde_json::to_value(effect).unwrap(), effect.as_str());
        }
    }
}
