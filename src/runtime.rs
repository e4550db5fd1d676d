//! Event semantics of the generated client controller, modelled in Rust.
//!
//! [`PetRuntime`] replays native pointer events against a registry over a
//! virtual millisecond clock and reports which interactions fire. It shares
//! the binding table with the compiler, so an event the generated code would
//! not listen for is ignored here too.

use std::str::FromStr;

use crate::codegen::binding::{bindings_for, Binding, NativeEvent};
use crate::codegen::DEFAULT_LONG_PRESS_DELAY_MS;
use crate::models::{ActionType, EffectType, Interaction, TriggerType};
use crate::registry::InteractionRegistry;

/// One interaction firing.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// Virtual time at which the interaction ran
    pub at_ms: u64,
    pub name: String,
    pub trigger: TriggerType,
    pub action: ActionType,
    pub effect: EffectType,
    /// Sound file played, if the sound cue was enabled and set
    pub sound: Option<String>,
    /// Feedback message shown, if any
    pub message: Option<String>,
}

impl Activation {
    fn new(interaction: &Interaction, at_ms: u64) -> Self {
        let sound = if interaction.sound.enabled { interaction.sound.file.clone() } else { None };
        Self {
            at_ms,
            name: interaction.name.clone(),
            trigger: interaction.trigger,
            action: interaction.action,
            effect: interaction.effect.effect_type,
            sound,
            message: interaction.feedback.message.clone(),
        }
    }
}

/// Replays events against the enabled interactions of a registry.
#[derive(Debug, Clone)]
pub struct PetRuntime {
    interactions: Vec<Interaction>,
    bindings: Vec<Binding>,
    long_press_delay_ms: u64,
    long_press_deadline: Option<u64>,
    dragging: bool,
}

impl PetRuntime {
    /// Snapshot the enabled interactions of `registry`.
    ///
    /// Later registry changes are not observed, matching a compiled module.
    pub fn new(registry: &InteractionRegistry) -> Self {
        let interactions: Vec<Interaction> = registry.enabled().cloned().collect();
        let bindings = bindings_for(&interactions);
        Self {
            interactions,
            bindings,
            long_press_delay_ms: u64::from(DEFAULT_LONG_PRESS_DELAY_MS),
            long_press_deadline: None,
            dragging: false,
        }
    }

    pub fn with_long_press_delay(mut self, delay_ms: u32) -> Self {
        self.long_press_delay_ms = u64::from(delay_ms);
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a long press is armed and has not fired or been cancelled.
    pub fn long_press_pending(&self) -> bool {
        self.long_press_deadline.is_some()
    }

    fn bound(&self, binding: Binding) -> bool {
        self.bindings.contains(&binding)
    }

    /// Deliver a primary-button event at `now_ms`.
    ///
    /// A long press that came due before `now_ms` fires first.
    pub fn handle(&mut self, event: NativeEvent, now_ms: u64) -> Vec<Activation> {
        let mut fired = self.advance(now_ms);

        match event {
            NativeEvent::Click => fired.extend(self.dispatch(Binding::Click, now_ms)),
            NativeEvent::DoubleClick => fired.extend(self.dispatch(Binding::DoubleClick, now_ms)),
            NativeEvent::ContextMenu => fired.extend(self.dispatch(Binding::RightClick, now_ms)),
            NativeEvent::MouseEnter => fired.extend(self.dispatch(Binding::PointerEnter, now_ms)),
            NativeEvent::MouseLeave => {
                fired.extend(self.dispatch(Binding::PointerLeave, now_ms));
                self.cancel_long_press();
            }
            NativeEvent::MouseDown => {
                if self.bound(Binding::Drag) {
                    self.dragging = true;
                }
                if self.bound(Binding::LongPress) {
                    let deadline = now_ms.saturating_add(self.long_press_delay_ms);
                    self.long_press_deadline = Some(deadline);
                }
            }
            NativeEvent::MouseMove => {
                if self.dragging {
                    fired.extend(self.dispatch(Binding::Drag, now_ms));
                }
            }
            NativeEvent::MouseUp => {
                self.dragging = false;
                self.cancel_long_press();
            }
        }

        fired
    }

    /// Advance the clock to `now_ms`, firing a due long press.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Activation> {
        match self.long_press_deadline {
            Some(deadline) if deadline <= now_ms => {
                self.long_press_deadline = None;
                self.dispatch(Binding::LongPress, deadline)
            }
            _ => Vec::new(),
        }
    }

    fn cancel_long_press(&mut self) {
        self.long_press_deadline = None;
    }

    fn dispatch(&self, binding: Binding, at_ms: u64) -> Vec<Activation> {
        if !self.bound(binding) {
            return Vec::new();
        }
        let triggers = binding.triggers();
        self.interactions
            .iter()
            .filter(|i| triggers.contains(&i.trigger))
            .map(|i| Activation::new(i, at_ms))
            .collect()
    }

    /// Run a whole script of steps in order.
    pub fn run_script(&mut self, steps: &[ScriptStep]) -> Vec<Activation> {
        let mut fired = Vec::new();
        for step in steps {
            match step.event {
                Some(event) => fired.extend(self.handle(event, step.at_ms)),
                None => fired.extend(self.advance(step.at_ms)),
            }
        }
        fired
    }
}

/// One step of an event script: an event, or a bare clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    /// `None` only advances the clock
    pub event: Option<NativeEvent>,
    pub at_ms: u64,
}

/// Error parsing an event script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("step '{0}' must look like EVENT@MS")]
    Syntax(String),
    #[error("unknown event '{0}' (expected a DOM mouse event name or 'tick')")]
    UnknownEvent(String),
    #[error("invalid time in step '{0}'")]
    InvalidTime(String),
    #[error("step '{step}' goes back in time (previous step at {previous}ms)")]
    OutOfOrder { step: String, previous: u64 },
}

impl FromStr for ScriptStep {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, time) = s.split_once('@').ok_or_else(|| ScriptError::Syntax(s.to_string()))?;
        let name = name.trim();
        let at_ms = time.trim().parse::<u64>().map_err(|_| ScriptError::InvalidTime(s.to_string()))?;
        let event = if name == "tick" {
            None
        } else {
            Some(NativeEvent::from_dom_name(name).ok_or_else(|| ScriptError::UnknownEvent(name.to_string()))?)
        };
        Ok(Self { event, at_ms })
    }
}

/// Parse a comma-separated script such as `mousedown@0,mouseup@300,tick@900`.
///
/// Times must not decrease.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps: Vec<ScriptStep> = Vec::new();
    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let step: ScriptStep = raw.parse()?;
        if let Some(previous) = steps.last() {
            if step.at_ms < previous.at_ms {
                return Err(ScriptError::OutOfOrder { step: raw.to_string(), previous: previous.at_ms });
            }
        }
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackConfig, SoundEffect, VisualEffect};

    fn rule(name: &str, trigger: TriggerType, action: ActionType) -> Interaction {
        Interaction::new(name, trigger, action, VisualEffect::none())
    }

    fn names(fired: &[Activation]) -> Vec<&str> {
        fired.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_click_fires_in_registration_order() {
        let registry: InteractionRegistry = ["a", "b", "c"]
            .into_iter()
            .map(|n| rule(n, TriggerType::Click, ActionType::Bounce))
            .collect();
        let mut runtime = PetRuntime::new(&registry);
        assert_eq!(names(&runtime.handle(NativeEvent::Click, 0)), ["a", "b", "c"]);
    }

    #[test]
    fn test_long_press_cancelled_by_early_release() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry);

        assert!(runtime.handle(NativeEvent::MouseDown, 0).is_empty());
        assert!(runtime.long_press_pending());
        assert!(runtime.handle(NativeEvent::MouseUp, 799).is_empty());
        assert!(!runtime.long_press_pending());
        assert!(runtime.advance(5_000).is_empty());
    }

    #[test]
    fn test_long_press_cancelled_by_leave() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry);
        runtime.handle(NativeEvent::MouseDown, 0);
        runtime.handle(NativeEvent::MouseLeave, 100);
        assert!(runtime.advance(2_000).is_empty());
    }

    #[test]
    fn test_long_press_fires_once_when_held() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry);
        runtime.handle(NativeEvent::MouseDown, 100);
        assert!(runtime.advance(899).is_empty());
        let fired = runtime.advance(900);
        assert_eq!(names(&fired), ["sleep"]);
        assert_eq!(fired[0].at_ms, 900);
        assert!(runtime.advance(10_000).is_empty());
        assert!(runtime.handle(NativeEvent::MouseUp, 10_001).is_empty());
    }

    #[test]
    fn test_long_press_deadline_saturates_near_clock_end() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry);
        assert!(runtime.handle(NativeEvent::MouseDown, u64::MAX - 10).is_empty());
        assert!(runtime.long_press_pending());
        assert!(runtime.advance(u64::MAX - 1).is_empty());
        let fired = runtime.advance(u64::MAX);
        assert_eq!(names(&fired), ["sleep"]);
        assert_eq!(fired[0].at_ms, u64::MAX);

        let script = format!("mousedown@{},tick@{}", u64::MAX - 10, u64::MAX - 5);
        let steps = parse_script(&script).unwrap();
        assert!(PetRuntime::new(&registry).run_script(&steps).is_empty());
    }

    #[test]
    fn test_repress_rearms_timer() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry).with_long_press_delay(500);
        runtime.handle(NativeEvent::MouseDown, 0);
        runtime.handle(NativeEvent::MouseDown, 400);
        assert!(runtime.advance(500).is_empty());
        assert_eq!(runtime.advance(900).len(), 1);
    }

    #[test]
    fn test_hover_and_mouse_enter_both_fire() {
        let registry: InteractionRegistry = [
            rule("hover", TriggerType::Hover, ActionType::GlowEffect),
            rule("enter", TriggerType::MouseEnter, ActionType::ShowText),
        ]
        .into_iter()
        .collect();
        let mut runtime = PetRuntime::new(&registry);
        assert_eq!(names(&runtime.handle(NativeEvent::MouseEnter, 0)), ["hover", "enter"]);
    }

    #[test]
    fn test_drag_only_fires_while_dragging() {
        let registry: InteractionRegistry =
            [rule("drag_move", TriggerType::Drag, ActionType::MovePosition)].into_iter().collect();
        let mut runtime = PetRuntime::new(&registry);
        assert!(runtime.handle(NativeEvent::MouseMove, 0).is_empty());
        runtime.handle(NativeEvent::MouseDown, 10);
        assert!(runtime.is_dragging());
        assert_eq!(runtime.handle(NativeEvent::MouseMove, 20).len(), 1);
        assert_eq!(runtime.handle(NativeEvent::MouseMove, 30).len(), 1);
        runtime.handle(NativeEvent::MouseUp, 40);
        assert!(runtime.handle(NativeEvent::MouseMove, 50).is_empty());
    }

    #[test]
    fn test_disabled_and_unbound_ignored() {
        let mut registry = InteractionRegistry::new();
        registry.add(rule("off", TriggerType::Click, ActionType::Bounce).disabled());
        let mut runtime = PetRuntime::new(&registry);
        assert!(runtime.handle(NativeEvent::Click, 0).is_empty());
        assert!(runtime.handle(NativeEvent::DoubleClick, 0).is_empty());
        runtime.handle(NativeEvent::MouseDown, 0);
        assert!(!runtime.is_dragging());
    }

    #[test]
    fn test_activation_reports_sound_and_message() {
        let registry: InteractionRegistry = [
            rule("a", TriggerType::Click, ActionType::Bounce)
                .with_sound(SoundEffect::file("sounds/click.mp3", 0.5))
                .with_feedback(FeedbackConfig::message("hi")),
            rule("b", TriggerType::Click, ActionType::Bounce).with_sound(SoundEffect {
                enabled: false,
                file: Some("muted.mp3".to_string()),
                volume: 1.0,
            }),
        ]
        .into_iter()
        .collect();
        let fired = PetRuntime::new(&registry).handle(NativeEvent::Click, 5);
        assert_eq!(fired[0].sound.as_deref(), Some("sounds/click.mp3"));
        assert_eq!(fired[0].message.as_deref(), Some("hi"));
        assert_eq!(fired[1].sound, None);
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script("mousedown@0, mouseup@300,tick@900").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].event, Some(NativeEvent::MouseDown));
        assert_eq!(steps[2].event, None);
        assert_eq!(steps[2].at_ms, 900);

        assert!(matches!(parse_script("click"), Err(ScriptError::Syntax(_))));
        assert!(matches!(parse_script("keydown@1"), Err(ScriptError::UnknownEvent(_))));
        assert!(matches!(parse_script("click@soon"), Err(ScriptError::InvalidTime(_))));
        assert!(matches!(parse_script("click@5,click@1"), Err(ScriptError::OutOfOrder { .. })));
    }

    #[test]
    fn test_run_script() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let steps = parse_script("mousedown@0,mouseup@300,mousedown@1000,tick@1800").unwrap();
        let fired = PetRuntime::new(&registry).run_script(&steps);
        assert_eq!(names(&fired), ["sleep"]);
        assert_eq!(fired[0].at_ms, 1800);
    }
}
