//! Client code compiler.
//!
//! Compiles an [`InteractionRegistry`] into a self-contained JavaScript
//! controller for the browser or Electron renderer. The generated class takes
//! the pet element, inlines the document of enabled interactions, registers
//! exactly one set of native listeners per trigger in use, and on every event
//! runs all matching interactions in registration order:
//!
//! 1. play the sound (when enabled and a file is set)
//! 2. apply the visual effect and schedule its reset after `duration`
//! 3. run the action from a fixed dispatch table
//! 4. show the feedback message, if any
//!
//! # Example
//!
//! ```ignore
//! use petgen::codegen::CodegenOptions;
//!
//! let js = registry.generate_client_code(&CodegenOptions::default());
//! std::fs::write("pet_interactions.js", js)?;
//! ```

pub mod binding;
pub mod writer;

pub use binding::{bindings_for, Binding, Listener, ListenerTarget, NativeEvent};
pub use writer::JsWriter;

use serde::{Deserialize, Serialize};

use crate::models::{ActionType, EffectType, Interaction};
use crate::registry::{ConfigDocument, InteractionRegistry};

/// Default long-press delay in milliseconds.
pub const DEFAULT_LONG_PRESS_DELAY_MS: u32 = 800;

/// Default name of the generated controller class.
pub const DEFAULT_CLASS_NAME: &str = "PetInteractionSystem";

/// How the controller class is exposed by the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Plain class declaration for `<script>` tags and content scripts
    #[default]
    Script,
    /// `export default` for bundlers and `<script type="module">`
    Esm,
    /// `module.exports` for Electron renderers with node integration
    Commonjs,
}

/// Options controlling client code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenOptions {
    /// Name of the generated class
    pub class_name: String,
    /// Hold time before a long press fires
    pub long_press_delay_ms: u32,
    /// How the class is exported
    pub module_format: ModuleFormat,
    /// Append a usage example comment
    pub usage_comment: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            long_press_delay_ms: DEFAULT_LONG_PRESS_DELAY_MS,
            module_format: ModuleFormat::Script,
            usage_comment: true,
        }
    }
}

/// Check that `name` is usable as a JavaScript class name.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Compiles registries into client controllers.
#[derive(Debug, Clone, Default)]
pub struct ClientCodeGenerator {
    options: CodegenOptions,
}

impl ClientCodeGenerator {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Generate the controller module for the enabled interactions of `registry`.
    pub fn generate(&self, registry: &InteractionRegistry) -> String {
        let enabled: Vec<&Interaction> = registry.enabled().collect();
        let bindings = bindings_for(enabled.iter().copied());

        for interaction in &enabled {
            if interaction.action == ActionType::MovePosition
                && !(interaction.params.contains_key("x") && interaction.params.contains_key("y"))
            {
                tracing::debug!(
                    name = %interaction.name,
                    "move_position without x/y has no dispatch; drag tracking moves the pet"
                );
            }
        }
        tracing::debug!(
            interactions = enabled.len(),
            bindings = bindings.len(),
            "generating client controller"
        );

        let document =
            ConfigDocument { interactions: enabled.iter().map(|i| (*i).clone()).collect() };
        let config_literal = embed_json(&document);

        let mut w = JsWriter::new();
        w.comment("Desktop pet interaction system - generated by petgen");
        w.comment("Regenerate from the interaction document instead of editing by hand");
        w.blank();

        let header = match self.options.module_format {
            ModuleFormat::Esm => format!("export default class {}", self.options.class_name),
            ModuleFormat::Script | ModuleFormat::Commonjs => {
                format!("class {}", self.options.class_name)
            }
        };

        w.block(header, |w| {
            self.write_constructor(w);
            w.blank();
            write_lifecycle(w, &config_literal);
            w.blank();
            write_listener_setup(w, &bindings);
            for binding in &bindings {
                w.blank();
                write_binding_handlers(w, *binding);
            }
            w.blank();
            write_long_press_cancel(w);
            w.blank();
            write_dispatch(w);
            w.blank();
            write_effects(w);
            w.blank();
            write_helpers(w);
        });

        if self.options.module_format == ModuleFormat::Commonjs {
            w.blank();
            w.line(format!("module.exports = {};", self.options.class_name));
        }

        if self.options.usage_comment {
            w.blank();
            w.comment("Usage:");
            w.comment("const pet = document.getElementById('desktop-pet');");
            w.comment(format!("const interactionSystem = new {}(pet);", self.options.class_name));
        }

        w.finish()
    }

    fn write_constructor(&self, w: &mut JsWriter) {
        let delay = self.options.long_press_delay_ms;
        w.block("constructor(petElement)", |w| {
            w.line("this.pet = petElement;");
            w.line("this.interactions = [];");
            w.line("this.listeners = [];");
            w.line("this.longPressTimer = null;");
            w.line(format!("this.longPressDelay = {};", delay));
            w.line("this.isDragging = false;");
            w.line("this.dragOffset = { x: 0, y: 0 };");
            w.line("this.init();");
        });
    }
}

/// Serialize the document for inlining into a script.
///
/// `</` is escaped so the module can be pasted into an HTML `<script>` tag.
fn embed_json(document: &ConfigDocument) -> String {
    serde_json::to_string_pretty(document)
        .unwrap_or_else(|_| String::from("{\"interactions\": []}"))
        .replace("</", "<\\/")
}

fn write_lifecycle(w: &mut JsWriter, config_literal: &str) {
    w.block("init()", |w| {
        w.line("this.loadInteractions();");
        w.line("this.setupEventListeners();");
    });
    w.blank();
    w.block("loadInteractions()", |w| {
        w.multiline("const config = ", config_literal, ";");
        w.line("this.interactions = config.interactions.filter((interaction) => interaction.enabled);");
    });
    w.blank();
    w.block("listen(target, type, handler)", |w| {
        w.line("target.addEventListener(type, handler);");
        w.line("this.listeners.push({ target, type, handler });");
    });
    w.blank();
    w.block("destroy()", |w| {
        w.line("this.cancelLongPress();");
        w.line("this.isDragging = false;");
        w.line(
            "this.listeners.forEach(({ target, type, handler }) => target.removeEventListener(type, handler));",
        );
        w.line("this.listeners = [];");
    });
}

fn write_listener_setup(w: &mut JsWriter, bindings: &[Binding]) {
    w.block("setupEventListeners()", |w| {
        for binding in bindings {
            for listener in binding.listeners() {
                let target = match listener.target {
                    ListenerTarget::Pet => "this.pet",
                    ListenerTarget::Document => "document",
                };
                w.line(format!(
                    "this.listen({}, '{}', (e) => this.{}(e));",
                    target,
                    listener.event.dom_name(),
                    listener.handler
                ));
            }
        }
    });
}

/// JavaScript array literal of the triggers a binding dispatches.
fn trigger_list(binding: Binding) -> String {
    let quoted: Vec<String> =
        binding.triggers().iter().map(|t| format!("'{}'", t.as_str())).collect();
    format!("[{}]", quoted.join(", "))
}

fn write_binding_handlers(w: &mut JsWriter, binding: Binding) {
    let triggers = trigger_list(binding);
    match binding {
        Binding::Click => {
            w.block("handleClick(event)", |w| {
                w.line(format!("this.executeInteractions({}, event);", triggers));
            });
        }
        Binding::DoubleClick => {
            w.block("handleDoubleClick(event)", |w| {
                w.line(format!("this.executeInteractions({}, event);", triggers));
            });
        }
        Binding::RightClick => {
            w.block("handleRightClick(event)", |w| {
                w.line("event.preventDefault();");
                w.line(format!("this.executeInteractions({}, event);", triggers));
            });
        }
        Binding::PointerEnter => {
            w.block("handleMouseEnter(event)", |w| {
                w.line(format!("this.executeInteractions({}, event);", triggers));
            });
        }
        Binding::PointerLeave => {
            w.block("handleMouseLeave(event)", |w| {
                w.line(format!("this.executeInteractions({}, event);", triggers));
            });
        }
        Binding::Drag => {
            w.block("startDrag(event)", |w| {
                w.line("if (event.button !== 0) return;");
                w.line("this.isDragging = true;");
                w.line("const rect = this.pet.getBoundingClientRect();");
                w.line("this.dragOffset.x = event.clientX - rect.left;");
                w.line("this.dragOffset.y = event.clientY - rect.top;");
                w.line("this.pet.style.cursor = 'grabbing';");
            });
            w.blank();
            w.block("moveDrag(event)", |w| {
                w.line("if (!this.isDragging) return;");
                w.line(format!("this.executeInteractions({}, event);", triggers));
                w.line("this.moveTo(event.clientX - this.dragOffset.x, event.clientY - this.dragOffset.y);");
            });
            w.blank();
            w.block("endDrag(event)", |w| {
                w.line("if (!this.isDragging) return;");
                w.line("this.isDragging = false;");
                w.line("this.pet.style.cursor = 'grab';");
            });
        }
        Binding::LongPress => {
            w.block("startLongPress(event)", |w| {
                w.line("if (event.button !== 0) return;");
                w.line("this.cancelLongPress();");
                w.block_with_close("this.longPressTimer = setTimeout(() =>", "}, this.longPressDelay);", |w| {
                    w.line("this.longPressTimer = null;");
                    w.line(format!("this.executeInteractions({}, event);", triggers));
                });
            });
        }
    }
}

fn write_long_press_cancel(w: &mut JsWriter) {
    w.block("cancelLongPress()", |w| {
        w.block("if (this.longPressTimer !== null)", |w| {
            w.line("clearTimeout(this.longPressTimer);");
            w.line("this.longPressTimer = null;");
        });
    });
}

/// Statement run for `action` inside `executeAction`.
fn action_statement(action: ActionType) -> &'static str {
    match action {
        ActionType::PlaySound => {
            "if (params.soundFile) this.playSound(params.soundFile, params.volume ?? 1.0);"
        }
        ActionType::ChangeAnimation => "if (params.animation) this.changeAnimation(params.animation);",
        ActionType::ShowText => "if (params.text) this.showText(params.text, params.duration || 2000);",
        ActionType::ToggleFullscreen => "this.toggleFullscreen();",
        ActionType::ChangeSkin => "if (params.skin) this.changeSkin(params.skin);",
        ActionType::MovePosition => {
            "if (params.x !== undefined && params.y !== undefined) this.moveTo(params.x, params.y);"
        }
        ActionType::ShowTooltip => "if (params.text) this.showTooltip(params.text);",
        ActionType::GlowEffect => "this.glow(effect ? effect.duration : 300);",
        ActionType::ShowMenu => "this.showContextMenu(event, params.menu || []);",
        ActionType::Hide => "this.hidePet();",
        ActionType::OpenSettings => "this.emit('open-settings', params);",
        ActionType::Exit => "this.emit('exit', params);",
        ActionType::SleepMode => "this.enterSleepMode();",
        ActionType::Bounce => "this.bounce();",
        ActionType::Spin => "this.spin();",
        ActionType::Shake => "this.shake();",
    }
}

fn write_dispatch(w: &mut JsWriter) {
    w.block("executeInteractions(triggers, event)", |w| {
        w.block_with_close("this.interactions.forEach((interaction) =>", "});", |w| {
            w.block("if (interaction.enabled && triggers.includes(interaction.trigger))", |w| {
                w.line("this.executeAction(interaction, event);");
            });
        });
    });
    w.blank();
    w.block("executeAction(interaction, event)", |w| {
        w.line("const { action, effect, sound, feedback } = interaction;");
        w.line("const params = interaction.params || {};");
        w.blank();
        w.block("if (sound && sound.enabled && sound.file)", |w| {
            w.line("this.playSound(sound.file, sound.volume);");
        });
        w.blank();
        w.line("this.applyVisualEffect(effect);");
        w.blank();
        w.block("switch (action)", |w| {
            for action in ActionType::ALL {
                w.line(format!("case '{}':", action.as_str()));
                w.line(format!("  {}", action_statement(action)));
                w.line("  break;");
            }
            w.line("default:");
            w.line("  console.debug('Unsupported pet action:', action);");
        });
        w.blank();
        w.block("if (feedback && feedback.message)", |w| {
            w.line("this.showFeedback(feedback.message);");
        });
    });
}

/// Statements applying and resetting an effect; `None` for no treatment.
fn effect_statements(effect: EffectType) -> Option<(&'static str, &'static str)> {
    match effect {
        EffectType::None => None,
        EffectType::Fade => Some(("this.pet.style.opacity = '0.5';", "this.pet.style.opacity = '';")),
        EffectType::Scale => {
            Some(("this.pet.style.transform = 'scale(1.2)';", "this.pet.style.transform = '';"))
        }
        EffectType::Rotate => {
            Some(("this.pet.style.transform = 'rotate(360deg)';", "this.pet.style.transform = '';"))
        }
        EffectType::Glow => Some((
            "this.pet.style.filter = `drop-shadow(0 0 10px ${params.color || 'rgba(255, 255, 255, 0.8)'})`;",
            "this.pet.style.filter = 'none';",
        )),
        EffectType::Shake => Some((
            "this.pet.classList.add('shake-animation');",
            "this.pet.classList.remove('shake-animation');",
        )),
        EffectType::Bounce => Some((
            "this.pet.classList.add('bounce-animation');",
            "this.pet.classList.remove('bounce-animation');",
        )),
        EffectType::Pulse => {
            Some(("this.pet.style.transform = 'scale(1.1)';", "this.pet.style.transform = '';"))
        }
        EffectType::Ripple => Some((
            "this.pet.classList.add('ripple-animation');",
            "this.pet.classList.remove('ripple-animation');",
        )),
    }
}

fn write_effects(w: &mut JsWriter) {
    w.block("applyVisualEffect(effect)", |w| {
        w.line("if (!effect || effect.type === 'none') return;");
        w.blank();
        w.line("const { type, duration, easing } = effect;");
        w.line("const params = effect.params || {};");
        w.line("this.pet.style.transition = `all ${duration}ms ${easing}`;");
        w.blank();
        w.block("switch (type)", |w| {
            for effect in EffectType::ALL {
                let Some((apply, reset)) = effect_statements(effect) else {
                    continue;
                };
                w.line(format!("case '{}':", effect.as_str()));
                w.line(format!("  {}", apply));
                w.line(format!("  setTimeout(() => {{ {} }}, duration);", reset));
                w.line("  break;");
            }
            w.line("default:");
            w.line("  console.debug('Unsupported pet effect:', type);");
        });
    });
}

fn write_helpers(w: &mut JsWriter) {
    w.block("playSound(file, volume = 1.0)", |w| {
        w.line("const audio = new Audio(file);");
        w.line("audio.volume = volume;");
        w.line("audio.play().catch((e) => console.warn('Unable to play sound:', e));");
    });
    w.blank();
    w.block("changeAnimation(animation)", |w| {
        w.line("this.pet.className = `pet-animation-${animation}`;");
    });
    w.blank();
    w.block("showText(text, duration)", |w| {
        w.line("const bubble = document.createElement('div');");
        w.line("bubble.className = 'speech-bubble';");
        w.line("bubble.textContent = text;");
        w.line("this.pet.appendChild(bubble);");
        w.line("setTimeout(() => bubble.remove(), duration);");
    });
    w.blank();
    w.block("showTooltip(text)", |w| {
        w.line("this.pet.title = text;");
    });
    w.blank();
    w.block("toggleFullscreen()", |w| {
        w.block("if (document.fullscreenElement)", |w| {
            w.line("document.exitFullscreen();");
        });
        w.block("else if (this.pet.requestFullscreen)", |w| {
            w.line("this.pet.requestFullscreen();");
        });
    });
    w.blank();
    w.block("changeSkin(skin)", |w| {
        w.line("this.pet.dataset.skin = skin;");
    });
    w.blank();
    w.block("moveTo(x, y)", |w| {
        w.line("this.pet.style.left = x + 'px';");
        w.line("this.pet.style.top = y + 'px';");
    });
    w.blank();
    w.block("glow(duration)", |w| {
        w.line("this.pet.style.filter = 'drop-shadow(0 0 10px rgba(255, 255, 255, 0.8))';");
        w.line("setTimeout(() => { this.pet.style.filter = 'none'; }, duration);");
    });
    w.blank();
    w.block("showContextMenu(event, items)", |w| {
        w.line("this.emit('menu', { items, x: event.clientX, y: event.clientY });");
    });
    w.blank();
    w.block("hidePet()", |w| {
        w.line("this.pet.style.opacity = '0';");
    });
    w.blank();
    w.block("enterSleepMode()", |w| {
        w.line("this.pet.classList.add('sleeping');");
    });
    w.blank();
    w.block("bounce()", |w| {
        w.line("this.pet.classList.add('bounce-animation');");
        w.line("setTimeout(() => this.pet.classList.remove('bounce-animation'), 600);");
    });
    w.blank();
    w.block("spin()", |w| {
        w.line("this.pet.style.transform = 'rotate(360deg)';");
        w.line("setTimeout(() => { this.pet.style.transform = 'rotate(0deg)'; }, 500);");
    });
    w.blank();
    w.block("shake()", |w| {
        w.line("this.pet.classList.add('shake-animation');");
        w.line("setTimeout(() => this.pet.classList.remove('shake-animation'), 500);");
    });
    w.blank();
    w.block("emit(name, detail)", |w| {
        w.line("this.pet.dispatchEvent(new CustomEvent(`pet:${name}`, { detail, bubbles: true }));");
    });
    w.blank();
    w.block("showFeedback(message)", |w| {
        w.line("this.emit('feedback', { message });");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FeedbackConfig, Interaction, SoundEffect, TriggerType, VisualEffect,
    };

    fn rule(name: &str, trigger: TriggerType, action: ActionType) -> Interaction {
        Interaction::new(name, trigger, action, VisualEffect::new(EffectType::Bounce))
    }

    fn generate(registry: &InteractionRegistry) -> String {
        registry.generate_client_code(&CodegenOptions::default())
    }

    #[test]
    fn test_one_listener_per_trigger() {
        let registry: InteractionRegistry = ["a", "b", "c"]
            .into_iter()
            .map(|n| rule(n, TriggerType::Click, ActionType::Bounce))
            .collect();
        let js = generate(&registry);
        assert_eq!(js.matches("'click', (e) => this.handleClick(e)").count(), 1);
        assert!(js.contains("handleClick(event) {"));
        assert!(!js.contains("handleDoubleClick"));
    }

    #[test]
    fn test_hover_and_mouse_enter_single_listener() {
        let registry: InteractionRegistry = [
            rule("h", TriggerType::Hover, ActionType::GlowEffect),
            rule("m", TriggerType::MouseEnter, ActionType::ShowText),
        ]
        .into_iter()
        .collect();
        let js = generate(&registry);
        assert_eq!(js.matches("'mouseenter'").count(), 1);
        assert!(js.contains("this.executeInteractions(['mouse_enter', 'hover'], event);"));
    }

    #[test]
    fn test_drag_and_long_press_expansion() {
        let registry: InteractionRegistry = [
            rule("d", TriggerType::Drag, ActionType::MovePosition),
            rule("l", TriggerType::LongPress, ActionType::SleepMode),
        ]
        .into_iter()
        .collect();
        let js = generate(&registry);
        assert!(js.contains("this.listen(this.pet, 'mousedown', (e) => this.startDrag(e));"));
        assert!(js.contains("this.listen(document, 'mousemove', (e) => this.moveDrag(e));"));
        assert!(js.contains("this.listen(document, 'mouseup', (e) => this.endDrag(e));"));
        assert!(js.contains("this.listen(this.pet, 'mousedown', (e) => this.startLongPress(e));"));
        assert!(js.contains("this.listen(this.pet, 'mouseup', (e) => this.cancelLongPress(e));"));
        assert!(js.contains("this.listen(this.pet, 'mouseleave', (e) => this.cancelLongPress(e));"));
        assert!(js.contains("this.longPressDelay = 800;"));
        assert!(js.contains("this.dragOffset = { x: 0, y: 0 };"));
    }

    #[test]
    fn test_disabled_interactions_omitted() {
        let mut registry = InteractionRegistry::new();
        registry.add(rule("visible", TriggerType::Click, ActionType::Bounce));
        registry.add(rule("hidden", TriggerType::RightClick, ActionType::ShowMenu).disabled());
        let js = generate(&registry);
        assert!(js.contains("\"visible\""));
        assert!(!js.contains("\"hidden\""));
        assert!(!js.contains("'contextmenu'"));

        registry.enable("hidden");
        let js = generate(&registry);
        assert!(js.contains("\"hidden\""));
        assert!(js.contains("this.listen(this.pet, 'contextmenu', (e) => this.handleRightClick(e));"));
    }

    #[test]
    fn test_dispatch_table_covers_every_action() {
        let js = generate(&InteractionRegistry::new());
        for action in ActionType::ALL {
            assert!(js.contains(&format!("case '{}':", action.as_str())), "missing {}", action);
        }
        assert!(js.contains("console.debug('Unsupported pet action:', action);"));
    }

    #[test]
    fn test_effect_switch_skips_none() {
        let js = generate(&InteractionRegistry::new());
        assert!(!js.contains("case 'none':"));
        for effect in EffectType::ALL.iter().filter(|e| **e != EffectType::None) {
            assert!(js.contains(&format!("case '{}':", effect.as_str())));
        }
    }

    #[test]
    fn test_embedded_config_is_parseable() {
        let mut registry = InteractionRegistry::new();
        registry.add(
            rule("click_bounce", TriggerType::Click, ActionType::Bounce)
                .with_sound(SoundEffect::file("sounds/click.mp3", 0.5))
                .with_feedback(FeedbackConfig::message("</script> ok")),
        );
        let js = generate(&registry);
        let start = js.find("const config = ").unwrap() + "const config = ".len();
        let end = start + js[start..].find("};").unwrap() + 1;
        let literal = js[start..end].replace("<\\/", "</");
        let parsed: serde_json::Value = serde_json::from_str(&literal).unwrap();
        assert_eq!(parsed["interactions"][0]["name"], "click_bounce");
        assert!(!js.contains("</script>"));
    }

    #[test]
    fn test_module_formats_and_options() {
        let mut registry = InteractionRegistry::new();
        registry.add(rule("a", TriggerType::Click, ActionType::Bounce));

        let options = CodegenOptions {
            class_name: "Buddy".to_string(),
            long_press_delay_ms: 1200,
            module_format: ModuleFormat::Esm,
            usage_comment: false,
        };
        let js = registry.generate_client_code(&options);
        assert!(js.contains("export default class Buddy {"));
        assert!(js.contains("this.longPressDelay = 1200;"));
        assert!(!js.contains("// Usage:"));

        let options = CodegenOptions { module_format: ModuleFormat::Commonjs, ..Default::default() };
        let js = registry.generate_client_code(&options);
        assert!(js.contains("module.exports = PetInteractionSystem;"));
        assert!(js.contains("// const interactionSystem = new PetInteractionSystem(pet);"));
    }

    #[test]
    fn test_generation_is_deterministic_and_balanced() {
        let registry: InteractionRegistry = TriggerType::ALL
            .into_iter()
            .enumerate()
            .map(|(i, t)| rule(&format!("r{}", i), t, ActionType::ALL[i]))
            .collect();
        let first = generate(&registry);
        assert_eq!(first, generate(&registry));
        assert_eq!(first.matches('{').count(), first.matches('}').count());
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("PetInteractionSystem"));
        assert!(is_valid_identifier("_pet$1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1Pet"));
        assert!(!is_valid_identifier("my-pet"));
    }

    /// Lines of the method declared as `header`, including its braces, with
    /// the method's own indentation removed.
    fn method_lines(js: &str, header: &str) -> Vec<String> {
        let open = format!("{} {{", header);
        let mut lines = js.lines().skip_while(|line| line.trim_start() != open);
        let first = lines.next().unwrap_or_else(|| panic!("no method {}", header));
        let indent = &first[..first.len() - first.trim_start().len()];
        let close = format!("{}}}", indent);
        let mut body = vec![first.trim_start().to_string()];
        for line in lines {
            body.push(line.strip_prefix(indent).unwrap_or(line).to_string());
            if line == close {
                return body;
            }
        }
        panic!("unterminated method {}", header);
    }

    #[test]
    fn test_dispatch_runs_matching_rules_in_order() {
        let registry: InteractionRegistry = [
            rule("h", TriggerType::Hover, ActionType::GlowEffect),
            rule("m", TriggerType::MouseEnter, ActionType::ShowText),
        ]
        .into_iter()
        .collect();
        let js = generate(&registry);
        assert_eq!(
            method_lines(&js, "executeInteractions(triggers, event)"),
            [
                "executeInteractions(triggers, event) {",
                "  this.interactions.forEach((interaction) => {",
                "    if (interaction.enabled && triggers.includes(interaction.trigger)) {",
                "      this.executeAction(interaction, event);",
                "    }",
                "  });",
                "}",
            ]
        );
        assert_eq!(
            method_lines(&js, "handleMouseEnter(event)"),
            [
                "handleMouseEnter(event) {",
                "  this.executeInteractions(['mouse_enter', 'hover'], event);",
                "}",
            ]
        );
        assert!(js.contains(
            "this.interactions = config.interactions.filter((interaction) => interaction.enabled);"
        ));
    }

    #[test]
    fn test_long_press_timer_and_cancel_structure() {
        let registry: InteractionRegistry =
            [rule("sleep", TriggerType::LongPress, ActionType::SleepMode)].into_iter().collect();
        let js = generate(&registry);
        assert_eq!(
            method_lines(&js, "startLongPress(event)"),
            [
                "startLongPress(event) {",
                "  if (event.button !== 0) return;",
                "  this.cancelLongPress();",
                "  this.longPressTimer = setTimeout(() => {",
                "    this.longPressTimer = null;",
                "    this.executeInteractions(['long_press'], event);",
                "  }, this.longPressDelay);",
                "}",
            ]
        );
        assert_eq!(
            method_lines(&js, "cancelLongPress()"),
            [
                "cancelLongPress() {",
                "  if (this.longPressTimer !== null) {",
                "    clearTimeout(this.longPressTimer);",
                "    this.longPressTimer = null;",
                "  }",
                "}",
            ]
        );
        assert!(js.contains("this.longPressDelay = 800;"));
    }

    #[test]
    fn test_handler_trigger_lists_match_runtime_bindings() {
        let registry: InteractionRegistry = TriggerType::ALL
            .into_iter()
            .enumerate()
            .map(|(i, t)| rule(&format!("r{}", i), t, ActionType::Bounce))
            .collect();
        let js = generate(&registry);
        for binding in bindings_for(registry.iter()) {
            let call = format!("this.executeInteractions({}, event);", trigger_list(binding));
            assert!(js.contains(&call), "missing dispatch {}", call);
        }
    }
}
