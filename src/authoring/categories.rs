//! The six guided interaction categories
//!
//! Each category asks its own follow-up questions and builds exactly one
//! interaction with a fixed name.

use serde_json::json;

use super::prompt::Prompter;
use super::AuthoringError;
use crate::models::{
    ActionType, EffectType, FeedbackConfig, Interaction, SoundEffect, TriggerType, VisualEffect,
};

const DEFAULT_MENU: [&str; 3] = ["Hide", "Settings", "Exit"];

/// A guided question in the custom flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Click,
    DoubleClick,
    Drag,
    Hover,
    RightClick,
    LongPress,
}

impl Category {
    /// Categories in the order they are asked.
    pub const ALL: [Category; 6] = [
        Category::Click,
        Category::DoubleClick,
        Category::Drag,
        Category::Hover,
        Category::RightClick,
        Category::LongPress,
    ];

    /// The yes/no question that opens the category.
    pub fn question(&self) -> &'static str {
        match self {
            Category::Click => "1. React when the pet is clicked?",
            Category::DoubleClick => "2. Special effect on double click?",
            Category::Drag => "3. Allow dragging the pet around?",
            Category::Hover => "4. Show an effect on mouse hover?",
            Category::RightClick => "5. Show a menu on right click?",
            Category::LongPress => "6. Go to sleep on long press?",
        }
    }

    /// Name of the interaction this category builds.
    pub fn interaction_name(&self) -> &'static str {
        match self {
            Category::Click => "click_interaction",
            Category::DoubleClick => "doubleclick_interaction",
            Category::Drag => "drag_move",
            Category::Hover => "hover_glow",
            Category::RightClick => "rightclick_menu",
            Category::LongPress => "longpress_sleep",
        }
    }

    /// Ask the category's follow-up questions and build its interaction.
    pub fn configure(&self, prompter: &mut dyn Prompter) -> Result<Interaction, AuthoringError> {
        match self {
            Category::Click => configure_click(prompter),
            Category::DoubleClick => configure_double_click(prompter),
            Category::Drag => Ok(drag()),
            Category::Hover => configure_hover(prompter),
            Category::RightClick => configure_right_click(prompter),
            Category::LongPress => Ok(long_press()),
        }
    }
}

/// Sound that plays only when the operator opts in.
fn optional_sound(
    prompter: &mut dyn Prompter,
    file: &str,
    volume: f64,
) -> Result<SoundEffect, AuthoringError> {
    if prompter.ask_yes_no("Play a sound?")? {
        Ok(SoundEffect::file(file, volume))
    } else {
        Ok(SoundEffect { volume, ..SoundEffect::default() })
    }
}

fn configure_click(prompter: &mut dyn Prompter) -> Result<Interaction, AuthoringError> {
    prompter.say("\nConfigure click:")?;
    let choice = prompter.ask_choice(
        "What should happen on click?",
        &["Bounce", "Show text", "Play sound", "Change animation"],
    )?;
    let (action, effect) = match choice {
        0 => (ActionType::Bounce, EffectType::Bounce),
        1 => (ActionType::ShowText, EffectType::Pulse),
        2 => (ActionType::PlaySound, EffectType::Pulse),
        _ => (ActionType::ChangeAnimation, EffectType::Fade),
    };

    let mut interaction = Interaction::new(
        Category::Click.interaction_name(),
        TriggerType::Click,
        action,
        VisualEffect::new(effect).with_duration(400),
    );
    if action == ActionType::ShowText {
        let text = prompter.ask_text("Text to show", "Hello!")?;
        interaction = interaction.with_param("text", text).with_param("duration", 2000);
    }

    let sound = optional_sound(prompter, "sounds/click.mp3", 0.5)?;
    Ok(interaction.with_sound(sound).with_feedback(FeedbackConfig::message("Click!")))
}

fn configure_double_click(prompter: &mut dyn Prompter) -> Result<Interaction, AuthoringError> {
    prompter.say("\nConfigure double click:")?;
    let choice = prompter.ask_choice(
        "What should happen on double click?",
        &["Spin", "Zoom in/out", "Change skin"],
    )?;
    let (action, effect) = match choice {
        0 => (ActionType::Spin, EffectType::Rotate),
        1 => (ActionType::ToggleFullscreen, EffectType::Scale),
        _ => (ActionType::ChangeSkin, EffectType::Fade),
    };

    let sound = optional_sound(prompter, "sounds/spin.mp3", 0.6)?;
    Ok(Interaction::new(
        Category::DoubleClick.interaction_name(),
        TriggerType::DoubleClick,
        action,
        VisualEffect::new(effect).with_duration(500),
    )
    .with_sound(sound)
    .with_feedback(FeedbackConfig::message("Double click!")))
}

fn drag() -> Interaction {
    Interaction::new(
        Category::Drag.interaction_name(),
        TriggerType::Drag,
        ActionType::MovePosition,
        VisualEffect::none(),
    )
    .with_feedback(FeedbackConfig::silent())
}

fn configure_hover(prompter: &mut dyn Prompter) -> Result<Interaction, AuthoringError> {
    prompter.say("\nConfigure hover:")?;
    let choice = prompter.ask_choice(
        "What should happen on hover?",
        &["Glow", "Show tooltip", "Show text"],
    )?;

    let mut interaction = Interaction::new(
        Category::Hover.interaction_name(),
        TriggerType::Hover,
        ActionType::GlowEffect,
        VisualEffect::new(EffectType::Glow).with_duration(300),
    )
    .with_feedback(FeedbackConfig::message("Hover"));

    match choice {
        0 => {}
        1 => {
            let text = prompter.ask_text("Tooltip text", "This is a tooltip")?;
            interaction.action = ActionType::ShowTooltip;
            interaction = interaction.with_param("text", text);
        }
        _ => {
            let text = prompter.ask_text("Text to show", "What are you looking at?")?;
            interaction.action = ActionType::ShowText;
            interaction = interaction.with_param("text", text).with_param("duration", 1500);
        }
    }
    Ok(interaction)
}

fn configure_right_click(prompter: &mut dyn Prompter) -> Result<Interaction, AuthoringError> {
    prompter.say("\nConfigure right-click menu:")?;
    prompter.say(&format!("Default menu items: {}", DEFAULT_MENU.join(", ")))?;

    let mut items: Vec<String> = DEFAULT_MENU.iter().map(|s| s.to_string()).collect();
    if prompter.ask_yes_no("Customize the menu items?")? {
        let answer = prompter.ask_text("Menu items (comma separated)", &DEFAULT_MENU.join(", "))?;
        let custom = parse_menu(&answer);
        if !custom.is_empty() {
            items = custom;
        }
    }

    Ok(Interaction::new(
        Category::RightClick.interaction_name(),
        TriggerType::RightClick,
        ActionType::ShowMenu,
        VisualEffect::none(),
    )
    .with_sound(SoundEffect::file("sounds/menu.mp3", 0.4))
    .with_feedback(FeedbackConfig::message("Menu"))
    .with_param("menu", json!(items)))
}

fn parse_menu(answer: &str) -> Vec<String> {
    answer.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

fn long_press() -> Interaction {
    Interaction::new(
        Category::LongPress.interaction_name(),
        TriggerType::LongPress,
        ActionType::SleepMode,
        VisualEffect::new(EffectType::Fade).with_duration(800),
    )
    .with_sound(SoundEffect::file("sounds/sleep.mp3", 0.3))
    .with_feedback(FeedbackConfig::message("Good night..."))
}
