//! Trigger to native-event binding table.
//!
//! Shared by the client code compiler and the [`crate::runtime`] model so that
//! both agree on which DOM events a trigger listens to and which triggers a
//! DOM event dispatches.

use crate::models::{Interaction, TriggerType};

/// DOM mouse events the generated controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEvent {
    Click,
    DoubleClick,
    ContextMenu,
    MouseEnter,
    MouseLeave,
    MouseDown,
    MouseMove,
    MouseUp,
}

impl NativeEvent {
    pub const ALL: [NativeEvent; 8] = [
        NativeEvent::Click,
        NativeEvent::DoubleClick,
        NativeEvent::ContextMenu,
        NativeEvent::MouseEnter,
        NativeEvent::MouseLeave,
        NativeEvent::MouseDown,
        NativeEvent::MouseMove,
        NativeEvent::MouseUp,
    ];

    /// DOM event name passed to `addEventListener`.
    pub fn dom_name(&self) -> &'static str {
        match self {
            NativeEvent::Click => "click",
            NativeEvent::DoubleClick => "dblclick",
            NativeEvent::ContextMenu => "contextmenu",
            NativeEvent::MouseEnter => "mouseenter",
            NativeEvent::MouseLeave => "mouseleave",
            NativeEvent::MouseDown => "mousedown",
            NativeEvent::MouseMove => "mousemove",
            NativeEvent::MouseUp => "mouseup",
        }
    }

    /// Parse a DOM event name.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(NativeEvent::Click),
            "dblclick" => Some(NativeEvent::DoubleClick),
            "contextmenu" => Some(NativeEvent::ContextMenu),
            "mouseenter" => Some(NativeEvent::MouseEnter),
            "mouseleave" => Some(NativeEvent::MouseLeave),
            "mousedown" => Some(NativeEvent::MouseDown),
            "mousemove" => Some(NativeEvent::MouseMove),
            "mouseup" => Some(NativeEvent::MouseUp),
            _ => None,
        }
    }
}

/// Element a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// The pet element passed to the controller
    Pet,
    /// The whole document, so drags keep tracking outside the pet
    Document,
}

/// One `addEventListener` call of the generated controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub target: ListenerTarget,
    pub event: NativeEvent,
    /// Controller method receiving the event
    pub handler: &'static str,
}

const fn pet(event: NativeEvent, handler: &'static str) -> Listener {
    Listener { target: ListenerTarget::Pet, event, handler }
}

const fn document(event: NativeEvent, handler: &'static str) -> Listener {
    Listener { target: ListenerTarget::Document, event, handler }
}

/// A group of native listeners serving one or more triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Click,
    DoubleClick,
    RightClick,
    /// Serves both `hover` and `mouse_enter`
    PointerEnter,
    PointerLeave,
    Drag,
    LongPress,
}

impl Binding {
    /// Binding that serves `trigger`.
    pub fn for_trigger(trigger: TriggerType) -> Self {
        match trigger {
            TriggerType::Click => Binding::Click,
            TriggerType::DoubleClick => Binding::DoubleClick,
            TriggerType::RightClick => Binding::RightClick,
            TriggerType::Hover | TriggerType::MouseEnter => Binding::PointerEnter,
            TriggerType::MouseLeave => Binding::PointerLeave,
            TriggerType::Drag => Binding::Drag,
            TriggerType::LongPress => Binding::LongPress,
        }
    }

    /// Native listeners registered for this binding.
    pub fn listeners(&self) -> &'static [Listener] {
        const CLICK: &[Listener] = &[pet(NativeEvent::Click, "handleClick")];
        const DOUBLE_CLICK: &[Listener] = &[pet(NativeEvent::DoubleClick, "handleDoubleClick")];
        const RIGHT_CLICK: &[Listener] = &[pet(NativeEvent::ContextMenu, "handleRightClick")];
        const POINTER_ENTER: &[Listener] = &[pet(NativeEvent::MouseEnter, "handleMouseEnter")];
        const POINTER_LEAVE: &[Listener] = &[pet(NativeEvent::MouseLeave, "handleMouseLeave")];
        const DRAG: &[Listener] = &[
            pet(NativeEvent::MouseDown, "startDrag"),
            document(NativeEvent::MouseMove, "moveDrag"),
            document(NativeEvent::MouseUp, "endDrag"),
        ];
        const LONG_PRESS: &[Listener] = &[
            pet(NativeEvent::MouseDown, "startLongPress"),
            pet(NativeEvent::MouseUp, "cancelLongPress"),
            pet(NativeEvent::MouseLeave, "cancelLongPress"),
        ];

        match self {
            Binding::Click => CLICK,
            Binding::DoubleClick => DOUBLE_CLICK,
            Binding::RightClick => RIGHT_CLICK,
            Binding::PointerEnter => POINTER_ENTER,
            Binding::PointerLeave => POINTER_LEAVE,
            Binding::Drag => DRAG,
            Binding::LongPress => LONG_PRESS,
        }
    }

    /// Triggers whose interactions run when this binding dispatches.
    pub fn triggers(&self) -> &'static [TriggerType] {
        match self {
            Binding::Click => &[TriggerType::Click],
            Binding::DoubleClick => &[TriggerType::DoubleClick],
            Binding::RightClick => &[TriggerType::RightClick],
            Binding::PointerEnter => &[TriggerType::MouseEnter, TriggerType::Hover],
            Binding::PointerLeave => &[TriggerType::MouseLeave],
            Binding::Drag => &[TriggerType::Drag],
            Binding::LongPress => &[TriggerType::LongPress],
        }
    }
}

/// Distinct bindings needed by the enabled interactions, in order of first use.
pub fn bindings_for<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> Vec<Binding> {
    let mut bindings = Vec::new();
    for interaction in interactions.into_iter().filter(|i| i.enabled) {
        let binding = Binding::for_trigger(interaction.trigger);
        if !bindings.contains(&binding) {
            bindings.push(binding);
        }
    }
    bindings
}
