//! Input Aggregator: keyboard + gamepad → один нормализованный action set
//!
//! Flow:
//! 1. Primitive actions (forward/backward/left/right/jump/sprint) трекаются
//!    нативно: нажата любая из bound клавиш.
//! 2. `resolve(action)` отдаёт primitive напрямую, иначе OR по bound клавишам
//!    (сначала virtual keys `Space`/`Shift`/`click`).
//! 3. Сверху OR'ится gamepad сигнал того же action.
//!
//! Stick/trigger значения проходят deadzone *до* превращения в bool и до
//! look response curve.

use bevy::prelude::*;

use super::bindings::{self, ControlBindings};
use super::hardware::{GamepadState, KeyboardState};
use crate::config::PlayerSettings;

/// Movement stick deadzone
pub const STICK_DEADZONE: f32 = 0.15;
/// Deadzone для trigger-кнопок (fire)
pub const TRIGGER_DEADZONE: f32 = 0.10;
/// Экспонента response curve правого stick'а
pub const LOOK_CURVE_EXPONENT: f32 = 1.5;

pub const LOOK_AXIS_X: u32 = 2;
pub const LOOK_AXIS_Y: u32 = 3;

/// Action set одного тика (ephemeral)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct InputFrame {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub fire: bool,
    pub reload: bool,
}

impl InputFrame {
    pub fn is_moving(&self) -> bool {
        self.move_forward || self.move_backward || self.move_left || self.move_right
    }
}

/// Primitive сигналы (трекаются нативно)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Sprint,
}

impl Primitive {
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            bindings::FORWARD => Some(Self::Forward),
            bindings::BACKWARD => Some(Self::Backward),
            bindings::LEFT => Some(Self::Left),
            bindings::RIGHT => Some(Self::Right),
            bindings::JUMP => Some(Self::Jump),
            bindings::SPRINT => Some(Self::Sprint),
            _ => None,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Forward => bindings::FORWARD,
            Self::Backward => bindings::BACKWARD,
            Self::Left => bindings::LEFT,
            Self::Right => bindings::RIGHT,
            Self::Jump => bindings::JUMP,
            Self::Sprint => bindings::SPRINT,
        }
    }
}

/// `|v| > deadzone ? v : 0`
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() > deadzone {
        value
    } else {
        0.0
    }
}

/// Look response curve: `sign(v) * |v|^1.5 * sensitivity`, negated if inverted
pub fn apply_curve(value: f32, sensitivity: f32, invert: bool) -> f32 {
    let curved = value.signum() * value.abs().powf(LOOK_CURVE_EXPONENT) * sensitivity;
    if invert {
        -curved
    } else {
        curved
    }
}

/// Read-only view на hardware state одного тика
pub struct InputAggregator<'a> {
    bindings: &'a ControlBindings,
    keyboard: &'a KeyboardState,
    gamepad: Option<&'a GamepadState>,
}

impl<'a> InputAggregator<'a> {
    pub fn new(
        bindings: &'a ControlBindings,
        keyboard: &'a KeyboardState,
        gamepad: Option<&'a GamepadState>,
    ) -> Self {
        Self {
            bindings,
            keyboard,
            gamepad,
        }
    }

    /// Активен ли `action` в этом тике (keyboard OR gamepad)
    ///
    /// Неизвестный action или нет hardware → `false`.
    pub fn resolve(&self, action: &str) -> bool {
        self.keyboard_signal(action) || self.gamepad_signal(action)
    }

    /// Full action set for this tick
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            move_forward: self.resolve(bindings::FORWARD),
            move_backward: self.resolve(bindings::BACKWARD),
            move_left: self.resolve(bindings::LEFT),
            move_right: self.resolve(bindings::RIGHT),
            jump: self.resolve(bindings::JUMP),
            sprint: self.resolve(bindings::SPRINT),
            fire: self.resolve(bindings::PRIMARY_ACTION),
            reload: self.resolve(bindings::RELOAD),
        }
    }

    /// Look delta правого stick'а (радианы за кадр): сначала deadzone, потом curve
    pub fn look_axes(&self, settings: &PlayerSettings) -> Vec2 {
        let Some(pad) = self.gamepad else {
            return Vec2::ZERO;
        };
        let x = apply_deadzone(pad.axis(LOOK_AXIS_X), STICK_DEADZONE);
        let y = apply_deadzone(pad.axis(LOOK_AXIS_Y), STICK_DEADZONE);
        Vec2::new(
            apply_curve(x, settings.gamepad_sensitivity_x, settings.invert_x),
            apply_curve(y, settings.gamepad_sensitivity_y, settings.invert_y),
        )
    }

    fn keyboard_signal(&self, action: &str) -> bool {
        if let Some(primitive) = Primitive::from_action(action) {
            return self.primitive_keys(primitive);
        }

        let Some(binding) = self.bindings.get(action) else {
            return false;
        };
        binding.keyboard.iter().any(|key| self.key_signal(key))
    }

    fn key_signal(&self, key: &str) -> bool {
        match key {
            bindings::VIRTUAL_SPACE => self.primitive_keys(Primitive::Jump),
            bindings::VIRTUAL_SHIFT => self.primitive_keys(Primitive::Sprint),
            bindings::VIRTUAL_CLICK => self.keyboard.pointer_primary,
            raw => self.keyboard.is_pressed(raw),
        }
    }

    fn primitive_keys(&self, primitive: Primitive) -> bool {
        self.bindings
            .get(primitive.action())
            .map(|binding| binding.keyboard.iter().any(|key| self.keyboard.is_pressed(key)))
            .unwrap_or(false)
    }

    fn gamepad_index(&self, action: &str) -> Option<u32> {
        self.bindings
            .get(action)
            .and_then(|binding| binding.gamepad)
            .or_else(|| bindings::default_gamepad_index(action))
    }

    fn gamepad_signal(&self, action: &str) -> bool {
        let Some(pad) = self.gamepad else {
            return false;
        };
        let Some(index) = self.gamepad_index(action) else {
            return false;
        };

        let axis = || apply_deadzone(pad.axis(index), STICK_DEADZONE);
        match action {
            bindings::FORWARD | bindings::LEFT => axis() < 0.0,
            bindings::BACKWARD | bindings::RIGHT => axis() > 0.0,
            bindings::PRIMARY_ACTION => pad.button(index).value > TRIGGER_DEADZONE,
            _ => pad.button(index).pressed,
        }
    }
}
