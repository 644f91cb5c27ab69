//! Raw hardware snapshots
//!
//! Хост пишет `RawInput` каждый кадр (keyboard + pointer + gamepad).
//! Ядро сэмплит его на границе тика как мгновенное состояние, не как
//! очередь событий.

use bevy::prelude::*;
use std::collections::HashSet;

/// Keyboard + pointer button state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardState {
    pressed: HashSet<String>,
    /// Primary pointer button (LMB / touch)
    pub pointer_primary: bool,
}

impl KeyboardState {
    pub fn press(&mut self, key: &str) {
        self.pressed.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.pressed.remove(key);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.pointer_primary = false;
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadButton {
    pub pressed: bool,
    /// Аналоговое значение (triggers), 0.0..=1.0
    pub value: f32,
}

impl GamepadButton {
    pub fn pressed() -> Self {
        Self { pressed: true, value: 1.0 }
    }

    pub fn analog(value: f32) -> Self {
        Self { pressed: value > 0.5, value }
    }
}

/// Первый подключённый геймпад, standard mapping
///
/// Оси: 0/1 = левый stick x/y, 2/3 = правый stick x/y (y вниз = плюс).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub axes: Vec<f32>,
    pub buttons: Vec<GamepadButton>,
}

impl GamepadState {
    pub fn axis(&self, index: u32) -> f32 {
        self.axes.get(index as usize).copied().unwrap_or(0.0)
    }

    pub fn button(&self, index: u32) -> GamepadButton {
        self.buttons.get(index as usize).copied().unwrap_or_default()
    }

    pub fn set_axis(&mut self, index: u32, value: f32) {
        let index = index as usize;
        if self.axes.len() <= index {
            self.axes.resize(index + 1, 0.0);
        }
        self.axes[index] = value;
    }

    pub fn set_button(&mut self, index: u32, button: GamepadButton) {
        let index = index as usize;
        if self.buttons.len() <= index {
            self.buttons.resize(index + 1, GamepadButton::default());
        }
        self.buttons[index] = button;
    }
}

/// Hardware snapshot, который пишет хост
#[derive(Resource, Debug, Clone, Default)]
pub struct RawInput {
    pub keyboard: KeyboardState,
    /// `None` = геймпад не подключён
    pub gamepad: Option<GamepadState>,
    /// Сдвиг указателя с прошлого кадра (пиксели); забирает camera rig
    pub mouse_delta: Vec2,
    pub pointer_locked: bool,
    /// Settings menu открыт → нет aim lock, нет fire/reload
    pub menu_open: bool,
}

impl RawInput {
    /// Aim lock: pointer захвачен или геймпад в руках, меню закрыто
    pub fn aim_locked(&self) -> bool {
        !self.menu_open && (self.pointer_locked || self.gamepad.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_gamepad_entries_read_as_zero() {
        let pad = GamepadState::default();
        assert_eq!(pad.axis(3), 0.0);
        assert!(!pad.button(7).pressed);
        assert_eq!(pad.button(7).value, 0.0);
    }

    #[test]
    fn test_aim_lock() {
        let mut raw = RawInput::default();
        assert!(!raw.aim_locked());

        raw.pointer_locked = true;
        assert!(raw.aim_locked());

        raw.menu_open = true;
        assert!(!raw.aim_locked());

        raw.menu_open = false;
        raw.pointer_locked = false;
        raw.gamepad = Some(GamepadState::default());
        assert!(raw.aim_locked());
    }
}
