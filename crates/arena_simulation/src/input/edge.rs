//! Edge detection для дискретных triggers (нажатие fire/reload)
//!
//! Вместо add/remove key-down listeners: каждый тик детектор получает
//! текущий sample и запоминает его до следующего.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    /// Sample этого тика; `true` только на переходе false → true
    pub fn rising(&mut self, sample: bool) -> bool {
        let edge = sample && !self.previous;
        self.previous = sample;
        edge
    }
}

/// Дискретные triggers локального игрока в текущем тике
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct InputTriggers {
    /// Fire нажат в этом тике (rising edge)
    pub fire_pressed: bool,
    /// Reload нажат в этом тике (rising edge)
    pub reload_pressed: bool,
    /// Aim lock (pointer/gamepad) при закрытом settings menu
    pub aim_locked: bool,
    fire_edge: EdgeDetector,
    reload_edge: EdgeDetector,
}

impl InputTriggers {
    /// Sample this tick's fire/reload levels
    pub fn sample(&mut self, fire: bool, reload: bool, aim_locked: bool) {
        self.fire_pressed = self.fire_edge.rising(fire);
        self.reload_pressed = self.reload_edge.rising(reload);
        self.aim_locked = aim_locked;
    }
}
